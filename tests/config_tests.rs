//! Configuration file loading tests

use std::io::Write;

use sql2es::config::StaticConfig;

fn write_config(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (dir, path.to_string_lossy().into_owned())
}

#[test]
fn test_load_full_file() {
    let (_dir, path) = write_config(
        r#"
[server]
host = "127.0.0.1"
port = 9200
cpu_count = 2

[logging]
level = "debug"
format = "json"

[geoip]
database_path = "/data/GeoLite2-City.mmdb"
locale = "en"

[report]
enabled = false
"#,
    );

    let config = StaticConfig::try_load_from(&path).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9200);
    assert_eq!(config.server.cpu_count, 2);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.geoip.database_path, "/data/GeoLite2-City.mmdb");
    assert_eq!(config.geoip.locale, "en");
    assert!(!config.report.enabled);
}

#[test]
fn test_missing_sections_use_defaults() {
    let (_dir, path) = write_config("[server]\nport = 8080\n");

    let config = StaticConfig::try_load_from(&path).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.geoip.locale, "zh-CN");
    assert!(config.report.enabled);
}

#[test]
fn test_missing_file_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let config = StaticConfig::try_load_from(&path.to_string_lossy()).unwrap();
    assert_eq!(config.server.port, 456);
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let (_dir, path) = write_config("[server]\nport = \"not a number\"\n");

    assert!(StaticConfig::try_load_from(&path).is_err());
    let config = StaticConfig::load_from(&path);
    assert_eq!(config.server.port, 456);
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.toml");

    let mut config = StaticConfig::default();
    config.server.port = 7001;
    config.logging.file = Some("logs/sql2es.log".to_string());
    config.save_to_file(&path).unwrap();

    let reloaded = StaticConfig::try_load_from(&path.to_string_lossy()).unwrap();
    assert_eq!(reloaded.server.port, 7001);
    assert_eq!(reloaded.logging.file.as_deref(), Some("logs/sql2es.log"));
}
