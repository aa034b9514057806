//! 控制台请求报告
//!
//! 每个请求结束时打印一段装饰性的多行报告：客户端 IP、地理位置、
//! 请求时间和响应内容。报告直接写 stdout，与 tracing 日志相互独立。

use std::io::Write;

use tracing::debug;

use super::geoip::{GeoIpProvider, GeoResult};
use crate::utils::now_formatted;

const TAG: &str = "【日志信息💻】";
const START_BANNER: &str = "--------------------------------------ᕙ(▰ ‿▰ )ᕗ【start】------------------------------------------️";
const END_BANNER: &str = "️--------------------------------------ᕙ(◕ ‿ ◕)ᕗ【end】--------------------------------------------️";

/// 一次请求的日志上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// 已解析的客户端 IP
    pub client_ip: String,
}

/// 请求日志 trait
pub trait RequestLogger: Send + Sync {
    /// 记录一次请求，`message` 为序列化后的响应
    fn log(&self, message: &str, ctx: &RequestContext);

    /// 实现名称，用于启动日志
    fn name(&self) -> &'static str;
}

/// 控制台报告
pub struct ConsoleLogger {
    geoip: GeoIpProvider,
}

impl ConsoleLogger {
    pub fn new(geoip: GeoIpProvider) -> Self {
        Self { geoip }
    }
}

impl RequestLogger for ConsoleLogger {
    fn log(&self, message: &str, ctx: &RequestContext) {
        let geo = self.geoip.lookup(&ctx.client_ip).unwrap_or_default();
        let report = format_report(&ctx.client_ip, &geo, &now_formatted(), message);

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = handle
            .write_all(report.as_bytes())
            .and_then(|_| handle.flush())
        {
            debug!("Failed to write request report: {}", e);
        }
    }

    fn name(&self) -> &'static str {
        "Console"
    }
}

/// 关闭报告时使用
pub struct NullLogger;

impl RequestLogger for NullLogger {
    fn log(&self, _message: &str, _ctx: &RequestContext) {}

    fn name(&self) -> &'static str {
        "Null"
    }
}

/// 生成报告文本，每行后跟一个空行
pub fn format_report(ip: &str, geo: &GeoResult, api_time: &str, message: &str) -> String {
    let lines = [
        format!("{} {}", TAG, START_BANNER),
        format!(
            "{} [用户信息] ⭐️用户IP: {} ⭐️国家: {} ⭐️省份: {} ⭐️城市: {} ⭐️经度: {} ⭐️纬度: {}",
            TAG, ip, geo.country, geo.province, geo.city, geo.lon, geo.lat
        ),
        format!("{} [请求时间]⏰ {}", TAG, api_time),
        format!("{} [请求结果]📁️ {}", TAG, message),
        format!("{} {}", TAG, END_BANNER),
    ];

    lines.iter().map(|line| format!("{}\n\n", line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::services::geoip::{GeoIpLookup, NullGeoProvider};

    struct FixedGeo;

    impl GeoIpLookup for FixedGeo {
        fn lookup(&self, ip: &str) -> Option<GeoResult> {
            (ip == "1.2.3.4").then(|| GeoResult {
                country: "中国".to_string(),
                province: "广东省".to_string(),
                city: "深圳".to_string(),
                district: String::new(),
                lat: 22.5,
                lon: 114.1,
            })
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }
    }

    #[test]
    fn test_format_report_layout() {
        let geo = GeoResult {
            country: "中国".to_string(),
            province: "广东省".to_string(),
            city: "深圳".to_string(),
            district: String::new(),
            lat: 22.5,
            lon: 114.1,
        };
        let report = format_report("1.2.3.4", &geo, "2024-01-01 00:00:00", "{\"code\":200}");

        let lines: Vec<&str> = report.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.starts_with(TAG)));
        assert!(lines[0].contains("【start】"));
        assert!(lines[1].contains("⭐️用户IP: 1.2.3.4"));
        assert!(lines[1].contains("⭐️城市: 深圳"));
        assert!(lines[1].contains("⭐️经度: 114.1 ⭐️纬度: 22.5"));
        assert!(lines[2].ends_with("2024-01-01 00:00:00"));
        assert!(lines[3].ends_with("{\"code\":200}"));
        assert!(lines[4].contains("【end】"));
        assert!(report.ends_with("\n\n"));
    }

    #[test]
    fn test_format_report_with_empty_geo() {
        let report = format_report("10.0.0.1", &GeoResult::default(), "t", "m");
        assert!(report.contains("⭐️国家:  ⭐️省份:  ⭐️城市:  ⭐️经度: 0 ⭐️纬度: 0"));
    }

    #[test]
    fn test_console_logger_never_panics() {
        let ctx = RequestContext {
            client_ip: "1.2.3.4".to_string(),
        };
        ConsoleLogger::new(GeoIpProvider::from_lookup(Arc::new(FixedGeo))).log("{}", &ctx);
        ConsoleLogger::new(GeoIpProvider::from_lookup(Arc::new(NullGeoProvider))).log("{}", &ctx);
        NullLogger.log("{}", &ctx);
    }
}
