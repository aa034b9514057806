use std::fmt;

#[derive(Debug, Clone)]
pub enum Sql2EsError {
    Config(String),
    GeoIp(String),
    Convert(String),
    Serialization(String),
    Io(String),
}

impl Sql2EsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            Sql2EsError::Config(_) => "E001",
            Sql2EsError::GeoIp(_) => "E002",
            Sql2EsError::Convert(_) => "E003",
            Sql2EsError::Serialization(_) => "E004",
            Sql2EsError::Io(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            Sql2EsError::Config(_) => "Configuration Error",
            Sql2EsError::GeoIp(_) => "GeoIP Database Error",
            Sql2EsError::Convert(_) => "SQL Conversion Error",
            Sql2EsError::Serialization(_) => "Serialization Error",
            Sql2EsError::Io(_) => "I/O Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            Sql2EsError::Config(msg)
            | Sql2EsError::GeoIp(msg)
            | Sql2EsError::Convert(msg)
            | Sql2EsError::Serialization(msg)
            | Sql2EsError::Io(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for Sql2EsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for Sql2EsError {}

// 便捷的构造函数
impl Sql2EsError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Sql2EsError::Config(msg.into())
    }

    pub fn geoip<T: Into<String>>(msg: T) -> Self {
        Sql2EsError::GeoIp(msg.into())
    }

    pub fn convert<T: Into<String>>(msg: T) -> Self {
        Sql2EsError::Convert(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Sql2EsError::Io(msg.into())
    }
}

impl From<serde_json::Error> for Sql2EsError {
    fn from(err: serde_json::Error) -> Self {
        Sql2EsError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Sql2EsError {
    fn from(err: std::io::Error) -> Self {
        Sql2EsError::Io(err.to_string())
    }
}

impl From<toml::ser::Error> for Sql2EsError {
    fn from(err: toml::ser::Error) -> Self {
        Sql2EsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Sql2EsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = [
            Sql2EsError::config("x"),
            Sql2EsError::geoip("x"),
            Sql2EsError::convert("x"),
            Sql2EsError::Serialization("x".to_string()),
            Sql2EsError::io("x"),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_format_simple() {
        let err = Sql2EsError::config("missing port");
        assert_eq!(err.format_simple(), "Configuration Error: missing port");
        assert_eq!(err.to_string(), err.format_simple());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Sql2EsError = json_err.into();
        assert_eq!(err.code(), "E004");
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Sql2EsError = io.into();
        assert!(matches!(err, Sql2EsError::Io(_)));
        assert_eq!(err.message(), "gone");
    }
}
