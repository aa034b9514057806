//! IP 地址处理工具
//!
//! 提供统一的客户端 IP 提取功能：
//! - X-Real-IP / X-Forwarded-For 转发头
//! - 连接地址去端口
//! - IPv6 回环地址归一化

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;

/// 反向代理写入的真实 IP 头
pub const X_REAL_IP: &str = "x-real-ip";
/// 反向代理写入的转发链头
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// 计算客户端 IP（纯函数，便于测试）
///
/// 策略（按优先级）：
/// 1. X-Real-IP 非空 → 直接使用
/// 2. X-Forwarded-For 非空 → 原样使用
/// 3. 连接地址 → 去掉端口
///
/// 最后 `::1` 统一替换为 `127.0.0.1`
pub fn remote_ip(real_ip: Option<&str>, forwarded_for: Option<&str>, peer: Option<&str>) -> String {
    let ip = match (real_ip, forwarded_for) {
        (Some(ip), _) if !ip.is_empty() => ip.to_string(),
        (_, Some(ip)) if !ip.is_empty() => ip.to_string(),
        _ => peer.map(strip_port).unwrap_or_default(),
    };

    if ip == "::1" {
        "127.0.0.1".to_string()
    } else {
        ip
    }
}

/// 去掉地址中的端口
///
/// 支持 `1.2.3.4:80`、`[::1]:80`，无端口的地址原样返回
pub fn strip_port(addr: &str) -> String {
    if let Ok(socket_addr) = addr.parse::<SocketAddr>() {
        return socket_addr.ip().to_string();
    }
    if let Ok(ip_addr) = addr.parse::<IpAddr>() {
        return ip_addr.to_string();
    }
    // 非 IP 主机名（如 localhost:8080）
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.parse::<u16>().is_ok() => {
            host.to_string()
        }
        _ => addr.trim_start_matches('[').trim_end_matches(']').to_string(),
    }
}

/// 从 HttpRequest 提取客户端 IP
pub fn extract_client_ip(req: &HttpRequest) -> String {
    let headers = req.headers();
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());
    let peer = req.peer_addr().map(|addr| addr.to_string());

    remote_ip(header(X_REAL_IP), header(X_FORWARDED_FOR), peer.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_real_ip_wins() {
        let ip = remote_ip(Some("1.1.1.1"), Some("2.2.2.2"), Some("3.3.3.3:80"));
        assert_eq!(ip, "1.1.1.1");
    }

    #[test]
    fn test_forwarded_for_before_peer() {
        let ip = remote_ip(None, Some("2.2.2.2, 10.0.0.1"), Some("3.3.3.3:80"));
        assert_eq!(ip, "2.2.2.2, 10.0.0.1");
    }

    #[test]
    fn test_empty_headers_are_skipped() {
        let ip = remote_ip(Some(""), Some(""), Some("3.3.3.3:8080"));
        assert_eq!(ip, "3.3.3.3");
    }

    #[test]
    fn test_loopback_v6_is_normalized() {
        assert_eq!(remote_ip(None, None, Some("[::1]:5000")), "127.0.0.1");
        assert_eq!(remote_ip(Some("::1"), None, None), "127.0.0.1");
    }

    #[test]
    fn test_missing_everything() {
        assert_eq!(remote_ip(None, None, None), "");
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("192.168.1.1:443"), "192.168.1.1");
        assert_eq!(strip_port("[2001:db8::1]:443"), "2001:db8::1");
        assert_eq!(strip_port("2001:db8::1"), "2001:db8::1");
        assert_eq!(strip_port("localhost:8080"), "localhost");
        assert_eq!(strip_port("10.0.0.1"), "10.0.0.1");
    }

    #[test]
    fn test_extract_client_ip_from_request() {
        let req = TestRequest::default()
            .insert_header((X_FORWARDED_FOR, "8.8.8.8"))
            .peer_addr("127.0.0.1:9000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "8.8.8.8");

        let req = TestRequest::default()
            .peer_addr("[::1]:9000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "127.0.0.1");
    }
}
