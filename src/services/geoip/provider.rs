//! GeoIP Provider 抽象层
//!
//! 统一的 GeoIP 查询接口，根据配置自动选择实现：
//! 1. database_path 可读 → MaxMindProvider
//! 2. 不可读 → NullGeoProvider（地理字段留空）

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::maxmind::MaxMindProvider;
use crate::config::GeoIpConfig;

/// 地理位置信息
///
/// 查询失败时使用 `Default`：字符串为空，经纬度为 0
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoResult {
    pub country: String,
    pub province: String,
    pub city: String,
    /// 数据库不含区县级别，始终为空
    pub district: String,
    pub lat: f64,
    pub lon: f64,
}

/// GeoIP 查询 trait
pub trait GeoIpLookup: Send + Sync {
    /// 查询 IP 地址的地理位置
    fn lookup(&self, ip: &str) -> Option<GeoResult>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 没有可用数据库时使用，所有查询都返回 None
pub struct NullGeoProvider;

impl GeoIpLookup for NullGeoProvider {
    fn lookup(&self, _ip: &str) -> Option<GeoResult> {
        None
    }

    fn name(&self) -> &'static str {
        "Null"
    }
}

/// 统一 GeoIP Provider
///
/// 启动时根据配置自动选择实现
#[derive(Clone)]
pub struct GeoIpProvider {
    inner: Arc<dyn GeoIpLookup>,
}

impl GeoIpProvider {
    /// 根据 GeoIpConfig 初始化
    pub fn new(config: &GeoIpConfig) -> Self {
        let inner: Arc<dyn GeoIpLookup> =
            match MaxMindProvider::new(&config.database_path, &config.locale) {
                Ok(provider) => {
                    info!("GeoIP: Using MaxMind database at {}", config.database_path);
                    Arc::new(provider)
                }
                Err(e) => {
                    warn!("GeoIP: {} ({}), location fields will be empty", e, e.code());
                    Arc::new(NullGeoProvider)
                }
            };

        info!("GeoIP: Initialized with {} provider", inner.name());
        Self { inner }
    }

    /// 使用自定义实现（测试或嵌入场景）
    pub fn from_lookup(inner: Arc<dyn GeoIpLookup>) -> Self {
        Self { inner }
    }

    /// 查询 IP 地址的地理位置
    pub fn lookup(&self, ip: &str) -> Option<GeoResult> {
        self.inner.lookup(ip)
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}
