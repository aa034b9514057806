//! GeoIP 服务模块
//!
//! 提供 IP 地址地理位置查询功能：
//! - MaxMind GeoLite2 本地数据库
//! - 数据库缺失时返回空结果

mod maxmind;
mod provider;

pub use maxmind::MaxMindProvider;
pub use provider::{GeoIpLookup, GeoIpProvider, GeoResult, NullGeoProvider};
