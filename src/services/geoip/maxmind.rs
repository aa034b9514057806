//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 MaxMind GeoLite2-City.mmdb 文件进行 IP 地理位置查询

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;

use maxminddb::Reader;
use serde::Deserialize;
use tracing::trace;

use super::provider::{GeoIpLookup, GeoResult};
use crate::errors::{Result, Sql2EsError};

// 不用 maxminddb::geoip2::City：它的 Names 只有固定几种语言字段，
// 而 locale 来自配置，需要按任意 key 取名称。

/// mmdb 中带多语言名称的节点（country / subdivision / city）
#[derive(Debug, Default, Deserialize)]
struct NamedPlace {
    #[serde(default)]
    names: BTreeMap<String, String>,
}

impl NamedPlace {
    fn name(&self, locale: &str) -> Option<&str> {
        self.names
            .get(locale)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

/// GeoLite2-City 记录中用到的字段
#[derive(Debug, Default, Deserialize)]
struct CityRecord {
    #[serde(default)]
    country: NamedPlace,
    #[serde(default)]
    subdivisions: Vec<NamedPlace>,
    #[serde(default)]
    city: NamedPlace,
    #[serde(default)]
    location: Location,
}

impl CityRecord {
    /// 城市名缺失时视为查询失败
    fn into_geo_result(self, locale: &str) -> Option<GeoResult> {
        let city = self.city.name(locale)?.to_string();

        Some(GeoResult {
            country: self.country.name(locale).unwrap_or_default().to_string(),
            province: self
                .subdivisions
                .first()
                .and_then(|s| s.name(locale))
                .unwrap_or_default()
                .to_string(),
            city,
            district: String::new(),
            lat: self.location.latitude.unwrap_or_default(),
            lon: self.location.longitude.unwrap_or_default(),
        })
    }
}

/// MaxMind GeoIP Provider
pub struct MaxMindProvider {
    reader: Arc<Reader<Vec<u8>>>,
    locale: String,
}

impl MaxMindProvider {
    /// 从文件路径创建 MaxMind Provider
    pub fn new(path: &str, locale: &str) -> Result<Self> {
        let reader = Reader::open_readfile(path)
            .map_err(|e| Sql2EsError::geoip(format!("{}: {}", path, e)))?;
        Ok(Self {
            reader: Arc::new(reader),
            locale: locale.to_string(),
        })
    }
}

impl GeoIpLookup for MaxMindProvider {
    fn lookup(&self, ip: &str) -> Option<GeoResult> {
        let ip_addr: IpAddr = ip.trim().parse().ok()?;

        let result = self.reader.lookup(ip_addr).ok()?;
        let record: CityRecord = result.decode().ok()??;
        let geo = record.into_geo_result(&self.locale);

        trace!("MaxMind lookup for {}: {:?}", ip, geo);
        geo
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}
