pub mod converter;
pub mod geoip;
pub mod request_log;

pub use converter::{ConvertError, convert};
pub use geoip::{GeoIpLookup, GeoIpProvider, GeoResult};
pub use request_log::{ConsoleLogger, NullLogger, RequestContext, RequestLogger};
