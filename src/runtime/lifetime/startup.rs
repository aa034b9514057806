use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::{ConsoleLogger, GeoIpProvider, NullLogger, RequestLogger};

pub struct StartupContext {
    pub logger: Arc<dyn RequestLogger>,
    pub bind_address: String,
    pub workers: usize,
}

/// 单机最多使用的 worker 数量
const MAX_WORKERS: usize = 32;

/// 准备服务器启动的上下文
///
/// GeoIP 数据库只在这里打开一次，之后由所有 worker 共享。
pub fn prepare_server_startup(config: &StaticConfig) -> StartupContext {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let logger: Arc<dyn RequestLogger> = if config.report.enabled {
        let geoip = GeoIpProvider::new(&config.geoip);
        info!("Request report enabled, GeoIP provider: {}", geoip.provider_name());
        Arc::new(ConsoleLogger::new(geoip))
    } else {
        warn!("Request report disabled by configuration");
        Arc::new(NullLogger)
    };

    let workers = config.server.cpu_count.clamp(1, MAX_WORKERS);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    debug!("Request logger: {}", logger.name());
    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    StartupContext {
        logger,
        bind_address,
        workers,
    }
}
