//! Server mode
//!
//! This module contains the HTTP server startup logic.

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::warn;

use crate::api::middleware::{TimingMiddleware, default_headers};
use crate::api::services::convert_routes;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// This function:
/// 1. Prepares the request logger (GeoIP database is opened here)
/// 2. Configures and starts the HTTP server
/// 3. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = crate::config::get_config();
    let startup = lifetime::startup::prepare_server_startup(&config);

    let logger = startup.logger.clone();
    warn!("Using {} CPU cores for the server", startup.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware) // 最外层，记录请求延迟
            .wrap(Compress::default())
            .app_data(web::Data::new(logger.clone()))
            .wrap(default_headers())
            .service(convert_routes())
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(startup.workers);

    warn!("Starting server at http://{}", startup.bind_address);
    let server = server
        .bind(&startup.bind_address)
        .with_context(|| format!("Failed to bind {}", startup.bind_address))?
        .run();
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            warn!("Graceful shutdown: server stopped");
        }
    }

    Ok(())
}
