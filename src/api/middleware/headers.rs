//! 所有响应共用的默认头

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

/// 跨域放开 + 禁止缓存，404 / 405 等非 handler 响应同样带上
pub fn default_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_rt::test]
    async fn test_headers_on_unrouted_responses() {
        let app = test::init_service(
            App::new()
                .wrap(default_headers())
                .route("/ok", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for req in [
            test::TestRequest::get().uri("/ok").to_request(),
            test::TestRequest::get().uri("/missing").to_request(),
            test::TestRequest::post().uri("/ok").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(
                resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                "*"
            );
            assert!(resp.headers().contains_key(header::CACHE_CONTROL));
        }
    }
}
