use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{error, info, warn};

use crate::api::constants::{MISSING_SQL_MSG, SQL_PARAM, SQL_TO_ES_PATH};
use crate::api::types::{ApiResponse, ErrorCode, EsData};
use crate::services::{RequestContext, RequestLogger, convert};
use crate::utils::extract_client_ip;

pub struct ConvertService;

impl ConvertService {
    /// `GET /sql_to_es?sqls=...`
    ///
    /// 无论成功与否都先交给 RequestLogger，再写响应。
    /// 跨域头由 `default_headers()` 统一添加
    pub async fn sql_to_es(
        req: HttpRequest,
        logger: web::Data<Arc<dyn RequestLogger>>,
    ) -> impl Responder {
        let sqls = first_query_value(req.query_string(), SQL_PARAM);
        let response = Self::build_response(sqls.as_deref());

        let body = match serde_json::to_string(&response) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                return HttpResponse::InternalServerError().finish();
            }
        };

        let ctx = RequestContext {
            client_ip: extract_client_ip(&req),
        };
        info!(
            "{} {} from {} -> code {}",
            req.method(),
            SQL_TO_ES_PATH,
            ctx.client_ip,
            response.code as i32
        );
        logger.log(&body, &ctx);

        HttpResponse::Ok()
            .content_type("application/json; charset=utf-8")
            .body(body)
    }

    /// 校验参数并调用转换器
    pub fn build_response(sqls: Option<&str>) -> ApiResponse<EsData> {
        let Some(sql) = sqls.filter(|s| !s.is_empty()) else {
            return ApiResponse::error(ErrorCode::MissingSql, MISSING_SQL_MSG);
        };

        match convert(sql) {
            Ok((es_data, table)) => ApiResponse::success(EsData { table, es_data }),
            Err(e) => {
                warn!("SQL conversion failed: {} (sql: {})", e, sql);
                ApiResponse::error(ErrorCode::ConvertFailed, e.to_string())
            }
        }
    }
}

/// 取查询串中某个参数的第一个值
fn first_query_value(query_string: &str, key: &str) -> Option<String> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string).ok()?;
    pairs.into_inner().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

pub fn convert_routes() -> actix_web::Resource {
    web::resource(SQL_TO_ES_PATH).route(web::get().to(ConvertService::sql_to_es))
}
