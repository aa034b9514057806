//! Offline conversion command

use colored::Colorize;

use crate::api::ErrorCode;
use crate::api::services::ConvertService;
use crate::errors::Sql2EsError;
use crate::interfaces::cli::CliError;

/// 转换一条 SQL 并打印与 HTTP 接口相同的响应信封
pub fn convert_sql(sql: &str) -> Result<(), CliError> {
    let response = ConvertService::build_response(Some(sql));
    let output = serde_json::to_string_pretty(&response).map_err(Sql2EsError::from)?;

    if response.code == ErrorCode::Success {
        println!("{}", output);
        Ok(())
    } else {
        eprintln!("{}", output.dimmed());
        Err(Sql2EsError::convert(response.msg).into())
    }
}
