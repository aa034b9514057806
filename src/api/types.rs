//! API 响应类型

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// 应用层状态码
///
/// 使用 serde_repr 序列化为数字。HTTP 状态码始终为 200，
/// 调用结果由这里的 code 表达。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 200,
    /// 缺少 sqls 参数或参数为空
    MissingSql = 4002,
    /// SQL 无法解析或无法转换
    ConvertFailed = 4003,
}

/// 统一响应信封 `{code, msg, data}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// 转换结果：目标索引 + ES 查询体
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EsData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub table: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub es_data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_has_null_data() {
        let resp: ApiResponse<EsData> = ApiResponse::error(ErrorCode::MissingSql, "bad");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value, json!({"code": 4002, "msg": "bad", "data": null}));
    }

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(EsData {
            table: "t".to_string(),
            es_data: json!({"size": 1}),
        });
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({"code": 200, "msg": "ok", "data": {"table": "t", "es_data": {"size": 1}}})
        );
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let value = serde_json::to_value(EsData {
            table: String::new(),
            es_data: Value::Null,
        })
        .unwrap();
        assert_eq!(value, json!({}));
    }
}
