//! API 模块常量定义

/// 转换接口路径
pub const SQL_TO_ES_PATH: &str = "/sql_to_es";

/// SQL 查询参数名
pub const SQL_PARAM: &str = "sqls";

/// 缺少 SQL 参数时的提示
pub const MISSING_SQL_MSG: &str = "请求参数sqls不能为空!";
