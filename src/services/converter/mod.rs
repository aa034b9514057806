//! SQL → Elasticsearch DSL 转换
//!
//! SQL 文本由 `sqlparser`（MySQL 方言）解析，这里只负责把 AST 翻译成
//! ES 查询体。支持的子集：
//! - SELECT 列 / `*` / COUNT、SUM、MIN、MAX、AVG
//! - FROM 单表（即索引名）
//! - WHERE：比较运算、IN、LIKE、BETWEEN、IS [NOT] NULL、AND / OR / NOT
//! - GROUP BY（嵌套 terms 聚合）
//! - ORDER BY、LIMIT [offset,] count、OFFSET

mod aggregation;
mod expr;
mod filter;

use std::fmt;

use serde_json::{Map, Value};
use sqlparser::ast::{
    Expr, GroupByExpr, Query, Select, SelectItem, SetExpr, Statement, TableFactor,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use tracing::trace;

use aggregation::{DEFAULT_BUCKET_SIZE, Metric, build_aggregations};
use expr::{literal, require_column};

/// 未指定 LIMIT 时返回的文档数
pub const DEFAULT_SIZE: u64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// sqlparser 报告的语法错误
    Parse(String),
    EmptyStatement,
    MultipleStatements,
    /// 语法正确但无法翻译为 ES 查询
    Unsupported(String),
}

impl ConvertError {
    pub fn unsupported<T: Into<String>>(msg: T) -> Self {
        ConvertError::Unsupported(msg.into())
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Parse(msg) => write!(f, "SQL parse error: {}", msg),
            ConvertError::EmptyStatement => write!(f, "no SQL statement found"),
            ConvertError::MultipleStatements => write!(f, "only one SQL statement is allowed"),
            ConvertError::Unsupported(msg) => write!(f, "unsupported SQL: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {}

/// 将一条 SELECT 语句转换为 ES 查询体
///
/// 返回 `(es_data, table)`，`table` 为 FROM 中的表名（索引名）
pub fn convert(sql: &str) -> Result<(Value, String), ConvertError> {
    let mut statements =
        Parser::parse_sql(&MySqlDialect {}, sql).map_err(|e| ConvertError::Parse(e.to_string()))?;

    let statement = match statements.len() {
        0 => return Err(ConvertError::EmptyStatement),
        1 => statements.remove(0),
        _ => return Err(ConvertError::MultipleStatements),
    };

    let Statement::Query(query) = statement else {
        return Err(ConvertError::unsupported("only SELECT statements are supported"));
    };

    let (dsl, table) = translate_query(&query)?;
    trace!("Converted SQL for table {}: {}", table, dsl);
    Ok((dsl, table))
}

fn translate_query(query: &Query) -> Result<(Value, String), ConvertError> {
    if query.with.is_some() {
        return Err(ConvertError::unsupported("WITH clause"));
    }

    let SetExpr::Select(select) = query.body.as_ref() else {
        return Err(ConvertError::unsupported("set operations and VALUES"));
    };

    if select.distinct.is_some() {
        return Err(ConvertError::unsupported("SELECT DISTINCT"));
    }
    if select.having.is_some() {
        return Err(ConvertError::unsupported("HAVING clause"));
    }

    let table = table_name(select)?;
    let (columns, metrics) = projection(&select.projection)?;
    let group_by = group_by_fields(&select.group_by)?;
    let sort = sort_fields(query)?;

    let limit = query.limit.as_ref().map(unsigned).transpose()?;
    let offset = query
        .offset
        .as_ref()
        .map(|o| unsigned(&o.value))
        .transpose()?;

    let mut dsl = Map::new();
    dsl.insert("query".into(), filter::build_query(select.selection.as_ref())?);

    match build_aggregations(&group_by, metrics, limit.unwrap_or(DEFAULT_BUCKET_SIZE)) {
        Some(aggregations) => {
            // 聚合查询只要桶，不要命中文档
            dsl.insert("from".into(), Value::from(0));
            dsl.insert("size".into(), Value::from(0));
            dsl.insert("aggregations".into(), aggregations);
        }
        None => {
            dsl.insert("from".into(), Value::from(offset.unwrap_or(0)));
            dsl.insert("size".into(), Value::from(limit.unwrap_or(DEFAULT_SIZE)));
        }
    }

    if !columns.is_empty() {
        dsl.insert("_source".into(), Value::from(columns));
    }
    if !sort.is_empty() {
        dsl.insert("sort".into(), Value::Array(sort));
    }

    Ok((Value::Object(dsl), table))
}

fn table_name(select: &Select) -> Result<String, ConvertError> {
    let [from] = select.from.as_slice() else {
        return Err(ConvertError::unsupported("FROM must name exactly one table"));
    };
    if !from.joins.is_empty() {
        return Err(ConvertError::unsupported("JOIN"));
    }

    match &from.relation {
        TableFactor::Table { name, .. } => name
            .0
            .last()
            .map(|ident| ident.value.clone())
            .ok_or_else(|| ConvertError::unsupported("empty table name")),
        other => Err(ConvertError::unsupported(format!(
            "table expression `{}`",
            other
        ))),
    }
}

/// 拆分 SELECT 列表：普通列进 `_source`，聚合函数进 aggregations
fn projection(items: &[SelectItem]) -> Result<(Vec<String>, Vec<Metric>), ConvertError> {
    let mut columns = Vec::new();
    let mut metrics = Vec::new();

    for item in items {
        let (expr, alias) = match item {
            SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(..) => continue,
            SelectItem::UnnamedExpr(expr) => (expr, None),
            SelectItem::ExprWithAlias { expr, alias } => (expr, Some(alias.value.as_str())),
        };

        match expr {
            Expr::Function(func) => {
                let metric = Metric::from_function(func, alias)?;
                // 同名聚合会在 JSON 对象里互相覆盖
                if metrics.iter().any(|m: &Metric| m.key == metric.key) {
                    return Err(ConvertError::unsupported(format!(
                        "duplicate aggregation name `{}`",
                        metric.key
                    )));
                }
                metrics.push(metric);
            }
            other => columns.push(require_column(other)?),
        }
    }

    Ok((columns, metrics))
}

fn group_by_fields(group_by: &GroupByExpr) -> Result<Vec<String>, ConvertError> {
    match group_by {
        GroupByExpr::Expressions(exprs) => exprs.iter().map(require_column).collect(),
        GroupByExpr::All => Err(ConvertError::unsupported("GROUP BY ALL")),
    }
}

fn sort_fields(query: &Query) -> Result<Vec<Value>, ConvertError> {
    query
        .order_by
        .iter()
        .map(|order| {
            let field = require_column(&order.expr)?;
            let direction = if order.asc.unwrap_or(true) {
                "asc"
            } else {
                "desc"
            };
            let mut entry = Map::new();
            entry.insert(field, Value::from(direction));
            Ok(Value::Object(entry))
        })
        .collect()
}

fn unsigned(expr: &Expr) -> Result<u64, ConvertError> {
    literal(expr)?.as_u64().ok_or_else(|| {
        ConvertError::unsupported(format!("`{}` is not a non-negative integer", expr))
    })
}
