//! GROUP BY / 聚合函数 → ES aggregations

use serde_json::{Map, Value, json};
use sqlparser::ast::{Function, FunctionArg, FunctionArgExpr};

use super::ConvertError;
use super::expr::require_column;

/// terms 聚合默认桶数量
pub const DEFAULT_BUCKET_SIZE: u64 = 200;

/// 指标聚合（COUNT / SUM / MIN / MAX / AVG）
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Metric {
    pub key: String,
    pub body: Value,
}

enum MetricArg {
    Star,
    Column(String),
}

impl Metric {
    /// 从 SELECT 列表中的函数调用构建指标，`alias` 优先作为聚合名
    pub(crate) fn from_function(
        func: &Function,
        alias: Option<&str>,
    ) -> Result<Self, ConvertError> {
        if func.over.is_some() {
            return Err(ConvertError::unsupported(format!("window function `{}`", func)));
        }

        let name = func.name.to_string().to_uppercase();
        let arg = single_arg(func)?;

        let (agg_type, field) = match (name.as_str(), &arg, func.distinct) {
            ("COUNT", MetricArg::Star, false) => ("value_count", "_index".to_string()),
            ("COUNT", MetricArg::Column(c), true) => ("cardinality", c.clone()),
            ("COUNT", MetricArg::Column(c), false) => ("value_count", c.clone()),
            ("SUM", MetricArg::Column(c), false) => ("sum", c.clone()),
            ("MIN", MetricArg::Column(c), false) => ("min", c.clone()),
            ("MAX", MetricArg::Column(c), false) => ("max", c.clone()),
            ("AVG", MetricArg::Column(c), false) => ("avg", c.clone()),
            _ => {
                return Err(ConvertError::unsupported(format!(
                    "aggregate function `{}`",
                    func
                )));
            }
        };

        let key = match alias {
            Some(alias) => alias.to_string(),
            None => {
                let inner = match &arg {
                    MetricArg::Star => "*".to_string(),
                    MetricArg::Column(c) if func.distinct => format!("DISTINCT {}", c),
                    MetricArg::Column(c) => c.clone(),
                };
                format!("{}({})", name, inner)
            }
        };

        Ok(Self {
            key,
            body: json!({agg_type: {"field": field}}),
        })
    }
}

fn single_arg(func: &Function) -> Result<MetricArg, ConvertError> {
    match func.args.as_slice() {
        [FunctionArg::Unnamed(FunctionArgExpr::Wildcard)] => Ok(MetricArg::Star),
        [FunctionArg::Unnamed(FunctionArgExpr::Expr(expr))] => {
            Ok(MetricArg::Column(require_column(expr)?))
        }
        _ => Err(ConvertError::unsupported(format!("arguments of `{}`", func))),
    }
}

/// 构建嵌套 aggregations
///
/// 每个 GROUP BY 字段一层 terms，最内层挂指标；最外层桶数量为 `outer_size`
pub(crate) fn build_aggregations(
    group_by: &[String],
    metrics: Vec<Metric>,
    outer_size: u64,
) -> Option<Value> {
    if group_by.is_empty() && metrics.is_empty() {
        return None;
    }

    let mut inner: Map<String, Value> = metrics.into_iter().map(|m| (m.key, m.body)).collect();

    for (depth, field) in group_by.iter().enumerate().rev() {
        let size = if depth == 0 {
            outer_size
        } else {
            DEFAULT_BUCKET_SIZE
        };
        let mut node = json!({"terms": {"field": field, "size": size}});
        if !inner.is_empty() {
            node["aggregations"] = Value::Object(inner);
        }
        inner = Map::new();
        inner.insert(field.clone(), node);
    }

    Some(Value::Object(inner))
}
