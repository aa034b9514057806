//! SQL 表达式 → 字段名 / JSON 字面量

use serde_json::Value;
use sqlparser::ast::{Expr, UnaryOperator, Value as SqlValue};

use super::ConvertError;

/// 取字段名，`a.b` 形式按 ES 嵌套字段拼接
pub(crate) fn column_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::CompoundIdentifier(idents) => Some(
            idents
                .iter()
                .map(|i| i.value.as_str())
                .collect::<Vec<_>>()
                .join("."),
        ),
        Expr::Nested(inner) => column_name(inner),
        _ => None,
    }
}

/// 同 `column_name`，取不到时报错
pub(crate) fn require_column(expr: &Expr) -> Result<String, ConvertError> {
    column_name(expr)
        .ok_or_else(|| ConvertError::unsupported(format!("expected a column, got `{}`", expr)))
}

/// 字面量 → JSON 值
pub(crate) fn literal(expr: &Expr) -> Result<Value, ConvertError> {
    match expr {
        Expr::Value(value) => sql_value(value),
        Expr::Nested(inner) => literal(inner),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr,
        } => match expr.as_ref() {
            // i64::MIN 的绝对值超出 i64，需带符号一起解析
            Expr::Value(SqlValue::Number(text, _)) => number(&format!("-{}", text)),
            other => negate(literal(other)?),
        },
        Expr::UnaryOp {
            op: UnaryOperator::Plus,
            expr,
        } => literal(expr),
        _ => Err(ConvertError::unsupported(format!(
            "expected a literal value, got `{}`",
            expr
        ))),
    }
}

/// 判断表达式是否为字面量（用于比较运算左右归一）
pub(crate) fn is_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Value(_) => true,
        Expr::Nested(inner) => is_literal(inner),
        Expr::UnaryOp {
            op: UnaryOperator::Minus | UnaryOperator::Plus,
            expr,
        } => is_literal(expr),
        _ => false,
    }
}

fn sql_value(value: &SqlValue) -> Result<Value, ConvertError> {
    match value {
        SqlValue::Number(text, _) => number(text),
        SqlValue::SingleQuotedString(s) | SqlValue::DoubleQuotedString(s) => {
            Ok(Value::String(s.clone()))
        }
        SqlValue::Boolean(b) => Ok(Value::Bool(*b)),
        SqlValue::Null => Ok(Value::Null),
        other => Err(ConvertError::unsupported(format!("literal `{}`", other))),
    }
}

fn number(text: &str) -> Result<Value, ConvertError> {
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::from(i));
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ConvertError::unsupported(format!("number `{}`", text)))
}

fn negate(value: Value) -> Result<Value, ConvertError> {
    if let Some(i) = value.as_i64().and_then(i64::checked_neg) {
        return Ok(Value::from(i));
    }
    if let Some(f) = value.as_f64() {
        return Ok(Value::from(-f));
    }
    Err(ConvertError::unsupported(format!("cannot negate `{}`", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlparser::dialect::MySqlDialect;
    use sqlparser::parser::Parser;

    fn parse_expr(text: &str) -> Expr {
        Parser::new(&MySqlDialect {})
            .try_with_sql(text)
            .unwrap()
            .parse_expr()
            .unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal(&parse_expr("42")).unwrap(), json!(42));
        assert_eq!(literal(&parse_expr("-7")).unwrap(), json!(-7));
        assert_eq!(literal(&parse_expr("1.5")).unwrap(), json!(1.5));
        assert_eq!(literal(&parse_expr("'abc'")).unwrap(), json!("abc"));
        assert_eq!(literal(&parse_expr("true")).unwrap(), json!(true));
        assert_eq!(literal(&parse_expr("NULL")).unwrap(), Value::Null);
    }

    #[test]
    fn test_negative_integer_bounds() {
        assert_eq!(
            literal(&parse_expr("-9223372036854775808")).unwrap(),
            json!(i64::MIN)
        );
        assert_eq!(
            literal(&parse_expr("-(9223372036854775807)")).unwrap(),
            json!(-i64::MAX)
        );
        assert_eq!(literal(&parse_expr("-2.5")).unwrap(), json!(-2.5));
        assert_eq!(literal(&parse_expr("-(-3)")).unwrap(), json!(3));
    }

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(&parse_expr("age")).as_deref(), Some("age"));
        assert_eq!(column_name(&parse_expr("`order`")).as_deref(), Some("order"));
        assert_eq!(
            column_name(&parse_expr("user.address.city")).as_deref(),
            Some("user.address.city")
        );
        assert!(column_name(&parse_expr("1 + 2")).is_none());
    }

    #[test]
    fn test_column_is_not_literal() {
        assert!(is_literal(&parse_expr("-3")));
        assert!(!is_literal(&parse_expr("id")));
        assert!(literal(&parse_expr("id")).is_err());
    }
}
