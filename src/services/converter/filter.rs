//! WHERE 子句 → ES bool 查询

use serde_json::{Value, json};
use sqlparser::ast::{BinaryOperator, Expr, UnaryOperator};

use super::ConvertError;
use super::expr::{is_literal, literal, require_column};

/// 构建顶层 `query`
///
/// 顶层始终是 `bool.must`；顶层 AND 直接展开为 must 列表
pub(crate) fn build_query(selection: Option<&Expr>) -> Result<Value, ConvertError> {
    let Some(expr) = selection else {
        return Ok(json!({"bool": {"must": [{"match_all": {}}]}}));
    };

    let expr = unwrap_nested(expr);
    if matches!(
        expr,
        Expr::BinaryOp {
            op: BinaryOperator::And,
            ..
        }
    ) {
        return translate(expr);
    }

    Ok(json!({"bool": {"must": [translate(expr)?]}}))
}

fn unwrap_nested(expr: &Expr) -> &Expr {
    match expr {
        Expr::Nested(inner) => unwrap_nested(inner),
        other => other,
    }
}

fn translate(expr: &Expr) -> Result<Value, ConvertError> {
    match expr {
        Expr::Nested(inner) => translate(inner),

        Expr::BinaryOp {
            op: BinaryOperator::And,
            ..
        } => {
            let mut clauses = Vec::new();
            collect_chain(expr, &BinaryOperator::And, &mut clauses)?;
            Ok(json!({"bool": {"must": clauses}}))
        }

        Expr::BinaryOp {
            op: BinaryOperator::Or,
            ..
        } => {
            let mut clauses = Vec::new();
            collect_chain(expr, &BinaryOperator::Or, &mut clauses)?;
            Ok(json!({"bool": {"should": clauses}}))
        }

        Expr::BinaryOp { left, op, right } => comparison(left, op, right),

        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr,
        } => Ok(must_not(translate(expr)?)),

        Expr::InList {
            expr,
            list,
            negated,
            ..
        } => {
            let field = require_column(expr)?;
            let values = list.iter().map(literal).collect::<Result<Vec<_>, _>>()?;
            let clause = json!({"terms": {field: values}});
            Ok(negate_if(*negated, clause))
        }

        Expr::Like {
            negated,
            expr,
            pattern,
            ..
        }
        | Expr::ILike {
            negated,
            expr,
            pattern,
            ..
        } => {
            let field = require_column(expr)?;
            let text = match literal(pattern)? {
                Value::String(s) => s.replace('%', ""),
                other => other.to_string(),
            };
            Ok(negate_if(*negated, match_phrase(&field, Value::String(text))))
        }

        Expr::Between {
            expr,
            negated,
            low,
            high,
            ..
        } => {
            let field = require_column(expr)?;
            let (low, high) = (literal(low)?, literal(high)?);
            let clause = json!({"range": {field: {"gte": low, "lte": high}}});
            Ok(negate_if(*negated, clause))
        }

        Expr::IsNull(inner) => Ok(must_not(exists(&require_column(inner)?))),
        Expr::IsNotNull(inner) => Ok(exists(&require_column(inner)?)),

        other => Err(ConvertError::unsupported(format!(
            "WHERE expression `{}`",
            other
        ))),
    }
}

/// 展开同一运算符的链式表达式：`a AND b AND c` → [a, b, c]
fn collect_chain(
    expr: &Expr,
    chain_op: &BinaryOperator,
    out: &mut Vec<Value>,
) -> Result<(), ConvertError> {
    match expr {
        Expr::BinaryOp { left, op, right } if op == chain_op => {
            collect_chain(left, chain_op, out)?;
            collect_chain(right, chain_op, out)
        }
        other => {
            out.push(translate(other)?);
            Ok(())
        }
    }
}

fn comparison(left: &Expr, op: &BinaryOperator, right: &Expr) -> Result<Value, ConvertError> {
    // `1 = id` 归一为 `id = 1`
    let (field_expr, value_expr, op) = if is_literal(left) && !is_literal(right) {
        (right, left, flip(op))
    } else {
        (left, right, op.clone())
    };

    let field = require_column(field_expr)?;
    let value = literal(value_expr)?;

    let clause = match op {
        BinaryOperator::Eq => match_phrase(&field, value),
        BinaryOperator::NotEq => must_not(match_phrase(&field, value)),
        BinaryOperator::Gt => range(&field, "gt", value),
        BinaryOperator::GtEq => range(&field, "gte", value),
        BinaryOperator::Lt => range(&field, "lt", value),
        BinaryOperator::LtEq => range(&field, "lte", value),
        other => {
            return Err(ConvertError::unsupported(format!("operator `{}`", other)));
        }
    };
    Ok(clause)
}

fn flip(op: &BinaryOperator) -> BinaryOperator {
    match op {
        BinaryOperator::Gt => BinaryOperator::Lt,
        BinaryOperator::GtEq => BinaryOperator::LtEq,
        BinaryOperator::Lt => BinaryOperator::Gt,
        BinaryOperator::LtEq => BinaryOperator::GtEq,
        other => other.clone(),
    }
}

fn match_phrase(field: &str, value: Value) -> Value {
    json!({"match_phrase": {field: {"query": value}}})
}

fn range(field: &str, bound: &str, value: Value) -> Value {
    json!({"range": {field: {bound: value}}})
}

fn exists(field: &str) -> Value {
    json!({"exists": {"field": field}})
}

fn must_not(clause: Value) -> Value {
    json!({"bool": {"must_not": [clause]}})
}

fn negate_if(negated: bool, clause: Value) -> Value {
    if negated { must_not(clause) } else { clause }
}
