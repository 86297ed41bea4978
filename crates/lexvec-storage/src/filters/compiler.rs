use rusqlite::types::Value as SqlValue;
use serde_json::Value;

use lexvec_core::errors::{DocStoreResult, FilterError};
use lexvec_core::filter::value::{is_iso8601, value_kind};
use lexvec_core::filter::{Comparison, ComparisonOperator, FilterExpression, Logical, LogicalOperator};

use super::field::resolve_field;
use super::params::json_to_sql;

/// One slot per comparison. `None` marks a comparison with no placeholder.
type Slots = Vec<Option<SqlValue>>;

pub(super) fn compile_node(node: &FilterExpression) -> DocStoreResult<(String, Slots)> {
    match node {
        FilterExpression::Comparison(c) => {
            let (fragment, slot) = compile_comparison(c)?;
            Ok((fragment, vec![slot]))
        }
        FilterExpression::Logical(l) => compile_logical(l),
    }
}

fn compile_logical(node: &Logical) -> DocStoreResult<(String, Slots)> {
    let mut parts = Vec::with_capacity(node.conditions().len());
    let mut slots = Vec::new();
    for condition in node.conditions() {
        let (fragment, child) = compile_node(condition)?;
        parts.push(fragment);
        slots.extend(child);
    }
    let fragment = match node.operator() {
        LogicalOperator::And => format!("({})", parts.join(" AND ")),
        LogicalOperator::Or => format!("({})", parts.join(" OR ")),
        LogicalOperator::Not => format!("NOT ({})", parts.join(" AND ")),
    };
    Ok((fragment, slots))
}

fn compile_comparison(c: &Comparison) -> Result<(String, Option<SqlValue>), FilterError> {
    let column = resolve_field(&c.field)?;
    if c.operator.is_ordering() {
        check_orderable(&c.value)?;
    }
    let compiled = match c.operator {
        ComparisonOperator::Eq if c.value.is_null() => (format!("{column} IS NULL"), None),
        ComparisonOperator::Eq => (format!("{column} = ?"), Some(json_to_sql(&c.value))),
        ComparisonOperator::Ne => (format!("{column} IS NOT ?"), Some(json_to_sql(&c.value))),
        ComparisonOperator::Gt
        | ComparisonOperator::Gte
        | ComparisonOperator::Lt
        | ComparisonOperator::Lte => (
            format!("{column} {} ?", c.operator.as_str()),
            Some(json_to_sql(&c.value)),
        ),
        ComparisonOperator::In => {
            let list = expect_list(c)?;
            (
                format!("{column} IN (SELECT value FROM json_each(?))"),
                Some(list),
            )
        }
        ComparisonOperator::NotIn => {
            let list = expect_list(c)?;
            (
                format!(
                    "({column} IS NULL OR {column} NOT IN (SELECT value FROM json_each(?)))"
                ),
                Some(list),
            )
        }
    };
    Ok(compiled)
}

fn check_orderable(value: &Value) -> Result<(), FilterError> {
    match value {
        Value::Array(_) | Value::Object(_) => Err(FilterError::UnorderableValue {
            found: value_kind(value),
        }),
        Value::String(s) if !is_iso8601(s) => Err(FilterError::NotIsoDate { value: s.clone() }),
        _ => Ok(()),
    }
}

fn expect_list(c: &Comparison) -> Result<SqlValue, FilterError> {
    match &c.value {
        Value::Array(_) => Ok(SqlValue::Text(c.value.to_string())),
        _ => Err(FilterError::ExpectedList {
            field: c.field.clone(),
            operator: c.operator.as_str(),
        }),
    }
}
