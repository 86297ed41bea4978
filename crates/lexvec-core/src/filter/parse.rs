//! Nested-mapping wire format -> [`FilterExpression`].

use serde_json::{Map, Value};

use super::expression::{Comparison, FilterExpression, Logical};
use super::operator::{ComparisonOperator, LogicalOperator};
use super::value::value_kind;
use crate::errors::FilterError;

pub(super) fn parse_node(value: &Value) -> Result<FilterExpression, FilterError> {
    let Value::Object(map) = value else {
        return Err(FilterError::NotAnObject {
            found: value_kind(value).to_string(),
        });
    };
    if map.contains_key("field") {
        parse_comparison(map).map(FilterExpression::Comparison)
    } else {
        parse_logical(map).map(FilterExpression::Logical)
    }
}

fn parse_comparison(map: &Map<String, Value>) -> Result<Comparison, FilterError> {
    let field = string_key(map, "field")?;
    let operator = string_key(map, "operator")?;
    let value = required(map, "value")?.clone();
    let operator: ComparisonOperator = operator.parse()?;
    Ok(Comparison {
        field: field.to_string(),
        operator,
        value,
    })
}

fn parse_logical(map: &Map<String, Value>) -> Result<Logical, FilterError> {
    let operator = string_key(map, "operator")?;
    let conditions = required(map, "conditions")?;
    let operator: LogicalOperator = operator.parse()?;
    let Value::Array(items) = conditions else {
        return Err(FilterError::WrongType {
            key: "conditions",
            expected: "a list",
            found: value_kind(conditions).to_string(),
        });
    };
    let children = items
        .iter()
        .map(parse_node)
        .collect::<Result<Vec<_>, _>>()?;
    Logical::new(operator, children)
}

fn required<'a>(map: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, FilterError> {
    map.get(key).ok_or_else(|| FilterError::MissingKey {
        key,
        condition: Value::Object(map.clone()).to_string(),
    })
}

fn string_key<'a>(map: &'a Map<String, Value>, key: &'static str) -> Result<&'a str, FilterError> {
    let value = required(map, key)?;
    value.as_str().ok_or_else(|| FilterError::WrongType {
        key,
        expected: "a string",
        found: value_kind(value).to_string(),
    })
}
