use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::operator::{ComparisonOperator, LogicalOperator};
use crate::errors::FilterError;

/// A boolean filter over documents.
///
/// A finite tree whose leaves are comparisons. Built per call, compiled once,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum FilterExpression {
    Comparison(Comparison),
    Logical(Logical),
}

/// `field <operator> value`.
///
/// `field` is a top-level document attribute or a `meta.<key>` path.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: String,
    pub operator: ComparisonOperator,
    pub value: Value,
}

/// A logical node with at least one condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    operator: LogicalOperator,
    conditions: Vec<FilterExpression>,
}

impl Logical {
    pub fn new(
        operator: LogicalOperator,
        conditions: Vec<FilterExpression>,
    ) -> Result<Self, FilterError> {
        if conditions.is_empty() {
            return Err(FilterError::EmptyConditions {
                operator: operator.to_string(),
            });
        }
        Ok(Self {
            operator,
            conditions,
        })
    }

    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn conditions(&self) -> &[FilterExpression] {
        &self.conditions
    }
}

impl FilterExpression {
    pub fn comparison(
        field: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self::Comparison(Comparison {
            field: field.into(),
            operator,
            value: value.into(),
        })
    }

    pub fn logical(
        operator: LogicalOperator,
        conditions: Vec<FilterExpression>,
    ) -> Result<Self, FilterError> {
        Logical::new(operator, conditions).map(Self::Logical)
    }

    pub fn and(conditions: Vec<FilterExpression>) -> Result<Self, FilterError> {
        Self::logical(LogicalOperator::And, conditions)
    }

    pub fn or(conditions: Vec<FilterExpression>) -> Result<Self, FilterError> {
        Self::logical(LogicalOperator::Or, conditions)
    }

    pub fn not(conditions: Vec<FilterExpression>) -> Result<Self, FilterError> {
        Self::logical(LogicalOperator::Not, conditions)
    }

    /// Parse the nested-mapping wire format.
    pub fn from_value(value: &Value) -> Result<Self, FilterError> {
        super::parse::parse_node(value)
    }

    /// Render back to the nested-mapping wire format.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Comparison(c) => {
                let mut map = Map::new();
                map.insert("field".into(), Value::String(c.field.clone()));
                map.insert("operator".into(), Value::String(c.operator.as_str().into()));
                map.insert("value".into(), c.value.clone());
                Value::Object(map)
            }
            Self::Logical(l) => {
                let mut map = Map::new();
                map.insert("operator".into(), Value::String(l.operator.as_str().into()));
                map.insert(
                    "conditions".into(),
                    Value::Array(l.conditions.iter().map(Self::to_value).collect()),
                );
                Value::Object(map)
            }
        }
    }

    /// Number of comparison leaves.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Comparison(_) => 1,
            Self::Logical(l) => l.conditions.iter().map(Self::leaf_count).sum(),
        }
    }
}

impl TryFrom<Value> for FilterExpression {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl From<FilterExpression> for Value {
    fn from(expr: FilterExpression) -> Self {
        expr.to_value()
    }
}
