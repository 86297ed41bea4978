/// Malformed or semantically invalid filter expressions.
///
/// Always raised before any statement executes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("'{key}' key missing in {condition}")]
    MissingKey { key: &'static str, condition: String },

    #[error("filter node must be an object, got {found}")]
    NotAnObject { found: String },

    #[error("'{key}' must be {expected}, got {found}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error(
        "unknown comparison operator '{operator}'. Valid operators are: \
         '==', '!=', '>', '>=', '<', '<=', 'in', 'not in'"
    )]
    UnknownComparisonOperator { operator: String },

    #[error("unknown logical operator '{operator}'. Valid operators are: 'AND', 'OR', 'NOT'")]
    UnknownLogicalOperator { operator: String },

    #[error("logical operator '{operator}' requires at least one condition")]
    EmptyConditions { operator: String },

    #[error("unknown document field '{field}'")]
    UnknownField { field: String },

    #[error("invalid metadata key in '{field}': {reason}")]
    InvalidMetaKey { field: String, reason: String },

    #[error("filter value can't be of type {found} using operators '>', '>=', '<', '<='")]
    UnorderableValue { found: &'static str },

    #[error(
        "can't compare string '{value}' using operators '>', '>=', '<', '<='. \
         Strings are only comparable if they are ISO formatted dates"
    )]
    NotIsoDate { value: String },

    #[error("{field}'s value must be a list when using '{operator}' comparator")]
    ExpectedList { field: String, operator: &'static str },
}
