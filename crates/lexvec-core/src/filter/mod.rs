//! Filter expression AST.
//!
//! The wire format is nested JSON mappings: comparisons carry
//! `field`/`operator`/`value`, logical nodes carry `operator`/`conditions`.
//! Structure is validated when the tree is built; value checks that depend
//! on the operator run at compile time in the storage crate.

mod expression;
mod operator;
mod parse;
pub mod value;

pub use expression::{Comparison, FilterExpression, Logical};
pub use operator::{ComparisonOperator, LogicalOperator};
