//! Filter compiler: turns a [`FilterExpression`] into a parameterized SQL
//! predicate over the `document` relation.
//!
//! Values never reach the SQL text. Every placeholder in the fragment has
//! exactly one entry in `parameters`, in left-to-right order.

mod compiler;
mod field;
mod params;

use rusqlite::types::Value as SqlValue;
use tracing::debug;

use lexvec_core::errors::DocStoreResult;
use lexvec_core::filter::FilterExpression;

pub use field::resolve_field;
pub use params::json_to_sql;

/// A compiled WHERE-clause fragment and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    pub fragment: String,
    pub parameters: Vec<SqlValue>,
}

impl CompiledPredicate {
    pub fn placeholder_count(&self) -> usize {
        self.fragment.matches('?').count()
    }
}

/// Compile a filter tree.
pub fn compile(filter: &FilterExpression) -> DocStoreResult<CompiledPredicate> {
    let (fragment, slots) = compiler::compile_node(filter)?;
    // Comparisons that bind nothing (`IS NULL`) leave an empty slot.
    let parameters: Vec<SqlValue> = slots.into_iter().flatten().collect();
    debug!(fragment = %fragment, params = parameters.len(), "compiled filter");
    Ok(CompiledPredicate {
        fragment,
        parameters,
    })
}

/// Compile an optional filter. `None` means "no predicate".
pub fn compile_optional(
    filter: Option<&FilterExpression>,
) -> DocStoreResult<Option<CompiledPredicate>> {
    filter.map(compile).transpose()
}
