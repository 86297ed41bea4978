//! Write transactions: BEGIN IMMEDIATE, commit on success, rollback on error.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::warn;

use lexvec_core::errors::DocStoreResult;

use crate::to_storage_err;

/// Execute `f` inside a BEGIN IMMEDIATE transaction.
/// The write lock is taken at transaction start, so a canonical write and
/// the index updates its triggers perform commit or roll back together.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> DocStoreResult<T>
where
    F: FnOnce(&Transaction<'_>) -> DocStoreResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("failed to begin immediate transaction: {e}")))?;

    match f(&tx) {
        Ok(value) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("failed to commit: {e}")))?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(e)
        }
    }
}
