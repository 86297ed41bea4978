//! FTS5 external-content index over `document.content`, keyed by `pk`.

use rusqlite::Connection;

use lexvec_core::config::FtsTokenizer;
use lexvec_core::errors::DocStoreResult;

use super::table_exists;
use crate::to_storage_err;

pub const TABLE: &str = "document_fts";

/// Create the index and its triggers. Returns `true` if the table is new.
pub fn create(conn: &Connection, tokenizer: FtsTokenizer) -> DocStoreResult<bool> {
    let existed = table_exists(conn, TABLE)?;
    let sql = format!(
        r#"
        CREATE VIRTUAL TABLE IF NOT EXISTS document_fts
            USING fts5(content, tokenize = '{tokenize}', content = 'document', content_rowid = 'pk');

        CREATE TRIGGER IF NOT EXISTS document_ai_fts AFTER INSERT ON document BEGIN
            INSERT INTO document_fts(rowid, content) VALUES (new.pk, new.content);
        END;

        CREATE TRIGGER IF NOT EXISTS document_ad_fts AFTER DELETE ON document BEGIN
            INSERT INTO document_fts(document_fts, rowid, content)
                VALUES ('delete', old.pk, old.content);
        END;

        -- Token indexes can't be patched: update is delete-then-insert.
        CREATE TRIGGER IF NOT EXISTS document_au_fts AFTER UPDATE ON document BEGIN
            INSERT INTO document_fts(document_fts, rowid, content)
                VALUES ('delete', old.pk, old.content);
            INSERT INTO document_fts(rowid, content) VALUES (new.pk, new.content);
        END;
        "#,
        tokenize = tokenizer.as_fts5_arg(),
    );
    conn.execute_batch(&sql)
        .map_err(|e| to_storage_err(format!("create lexical index: {e}")))?;
    Ok(!existed)
}

/// Re-derive the whole index from `document`.
pub fn rebuild(conn: &Connection) -> DocStoreResult<()> {
    conn.execute_batch("INSERT INTO document_fts(document_fts) VALUES ('rebuild');")
        .map_err(|e| to_storage_err(format!("rebuild lexical index: {e}")))
}
