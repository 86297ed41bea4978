//! V001: canonical document relation.

pub const MIGRATION_SQL: &str = r#"
-- `pk` is a stable rowid alias so derived indexes can key on it.
-- `id` is the caller-visible identity and must be unique.
CREATE TABLE IF NOT EXISTS document (
    pk INTEGER PRIMARY KEY,
    id TEXT NOT NULL UNIQUE,
    content TEXT,
    dataframe TEXT,
    blob BLOB,
    meta TEXT,
    score REAL,
    embedding TEXT
);
"#;
