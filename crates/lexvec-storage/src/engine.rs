//! StorageEngine: owns the store connection, runs migrations, keeps the
//! derived indexes in place, and implements [`IDocumentStore`].

use std::path::Path;

use tracing::info;

use lexvec_core::config::{ComponentData, DocumentStoreConfig};
use lexvec_core::errors::{DocStoreError, DocStoreResult};
use lexvec_core::filter::FilterExpression;
use lexvec_core::traits::IDocumentStore;
use lexvec_core::{Document, DuplicatePolicy, LexicalRequest, RetrievedDocument, VectorRequest};

use crate::connection::StoreConnection;
use crate::queries::{document_crud, document_query};
use crate::{indexes, migrations, retrieval};

/// A document store on one SQLite database.
pub struct StorageEngine {
    connection: StoreConnection,
    config: DocumentStoreConfig,
}

impl StorageEngine {
    /// Open the store described by `config`, creating the schema and any
    /// enabled index that doesn't exist yet.
    pub fn open(config: DocumentStoreConfig) -> DocStoreResult<Self> {
        config.validate()?;
        let connection = if config.is_in_memory() {
            StoreConnection::open_in_memory()?
        } else {
            StoreConnection::open(Path::new(&config.database))?
        };
        let engine = Self { connection, config };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open a private in-memory store with default settings.
    pub fn open_in_memory() -> DocStoreResult<Self> {
        Self::open(DocumentStoreConfig::in_memory())
    }

    /// Rebuild a store from its serialized component form.
    pub fn from_component(data: &ComponentData) -> DocStoreResult<Self> {
        Self::open(DocumentStoreConfig::from_component(data)?)
    }

    fn initialize(&self) -> DocStoreResult<()> {
        self.connection.with_transaction(|tx| {
            migrations::run_migrations(tx)?;
            indexes::ensure_indexes(tx, &self.config)
        })?;
        info!(
            database = %self.config.database,
            bm25 = self.config.use_bm25,
            embedding_dims = ?self.config.embedding_dims,
            "document store ready"
        );
        Ok(())
    }

    pub fn config(&self) -> &DocumentStoreConfig {
        &self.config
    }

    pub fn connection(&self) -> &StoreConnection {
        &self.connection
    }

    /// Re-derive every enabled index from the canonical relation.
    pub fn rebuild_indexes(&self) -> DocStoreResult<()> {
        self.connection
            .with_transaction(|tx| indexes::rebuild_all(tx, &self.config))?;
        info!("rebuilt derived indexes");
        Ok(())
    }

    pub fn get_document(&self, id: &str) -> DocStoreResult<Option<Document>> {
        self.connection
            .with_conn(|conn| document_crud::get_document(conn, id))
    }
}

impl IDocumentStore for StorageEngine {
    fn count_documents(&self) -> DocStoreResult<usize> {
        self.connection.with_conn(document_query::count_documents)
    }

    fn filter_documents(&self, filters: Option<&FilterExpression>) -> DocStoreResult<Vec<Document>> {
        self.connection
            .with_conn(|conn| document_query::filter_documents(conn, filters))
    }

    fn write_documents(&self, documents: &[Document], policy: DuplicatePolicy) -> DocStoreResult<usize> {
        document_crud::validate_embeddings(documents, self.config.embedding_dims)?;
        self.connection
            .with_transaction(|tx| document_crud::write_documents(tx, documents, policy))
    }

    fn delete_documents(&self, ids: &[String]) -> DocStoreResult<()> {
        self.connection
            .with_transaction(|tx| document_crud::delete_documents(tx, ids))?;
        Ok(())
    }

    fn bm25_retrieval(&self, request: &LexicalRequest) -> DocStoreResult<Vec<RetrievedDocument>> {
        if !self.config.use_bm25 {
            return Err(DocStoreError::configuration(
                "lexical retrieval requires use_bm25 = true",
            ));
        }
        self.connection
            .with_conn(|conn| retrieval::bm25_retrieval(conn, request))
    }

    fn embedding_retrieval(&self, request: &VectorRequest) -> DocStoreResult<Vec<RetrievedDocument>> {
        let Some(dims) = self.config.embedding_dims else {
            return Err(DocStoreError::configuration(
                "embedding retrieval requires embedding_dims to be set",
            ));
        };
        let similarity = self.config.embedding_similarity_function;
        self.connection
            .with_conn(|conn| retrieval::embedding_retrieval(conn, dims, similarity, request))
    }

    fn to_component(&self) -> DocStoreResult<ComponentData> {
        self.config.to_component()
    }
}
