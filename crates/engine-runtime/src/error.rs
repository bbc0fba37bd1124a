use connectors::{error::AdapterError, sql::base::error::DbError};
use engine_core::error::{CatalogError, RecordStoreError};
use model::core::identifiers::{ExecutionId, SourceId};
use thiserror::Error;

/// Batch-level failures. Job-level failures never surface here.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Source {0} not found or inactive")]
    SourceNotFound(SourceId),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Execution record {0} not found")]
    RecordNotFound(ExecutionId),

    #[error("Record store error: {0}")]
    RecordStore(#[from] RecordStoreError),
}

/// Why a single job failed. Rendered to a string at the executor boundary.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Failed to create execution record: {0}")]
    RecordStore(#[from] RecordStoreError),
}

/// Failures while wiring the engine together from settings.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Record store error: {0}")]
    RecordStore(#[from] RecordStoreError),
}
