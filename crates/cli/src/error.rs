use connectors::{error::AdapterError, sql::base::error::DbError};
use engine_config::settings::error::SettingsError;
use engine_core::error::{CatalogError, RecordStoreError};
use engine_runtime::error::{BatchError, InitError};
use model::core::identifiers::{ExecutionId, SourceId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid env file: {0}")]
    Env(#[from] dotenvy::Error),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to start the engine: {0}")]
    Init(#[from] InitError),

    #[error("Failed to load the catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to open execution records: {0}")]
    RecordStore(#[from] RecordStoreError),

    #[error("{0}")]
    Batch(#[from] BatchError),

    #[error("Source {0} not found or inactive")]
    SourceNotFound(SourceId),

    #[error("Execution record {0} not found")]
    RecordNotFound(ExecutionId),

    #[error("Connection test failed: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Connection test failed: {0}")]
    Database(#[from] DbError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
