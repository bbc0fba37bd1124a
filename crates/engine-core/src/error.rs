use model::{
    core::identifiers::{ExecutionId, JobId, SourceId},
    execution::{errors::ValidationError, record::ExecutionStatus},
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog references undefined variable ${{{0}}}")]
    UndefinedVariable(String),

    #[error("Invalid catalog entry: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error("Job {job_id} references unknown source {source_id}")]
    OrphanJob { job_id: JobId, source_id: SourceId },
}

#[derive(Error, Debug)]
pub enum RecordStoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("Failed to encode execution record: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Execution record {0} not found")]
    NotFound(ExecutionId),

    #[error("Execution record {0} is already {1}")]
    AlreadyTerminal(ExecutionId, ExecutionStatus),
}
