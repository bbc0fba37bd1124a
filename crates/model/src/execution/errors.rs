use crate::core::identifiers::{JobId, SourceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Port must be between 1 and 65535, got {0}")]
    PortOutOfRange(i64),

    #[error("Host cannot be empty (source {0})")]
    EmptyHost(SourceId),

    #[error("Name cannot be empty ({0})")]
    EmptyName(String),

    #[error("Target table cannot be empty (job {0})")]
    EmptyTargetTable(JobId),

    #[error("Query cannot be empty (job {0})")]
    EmptyQuery(JobId),

    #[error("Unknown database kind: {0}")]
    UnknownKind(String),
}
