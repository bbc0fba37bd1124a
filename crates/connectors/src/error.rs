use crate::sql::base::error::{ConnectorError, DbError};
use model::catalog::source::DatabaseKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The source is cataloged with a kind that has no execution adapter.
    #[error("Unsupported source kind: {0}")]
    UnsupportedSourceKind(DatabaseKind),

    /// Failed to open a connection to the source.
    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    /// Database-related error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
