use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::{catalog::source::DatabaseKind, records::row::RowSet};

/// Tuning for the load step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub max_rows_per_insert: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_rows_per_insert: 1000,
        }
    }
}

/// Execution seam for one open source connection. Every database kind with an
/// adapter implements this; the job executor only ever talks to this trait.
#[async_trait]
pub trait SqlAdapter {
    /// Runs a query script verbatim and returns the first result set together
    /// with the column names reported by the driver.
    async fn query_rows(&self, sql: &str) -> Result<RowSet, DbError>;

    /// Inserts every row into `table` inside a single transaction, using the
    /// row set's column names as the target columns. Returns rows affected.
    async fn insert_rows(&self, table: &str, rows: &RowSet) -> Result<u64, DbError>;

    /// Cheap round trip used by connectivity checks.
    async fn ping(&self) -> Result<(), DbError>;

    /// Releases the connection. Further calls fail with `DbError::Closed`.
    async fn close(&self) -> Result<(), DbError>;

    fn kind(&self) -> DatabaseKind;
}
