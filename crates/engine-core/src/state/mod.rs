use crate::error::RecordStoreError;
use async_trait::async_trait;
use model::{
    core::identifiers::{ExecutionId, JobId},
    execution::record::{ExecutionRecord, NewExecutionRecord},
};

pub mod memory_store;
pub mod sled_store;
pub mod writer;

/// Durable home of execution records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new record in `running` state and assigns its id.
    async fn create(&self, new: NewExecutionRecord) -> Result<ExecutionRecord, RecordStoreError>;

    /// Replaces a stored record. Fails if it is missing or already terminal.
    async fn update(&self, record: &ExecutionRecord) -> Result<(), RecordStoreError>;

    async fn get(&self, id: ExecutionId) -> Result<Option<ExecutionRecord>, RecordStoreError>;

    /// Records of one job, newest first.
    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<ExecutionRecord>, RecordStoreError>;
}
