//! Creates and finalizes the execution record of one job run.
//!
//! `create_running` must succeed before any source I/O happens, and the
//! returned handle is consumed by `finalize`, so a record is finalized at most
//! once per handle.

use crate::{error::RecordStoreError, state::RecordStore};
use chrono::Utc;
use model::{
    catalog::job::Job,
    core::identifiers::{ExecutionId, JobId},
    execution::record::{ExecutionRecord, ExecutionStatus, NewExecutionRecord},
};
use std::sync::Arc;
use tracing::debug;

/// Proof that a `running` record exists. Deliberately not `Clone`.
#[derive(Debug)]
pub struct RecordHandle {
    record: ExecutionRecord,
}

impl RecordHandle {
    pub fn id(&self) -> ExecutionId {
        self.record.id
    }
}

/// How a job run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalState {
    Completed { rows: u64, elapsed_seconds: f64 },
    Failed { error: String, elapsed_seconds: f64 },
}

impl TerminalState {
    pub fn status(&self) -> ExecutionStatus {
        match self {
            TerminalState::Completed { .. } => ExecutionStatus::Completed,
            TerminalState::Failed { .. } => ExecutionStatus::Failed,
        }
    }
}

#[derive(Clone)]
pub struct RecordWriter {
    store: Arc<dyn RecordStore>,
}

impl RecordWriter {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_running(
        &self,
        job: &Job,
        source_name: &str,
        actor: &str,
    ) -> Result<RecordHandle, RecordStoreError> {
        let record = self
            .store
            .create(NewExecutionRecord {
                job_id: job.id,
                source_name: source_name.to_string(),
                job_name: job.name.clone(),
                executed_by: actor.to_string(),
                started_at: Utc::now(),
            })
            .await?;
        debug!(execution_id = %record.id, job_id = %job.id, "Created running record");
        Ok(RecordHandle { record })
    }

    /// Writes every terminal field in a single update.
    pub async fn finalize(
        &self,
        handle: RecordHandle,
        state: TerminalState,
    ) -> Result<ExecutionRecord, RecordStoreError> {
        let mut record = handle.record;
        record.status = state.status();
        record.completed_at = Some(Utc::now());

        match state {
            TerminalState::Completed {
                rows,
                elapsed_seconds,
            } => {
                record.rows_processed = Some(rows);
                record.elapsed_seconds = Some(elapsed_seconds);
                record.execution_log = Some(format!(
                    "Processed {rows} row(s) in {elapsed_seconds:.2}s"
                ));
            }
            TerminalState::Failed {
                error,
                elapsed_seconds,
            } => {
                record.elapsed_seconds = Some(elapsed_seconds);
                record.error_message = Some(error);
            }
        }

        self.store.update(&record).await?;
        debug!(execution_id = %record.id, status = %record.status, "Finalized record");
        Ok(record)
    }

    pub async fn get(&self, id: ExecutionId) -> Result<Option<ExecutionRecord>, RecordStoreError> {
        self.store.get(id).await
    }

    pub async fn history(&self, job_id: JobId) -> Result<Vec<ExecutionRecord>, RecordStoreError> {
        self.store.list_for_job(job_id).await
    }
}
