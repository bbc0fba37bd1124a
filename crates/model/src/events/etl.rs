use crate::core::identifiers::{ExecutionId, JobId, SourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the engine reports while a batch runs. Emitted through an
/// injectable sink so job isolation can be asserted without scraping logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EtlEvent {
    /// Jobs were resolved and the batch is about to run them.
    BatchStarted {
        source_id: SourceId,
        source_name: String,
        total_jobs: usize,
        actor: String,
        timestamp: DateTime<Utc>,
    },

    /// Every job of the batch has a terminal result.
    BatchCompleted {
        source_id: SourceId,
        source_name: String,
        total_jobs: usize,
        completed: u64,
        failed: u64,
        rows_loaded: u64,
        timestamp: DateTime<Utc>,
    },

    /// The running record exists and source I/O is about to start.
    JobStarted {
        job_id: JobId,
        job_name: String,
        execution_id: ExecutionId,
        timestamp: DateTime<Utc>,
    },

    JobCompleted {
        job_id: JobId,
        job_name: String,
        execution_id: ExecutionId,
        rows: u64,
        elapsed_seconds: f64,
        timestamp: DateTime<Utc>,
    },

    JobFailed {
        job_id: JobId,
        job_name: String,
        execution_id: Option<ExecutionId>,
        error: String,
        elapsed_seconds: f64,
        timestamp: DateTime<Utc>,
    },

    /// The extract returned no rows, so the load step did not run.
    LoadSkipped {
        job_id: JobId,
        target_table: String,
        timestamp: DateTime<Utc>,
    },

    /// The terminal state could not be persisted.
    RecordWriteFailed {
        job_id: JobId,
        execution_id: Option<ExecutionId>,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl fmt::Display for EtlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtlEvent::BatchStarted {
                source_name,
                total_jobs,
                actor,
                timestamp,
                ..
            } => write!(
                f,
                "[{}] Batch started: {} job(s) for source '{}' (actor={})",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                total_jobs,
                source_name,
                actor
            ),

            EtlEvent::BatchCompleted {
                source_name,
                total_jobs,
                completed,
                failed,
                rows_loaded,
                timestamp,
                ..
            } => write!(
                f,
                "[{}] Batch completed for source '{}': {}/{} job(s) completed, {} failed, {} row(s) loaded",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                source_name,
                completed,
                total_jobs,
                failed,
                rows_loaded
            ),

            EtlEvent::JobStarted {
                job_id,
                job_name,
                execution_id,
                timestamp,
            } => write!(
                f,
                "[{}] Job started: {} (job={}, execution={})",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                job_name,
                job_id,
                execution_id
            ),

            EtlEvent::JobCompleted {
                job_id,
                job_name,
                rows,
                elapsed_seconds,
                timestamp,
                ..
            } => write!(
                f,
                "[{}] Job completed: {} - {} row(s) in {:.2}s (job={})",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                job_name,
                rows,
                elapsed_seconds,
                job_id
            ),

            EtlEvent::JobFailed {
                job_id,
                job_name,
                error,
                elapsed_seconds,
                timestamp,
                ..
            } => write!(
                f,
                "[{}] Job failed: {} after {:.2}s: {} (job={})",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                job_name,
                elapsed_seconds,
                error,
                job_id
            ),

            EtlEvent::LoadSkipped {
                job_id,
                target_table,
                timestamp,
            } => write!(
                f,
                "[{}] Load skipped for {}: no rows extracted (job={})",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                target_table,
                job_id
            ),

            EtlEvent::RecordWriteFailed {
                job_id,
                error,
                timestamp,
                ..
            } => write!(
                f,
                "[{}] Execution record write failed: {} (job={})",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                error,
                job_id
            ),
        }
    }
}

impl EtlEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            EtlEvent::BatchStarted { .. } => "batch.started",
            EtlEvent::BatchCompleted { .. } => "batch.completed",
            EtlEvent::JobStarted { .. } => "job.started",
            EtlEvent::JobCompleted { .. } => "job.completed",
            EtlEvent::JobFailed { .. } => "job.failed",
            EtlEvent::LoadSkipped { .. } => "load.skipped",
            EtlEvent::RecordWriteFailed { .. } => "record.write_failed",
        }
    }

    pub fn job_id(&self) -> Option<JobId> {
        match self {
            EtlEvent::JobStarted { job_id, .. }
            | EtlEvent::JobCompleted { job_id, .. }
            | EtlEvent::JobFailed { job_id, .. }
            | EtlEvent::LoadSkipped { job_id, .. }
            | EtlEvent::RecordWriteFailed { job_id, .. } => Some(*job_id),
            EtlEvent::BatchStarted { .. } | EtlEvent::BatchCompleted { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            EtlEvent::JobFailed { .. } | EtlEvent::RecordWriteFailed { .. }
        )
    }
}
