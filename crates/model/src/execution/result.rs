use crate::core::identifiers::{ExecutionId, JobId};
use crate::execution::record::ExecutionStatus;
use serde::{Serialize, Serializer};

/// Terminal outcome of one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobOutcome {
    Completed { rows: u64 },
    Failed { error: String },
}

/// What the Job Executor hands back for a single job. Produced for every job,
/// whether it succeeded or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    pub job_id: JobId,
    pub job_name: String,
    /// `None` only when the running record itself could not be created.
    pub execution_id: Option<ExecutionId>,
    #[serde(flatten)]
    pub outcome: JobOutcome,
    #[serde(serialize_with = "round_seconds")]
    pub elapsed_seconds: f64,
}

impl JobResult {
    pub fn status(&self) -> ExecutionStatus {
        match self.outcome {
            JobOutcome::Completed { .. } => ExecutionStatus::Completed,
            JobOutcome::Failed { .. } => ExecutionStatus::Failed,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, JobOutcome::Completed { .. })
    }

    pub fn rows(&self) -> Option<u64> {
        match self.outcome {
            JobOutcome::Completed { rows } => Some(rows),
            JobOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            JobOutcome::Completed { .. } => None,
            JobOutcome::Failed { error } => Some(error),
        }
    }
}

/// Rounds to two decimals. Reporting only; comparisons use the raw value.
pub fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

fn round_seconds<S: Serializer>(seconds: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*seconds))
}
