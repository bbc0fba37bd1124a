use crate::core::identifiers::{ExecutionId, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Running => "running",
            ExecutionStatus::Completed => "completed",
            ExecutionStatus::Failed => "failed",
            ExecutionStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Completed | ExecutionStatus::Failed | ExecutionStatus::Cancelled
        )
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ExecutionStatus::Pending),
            "running" => Ok(ExecutionStatus::Running),
            "completed" => Ok(ExecutionStatus::Completed),
            "failed" => Ok(ExecutionStatus::Failed),
            "cancelled" => Ok(ExecutionStatus::Cancelled),
            other => Err(format!("Unknown execution status: {other}")),
        }
    }
}

/// Fields supplied when an execution attempt is first persisted.
#[derive(Debug, Clone)]
pub struct NewExecutionRecord {
    pub job_id: JobId,
    pub source_name: String,
    pub job_name: String,
    pub executed_by: String,
    pub started_at: DateTime<Utc>,
}

/// Durable audit row for one job run attempt.
///
/// Source and job names are captured at execution time so later renames in the
/// catalog do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub id: ExecutionId,
    pub job_id: JobId,
    pub source_name: String,
    pub job_name: String,
    pub status: ExecutionStatus,
    pub rows_processed: Option<u64>,
    pub elapsed_seconds: Option<f64>,
    pub executed_by: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub execution_log: Option<String>,
}

impl ExecutionRecord {
    pub fn running(id: ExecutionId, new: NewExecutionRecord) -> Self {
        ExecutionRecord {
            id,
            job_id: new.job_id,
            source_name: new.source_name,
            job_name: new.job_name,
            status: ExecutionStatus::Running,
            rows_processed: None,
            elapsed_seconds: None,
            executed_by: new.executed_by,
            started_at: new.started_at,
            completed_at: None,
            error_message: None,
            execution_log: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
