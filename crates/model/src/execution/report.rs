use crate::execution::result::JobResult;
use serde::Serialize;

/// Aggregated, non-persisted outcome of one batch. `results` holds one entry per
/// job that was catalogued when the batch started, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub source_name: String,
    pub total_jobs: usize,
    pub results: Vec<JobResult>,
}

impl BatchReport {
    pub fn empty(source_name: impl Into<String>) -> Self {
        BatchReport {
            source_name: source_name.into(),
            total_jobs: 0,
            results: Vec::new(),
        }
    }

    pub fn completed(&self) -> usize {
        self.results.iter().filter(|r| r.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.completed()
    }

    pub fn rows_loaded(&self) -> u64 {
        self.results.iter().filter_map(|r| r.rows()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::identifiers::{ExecutionId, JobId},
        execution::result::JobOutcome,
    };

    fn report() -> BatchReport {
        BatchReport {
            source_name: "crm".into(),
            total_jobs: 2,
            results: vec![
                JobResult {
                    job_id: JobId::new(1),
                    job_name: "customers".into(),
                    execution_id: Some(ExecutionId::new(10)),
                    outcome: JobOutcome::Completed { rows: 3 },
                    elapsed_seconds: 1.23456,
                },
                JobResult {
                    job_id: JobId::new(2),
                    job_name: "orders".into(),
                    execution_id: Some(ExecutionId::new(11)),
                    outcome: JobOutcome::Failed {
                        error: "Invalid column name 'nope'".into(),
                    },
                    elapsed_seconds: 0.5,
                },
            ],
        }
    }

    #[test]
    fn counts_outcomes() {
        let r = report();
        assert_eq!(r.completed(), 1);
        assert_eq!(r.failed(), 1);
        assert_eq!(r.rows_loaded(), 3);
    }

    #[test]
    fn serializes_logical_shape() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["source_name"], "crm");
        assert_eq!(json["total_jobs"], 2);

        let first = &json["results"][0];
        assert_eq!(first["status"], "completed");
        assert_eq!(first["rows"], 3);
        assert_eq!(first["elapsed_seconds"], 1.23);
        assert!(first.get("error").is_none());

        let second = &json["results"][1];
        assert_eq!(second["status"], "failed");
        assert_eq!(second["error"], "Invalid column name 'nope'");
        assert!(second.get("rows").is_none());
    }
}
