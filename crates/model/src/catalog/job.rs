use crate::{
    core::identifiers::{JobId, SourceId},
    execution::errors::ValidationError,
};
use serde::{Deserialize, Serialize};

/// A reusable extract query bound to one source, plus the table it loads into.
///
/// `query` is a pre-authored script executed verbatim against the source. It and
/// `target_table` only ever come from the job catalog, never from request input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub source_id: SourceId,
    pub name: String,
    pub source_table: String,
    pub target_table: String,
    pub query: String,
}

impl Job {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName(format!("job {}", self.id)));
        }
        if self.target_table.trim().is_empty() {
            return Err(ValidationError::EmptyTargetTable(self.id));
        }
        if self.query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery(self.id));
        }
        Ok(())
    }
}
