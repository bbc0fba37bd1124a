use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// One fetched row, positionally aligned with the owning `RowSet::columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    pub values: Vec<Value>,
}

impl RowData {
    pub fn new(values: Vec<Value>) -> Self {
        RowData { values }
    }
}

/// Result of an extract query: driver-reported column names, in order, and
/// every fetched row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<RowData>,
}

impl RowSet {
    pub fn new(columns: Vec<String>, rows: Vec<RowData>) -> Self {
        RowSet { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
