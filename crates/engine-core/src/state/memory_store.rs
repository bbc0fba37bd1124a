use crate::{error::RecordStoreError, state::RecordStore};
use async_trait::async_trait;
use model::{
    core::identifiers::{ExecutionId, JobId},
    execution::record::{ExecutionRecord, NewExecutionRecord},
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local record store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<ExecutionId, ExecutionRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Every record, in creation order.
    pub async fn all(&self) -> Vec<ExecutionRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, new: NewExecutionRecord) -> Result<ExecutionRecord, RecordStoreError> {
        let mut records = self.records.write().await;
        let next = records.keys().next_back().map_or(1, |id| id.get() + 1);
        let record = ExecutionRecord::running(ExecutionId::new(next), new);
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: &ExecutionRecord) -> Result<(), RecordStoreError> {
        let mut records = self.records.write().await;
        let existing = records
            .get_mut(&record.id)
            .ok_or(RecordStoreError::NotFound(record.id))?;
        if existing.is_terminal() {
            return Err(RecordStoreError::AlreadyTerminal(existing.id, existing.status));
        }
        *existing = record.clone();
        Ok(())
    }

    async fn get(&self, id: ExecutionId) -> Result<Option<ExecutionRecord>, RecordStoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<ExecutionRecord>, RecordStoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .rev()
            .filter(|r| r.job_id == job_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use model::execution::record::ExecutionStatus;

    fn new_record(job: u64) -> NewExecutionRecord {
        NewExecutionRecord {
            job_id: JobId::new(job),
            source_name: "erp".into(),
            job_name: "orders".into(),
            executed_by: "bob".into(),
            started_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_then_update() {
        let store = MemoryRecordStore::new();
        let mut record = store.create(new_record(1)).await.unwrap();
        assert_eq!(record.id, ExecutionId::new(1));

        record.status = ExecutionStatus::Failed;
        record.error_message = Some("boom".into());
        store.update(&record).await.unwrap();

        let stored = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ExecutionStatus::Failed);
        assert!(matches!(
            store.update(&record).await,
            Err(RecordStoreError::AlreadyTerminal(..))
        ));
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let store = MemoryRecordStore::new();
        store.create(new_record(1)).await.unwrap();
        store.create(new_record(2)).await.unwrap();
        store.create(new_record(1)).await.unwrap();

        let ids: Vec<u64> = store
            .list_for_job(JobId::new(1))
            .await
            .unwrap()
            .iter()
            .map(|r| r.id.get())
            .collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(store.len().await, 3);
    }
}
