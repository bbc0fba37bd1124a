use crate::{error::RecordStoreError, state::RecordStore};
use async_trait::async_trait;
use model::{
    core::identifiers::{ExecutionId, JobId},
    execution::record::{ExecutionRecord, NewExecutionRecord},
};
use sled::transaction::{ConflictableTransactionError, TransactionError};
use std::path::Path;

pub struct SledRecordStore {
    db: sled::Db,
}

impl SledRecordStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RecordStoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    #[inline]
    fn rec_key(id: ExecutionId) -> String {
        format!("rec:{:020}", id.get())
    }

    /// Zero-padded so a prefix scan yields ids in ascending order.
    #[inline]
    fn job_key(job_id: JobId, id: ExecutionId) -> String {
        format!("job:{:020}:{:020}", job_id.get(), id.get())
    }

    fn decode(bytes: &[u8]) -> Result<ExecutionRecord, RecordStoreError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[async_trait]
impl RecordStore for SledRecordStore {
    async fn create(&self, new: NewExecutionRecord) -> Result<ExecutionRecord, RecordStoreError> {
        // sled ids start at 0; execution ids start at 1.
        let id = ExecutionId::new(self.db.generate_id()? + 1);
        let record = ExecutionRecord::running(id, new);
        let bytes = bincode::serialize(&record)?;

        // Record and history index land together or not at all.
        let mut batch = sled::Batch::default();
        batch.insert(Self::rec_key(id).as_str(), bytes);
        batch.insert(Self::job_key(record.job_id, id).as_str(), &[] as &[u8]);
        self.db.apply_batch(batch)?;
        self.db.flush_async().await?;
        Ok(record)
    }

    async fn update(&self, record: &ExecutionRecord) -> Result<(), RecordStoreError> {
        let key = Self::rec_key(record.id);
        let new_bytes = bincode::serialize(record)?;

        // Check-then-set inside a transaction so a terminal record is never
        // overwritten by a concurrent writer.
        let result = self.db.transaction::<_, _, RecordStoreError>(|tx_db| {
            let existing_bytes = tx_db
                .get(&key)?
                .ok_or(ConflictableTransactionError::Abort(RecordStoreError::NotFound(
                    record.id,
                )))?;
            let existing: ExecutionRecord = bincode::deserialize(&existing_bytes)
                .map_err(|e| ConflictableTransactionError::Abort(e.into()))?;

            if existing.is_terminal() {
                return Err(ConflictableTransactionError::Abort(
                    RecordStoreError::AlreadyTerminal(existing.id, existing.status),
                ));
            }

            tx_db.insert(key.as_str(), new_bytes.as_slice())?;
            Ok(())
        });

        match result {
            Ok(()) => {}
            Err(TransactionError::Abort(e)) => return Err(e),
            Err(TransactionError::Storage(e)) => return Err(e.into()),
        }

        self.db.flush_async().await?;
        Ok(())
    }

    async fn get(&self, id: ExecutionId) -> Result<Option<ExecutionRecord>, RecordStoreError> {
        match self.db.get(Self::rec_key(id))? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<ExecutionRecord>, RecordStoreError> {
        let prefix = format!("job:{:020}:", job_id.get());
        let mut ids = Vec::new();
        for item in self.db.scan_prefix(prefix).rev() {
            let (key, _) = item?;
            let id = std::str::from_utf8(&key)
                .ok()
                .and_then(|k| k.rsplit(':').next())
                .and_then(|id| id.parse::<u64>().ok());
            if let Some(id) = id {
                ids.push(ExecutionId::new(id));
            }
        }

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get(id).await? {
                records.push(record);
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use model::execution::record::ExecutionStatus;
    use tempfile::tempdir;

    fn new_record(job: u64) -> NewExecutionRecord {
        NewExecutionRecord {
            job_id: JobId::new(job),
            source_name: "erp".into(),
            job_name: format!("job-{job}"),
            executed_by: "alice".into(),
            started_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::open(dir.path()).unwrap();

        let a = store.create(new_record(1)).await.unwrap();
        let b = store.create(new_record(1)).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(a.status, ExecutionStatus::Running);
        assert_eq!(store.get(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn create_writes_record_and_history_index() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::open(dir.path()).unwrap();

        let record = store.create(new_record(8)).await.unwrap();
        assert!(store.db.contains_key(SledRecordStore::rec_key(record.id)).unwrap());
        assert!(
            store
                .db
                .contains_key(SledRecordStore::job_key(JobId::new(8), record.id))
                .unwrap()
        );
        assert_eq!(store.list_for_job(JobId::new(8)).await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempdir().unwrap();
        let id = {
            let store = SledRecordStore::open(dir.path()).unwrap();
            store.create(new_record(3)).await.unwrap().id
        };

        let store = SledRecordStore::open(dir.path()).unwrap();
        let record = store.get(id).await.unwrap().unwrap();
        assert_eq!(record.job_name, "job-3");
    }

    #[tokio::test]
    async fn refuses_to_overwrite_terminal_record() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::open(dir.path()).unwrap();

        let mut record = store.create(new_record(1)).await.unwrap();
        record.status = ExecutionStatus::Completed;
        record.rows_processed = Some(3);
        store.update(&record).await.unwrap();

        record.status = ExecutionStatus::Failed;
        let err = store.update(&record).await.unwrap_err();
        assert!(matches!(
            err,
            RecordStoreError::AlreadyTerminal(_, ExecutionStatus::Completed)
        ));
    }

    #[tokio::test]
    async fn update_of_unknown_record_fails() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::open(dir.path()).unwrap();
        let ghost = ExecutionRecord::running(ExecutionId::new(42), new_record(1));
        assert!(matches!(
            store.update(&ghost).await,
            Err(RecordStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn lists_job_history_newest_first() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::open(dir.path()).unwrap();

        let first = store.create(new_record(1)).await.unwrap();
        store.create(new_record(2)).await.unwrap();
        let second = store.create(new_record(1)).await.unwrap();

        let history: Vec<ExecutionId> = store
            .list_for_job(JobId::new(1))
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(history, vec![second.id, first.id]);
    }
}
