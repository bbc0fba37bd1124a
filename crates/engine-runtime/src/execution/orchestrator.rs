use crate::{
    error::{BatchError, InitError},
    execution::{
        executor::JobExecutor,
        factory::{ConnectionFactory, DriverConnectionFactory},
    },
};
use chrono::Utc;
use engine_config::settings::EngineSettings;
use engine_core::{
    catalog::{JobCatalog, SourceCatalog, file_catalog::FileCatalog},
    event_bus::sink::EventSink,
    metrics::BatchMetrics,
    state::{sled_store::SledRecordStore, writer::RecordWriter},
};
use model::{
    core::identifiers::{ExecutionId, JobId, SourceId},
    events::etl::EtlEvent,
    execution::{record::ExecutionRecord, report::BatchReport, result::JobOutcome},
};
use std::{collections::HashMap, sync::Arc};
use tracing::info;

/// Runs every job of one source, one after another, and reports each fate.
///
/// Only batch preconditions (unknown or inactive source, catalog failure)
/// surface as errors. Jobs run strictly sequentially; concurrent batches
/// against the same target table are the caller's concern.
pub struct BatchOrchestrator {
    sources: Arc<dyn SourceCatalog>,
    jobs: Arc<dyn JobCatalog>,
    executor: JobExecutor,
    writer: RecordWriter,
    events: Arc<dyn EventSink>,
}

impl BatchOrchestrator {
    pub fn new(
        sources: Arc<dyn SourceCatalog>,
        jobs: Arc<dyn JobCatalog>,
        factory: Arc<dyn ConnectionFactory>,
        writer: RecordWriter,
        events: Arc<dyn EventSink>,
        settings: &EngineSettings,
    ) -> Self {
        let executor = JobExecutor::new(
            factory,
            writer.clone(),
            events.clone(),
            settings.descriptor.clone(),
        );
        Self {
            sources,
            jobs,
            executor,
            writer,
            events,
        }
    }

    /// Wires the file catalog, the sled record store and the real drivers.
    pub fn from_settings(
        settings: &EngineSettings,
        vars: &HashMap<String, String>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, InitError> {
        let catalog = Arc::new(FileCatalog::load(&settings.catalog_path, vars)?);
        let store = Arc::new(SledRecordStore::open(&settings.state_dir)?);
        Ok(Self::new(
            catalog.clone(),
            catalog,
            Arc::new(DriverConnectionFactory::new(settings.load)),
            RecordWriter::new(store),
            events,
            settings,
        ))
    }

    pub async fn run_batch(&self, source_id: SourceId, actor: &str) -> Result<BatchReport, BatchError> {
        let source = self
            .sources
            .get_active_by_id(source_id)
            .await?
            .ok_or(BatchError::SourceNotFound(source_id))?;

        // Resolved once; jobs added while the batch runs are not picked up.
        let mut jobs = self.jobs.list_by_source(source_id).await?;
        jobs.sort_by_key(|job| job.id);

        if jobs.is_empty() {
            info!(source = %source.name, "No jobs for source {source_id}");
            return Ok(BatchReport::empty(source.name));
        }

        info!(source = %source.name, "Starting batch of {} job(s)", jobs.len());
        self.events
            .emit(EtlEvent::BatchStarted {
                source_id,
                source_name: source.name.clone(),
                total_jobs: jobs.len(),
                actor: actor.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        let metrics = BatchMetrics::new();
        let mut results = Vec::with_capacity(jobs.len());
        for job in &jobs {
            let result = self.executor.execute(job, &source, actor).await;
            match &result.outcome {
                JobOutcome::Completed { rows } => metrics.record_completed(*rows),
                JobOutcome::Failed { .. } => metrics.record_failed(),
            }
            results.push(result);
        }

        let snapshot = metrics.snapshot();
        info!(
            source = %source.name,
            completed = snapshot.jobs_completed,
            failed = snapshot.jobs_failed,
            rows = snapshot.rows_loaded,
            "Batch finished"
        );
        self.events
            .emit(EtlEvent::BatchCompleted {
                source_id,
                source_name: source.name.clone(),
                total_jobs: jobs.len(),
                completed: snapshot.jobs_completed,
                failed: snapshot.jobs_failed,
                rows_loaded: snapshot.rows_loaded,
                timestamp: Utc::now(),
            })
            .await;

        Ok(BatchReport {
            source_name: source.name,
            total_jobs: jobs.len(),
            results,
        })
    }

    pub async fn get_record(&self, id: ExecutionId) -> Result<ExecutionRecord, BatchError> {
        self.writer
            .get(id)
            .await?
            .ok_or(BatchError::RecordNotFound(id))
    }

    pub async fn history(&self, job_id: JobId) -> Result<Vec<ExecutionRecord>, BatchError> {
        Ok(self.writer.history(job_id).await?)
    }
}
