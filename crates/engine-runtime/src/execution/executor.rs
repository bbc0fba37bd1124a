//! Runs one job end to end: record, connect, extract, load, finalize.
//!
//! Every failure is absorbed here. The caller always gets a `JobResult`, and
//! the execution record always reaches a terminal state unless the store itself
//! refuses the write.

use crate::{error::JobError, execution::factory::ConnectionFactory};
use chrono::Utc;
use connectors::{
    descriptor::{ConnectionDescriptor, DescriptorSettings},
    sql::base::adapter::SqlAdapter,
};
use engine_core::{
    event_bus::sink::EventSink,
    state::writer::{RecordHandle, RecordWriter, TerminalState},
};
use model::{
    catalog::{job::Job, source::Source},
    events::etl::EtlEvent,
    execution::result::{JobOutcome, JobResult},
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct JobExecutor {
    factory: Arc<dyn ConnectionFactory>,
    writer: RecordWriter,
    events: Arc<dyn EventSink>,
    descriptor: DescriptorSettings,
}

impl JobExecutor {
    pub fn new(
        factory: Arc<dyn ConnectionFactory>,
        writer: RecordWriter,
        events: Arc<dyn EventSink>,
        descriptor: DescriptorSettings,
    ) -> Self {
        Self {
            factory,
            writer,
            events,
            descriptor,
        }
    }

    pub async fn execute(&self, job: &Job, source: &Source, actor: &str) -> JobResult {
        info!(job_id = %job.id, source = %source.name, "Running job '{}'", job.name);

        let handle = match self.writer.create_running(job, &source.name, actor).await {
            Ok(handle) => handle,
            Err(e) => return self.unrecorded_failure(job, JobError::from(e)).await,
        };

        self.events
            .emit(EtlEvent::JobStarted {
                job_id: job.id,
                job_name: job.name.clone(),
                execution_id: handle.id(),
                timestamp: Utc::now(),
            })
            .await;

        let started = Instant::now();
        let outcome = self.run(job, source).await;
        let elapsed_seconds = started.elapsed().as_secs_f64();

        let outcome = match outcome {
            Ok(rows) => {
                info!(job_id = %job.id, rows, "Job '{}' completed in {elapsed_seconds:.2}s", job.name);
                JobOutcome::Completed { rows }
            }
            Err(e) => {
                error!(job_id = %job.id, "Job '{}' failed after {elapsed_seconds:.2}s: {e}", job.name);
                JobOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.finish(job, handle, outcome, elapsed_seconds).await
    }

    async fn run(&self, job: &Job, source: &Source) -> Result<u64, JobError> {
        let descriptor = ConnectionDescriptor::for_source(source, &self.descriptor)?;
        debug!(job_id = %job.id, "Connecting with {descriptor}");
        let adapter = self.factory.connect(&descriptor).await?;

        let result = self.extract_and_load(adapter.as_ref(), job).await;

        if let Err(e) = adapter.close().await {
            warn!(job_id = %job.id, "Failed to close connection: {e}");
        }
        result
    }

    async fn extract_and_load(
        &self,
        adapter: &(dyn SqlAdapter + Send + Sync),
        job: &Job,
    ) -> Result<u64, JobError> {
        let rows = adapter.query_rows(&job.query).await?;
        let count = rows.row_count() as u64;
        debug!(job_id = %job.id, rows = count, columns = ?rows.columns, "Extracted rows");

        if count == 0 {
            self.events
                .emit(EtlEvent::LoadSkipped {
                    job_id: job.id,
                    target_table: job.target_table.clone(),
                    timestamp: Utc::now(),
                })
                .await;
            return Ok(0);
        }

        adapter.insert_rows(&job.target_table, &rows).await?;
        Ok(count)
    }

    async fn finish(
        &self,
        job: &Job,
        handle: RecordHandle,
        outcome: JobOutcome,
        elapsed_seconds: f64,
    ) -> JobResult {
        let execution_id = handle.id();
        let state = match &outcome {
            JobOutcome::Completed { rows } => TerminalState::Completed {
                rows: *rows,
                elapsed_seconds,
            },
            JobOutcome::Failed { error } => TerminalState::Failed {
                error: error.clone(),
                elapsed_seconds,
            },
        };

        if let Err(e) = self.writer.finalize(handle, state).await {
            error!(job_id = %job.id, %execution_id, "Failed to finalize execution record: {e}");
            self.events
                .emit(EtlEvent::RecordWriteFailed {
                    job_id: job.id,
                    execution_id: Some(execution_id),
                    error: e.to_string(),
                    timestamp: Utc::now(),
                })
                .await;
        }

        let event = match &outcome {
            JobOutcome::Completed { rows } => EtlEvent::JobCompleted {
                job_id: job.id,
                job_name: job.name.clone(),
                execution_id,
                rows: *rows,
                elapsed_seconds,
                timestamp: Utc::now(),
            },
            JobOutcome::Failed { error } => EtlEvent::JobFailed {
                job_id: job.id,
                job_name: job.name.clone(),
                execution_id: Some(execution_id),
                error: error.clone(),
                elapsed_seconds,
                timestamp: Utc::now(),
            },
        };
        self.events.emit(event).await;

        JobResult {
            job_id: job.id,
            job_name: job.name.clone(),
            execution_id: Some(execution_id),
            outcome,
            elapsed_seconds,
        }
    }

    /// The running record could not be created, so no source I/O is attempted.
    async fn unrecorded_failure(&self, job: &Job, e: JobError) -> JobResult {
        error!(job_id = %job.id, "Job '{}' not started: {e}", job.name);
        let error = e.to_string();

        self.events
            .emit(EtlEvent::RecordWriteFailed {
                job_id: job.id,
                execution_id: None,
                error: error.clone(),
                timestamp: Utc::now(),
            })
            .await;
        self.events
            .emit(EtlEvent::JobFailed {
                job_id: job.id,
                job_name: job.name.clone(),
                execution_id: None,
                error: error.clone(),
                elapsed_seconds: 0.0,
                timestamp: Utc::now(),
            })
            .await;

        JobResult {
            job_id: job.id,
            job_name: job.name.clone(),
            execution_id: None,
            outcome: JobOutcome::Failed { error },
            elapsed_seconds: 0.0,
        }
    }
}
