use crate::{env::EnvManager, error::CliError};
use clap::Parser;
use commands::Commands;
use engine_config::settings::EngineSettings;
use engine_core::{
    catalog::{JobCatalog, SourceCatalog, file_catalog::FileCatalog},
    event_bus::{
        bus::EventBus,
        sink::{FanoutSink, TracingSink},
    },
    state::{sled_store::SledRecordStore, writer::RecordWriter},
};
use engine_runtime::execution::orchestrator::BatchOrchestrator;
use model::events::etl::EtlEvent;
use std::{path::PathBuf, sync::Arc};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;
mod output;

const PROGRESS_CHANNEL_SIZE: usize = 64;

#[derive(Parser)]
#[command(name = "etl", version = "0.1.0", about = "Source-to-target ETL job runner")]
struct Cli {
    #[arg(long, global = true, help = "Env file to load (defaults to ./.env when present)")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut env = EnvManager::new();
    match &cli.env_file {
        Some(path) => env.load_from_file(path)?,
        None => {
            env.load_if_present(".env")?;
        }
    }
    let settings = EngineSettings::from_vars(env.all())?;

    match cli.command {
        Commands::Run {
            source,
            actor,
            json,
            output,
        } => {
            let bus = EventBus::new();
            let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_SIZE);
            let subscription = bus
                .subscribe_filtered(tx, |event| {
                    matches!(
                        event,
                        EtlEvent::BatchStarted { .. }
                            | EtlEvent::JobCompleted { .. }
                            | EtlEvent::JobFailed { .. }
                    )
                })
                .await;
            let printer = spawn_progress_printer(rx);

            let sink = FanoutSink::new()
                .with(Arc::new(TracingSink))
                .with(Arc::new(bus.clone()));
            let orchestrator = BatchOrchestrator::from_settings(&settings, env.all(), Arc::new(sink))?;
            let report = orchestrator.run_batch(source, &actor).await;

            bus.unsubscribe(subscription).await;
            drop(orchestrator);
            let _ = printer.await;

            let report = report?;
            match output {
                Some(path) => {
                    output::write_json(&report, &path).await?;
                    info!("Report written to {path}");
                }
                None if json => println!("{}", output::to_json(&report)?),
                None => print!("{}", output::render_report(&report)),
            }
        }
        Commands::Record { id, json } => {
            let writer = open_records(&settings)?;
            let record = writer.get(id).await?.ok_or(CliError::RecordNotFound(id))?;
            if json {
                println!("{}", output::to_json(&record)?);
            } else {
                print!("{}", output::render_record(&record));
            }
        }
        Commands::History { job } => {
            let writer = open_records(&settings)?;
            let records = writer.history(job).await?;
            print!("{}", output::render_history(&records));
        }
        Commands::Sources { kind } => {
            let catalog = FileCatalog::load(&settings.catalog_path, env.all())?;
            let sources = match kind {
                Some(kind) => catalog.list_by_kind(kind).await?,
                None => catalog.list_active().await?,
            };
            print!("{}", output::render_sources(&sources));
        }
        Commands::Jobs { source } => {
            let catalog = FileCatalog::load(&settings.catalog_path, env.all())?;
            catalog
                .get_active_by_id(source)
                .await?
                .ok_or(CliError::SourceNotFound(source))?;
            let jobs = catalog.list_by_source(source).await?;
            print!("{}", output::render_jobs(&jobs));
        }
        Commands::TestConn { source } => {
            let catalog = FileCatalog::load(&settings.catalog_path, env.all())?;
            let source = catalog
                .get_active_by_id(source)
                .await?
                .ok_or(CliError::SourceNotFound(source))?;
            let elapsed = conn::ping_source(&source, &settings.descriptor).await?;
            println!(
                "Connection to '{}' succeeded in {:.2}s",
                source.name,
                elapsed.as_secs_f64()
            );
        }
    }

    Ok(())
}

fn open_records(settings: &EngineSettings) -> Result<RecordWriter, CliError> {
    let store = SledRecordStore::open(&settings.state_dir)?;
    Ok(RecordWriter::new(Arc::new(store)))
}

/// Prints a `[done/total]` line to stderr as each job finishes.
fn spawn_progress_printer(mut rx: mpsc::Receiver<Arc<EtlEvent>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut total = 0;
        let mut done = 0;
        while let Some(event) = rx.recv().await {
            match event.as_ref() {
                EtlEvent::BatchStarted { total_jobs, .. } => total = *total_jobs,
                EtlEvent::JobCompleted { job_name, rows, .. } => {
                    done += 1;
                    eprintln!("[{done}/{total}] {job_name}: {rows} row(s)");
                }
                EtlEvent::JobFailed { job_name, error, .. } => {
                    done += 1;
                    eprintln!("[{done}/{total}] {job_name}: failed ({error})");
                }
                _ => {}
            }
        }
    })
}
