use crate::error::CliError;
use connectors::{
    adapter::Adapter,
    descriptor::{ConnectionDescriptor, DescriptorSettings},
    sql::base::adapter::LoadOptions,
};
use model::catalog::source::Source;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Builds the descriptor the engine would use, connects and runs `SELECT 1`.
pub async fn ping_source(
    source: &Source,
    settings: &DescriptorSettings,
) -> Result<Duration, CliError> {
    let descriptor = ConnectionDescriptor::for_source(source, settings)?;
    info!("Pinging {} with {descriptor}", source.name);

    let started = Instant::now();
    let adapter = Adapter::connect(&descriptor, LoadOptions::default())
        .await
        .inspect_err(|e| error!("Connection to '{}' failed: {e}", source.name))?;
    let sql = adapter.get_sql();
    info!("Connected to {} source", sql.kind().display_name());

    let result = sql.ping().await;
    if let Err(e) = sql.close().await {
        error!("Failed to close connection to '{}': {e}", source.name);
    }
    result?;

    Ok(started.elapsed())
}
