use async_trait::async_trait;
use model::events::etl::EtlEvent;
use std::sync::Arc;
use tracing::{info, warn};

/// Receives engine events. Injected into the executor and orchestrator.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: EtlEvent);
}

/// Writes every event to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn emit(&self, event: EtlEvent) {
        let job_id = event.job_id().map(|id| id.get());
        if event.is_error() {
            warn!(event_type = event.event_type(), job_id, "{event}");
        } else {
            info!(event_type = event.event_type(), job_id, "{event}");
        }
    }
}

/// Forwards each event to every inner sink, in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

#[async_trait]
impl EventSink for FanoutSink {
    async fn emit(&self, event: EtlEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}
