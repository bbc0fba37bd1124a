use crate::event_bus::sink::EventSink;
use async_trait::async_trait;
use model::events::etl::EtlEvent;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};

type Filter = Arc<dyn Fn(&EtlEvent) -> bool + Send + Sync>;

struct Subscriber {
    sender: mpsc::Sender<Arc<EtlEvent>>,
    filter: Option<Filter>,
}

/// A subscription handle that can be used to unsubscribe from events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    subscriber_id: u64,
}

/// Fans events out to channel subscribers. Publishing never blocks: a
/// subscriber whose channel is full misses the event.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<u64, Subscriber>>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, sender: mpsc::Sender<Arc<EtlEvent>>) -> Subscription {
        self.register(sender, None).await
    }

    /// Only events for which `filter` returns true are delivered.
    pub async fn subscribe_filtered<F>(
        &self,
        sender: mpsc::Sender<Arc<EtlEvent>>,
        filter: F,
    ) -> Subscription
    where
        F: Fn(&EtlEvent) -> bool + Send + Sync + 'static,
    {
        self.register(sender, Some(Arc::new(filter))).await
    }

    async fn register(
        &self,
        sender: mpsc::Sender<Arc<EtlEvent>>,
        filter: Option<Filter>,
    ) -> Subscription {
        let subscriber_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .write()
            .await
            .insert(subscriber_id, Subscriber { sender, filter });
        debug!(subscriber_id, "Subscribed to engine events");
        Subscription { subscriber_id }
    }

    pub async fn publish(&self, event: EtlEvent) {
        let event = Arc::new(event);
        let subscribers = self.subscribers.read().await;

        for (subscriber_id, subscriber) in subscribers.iter() {
            if let Some(filter) = &subscriber.filter {
                if !filter(event.as_ref()) {
                    continue;
                }
            }

            if let Err(e) = subscriber.sender.try_send(event.clone()) {
                warn!(
                    event_type = event.event_type(),
                    subscriber_id = subscriber_id,
                    error = %e,
                    "Dropped event for subscriber"
                );
            }
        }
    }

    pub async fn unsubscribe(&self, subscription: Subscription) {
        if self
            .subscribers
            .write()
            .await
            .remove(&subscription.subscriber_id)
            .is_some()
        {
            debug!(
                subscriber_id = subscription.subscriber_id,
                "Unsubscribed from engine events"
            );
        }
    }
}

#[async_trait]
impl EventSink for EventBus {
    async fn emit(&self, event: EtlEvent) {
        self.publish(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use model::core::identifiers::JobId;
    use tracing_test::traced_test;

    fn skipped(job: u64) -> EtlEvent {
        EtlEvent::LoadSkipped {
            job_id: JobId::new(job),
            target_table: "dbo.orders".into(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn delivers_to_every_subscriber() {
        let bus = EventBus::new();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);
        bus.subscribe(tx1).await;
        bus.subscribe(tx2).await;

        bus.emit(skipped(1)).await;

        assert_eq!(rx1.recv().await.unwrap().job_id(), Some(JobId::new(1)));
        assert_eq!(rx2.recv().await.unwrap().job_id(), Some(JobId::new(1)));
    }

    #[tokio::test]
    async fn filter_limits_delivery() {
        let bus = EventBus::new();
        let (tx, mut rx) = mpsc::channel(4);
        bus.subscribe_filtered(tx, |e| e.job_id() == Some(JobId::new(2)))
            .await;

        bus.publish(skipped(1)).await;
        bus.publish(skipped(2)).await;

        assert_eq!(rx.recv().await.unwrap().job_id(), Some(JobId::new(2)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let (tx, mut rx) = mpsc::channel(4);
        let sub = bus.subscribe(tx).await;
        bus.unsubscribe(sub).await;

        bus.publish(skipped(1)).await;
        // The bus held the only sender, so the channel is now closed.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    #[traced_test]
    async fn full_channel_drops_with_warning() {
        let bus = EventBus::new();
        let (tx, _rx) = mpsc::channel(1);
        bus.subscribe(tx).await;

        bus.publish(skipped(1)).await;
        bus.publish(skipped(2)).await;

        assert!(logs_contain("Dropped event for subscriber"));
    }
}
