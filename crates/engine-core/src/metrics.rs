use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    jobs_completed: AtomicU64,
    jobs_failed: AtomicU64,
    rows_loaded: AtomicU64,
}

/// Counters for one batch run. Cheap to clone; clones share counters.
#[derive(Debug, Clone, Default)]
pub struct BatchMetrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub jobs_completed: u64,
    pub jobs_failed: u64,
    pub rows_loaded: u64,
}

impl BatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_completed(&self, rows: u64) {
        self.inner.jobs_completed.fetch_add(1, Ordering::Relaxed);
        self.inner.rows_loaded.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.inner.jobs_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            jobs_completed: self.inner.jobs_completed.load(Ordering::Relaxed),
            jobs_failed: self.inner.jobs_failed.load(Ordering::Relaxed),
            rows_loaded: self.inner.rows_loaded.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_counters() {
        let metrics = BatchMetrics::new();
        let clone = metrics.clone();
        metrics.record_completed(3);
        clone.record_failed();
        clone.record_completed(0);

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                jobs_completed: 2,
                jobs_failed: 1,
                rows_loaded: 3,
            }
        );
    }
}
