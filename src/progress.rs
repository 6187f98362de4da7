//! Optional coarse-grained progress reporting.
//!
//! Purely observational: sinks see "N of M complete" notifications and have no
//! effect on control flow. The CLI layer plugs its spinner in here.

use std::sync::Arc;
use tracing::{debug, info};

/// Destination for batch progress notifications.
pub trait ProgressSink: Send + Sync {
    /// Called once before the first dispatch.
    fn begin(&self, description: &str, total: usize) {
        let _ = (description, total);
    }

    /// Called after each descriptor reaches a terminal outcome.
    fn update(&self, completed: usize, total: usize);

    /// Called once after every descriptor has completed.
    fn finish(&self, total: usize) {
        let _ = total;
    }
}

/// Default sink: no reporting.
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn update(&self, _completed: usize, _total: usize) {}
}

pub fn noop_sink() -> Arc<dyn ProgressSink> {
    Arc::new(NoopProgressSink)
}

/// Sink that reports through the `tracing` subscriber, for headless runs.
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn begin(&self, description: &str, total: usize) {
        info!(total, "{description}");
    }

    fn update(&self, completed: usize, total: usize) {
        debug!(completed, total, "batch progress");
    }

    fn finish(&self, total: usize) {
        info!(total, "batch complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        updates: AtomicUsize,
    }

    impl ProgressSink for CountingSink {
        fn update(&self, _completed: usize, _total: usize) {
            self.updates.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let sink = CountingSink {
            updates: AtomicUsize::new(0),
        };
        sink.begin("work", 3);
        sink.update(1, 3);
        sink.finish(3);
        assert_eq!(sink.updates.load(Ordering::SeqCst), 1);
    }
}
