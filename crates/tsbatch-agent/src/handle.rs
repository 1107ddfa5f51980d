//! Instrumentation handle shared by call sites.
//!
//! Construct once at startup and clone wherever counters are incremented or
//! gauges registered; every clone points at the same aggregator.

use std::future::Future;
use std::sync::Arc;

use tsbatch_core::Result;

use crate::engine::Aggregator;

#[derive(Clone, Default)]
pub struct MetricsHandle {
    aggregator: Arc<Aggregator>,
}

impl MetricsHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add 1 to counter `name`. Never blocks on I/O.
    pub fn increment(&self, name: &str) {
        self.aggregator.increment(name);
    }

    /// Register an infallible gauge; replaces any gauge with the same name.
    pub fn register_gauge<F>(&self, name: impl Into<String>, f: F)
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        self.aggregator.register_gauge(name, move || Ok(f()));
    }

    /// Register a gauge whose read may fail. A failure aborts the flush cycle
    /// it occurs in.
    pub fn register_fallible_gauge<F>(&self, name: impl Into<String>, f: F)
    where
        F: Fn() -> Result<f64> + Send + Sync + 'static,
    {
        self.aggregator.register_gauge(name, f);
    }

    /// Count one invocation of `work` under `name`, then run it.
    pub async fn counted<F, T>(&self, name: &str, work: F) -> T
    where
        F: Future<Output = T>,
    {
        self.increment(name);
        work.await
    }

    pub fn aggregator(&self) -> Arc<Aggregator> {
        Arc::clone(&self.aggregator)
    }
}
