use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use tsbatch_core::error::{Result, TsBatchError};
use tsbatch_core::TimeSeriesRecord;

use super::MetricsSink;

/// Keeps submitted batches in memory. Used by tests and by embedders that
/// forward batches themselves.
#[derive(Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<TimeSeriesRecord>>>,
    failing: AtomicBool,
    attempts: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn batches_guard(&self) -> MutexGuard<'_, Vec<Vec<TimeSeriesRecord>>> {
        self.batches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reject every submission while `failing` is set.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Number of `submit` calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Accepted batches, oldest first.
    pub fn batches(&self) -> Vec<Vec<TimeSeriesRecord>> {
        self.batches_guard().clone()
    }

    /// Take all accepted batches, leaving the sink empty.
    pub fn take_batches(&self) -> Vec<Vec<TimeSeriesRecord>> {
        std::mem::take(&mut *self.batches_guard())
    }
}

#[async_trait]
impl MetricsSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn submit(&self, records: &[TimeSeriesRecord]) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if self.failing.load(Ordering::Relaxed) {
            return Err(TsBatchError::Sink("memory sink set to fail".into()));
        }
        self.batches_guard().push(records.to_vec());
        Ok(())
    }
}
