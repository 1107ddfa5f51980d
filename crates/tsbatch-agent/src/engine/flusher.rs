use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use tsbatch_core::error::Result;
use tsbatch_core::{ResourceTag, TimeSeriesRecord};

use super::aggregator::{Aggregator, Snapshot};
use super::sampler;
use crate::sink::MetricsSink;

/// Result of a single flush cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing pending; the sink was not called.
    Skipped,
    Submitted { counters: usize, gauges: usize },
}

/// Periodic sample -> snapshot -> submit loop.
///
/// Cycles are serialized: the next wait starts only after the previous
/// submission returned. A failed submission drops that period's data.
pub struct Flusher {
    aggregator: Arc<Aggregator>,
    sink: Arc<dyn MetricsSink>,
    resource: ResourceTag,
    metric_prefix: String,
    interval: Duration,
    final_flush: bool,
}

impl Flusher {
    pub fn new(
        aggregator: Arc<Aggregator>,
        sink: Arc<dyn MetricsSink>,
        resource: ResourceTag,
        metric_prefix: &str,
        interval: Duration,
    ) -> Self {
        Self {
            aggregator,
            sink,
            resource,
            metric_prefix: metric_prefix.trim_end_matches('/').to_string(),
            interval,
            final_flush: true,
        }
    }

    /// Whether `run` performs one last cycle after shutdown is requested.
    pub fn with_final_flush(mut self, enabled: bool) -> Self {
        self.final_flush = enabled;
        self
    }

    fn metric_type(&self, name: &str) -> String {
        format!("{}/{}", self.metric_prefix, name)
    }

    /// Convert a snapshot into wire records: counters first, then gauges,
    /// each sorted by name.
    pub fn to_records(&self, snapshot: Snapshot, now: DateTime<Utc>) -> Vec<TimeSeriesRecord> {
        let mut counters: Vec<_> = snapshot.counters.into_iter().collect();
        counters.sort_by(|a, b| a.0.cmp(&b.0));
        let mut gauges: Vec<_> = snapshot.gauges.into_iter().collect();
        gauges.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = Vec::with_capacity(counters.len() + gauges.len());
        for (name, c) in counters {
            out.push(TimeSeriesRecord::cumulative(
                self.metric_type(&name),
                self.resource.clone(),
                c.value,
                c.start_time,
                now,
            ));
        }
        for (name, v) in gauges {
            out.push(TimeSeriesRecord::gauge(
                self.metric_type(&name),
                self.resource.clone(),
                v,
                now,
            ));
        }
        out
    }

    /// Run one cycle without waiting.
    ///
    /// A gauge failure aborts before the snapshot, so pending counters carry
    /// over to the next cycle with their original start time.
    pub async fn flush_once(&self) -> Result<FlushOutcome> {
        sampler::sample_all(&self.aggregator)?;

        let snapshot = self.aggregator.snapshot_and_clear();
        if snapshot.is_empty() {
            return Ok(FlushOutcome::Skipped);
        }

        let counters = snapshot.counters.len();
        let gauges = snapshot.gauges.len();
        let records = self.to_records(snapshot, Utc::now());

        self.sink.submit(&records).await?;
        Ok(FlushOutcome::Submitted { counters, gauges })
    }

    async fn cycle(&self) {
        match self.flush_once().await {
            Ok(FlushOutcome::Skipped) => {
                tracing::debug!(sink = self.sink.name(), "flush skipped: nothing pending");
            }
            Ok(FlushOutcome::Submitted { counters, gauges }) => {
                tracing::info!(sink = self.sink.name(), counters, gauges, "flush submitted");
            }
            Err(e) => {
                tracing::error!(
                    sink = self.sink.name(),
                    code = e.code().as_str(),
                    error = %e,
                    "flush cycle failed"
                );
            }
        }
    }

    /// Loop until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// Shutdown interrupts only the wait; an in-flight cycle completes first.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            sink = self.sink.name(),
            interval_secs = self.interval.as_secs(),
            gauges = self.aggregator.registered_gauges().len(),
            "flusher started"
        );

        while !*shutdown.borrow() {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => self.cycle().await,
                res = shutdown.changed() => {
                    if res.is_err() {
                        break;
                    }
                }
            }
        }

        if self.final_flush {
            self.cycle().await;
        }
        tracing::info!(sink = self.sink.name(), "flusher stopped");
    }
}
