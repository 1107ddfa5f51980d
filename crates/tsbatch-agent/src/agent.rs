//! Startup wiring: config -> resource identity, sink, handle and flusher.
//!
//! Misconfiguration is reported here as an error so the flush loop never
//! starts with incomplete identity.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use tsbatch_core::error::Result;

use crate::config::AgentConfig;
use crate::engine::Flusher;
use crate::handle::MetricsHandle;
use crate::sink::{self, MetricsSink};

pub struct Agent {
    handle: MetricsHandle,
    flusher: Flusher,
}

impl Agent {
    /// Build an agent with the sink selected in config.
    pub fn new(cfg: &AgentConfig) -> Result<Self> {
        let sink = sink::build_sink(&cfg.sink)?;
        Self::with_sink(cfg, sink)
    }

    /// Build an agent around a caller-provided sink.
    pub fn with_sink(cfg: &AgentConfig, sink: Arc<dyn MetricsSink>) -> Result<Self> {
        cfg.validate()?;
        let resource = cfg.resource.resource_tag()?;

        tracing::info!(
            resource_type = resource.resource_type(),
            namespace = resource.namespace_name(),
            sink = sink.name(),
            interval_secs = cfg.flush.interval_secs,
            "metrics agent configured"
        );

        let handle = MetricsHandle::new();
        let flusher = Flusher::new(
            handle.aggregator(),
            sink,
            resource,
            &cfg.flush.metric_prefix,
            cfg.flush.interval(),
        )
        .with_final_flush(cfg.flush.final_flush);

        Ok(Self { handle, flusher })
    }

    pub fn handle(&self) -> MetricsHandle {
        self.handle.clone()
    }

    pub fn flusher(&self) -> &Flusher {
        &self.flusher
    }

    /// Spawn the flush loop on the current runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.flusher.run(shutdown))
    }
}
