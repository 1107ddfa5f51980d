//! tsbatch agent binary.
//!
//! - Loads config (path from argv, default `tsbatch.yaml`)
//! - Registers a process uptime gauge and a heartbeat counter
//! - Runs the flush loop until Ctrl-C, then flushes once more

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use tsbatch_agent::{config, Agent};

const HEARTBEAT_EVERY: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "tsbatch.yaml".into());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, code = e.code().as_str(), error = %e, "config load failed");
            std::process::exit(2);
        }
    };

    let agent = match Agent::new(&cfg) {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "agent startup failed");
            std::process::exit(2);
        }
    };

    let metrics = agent.handle();
    let started = Instant::now();
    metrics.register_gauge("process/uptime_seconds", move || started.elapsed().as_secs_f64());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let flusher = agent.spawn(shutdown_rx);

    let heartbeat = {
        let metrics = metrics.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(HEARTBEAT_EVERY);
            loop {
                tick.tick().await;
                metrics.increment("agent/heartbeat");
            }
        })
    };

    tracing::info!(%path, "tsbatch-agent running");
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "waiting for ctrl-c failed");
    }

    tracing::info!("shutdown requested");
    heartbeat.abort();
    let _ = shutdown_tx.send(true);
    if let Err(e) = flusher.await {
        tracing::error!(error = %e, "flusher task failed");
    }
}
