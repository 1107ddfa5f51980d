//! Metrics sinks: the transport boundary the flusher submits batches to.
//!
//! The flusher never retries, splits, or rate-limits; a sink either accepts
//! the whole batch or returns an error and the batch is dropped.

pub mod json_file;
pub mod log;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use tsbatch_core::error::{Result, TsBatchError};
use tsbatch_core::TimeSeriesRecord;

use crate::config::{SinkKind, SinkSection};

pub use json_file::JsonFileSink;
pub use log::LogSink;
pub use memory::MemorySink;

#[async_trait]
pub trait MetricsSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn submit(&self, records: &[TimeSeriesRecord]) -> Result<()>;
}

/// Resource path of a project, as reported alongside each submission.
pub fn project_path(project_id: &str) -> String {
    format!("projects/{project_id}")
}

/// Build the sink selected by config.
pub fn build_sink(cfg: &SinkSection) -> Result<Arc<dyn MetricsSink>> {
    match cfg.kind {
        SinkKind::Log => Ok(Arc::new(LogSink::new(&cfg.project_id))),
        SinkKind::JsonFile => {
            let path = cfg.path.clone().ok_or_else(|| {
                TsBatchError::Misconfigured("sink.path is required for json_file".into())
            })?;
            Ok(Arc::new(JsonFileSink::new(&cfg.project_id, path)))
        }
    }
}
