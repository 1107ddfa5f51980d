use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use tsbatch_core::error::{Result, TsBatchError};
use tsbatch_core::TimeSeriesRecord;

use super::{project_path, MetricsSink};

#[derive(Serialize)]
struct Line<'a> {
    project: &'a str,
    #[serde(flatten)]
    record: &'a TimeSeriesRecord,
}

/// Appends each batch to a file as JSON lines, one record per line.
/// The batch is encoded up front and written with a single call.
pub struct JsonFileSink {
    project: String,
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(project_id: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            project: project_path(project_id),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(&self, records: &[TimeSeriesRecord]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(
                &mut buf,
                &Line {
                    project: &self.project,
                    record,
                },
            )?;
            buf.push(b'\n');
        }
        Ok(buf)
    }
}

#[async_trait]
impl MetricsSink for JsonFileSink {
    fn name(&self) -> &'static str {
        "json_file"
    }

    async fn submit(&self, records: &[TimeSeriesRecord]) -> Result<()> {
        let buf = self.encode(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TsBatchError::Sink(format!("create {}: {e}", parent.display())))?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| TsBatchError::Sink(format!("open {}: {e}", self.path.display())))?;
        file.write_all(&buf)
            .await
            .map_err(|e| TsBatchError::Sink(format!("write {}: {e}", self.path.display())))?;
        file.flush()
            .await
            .map_err(|e| TsBatchError::Sink(format!("flush {}: {e}", self.path.display())))?;
        Ok(())
    }
}
