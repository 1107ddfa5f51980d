use async_trait::async_trait;

use tsbatch_core::error::Result;
use tsbatch_core::TimeSeriesRecord;

use super::{project_path, MetricsSink};

/// Emits each record as a structured `tracing` event.
pub struct LogSink {
    project: String,
}

impl LogSink {
    pub fn new(project_id: &str) -> Self {
        Self {
            project: project_path(project_id),
        }
    }
}

#[async_trait]
impl MetricsSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn submit(&self, records: &[TimeSeriesRecord]) -> Result<()> {
        for r in records {
            let [cluster, namespace, location, container, pod] = r.resource.labels().map(|(_, v)| v);
            tracing::info!(
                project = %self.project,
                metric = %r.metric_type,
                kind = r.kind.as_str(),
                resource_type = %r.resource.resource_type(),
                cluster_name = %cluster,
                namespace_name = %namespace,
                location = %location,
                container_name = %container,
                pod_name = %pod,
                value = r.value,
                start = %r.interval.start_time,
                end = %r.interval.end_time,
                "time series"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use tsbatch_core::ResourceTag;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn emits_every_resource_label() {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let tag = ResourceTag::new("k8s_container", "vdc", "batch", "us-central1-a", "worker", "worker-7")
            .unwrap();
        let rec = TimeSeriesRecord::gauge("custom.googleapis.com/q".into(), tag, 3.0, Utc::now());
        LogSink::new("hail-vdc").submit(&[rec]).await.unwrap();

        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        for field in [
            "project=projects/hail-vdc",
            "resource_type=k8s_container",
            "cluster_name=vdc",
            "namespace_name=batch",
            "location=us-central1-a",
            "container_name=worker",
            "pod_name=worker-7",
        ] {
            assert!(text.contains(field), "missing {field} in {text}");
        }
    }
}
