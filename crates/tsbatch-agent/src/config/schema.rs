use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use tsbatch_core::error::{Result, TsBatchError};
use tsbatch_core::ResourceTag;

/// Fallback source for `resource.namespace_name`.
pub const NAMESPACE_ENV: &str = "TSBATCH_NAMESPACE";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub flush: FlushSection,

    pub resource: ResourceSection,

    pub sink: SinkSection,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TsBatchError::UnsupportedVersion);
        }
        self.flush.validate()?;
        self.resource.resource_tag()?;
        self.sink.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlushSection {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_metric_prefix")]
    pub metric_prefix: String,

    #[serde(default = "default_final_flush")]
    pub final_flush: bool,
}

impl Default for FlushSection {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            metric_prefix: default_metric_prefix(),
            final_flush: default_final_flush(),
        }
    }
}

impl FlushSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.interval_secs) {
            return Err(TsBatchError::Misconfigured(
                "flush.interval_secs must be between 1 and 3600".into(),
            ));
        }
        if self.metric_prefix.trim_end_matches('/').is_empty() {
            return Err(TsBatchError::Misconfigured(
                "flush.metric_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

fn default_interval_secs() -> u64 {
    60
}
fn default_metric_prefix() -> String {
    "custom.googleapis.com".into()
}
fn default_final_flush() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceSection {
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
    pub cluster_name: String,
    /// Falls back to `$TSBATCH_NAMESPACE` when omitted.
    #[serde(default)]
    pub namespace_name: Option<String>,
    pub location: String,
    pub container_name: String,
    pub pod_name: String,
}

impl ResourceSection {
    /// Resolve the namespace and build the immutable tag.
    pub fn resource_tag(&self) -> Result<ResourceTag> {
        let namespace = match &self.namespace_name {
            Some(ns) => ns.clone(),
            None => env::var(NAMESPACE_ENV).map_err(|_| {
                TsBatchError::Misconfigured(format!(
                    "resource.namespace_name is not set and ${NAMESPACE_ENV} is unavailable"
                ))
            })?,
        };
        ResourceTag::new(
            &self.resource_type,
            &self.cluster_name,
            namespace,
            &self.location,
            &self.container_name,
            &self.pod_name,
        )
    }
}

fn default_resource_type() -> String {
    "k8s_container".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    Log,
    JsonFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkSection {
    pub kind: SinkKind,
    pub project_id: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SinkSection {
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(TsBatchError::Misconfigured(
                "sink.project_id must not be empty".into(),
            ));
        }
        if self.kind == SinkKind::JsonFile && self.path.is_none() {
            return Err(TsBatchError::Misconfigured(
                "sink.path is required for json_file".into(),
            ));
        }
        Ok(())
    }
}
