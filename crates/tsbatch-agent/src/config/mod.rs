//! Agent config loader (strict parsing).

pub mod schema;

use std::fs;

use tsbatch_core::error::{Result, TsBatchError};

pub use schema::{AgentConfig, FlushSection, ResourceSection, SinkKind, SinkSection, NAMESPACE_ENV};

pub fn load_from_file(path: &str) -> Result<AgentConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TsBatchError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| TsBatchError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
