//! Shared error type across tsbatch crates.

use thiserror::Error;

/// Stable error classification, independent of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Config file unreadable or not valid YAML.
    Config,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Config parsed but failed validation (missing identity, bad ranges).
    Misconfigured,
    /// A gauge callback failed during sampling.
    GaugeFailed,
    /// The sink rejected or failed to transmit a batch.
    SinkFailed,
}

impl ErrorCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Misconfigured => "MISCONFIGURED",
            ErrorCode::GaugeFailed => "GAUGE_FAILED",
            ErrorCode::SinkFailed => "SINK_FAILED",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TsBatchError>;

/// Unified error type used by core, agent and sinks.
#[derive(Debug, Error)]
pub enum TsBatchError {
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("misconfigured: {0}")]
    Misconfigured(String),
    #[error("gauge {name} failed: {reason}")]
    Gauge { name: String, reason: String },
    #[error("sink: {0}")]
    Sink(String),
}

impl TsBatchError {
    /// Build a gauge failure for `name`.
    pub fn gauge(name: impl Into<String>, reason: impl Into<String>) -> Self {
        TsBatchError::Gauge {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TsBatchError::Config(_) => ErrorCode::Config,
            TsBatchError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            TsBatchError::Misconfigured(_) => ErrorCode::Misconfigured,
            TsBatchError::Gauge { .. } => ErrorCode::GaugeFailed,
            TsBatchError::Sink(_) => ErrorCode::SinkFailed,
        }
    }
}

impl From<serde_json::Error> for TsBatchError {
    fn from(e: serde_json::Error) -> Self {
        TsBatchError::Sink(format!("encode record failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_error_carries_name() {
        let e = TsBatchError::gauge("queue/depth", "poisoned");
        assert_eq!(e.code(), ErrorCode::GaugeFailed);
        assert_eq!(e.to_string(), "gauge queue/depth failed: poisoned");
    }
}
