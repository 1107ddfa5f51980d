//! tsbatch core: transport-agnostic time-series primitives and the error surface.
//!
//! This crate defines the records handed to metrics sinks, the resource identity
//! attached to them, and the error type shared by the agent and its sinks. It
//! carries no runtime dependencies so sink implementations can depend on it
//! without pulling in the flush engine.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Invalid identity surfaces as `TsBatchError`/`Result` at construction time.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod series;

/// Shared result type.
pub use error::{Result, TsBatchError};
pub use series::{MetricKind, ResourceTag, TimeInterval, TimeSeriesRecord};
