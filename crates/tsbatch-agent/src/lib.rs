//! tsbatch agent library entry.
//!
//! This crate wires the aggregator, gauge sampler, periodic flusher, and
//! sinks into an in-process metrics agent. It is consumed by the binary
//! (`main.rs`), by the facade crate, and by integration tests.

pub mod agent;
pub mod config;
pub mod engine;
pub mod handle;
pub mod sink;

pub use agent::Agent;
pub use handle::MetricsHandle;
