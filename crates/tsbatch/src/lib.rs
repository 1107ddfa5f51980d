//! Top-level facade crate for tsbatch.
//!
//! Re-exports core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use tsbatch_core::*;
}

pub mod agent {
    pub use tsbatch_agent::*;
}

pub use tsbatch_agent::{Agent, MetricsHandle};
