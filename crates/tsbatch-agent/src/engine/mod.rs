//! Aggregation and flush engine.
//!
//! - aggregator: counter/gauge state behind one lock
//! - sampler: gauge callback evaluation per cycle
//! - flusher: the periodic submit loop

pub mod aggregator;
pub mod flusher;
pub mod sampler;

pub use aggregator::{Aggregator, CounterState, GaugeFn, Snapshot};
pub use flusher::{FlushOutcome, Flusher};
pub use sampler::sample_all;
