//! Time-series primitives handed to metrics sinks.
//!
//! - resource: reporting identity attached to every record
//! - record: the wire-ready unit (kind, value, interval)

pub mod record;
pub mod resource;

pub use record::{MetricKind, TimeInterval, TimeSeriesRecord};
pub use resource::ResourceTag;
