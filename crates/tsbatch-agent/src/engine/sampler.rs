//! Gauge sampling for one flush cycle.
//!
//! Callbacks run outside the aggregator lock, so a callback may itself call
//! `increment` without deadlocking. Readings are staged and committed only
//! when every callback succeeded: a failing gauge aborts the cycle instead of
//! leaving a partially sampled gauge table behind.

use tsbatch_core::{Result, TsBatchError};

use super::aggregator::Aggregator;

/// Invoke every registered gauge callback in name order and record the readings.
/// Returns the number of gauges sampled.
pub fn sample_all(aggregator: &Aggregator) -> Result<usize> {
    let callbacks = aggregator.callbacks();
    let mut readings = Vec::with_capacity(callbacks.len());

    for (name, f) in callbacks {
        let value = match f() {
            Ok(v) => v,
            Err(TsBatchError::Gauge { reason, .. }) => {
                return Err(TsBatchError::gauge(name, reason));
            }
            Err(e) => return Err(TsBatchError::gauge(name, e.to_string())),
        };
        if !value.is_finite() {
            return Err(TsBatchError::gauge(name, format!("non-finite value {value}")));
        }
        readings.push((name, value));
    }

    let n = readings.len();
    aggregator.record_gauges(readings);
    Ok(n)
}
