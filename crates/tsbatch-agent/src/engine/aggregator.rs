use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use tsbatch_core::Result;

/// Zero-argument gauge callback. Invoked once per flush cycle.
pub type GaugeFn = Arc<dyn Fn() -> Result<f64> + Send + Sync>;

/// Accumulated counter value for the current period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterState {
    pub value: f64,
    /// Set when the name first appears in a period; never moved by later increments.
    pub start_time: DateTime<Utc>,
}

/// State drained by one `snapshot_and_clear` call.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub counters: HashMap<String, CounterState>,
    pub gauges: HashMap<String, f64>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty()
    }
}

#[derive(Default)]
struct State {
    counters: HashMap<String, CounterState>,
    gauges: HashMap<String, f64>,
    // Ordered so sampling visits gauges in a stable sequence.
    callbacks: BTreeMap<String, GaugeFn>,
}

/// Counter/gauge state shared by call sites and the flusher.
///
/// Every mutation and the snapshot take the same lock, so an increment lands
/// either entirely before or entirely after a snapshot boundary. None of the
/// operations perform I/O or invoke user callbacks while holding the lock.
#[derive(Default)]
pub struct Aggregator {
    state: Mutex<State>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic elsewhere cannot leave the maps half-written; keep serving.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add 1 to counter `name`, opening a new period if the name is absent.
    pub fn increment(&self, name: &str) {
        let mut st = self.lock();
        match st.counters.get_mut(name) {
            Some(c) => c.value += 1.0,
            None => {
                st.counters.insert(
                    name.to_string(),
                    CounterState {
                        value: 1.0,
                        start_time: Utc::now(),
                    },
                );
            }
        }
    }

    /// Store `f` under `name`; a later registration under the same name wins.
    pub fn register_gauge<F>(&self, name: impl Into<String>, f: F)
    where
        F: Fn() -> Result<f64> + Send + Sync + 'static,
    {
        let f: GaugeFn = Arc::new(f);
        self.lock().callbacks.insert(name.into(), f);
    }

    /// Registered gauge names in sampling order.
    pub fn registered_gauges(&self) -> Vec<String> {
        self.lock().callbacks.keys().cloned().collect()
    }

    /// Clone the callback table so it can be invoked without holding the lock.
    pub(crate) fn callbacks(&self) -> Vec<(String, GaugeFn)> {
        self.lock()
            .callbacks
            .iter()
            .map(|(name, f)| (name.clone(), Arc::clone(f)))
            .collect()
    }

    /// Overwrite gauge values with freshly sampled readings.
    pub(crate) fn record_gauges(&self, values: Vec<(String, f64)>) {
        let mut st = self.lock();
        for (name, v) in values {
            st.gauges.insert(name, v);
        }
    }

    /// Drain pending counters and gauges, leaving both empty.
    /// Gauge callbacks stay registered.
    pub fn snapshot_and_clear(&self) -> Snapshot {
        let mut st = self.lock();
        Snapshot {
            counters: std::mem::take(&mut st.counters),
            gauges: std::mem::take(&mut st.gauges),
        }
    }
}
