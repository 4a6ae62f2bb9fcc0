//! Per-net aggregation.
//!
//! IR-drop reporting cares about the worst point, not the average, so the
//! only aggregate is the maximum drop.

use crate::sample::SampleStore;

/// Returns the maximum `value` among the store's samples.
///
/// An empty store contributes no drop and yields `0.0`.
pub fn worst(store: &SampleStore) -> f64 {
    store
        .iter()
        .map(|s| s.value)
        .reduce(f64::max)
        .unwrap_or(0.0)
}
