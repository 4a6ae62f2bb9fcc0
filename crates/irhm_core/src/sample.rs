//! Raw IR-drop measurement samples and per-net sample stores.

use serde::Serialize;

/// A single IR-drop measurement taken at one physical point.
///
/// Samples are created once at parse time and never mutated. The `raw`
/// source line is carried for diagnostics only and does not take part in
/// equality comparisons.
#[derive(Clone, Debug, Serialize)]
pub struct Sample {
    /// Name of the net the measurement belongs to (e.g., "VCC").
    pub net: String,
    /// Measured voltage drop.
    pub value: f64,
    /// Physical x coordinate.
    pub x: f64,
    /// Physical y coordinate.
    pub y: f64,
    /// Hierarchical circuit path, `/`-separated (e.g., "X14/X45").
    pub path: Option<String>,
    /// The original input line this sample was parsed from.
    #[serde(skip)]
    pub raw: Option<String>,
}

impl Sample {
    /// Creates a sample without path or raw line information.
    pub fn new(net: impl Into<String>, value: f64, x: f64, y: f64) -> Self {
        Self {
            net: net.into(),
            value,
            x,
            y,
            path: None,
            raw: None,
        }
    }

    /// Sets the hierarchical path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the original source line.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        self.net == other.net
            && self.value == other.value
            && self.x == other.x
            && self.y == other.y
            && self.path == other.path
    }
}

/// The samples of one net, in insertion order.
///
/// Stores are only ever filled through
/// [`SampleCollection::push`](crate::SampleCollection::push), which keys each
/// store by net name, so every sample in a store shares the same `net`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    /// An empty store, usable in `static` position.
    pub const EMPTY: SampleStore = SampleStore {
        samples: Vec::new(),
    };

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub(crate) fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the store holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates the samples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the worst-case (maximum) drop of the store.
    ///
    /// See [`worst`](crate::aggregate::worst).
    pub fn worst(&self) -> f64 {
        crate::aggregate::worst(self)
    }

    /// Returns the samples sorted by value, largest drop first.
    pub fn sorted_by_drop(&self) -> Vec<&Sample> {
        let mut sorted: Vec<&Sample> = self.samples.iter().collect();
        sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
        sorted
    }
}

impl<'a> IntoIterator for &'a SampleStore {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_raw_line() {
        let a = Sample::new("VCC", 1.5, 2.0, 3.0).with_raw("VCC 1.5 2 3 X1");
        let b = Sample::new("VCC", 1.5, 2.0, 3.0).with_raw("VCC 1.50 2.0 3.0 X1");
        assert_eq!(a, b);
    }

    #[test]
    fn equality_includes_path() {
        let a = Sample::new("VCC", 1.5, 2.0, 3.0).with_path("X1");
        let b = Sample::new("VCC", 1.5, 2.0, 3.0).with_path("X2");
        assert_ne!(a, b);
    }

    #[test]
    fn empty_store() {
        let store = SampleStore::EMPTY;
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.iter().count(), 0);
    }

    #[test]
    fn sorted_by_drop_descending() {
        let mut store = SampleStore::default();
        store.push(Sample::new("A", 2.0, 0.0, 0.0));
        store.push(Sample::new("A", 7.0, 1.0, 0.0));
        store.push(Sample::new("A", 4.0, 2.0, 0.0));
        let values: Vec<f64> = store.sorted_by_drop().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![7.0, 4.0, 2.0]);
        // Underlying order is untouched.
        assert_eq!(store.as_slice()[0].value, 2.0);
    }

    #[test]
    fn raw_is_not_serialized() {
        let s = Sample::new("VSS", 1.0, 2.0, 3.0)
            .with_path("X3/X4")
            .with_raw("VSS 1 2 3 X3/X4");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"path\":\"X3/X4\""));
        assert!(!json.contains("raw"));
    }
}
