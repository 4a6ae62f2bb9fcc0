//! Net-keyed sample collections.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::geometry::{compute_box, BoundingBox, Point};
use crate::sample::{Sample, SampleStore};
use crate::shape::GridShape;
use crate::tiler::{tile_by_count, tile_by_size, TileGrid};

static EMPTY_STORE: SampleStore = SampleStore::EMPTY;
static EMPTY_COLLECTION: OnceLock<SampleCollection> = OnceLock::new();

/// Samples grouped by net name.
///
/// Represents either a whole dataset or the subset of samples falling in one
/// tile. Nets iterate in first-seen order. A net present as a key always has
/// at least one sample: lookups never insert, so reading an absent net for
/// display does not grow the mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleCollection {
    nets: IndexMap<String, SampleStore>,
}

impl SampleCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared empty collection.
    pub fn empty() -> &'static SampleCollection {
        EMPTY_COLLECTION.get_or_init(SampleCollection::new)
    }

    /// Appends a sample to the store of its net, creating the store on first use.
    pub fn push(&mut self, sample: Sample) {
        match self.nets.get_mut(sample.net.as_str()) {
            Some(store) => store.push(sample),
            None => {
                let mut store = SampleStore::default();
                let net = sample.net.clone();
                store.push(sample);
                self.nets.insert(net, store);
            }
        }
    }

    /// Moves every sample of `other` into this collection, preserving its order.
    pub fn append(&mut self, other: SampleCollection) {
        self.extend(other);
    }

    /// Returns the store for `net`, or `None` if the net has no samples.
    pub fn get(&self, net: &str) -> Option<&SampleStore> {
        self.nets.get(net)
    }

    /// Returns the store for `net`, or a shared empty store if absent.
    pub fn store(&self, net: &str) -> &SampleStore {
        self.nets.get(net).unwrap_or(&EMPTY_STORE)
    }

    /// Returns `true` if at least one sample belongs to `net`.
    pub fn contains_net(&self, net: &str) -> bool {
        self.nets.contains_key(net)
    }

    /// Iterates net names in first-seen order.
    pub fn nets(&self) -> impl Iterator<Item = &str> {
        self.nets.keys().map(String::as_str)
    }

    /// Iterates `(net, store)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleStore)> {
        self.nets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of distinct nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the total number of samples across all nets.
    pub fn len(&self) -> usize {
        self.nets.values().map(SampleStore::len).sum()
    }

    /// Returns `true` if the collection holds no samples.
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Iterates every sample, net by net.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.nets.values().flat_map(|store| store.iter())
    }

    /// Returns the worst-case drop of `net`, `0.0` if absent.
    pub fn worst(&self, net: &str) -> f64 {
        self.store(net).worst()
    }

    /// Returns the combined drop `worst(net1) + worst(net2)`.
    pub fn calc_drop(&self, net1: &str, net2: &str) -> f64 {
        self.worst(net1) + self.worst(net2)
    }

    /// Computes the bounding box of all samples. See [`compute_box`].
    pub fn bounding_box(
        &self,
        origin: Option<Point>,
        expand: f64,
    ) -> Result<BoundingBox, CoreError> {
        compute_box(self, origin, expand)
    }

    /// Partitions the collection into `cols × rows` tiles. See [`tile_by_count`].
    pub fn tile_by_count(
        &self,
        cols: usize,
        rows: usize,
        origin: Option<Point>,
        expand: f64,
    ) -> Result<TileGrid, CoreError> {
        tile_by_count(self, cols, rows, origin, expand)
    }

    /// Partitions the collection into fixed-size tiles. See [`tile_by_size`].
    pub fn tile_by_size(
        &self,
        width: f64,
        height: f64,
        origin: Option<Point>,
        expand: f64,
    ) -> Result<TileGrid, CoreError> {
        tile_by_size(self, width, height, origin, expand)
    }

    /// Partitions the collection according to `shape`.
    pub fn tile(
        &self,
        shape: GridShape,
        origin: Option<Point>,
        expand: f64,
    ) -> Result<TileGrid, CoreError> {
        match shape {
            GridShape::Count { cols, rows } => self.tile_by_count(cols, rows, origin, expand),
            GridShape::Size { width, height } => self.tile_by_size(width, height, origin, expand),
        }
    }
}

impl FromIterator<Sample> for SampleCollection {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let mut collection = SampleCollection::new();
        for sample in iter {
            collection.push(sample);
        }
        collection
    }
}

impl IntoIterator for SampleCollection {
    type Item = Sample;
    type IntoIter = std::iter::FlatMap<
        indexmap::map::IntoValues<String, SampleStore>,
        Vec<Sample>,
        fn(SampleStore) -> Vec<Sample>,
    >;

    /// Consumes the collection, yielding samples in net order then insertion order.
    fn into_iter(self) -> Self::IntoIter {
        self.nets
            .into_values()
            .flat_map(SampleStore::into_samples as fn(SampleStore) -> Vec<Sample>)
    }
}

impl Extend<Sample> for SampleCollection {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}
