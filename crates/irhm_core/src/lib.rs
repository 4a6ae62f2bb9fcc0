//! Spatial aggregation engine for IR-drop heatmaps.
//!
//! Point samples (net, drop value, x, y, path) are grouped by net in a
//! [`SampleCollection`]. The collection's [`BoundingBox`] is partitioned into
//! a dense [`TileGrid`], either by tile count or by fixed tile size, and each
//! sample is bucketed into the tile whose half-open interval contains it.
//! For a chosen pair of nets, [`array_info`] reduces the grid to a dense
//! array of combined worst-case drops with its min and max.
//!
//! ```
//! use irhm_core::{Sample, SampleCollection, TileKey};
//!
//! let mut samples = SampleCollection::new();
//! samples.push(Sample::new("VCC", 5.0, 0.5, 0.5));
//! samples.push(Sample::new("VCC", 9.0, 0.7, 0.2));
//! samples.push(Sample::new("VSS", 3.0, 0.1, 0.9));
//! samples.push(Sample::new("VSS", 1.0, 9.0, 9.0));
//!
//! let grid = samples.tile_by_count(2, 2, None, 1.0)?;
//! let stats = grid.array_info("VCC", "VSS");
//! assert_eq!(stats.value(TileKey::new(0, 0)), Some(12.0));
//! # Ok::<(), irhm_core::CoreError>(())
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod collection;
pub mod error;
pub mod geometry;
pub mod sample;
pub mod selection;
pub mod shape;
pub mod stats;
pub mod tiler;

pub use aggregate::worst;
pub use collection::SampleCollection;
pub use error::CoreError;
pub use geometry::{compute_box, BoundingBox, Point};
pub use sample::{Sample, SampleStore};
pub use selection::NetSelection;
pub use shape::{ArrayShape, GridShape, ParseShapeError, TileSize};
pub use stats::{array_info, GridStatistics};
pub use tiler::{tile_by_count, tile_by_size, TileGrid, TileKey, MAX_TILES};
