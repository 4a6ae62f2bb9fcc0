//! Grid tiling: partitioning a sample collection into a dense grid of tiles.
//!
//! Both entry points compute the collection's [`BoundingBox`], split it into
//! uniform tiles and put every sample into the tile whose half-open interval
//! `[x_start, x_end) × [y_start, y_end)` contains it, where
//! `x_start = x_min + col * tile_width` and `x_end = x_start + tile_width`
//! (likewise for rows). A sample lying exactly on the box's upper edge
//! belongs to no tile and is dropped.
//!
//! Bucketing is a single pass: each sample's index is estimated with `floor`
//! and then confirmed against the interval rule above, so the result is the
//! same as testing every sample against every tile.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::collection::SampleCollection;
use crate::error::CoreError;
use crate::geometry::{compute_box, BoundingBox, Point};
use crate::selection::NetSelection;
use crate::stats::{array_info, GridStatistics};

/// Largest number of tiles a grid may have.
pub const MAX_TILES: usize = 1_000_000;

/// Position of a tile in the grid.
///
/// Keys order column-major: by column, then by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileKey {
    /// Column index, `0` at the left edge of the box.
    pub col: usize,
    /// Row index, `0` at the bottom edge of the box.
    pub row: usize,
}

impl TileKey {
    /// Creates a key.
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Maps fractional heatmap cell coordinates back to a tile key.
    ///
    /// Cell `(c, r)` covers `[c, c + 1) × [r, r + 1)`, so the key is
    /// `(floor(x), floor(y))`. Returns `None` outside `cols × rows`.
    pub fn from_cell_coords(x: f64, y: f64, cols: usize, rows: usize) -> Option<Self> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let (col, row) = (x.floor() as usize, y.floor() as usize);
        (col < cols && row < rows).then_some(Self { col, row })
    }
}

impl std::fmt::Display for TileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A dense grid of tiles, each holding the samples that fall inside it.
///
/// Every key in `cols × rows` is present, possibly with an empty collection.
/// Immutable once built.
#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: BTreeMap<TileKey, SampleCollection>,
    cols: usize,
    rows: usize,
    bbox: BoundingBox,
    tile_width: f64,
    tile_height: f64,
}

impl TileGrid {
    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the bounding box the grid was laid over.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Returns the width of one tile.
    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    /// Returns the height of one tile.
    pub fn tile_height(&self) -> f64 {
        self.tile_height
    }

    /// Returns the number of tiles (always `cols * rows`).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the grid has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the samples of tile `key`, or `None` if the key is out of range.
    pub fn get(&self, key: TileKey) -> Option<&SampleCollection> {
        self.tiles.get(&key)
    }

    /// Returns the samples of tile `key`, or a shared empty collection if the
    /// key is out of range.
    pub fn tile_or_empty(&self, key: TileKey) -> &SampleCollection {
        self.tiles
            .get(&key)
            .unwrap_or_else(|| SampleCollection::empty())
    }

    /// Iterates `(key, samples)` for every tile in key order.
    pub fn iter(&self) -> impl Iterator<Item = (TileKey, &SampleCollection)> {
        self.tiles.iter().map(|(k, v)| (*k, v))
    }

    /// Iterates every tile key in key order.
    pub fn keys(&self) -> impl Iterator<Item = TileKey> + '_ {
        self.tiles.keys().copied()
    }

    /// Returns the total number of samples held by all tiles.
    ///
    /// Lower than the source collection's size when samples sat on the
    /// box's upper edge.
    pub fn sample_count(&self) -> usize {
        self.tiles.values().map(SampleCollection::len).sum()
    }

    /// Returns the physical rectangle covered by tile `key`.
    pub fn tile_bounds(&self, key: TileKey) -> BoundingBox {
        let x_start = self.bbox.x_min + key.col as f64 * self.tile_width;
        let y_start = self.bbox.y_min + key.row as f64 * self.tile_height;
        BoundingBox {
            x_min: x_start,
            y_min: y_start,
            x_max: x_start + self.tile_width,
            y_max: y_start + self.tile_height,
        }
    }

    /// Returns the tile a physical coordinate falls into, using the same
    /// half-open rule as bucketing.
    pub fn key_at(&self, x: f64, y: f64) -> Option<TileKey> {
        let col = locate(x, self.bbox.x_min, self.tile_width, self.cols)?;
        let row = locate(y, self.bbox.y_min, self.tile_height, self.rows)?;
        Some(TileKey { col, row })
    }

    /// Computes combined-drop statistics for `net1` and `net2`.
    ///
    /// See [`array_info`].
    pub fn array_info(&self, net1: &str, net2: &str) -> GridStatistics {
        array_info(self, net1, net2)
    }

    /// Computes statistics for a viewer selection.
    ///
    /// Returns `None` while the selection is incomplete or names the same net
    /// twice.
    pub fn statistics(&self, selection: &NetSelection) -> Option<GridStatistics> {
        selection
            .pair()
            .map(|(net1, net2)| self.array_info(net1, net2))
    }
}

/// Partitions `collection` into `cols × rows` tiles spanning its bounding box.
///
/// The box is computed with [`compute_box`] using `origin` and `expand`
/// (conventionally `1.0` for this mode); tile dimensions are the box extent
/// divided by the tile count.
///
/// # Errors
///
/// Returns [`CoreError::EmptyCollection`] for a collection without samples,
/// [`CoreError::InvalidShape`] if `cols` or `rows` is zero,
/// [`CoreError::TooManyTiles`] above [`MAX_TILES`] and
/// [`CoreError::InvalidExpand`] for a negative or non-finite margin.
pub fn tile_by_count(
    collection: &SampleCollection,
    cols: usize,
    rows: usize,
    origin: Option<Point>,
    expand: f64,
) -> Result<TileGrid, CoreError> {
    if cols == 0 || rows == 0 {
        return Err(CoreError::InvalidShape { cols, rows });
    }
    if cols.checked_mul(rows).map_or(true, |n| n > MAX_TILES) {
        return Err(too_many_tiles(cols as f64, rows as f64));
    }
    check_expand(expand)?;
    let bbox = compute_box(collection, origin, expand)?;
    let tile_width = bbox.width() / cols as f64;
    let tile_height = bbox.height() / rows as f64;
    Ok(bucket(collection, bbox, cols, rows, tile_width, tile_height))
}

/// Partitions `collection` into tiles of a fixed `width × height`.
///
/// The tile count is `floor(extent / size) + 1` on each axis, so every
/// sample inside the box is covered even when the extent is an exact
/// multiple of the tile size (at the cost of a possibly empty trailing
/// column or row). Conventionally called with `expand = 0.0`.
///
/// # Errors
///
/// Returns [`CoreError::EmptyCollection`] for a collection without samples,
/// [`CoreError::InvalidTileSize`] for a non-positive or non-finite tile size,
/// [`CoreError::TooManyTiles`] when the size is too small for the extent and
/// [`CoreError::InvalidExpand`] for a negative or non-finite margin.
pub fn tile_by_size(
    collection: &SampleCollection,
    width: f64,
    height: f64,
    origin: Option<Point>,
    expand: f64,
) -> Result<TileGrid, CoreError> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(CoreError::InvalidTileSize { width, height });
    }
    check_expand(expand)?;
    let bbox = compute_box(collection, origin, expand)?;
    let cols = span_count(bbox.width(), width);
    let rows = span_count(bbox.height(), height);
    if cols * rows > MAX_TILES as f64 {
        return Err(too_many_tiles(cols, rows));
    }
    Ok(bucket(
        collection,
        bbox,
        cols as usize,
        rows as usize,
        width,
        height,
    ))
}

fn check_expand(expand: f64) -> Result<(), CoreError> {
    if expand.is_finite() && expand >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidExpand(expand))
    }
}

fn too_many_tiles(cols: f64, rows: f64) -> CoreError {
    CoreError::TooManyTiles {
        cols,
        rows,
        limit: MAX_TILES,
    }
}

/// `floor(extent / size) + 1`, with a negative extent (origin pinned past the
/// data) treated as a single tile. Kept in `f64` so huge ratios stay
/// representable until checked against [`MAX_TILES`].
fn span_count(extent: f64, size: f64) -> f64 {
    let n = (extent / size).floor();
    if n > 0.0 {
        n + 1.0
    } else {
        1.0
    }
}

/// Materializes all `cols × rows` tiles and distributes the samples.
fn bucket(
    collection: &SampleCollection,
    bbox: BoundingBox,
    cols: usize,
    rows: usize,
    tile_width: f64,
    tile_height: f64,
) -> TileGrid {
    let mut tiles: BTreeMap<TileKey, SampleCollection> = (0..cols)
        .flat_map(|col| (0..rows).map(move |row| (TileKey { col, row }, SampleCollection::new())))
        .collect();

    let mut dropped = 0usize;
    for sample in collection.samples() {
        let col = locate(sample.x, bbox.x_min, tile_width, cols);
        let row = locate(sample.y, bbox.y_min, tile_height, rows);
        match (col, row) {
            (Some(col), Some(row)) => {
                if let Some(tile) = tiles.get_mut(&TileKey { col, row }) {
                    tile.push(sample.clone());
                }
            }
            _ => dropped += 1,
        }
    }

    debug!(
        cols,
        rows,
        samples = collection.len(),
        dropped,
        "bucketed samples into tile grid"
    );

    TileGrid {
        tiles,
        cols,
        rows,
        bbox,
        tile_width,
        tile_height,
    }
}

/// Finds the index `i < count` with `min + i*step <= v < min + i*step + step`.
///
/// The `floor` estimate can be off by one when the interval edges round
/// differently from the division, so the estimate and its neighbours are
/// checked against the exact interval expression. The lowest matching index
/// wins.
fn locate(v: f64, min: f64, step: f64, count: usize) -> Option<usize> {
    if count == 0 || !v.is_finite() {
        return None;
    }
    let guess = ((v - min) / step).floor();
    if !guess.is_finite() || guess < -1.0 || guess > count as f64 {
        return None;
    }
    let guess = guess as i64;
    (guess - 1..=guess + 1)
        .filter(|&i| i >= 0 && (i as usize) < count)
        .map(|i| i as usize)
        .find(|&i| {
            let start = min + i as f64 * step;
            let end = start + step;
            start <= v && v < end
        })
}
