//! Combined-drop statistics over a tile grid.

use ndarray::Array2;

use crate::tiler::{TileGrid, TileKey};

/// Combined drop per tile for one pair of nets.
///
/// `values[[col, row]]` holds `worst(net1) + worst(net2)` for that tile.
/// `max`/`min` are `None` only for a grid without tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStatistics {
    /// First net of the pair.
    pub net1: String,
    /// Second net of the pair.
    pub net2: String,
    /// Dense `(cols, rows)` array of combined drops.
    pub values: Array2<f64>,
    /// Largest combined drop over all tiles.
    pub max: Option<f64>,
    /// Smallest combined drop over all tiles.
    pub min: Option<f64>,
}

impl GridStatistics {
    /// Returns the number of columns of the value array.
    pub fn cols(&self) -> usize {
        self.values.nrows()
    }

    /// Returns the number of rows of the value array.
    pub fn rows(&self) -> usize {
        self.values.ncols()
    }

    /// Returns the combined drop of tile `key`, `None` if out of range.
    pub fn value(&self, key: TileKey) -> Option<f64> {
        self.values.get([key.col, key.row]).copied()
    }

    /// Returns every tile with its value, largest drop first.
    ///
    /// Ties keep key order.
    pub fn ranked(&self) -> Vec<(TileKey, f64)> {
        let mut out: Vec<(TileKey, f64)> = self
            .values
            .indexed_iter()
            .map(|((col, row), &v)| (TileKey { col, row }, v))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1));
        out
    }

    /// Returns the midpoint of the value range.
    pub fn midpoint(&self) -> Option<f64> {
        Some((self.max? + self.min?) / 2.0)
    }

    /// Returns a quarter of the value range.
    pub fn quarter_range(&self) -> Option<f64> {
        Some((self.max? - self.min?) / 4.0)
    }

    /// Returns `value` normalized into `[0, 1]` over the value range.
    ///
    /// A flat range maps everything to `0.5`.
    pub fn normalized(&self, value: f64) -> f64 {
        match (self.min, self.max) {
            (Some(min), Some(max)) if max > min => ((value - min) / (max - min)).clamp(0.0, 1.0),
            _ => 0.5,
        }
    }
}

/// Builds the combined-drop array of `grid` for `net1` and `net2`.
///
/// The array dimensions come from the largest column and row present as
/// keys, `(max_col + 1, max_row + 1)`. A net missing from a tile contributes
/// `0.0`. Min and max are tracked while filling and updated only on strict
/// improvement.
pub fn array_info(grid: &TileGrid, net1: &str, net2: &str) -> GridStatistics {
    let (cols, rows) = grid.keys().fold((0, 0), |(c, r), key| {
        (c.max(key.col), r.max(key.row))
    });

    let mut values = Array2::<f64>::zeros((cols + 1, rows + 1));
    let mut max: Option<f64> = None;
    let mut min: Option<f64> = None;

    for (key, tile) in grid.iter() {
        let value = tile.calc_drop(net1, net2);
        values[[key.col, key.row]] = value;
        if max.map_or(true, |m| value > m) {
            max = Some(value);
        }
        if min.map_or(true, |m| value < m) {
            min = Some(value);
        }
    }

    GridStatistics {
        net1: net1.to_string(),
        net2: net2.to_string(),
        values,
        max,
        min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sample, SampleCollection};

    /// Three samples of each net laid out so a 3x1 grid (expand 0.5) gets
    /// one sample per tile.
    fn three_tiles(a: [f64; 3], b: [f64; 3]) -> TileGrid {
        let mut c = SampleCollection::new();
        for (i, (va, vb)) in a.iter().zip(b.iter()).enumerate() {
            c.push(Sample::new("A", *va, i as f64, 0.0));
            c.push(Sample::new("B", *vb, i as f64, 0.0));
        }
        c.tile_by_count(3, 1, None, 0.5).unwrap()
    }

    #[test]
    fn combined_values_per_tile() {
        let grid = three_tiles([2.0, 10.0, 1.0], [3.0, 2.0, 2.0]);
        let stats = array_info(&grid, "A", "B");
        assert_eq!(stats.cols(), 3);
        assert_eq!(stats.rows(), 1);
        assert_eq!(stats.value(TileKey::new(0, 0)), Some(5.0));
        assert_eq!(stats.value(TileKey::new(1, 0)), Some(12.0));
        assert_eq!(stats.value(TileKey::new(2, 0)), Some(3.0));
    }

    #[test]
    fn min_max_tracking() {
        let grid = three_tiles([2.0, 10.0, 1.0], [3.0, 2.0, 2.0]);
        let stats = array_info(&grid, "A", "B");
        assert_eq!(stats.max, Some(12.0));
        assert_eq!(stats.min, Some(3.0));
        assert_eq!(stats.midpoint(), Some(7.5));
        assert_eq!(stats.quarter_range(), Some(2.25));
    }

    #[test]
    fn absent_net_contributes_zero() {
        let grid = three_tiles([2.0, 10.0, 1.0], [3.0, 2.0, 2.0]);
        let stats = array_info(&grid, "A", "MISSING");
        assert_eq!(stats.value(TileKey::new(1, 0)), Some(10.0));
        // The lookup did not create the net anywhere.
        assert!(grid.iter().all(|(_, t)| !t.contains_net("MISSING")));
    }

    #[test]
    fn ranked_descending() {
        let grid = three_tiles([2.0, 10.0, 1.0], [3.0, 2.0, 2.0]);
        let ranked = array_info(&grid, "A", "B").ranked();
        let order: Vec<usize> = ranked.iter().map(|(k, _)| k.col).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn normalized_range() {
        let grid = three_tiles([2.0, 10.0, 1.0], [3.0, 2.0, 2.0]);
        let stats = array_info(&grid, "A", "B");
        assert_eq!(stats.normalized(3.0), 0.0);
        assert_eq!(stats.normalized(12.0), 1.0);
        assert_eq!(stats.normalized(7.5), 0.5);
        assert_eq!(stats.normalized(100.0), 1.0);
    }

    #[test]
    fn flat_range_normalizes_to_half() {
        let grid = three_tiles([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);
        let stats = array_info(&grid, "A", "B");
        assert_eq!(stats.max, stats.min);
        assert_eq!(stats.normalized(2.0), 0.5);
    }

    #[test]
    fn empty_tiles_are_zero() {
        let mut c = SampleCollection::new();
        c.push(Sample::new("A", 4.0, 0.0, 0.0));
        c.push(Sample::new("B", 1.0, 9.0, 9.0));
        let grid = c.tile_by_count(4, 4, None, 1.0).unwrap();
        let stats = array_info(&grid, "A", "B");
        assert_eq!(stats.values.dim(), (4, 4));
        assert_eq!(stats.min, Some(0.0));
        assert_eq!(stats.max, Some(4.0));
        assert_eq!(stats.value(TileKey::new(1, 1)), Some(0.0));
    }
}
