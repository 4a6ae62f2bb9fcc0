//! Property tests for the tiling engine.
//!
//! Each property is checked on seeded random point clouds and compared
//! against a brute-force bucketing that tests every sample against every
//! tile interval, the rule the single-pass tiler must reproduce.

use irhm_core::{
    array_info, compute_box, CoreError, Point, Sample, SampleCollection, TileGrid, TileKey,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NETS: [&str; 4] = ["VCC", "VSS", "VCCA", "VSSA"];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Random samples with coordinates on a coarse lattice so that some land
/// exactly on tile boundaries.
fn random_collection(seed: u64, count: usize) -> SampleCollection {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let net = NETS[rng.gen_range(0..NETS.len())];
            let value = rng.gen_range(0.0..50.0);
            let x = rng.gen_range(0..400) as f64 * 0.25;
            let y = rng.gen_range(0..400) as f64 * 0.25;
            Sample::new(net, value, x, y).with_path(format!("X{i}"))
        })
        .collect()
}

/// Brute-force bucketing: for every tile, scan every sample.
fn reference_members(
    collection: &SampleCollection,
    grid: &TileGrid,
) -> Vec<(TileKey, Vec<Sample>)> {
    let b = grid.bbox();
    let (w, h) = (grid.tile_width(), grid.tile_height());
    let mut out = Vec::new();
    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            let x_start = b.x_min + col as f64 * w;
            let y_start = b.y_min + row as f64 * h;
            let x_end = x_start + w;
            let y_end = y_start + h;
            let members: Vec<Sample> = collection
                .samples()
                .filter(|s| x_start <= s.x && s.x < x_end && y_start <= s.y && s.y < y_end)
                .cloned()
                .collect();
            out.push((TileKey::new(col, row), members));
        }
    }
    out
}

fn tile_members(grid: &TileGrid, key: TileKey) -> Vec<Sample> {
    grid.get(key)
        .map(|t| t.samples().cloned().collect())
        .unwrap_or_default()
}

fn sorted_by_path(mut v: Vec<Sample>) -> Vec<Sample> {
    v.sort_by(|a, b| a.path.cmp(&b.path));
    v
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn tiling_is_idempotent() {
    let c = random_collection(1, 300);
    let a = c.tile_by_count(7, 5, None, 1.0).unwrap();
    let b = c.tile_by_count(7, 5, None, 1.0).unwrap();
    for key in a.keys() {
        assert_eq!(tile_members(&a, key), tile_members(&b, key));
    }
}

#[test]
fn count_grid_has_cols_times_rows_keys() {
    let c = random_collection(2, 50);
    for (cols, rows) in [(1, 1), (1, 9), (10, 10), (13, 4)] {
        let grid = c.tile_by_count(cols, rows, None, 1.0).unwrap();
        assert_eq!(grid.len(), cols * rows);
        assert_eq!(grid.keys().count(), cols * rows);
    }
}

#[test]
fn every_sample_in_exactly_one_tile() {
    let c = random_collection(3, 500);
    // expand > 0 keeps every sample strictly inside the box.
    let grid = c.tile_by_count(9, 6, None, 1.0).unwrap();
    assert_eq!(grid.sample_count(), c.len());
    for sample in c.samples() {
        let holders = grid
            .iter()
            .filter(|(_, t)| t.store(&sample.net).iter().any(|s| s == sample))
            .count();
        assert_eq!(holders, 1, "sample {sample:?} held by {holders} tiles");
    }
}

#[test]
fn size_grid_covers_every_sample() {
    let c = random_collection(4, 400);
    let grid = c.tile_by_size(3.3, 7.0, None, 0.0).unwrap();
    let b = compute_box(&c, None, 0.0).unwrap();
    assert_eq!(grid.cols(), (b.width() / 3.3).floor() as usize + 1);
    assert_eq!(grid.rows(), (b.height() / 7.0).floor() as usize + 1);
    assert_eq!(grid.sample_count(), c.len());
}

#[test]
fn upper_edge_samples_are_dropped_by_count_grid() {
    let mut c = SampleCollection::new();
    c.push(Sample::new("VCC", 1.0, 0.0, 0.0));
    c.push(Sample::new("VCC", 2.0, 5.0, 5.0));
    c.push(Sample::new("VSS", 3.0, 10.0, 3.0)); // on the right edge
    c.push(Sample::new("VSS", 4.0, 3.0, 10.0)); // on the top edge
    let grid = c.tile_by_count(4, 4, None, 0.0).unwrap();
    assert_eq!(grid.sample_count(), 2);
    assert!(grid.iter().all(|(_, t)| !t.contains_net("VSS")));
}

#[test]
fn single_pass_matches_brute_force_count() {
    for seed in 10..20 {
        let c = random_collection(seed, 200);
        for (cols, rows, expand) in [(10, 10, 1.0), (3, 8, 0.0), (16, 16, 0.25)] {
            let grid = c.tile_by_count(cols, rows, None, expand).unwrap();
            for (key, expected) in reference_members(&c, &grid) {
                assert_eq!(
                    sorted_by_path(tile_members(&grid, key)),
                    sorted_by_path(expected),
                    "seed {seed}, {cols}x{rows}, expand {expand}, tile {key}"
                );
            }
        }
    }
}

#[test]
fn single_pass_matches_brute_force_size() {
    for seed in 20..24 {
        let c = random_collection(seed, 200);
        for (w, h) in [(0.75, 0.5), (1.0, 3.0), (0.1, 12.5)] {
            let grid = c.tile_by_size(w, h, None, 0.0).unwrap();
            for (key, expected) in reference_members(&c, &grid) {
                assert_eq!(
                    sorted_by_path(tile_members(&grid, key)),
                    sorted_by_path(expected),
                    "seed {seed}, size {w}x{h}, tile {key}"
                );
            }
        }
    }
}

#[test]
fn single_pass_matches_brute_force_with_origin() {
    let c = random_collection(31, 200);
    let grid = c
        .tile_by_count(6, 6, Some(Point::new(-5.0, 1000.0)), 1.0)
        .unwrap();
    for (key, expected) in reference_members(&c, &grid) {
        assert_eq!(
            sorted_by_path(tile_members(&grid, key)),
            sorted_by_path(expected)
        );
    }
}

#[test]
fn aggregation_in_one_tile() {
    let mut c = SampleCollection::new();
    c.push(Sample::new("A", 5.0, 1.0, 1.0));
    c.push(Sample::new("A", 9.0, 1.2, 1.1));
    c.push(Sample::new("B", 3.0, 1.1, 1.3));
    let grid = c.tile_by_count(1, 1, None, 1.0).unwrap();
    let tile = grid.get(TileKey::new(0, 0)).unwrap();
    assert_eq!(tile.worst("A"), 9.0);
    assert_eq!(tile.worst("B"), 3.0);
    assert_eq!(tile.worst("C"), 0.0);
    assert!(!tile.contains_net("C"));

    let stats = array_info(&grid, "A", "B");
    assert_eq!(stats.values[[0, 0]], 12.0);
}

#[test]
fn min_max_over_tiles() {
    let mut c = SampleCollection::new();
    c.push(Sample::new("A", 5.0, 0.0, 0.0));
    c.push(Sample::new("A", 12.0, 1.0, 0.0));
    c.push(Sample::new("A", 3.0, 2.0, 0.0));
    let grid = c.tile_by_count(3, 1, None, 0.5).unwrap();
    let stats = array_info(&grid, "A", "B");
    assert_eq!(stats.max, Some(12.0));
    assert_eq!(stats.min, Some(3.0));
}

#[test]
fn empty_collection_cannot_be_tiled() {
    let c = SampleCollection::new();
    assert_eq!(
        compute_box(&c, None, 1.0).unwrap_err(),
        CoreError::EmptyCollection
    );
    assert_eq!(
        c.tile_by_count(10, 10, None, 1.0).unwrap_err(),
        CoreError::EmptyCollection
    );
}
