//! Error types for bounding-box computation and tiling.

use crate::geometry::BoundingBox;

/// Errors raised by the spatial aggregation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A bounding box was requested for a collection without samples.
    #[error("cannot compute a bounding box: the collection contains no samples")]
    EmptyCollection,

    /// A tile-count grid was requested with zero columns or rows.
    #[error("invalid grid shape {cols}x{rows}: columns and rows must be positive")]
    InvalidShape {
        /// Requested column count.
        cols: usize,
        /// Requested row count.
        rows: usize,
    },

    /// A tile-size grid was requested with a non-positive or non-finite tile size.
    #[error("invalid tile size {width}x{height}: width and height must be positive")]
    InvalidTileSize {
        /// Requested tile width.
        width: f64,
        /// Requested tile height.
        height: f64,
    },

    /// The margin around the bounding box is negative or not finite.
    #[error("invalid expand margin {0}: must be a finite, non-negative number")]
    InvalidExpand(f64),

    /// A sample has an infinite or NaN coordinate.
    #[error("sample at ({x}, {y}) has a non-finite coordinate")]
    NonFiniteSample {
        /// Sample x coordinate.
        x: f64,
        /// Sample y coordinate.
        y: f64,
    },

    /// The bounding box extent overflows `f64`.
    #[error("bounding box {0} has a non-finite extent")]
    NonFiniteExtent(BoundingBox),

    /// The grid would exceed [`MAX_TILES`](crate::tiler::MAX_TILES) tiles.
    #[error("grid of {cols}x{rows} tiles exceeds the limit of {limit} tiles")]
    TooManyTiles {
        /// Column count, as computed before any limit applies.
        cols: f64,
        /// Row count, as computed before any limit applies.
        rows: f64,
        /// The tile limit.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_collection() {
        let err = CoreError::EmptyCollection;
        assert!(format!("{err}").contains("no samples"));
    }

    #[test]
    fn display_invalid_shape() {
        let err = CoreError::InvalidShape { cols: 0, rows: 4 };
        assert_eq!(
            format!("{err}"),
            "invalid grid shape 0x4: columns and rows must be positive"
        );
    }

    #[test]
    fn display_invalid_tile_size() {
        let err = CoreError::InvalidTileSize {
            width: 0.0,
            height: 2.5,
        };
        assert_eq!(
            format!("{err}"),
            "invalid tile size 0x2.5: width and height must be positive"
        );
    }

    #[test]
    fn display_too_many_tiles() {
        let err = CoreError::TooManyTiles {
            cols: 100000.0,
            rows: 100000.0,
            limit: 1_000_000,
        };
        assert_eq!(
            format!("{err}"),
            "grid of 100000x100000 tiles exceeds the limit of 1000000 tiles"
        );
    }

    #[test]
    fn display_non_finite_sample() {
        let err = CoreError::NonFiniteSample {
            x: f64::INFINITY,
            y: 0.0,
        };
        assert_eq!(
            format!("{err}"),
            "sample at (inf, 0) has a non-finite coordinate"
        );
    }
}
