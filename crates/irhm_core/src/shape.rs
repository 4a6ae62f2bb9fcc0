//! Grid shape descriptions and their `COLxROW` / `WxH` text forms.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How a collection is partitioned into tiles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum GridShape {
    /// A fixed number of tiles dividing the bounding box evenly.
    Count {
        /// Number of columns.
        cols: usize,
        /// Number of rows.
        rows: usize,
    },
    /// Tiles of a fixed physical size; the tile count follows from the box.
    Size {
        /// Tile width.
        width: f64,
        /// Tile height.
        height: f64,
    },
}

impl GridShape {
    /// Returns the default bounding-box margin for this kind of grid.
    ///
    /// Tile-count grids expand the box by `1.0`, tile-size grids by `0.0`.
    pub fn default_expand(&self) -> f64 {
        match self {
            GridShape::Count { .. } => 1.0,
            GridShape::Size { .. } => 0.0,
        }
    }
}

impl Default for GridShape {
    fn default() -> Self {
        ArrayShape::default().into()
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GridShape::Count { cols, rows } => write!(f, "{cols}x{rows} tiles"),
            GridShape::Size { width, height } => write!(f, "{width}x{height} tile size"),
        }
    }
}

/// A `COLxROW` tile-count shape such as `10x10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayShape {
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl Default for ArrayShape {
    fn default() -> Self {
        Self { cols: 10, rows: 10 }
    }
}

impl From<ArrayShape> for GridShape {
    fn from(a: ArrayShape) -> Self {
        GridShape::Count {
            cols: a.cols,
            rows: a.rows,
        }
    }
}

impl fmt::Display for ArrayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

impl FromStr for ArrayShape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (c, r) = split_pair(s)?;
        let cols = parse_positive_int(s, c)?;
        let rows = parse_positive_int(s, r)?;
        Ok(Self { cols, rows })
    }
}

/// A `WxH` tile size such as `2.5x2.5`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSize {
    /// Tile width.
    pub width: f64,
    /// Tile height.
    pub height: f64,
}

impl From<TileSize> for GridShape {
    fn from(t: TileSize) -> Self {
        GridShape::Size {
            width: t.width,
            height: t.height,
        }
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for TileSize {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = split_pair(s)?;
        let width = parse_positive_float(s, w)?;
        let height = parse_positive_float(s, h)?;
        Ok(Self { width, height })
    }
}

/// Error type for parsing `COLxROW` and `WxH` strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid shape '{input}': {reason}")]
pub struct ParseShapeError {
    /// The input string that failed to parse.
    pub input: String,
    /// Why it was rejected.
    pub reason: String,
}

impl ParseShapeError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

fn split_pair(s: &str) -> Result<(&str, &str), ParseShapeError> {
    let trimmed = s.trim();
    trimmed
        .split_once(['x', 'X'])
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| ParseShapeError::new(s, "expected two values separated by 'x'"))
}

fn parse_positive_int(input: &str, token: &str) -> Result<usize, ParseShapeError> {
    let n: usize = token
        .parse()
        .map_err(|_| ParseShapeError::new(input, format!("'{token}' is not an integer")))?;
    if n == 0 {
        return Err(ParseShapeError::new(input, "values must be positive"));
    }
    Ok(n)
}

fn parse_positive_float(input: &str, token: &str) -> Result<f64, ParseShapeError> {
    let v: f64 = token
        .parse()
        .map_err(|_| ParseShapeError::new(input, format!("'{token}' is not a number")))?;
    if !v.is_finite() || v <= 0.0 {
        return Err(ParseShapeError::new(input, "values must be positive"));
    }
    Ok(v)
}
