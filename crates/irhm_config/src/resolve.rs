//! Resolution of effective settings: command-line overrides on top of the
//! configuration file on top of built-in defaults.

use irhm_core::{
    ArrayShape, CoreError, GridShape, NetSelection, Point, SampleCollection, TileGrid, TileSize,
};

use crate::error::ConfigError;
use crate::types::{ViewerConfig, DEFAULT_PRECISION};

/// Grid settings given on the command line. `None` defers to the file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GridOverrides {
    /// `--array COLxROW`.
    pub array: Option<ArrayShape>,
    /// `--tile-size WxH`.
    pub tile_size: Option<TileSize>,
    /// `--origin X,Y`.
    pub origin: Option<Point>,
    /// `--expand E`.
    pub expand: Option<f64>,
}

/// The grid settings a tile grid is built from.
///
/// `expand` is kept only when set explicitly, so that switching between
/// tile-count and tile-size partitioning picks up the new mode's default.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GridSettings {
    /// Tile-count or tile-size partitioning.
    pub shape: GridShape,
    /// Fixed lower-left corner, if any.
    pub origin: Option<Point>,
    /// Explicit margin around the data extent.
    pub expand: Option<f64>,
}

impl GridSettings {
    /// Returns the effective margin.
    pub fn expand(&self) -> f64 {
        self.expand.unwrap_or_else(|| self.shape.default_expand())
    }

    /// Tiles `collection` with these settings.
    pub fn tile(&self, collection: &SampleCollection) -> Result<TileGrid, CoreError> {
        collection.tile(self.shape, self.origin, self.expand())
    }
}

/// Resolves the grid settings.
///
/// A shape given on the command line replaces the file's shape whichever
/// mode either of them uses. Without any shape the grid is `10x10`. When
/// neither source sets `expand`, the default of the resolved mode applies.
pub fn resolve_grid(
    config: &ViewerConfig,
    overrides: &GridOverrides,
) -> Result<GridSettings, ConfigError> {
    let shape = if let Some(array) = overrides.array {
        GridShape::from(array)
    } else if let Some(size) = overrides.tile_size {
        GridShape::from(size)
    } else if let Some(array) = &config.grid.array {
        array
            .parse::<ArrayShape>()
            .map_err(|e| ConfigError::ValidationError(format!("grid.array: {e}")))?
            .into()
    } else if let Some([width, height]) = config.grid.tile_size {
        GridShape::Size { width, height }
    } else {
        GridShape::default()
    };

    let expand = overrides.expand.or(config.grid.expand);
    if let Some(e) = expand {
        if !e.is_finite() || e < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "expand must be a non-negative number, got {e}"
            )));
        }
    }

    let origin = overrides
        .origin
        .or_else(|| config.grid.origin.map(Point::from));

    Ok(GridSettings {
        shape,
        origin,
        expand,
    })
}

/// Display settings after merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    /// Initial first net.
    pub net1: Option<String>,
    /// Initial second net.
    pub net2: Option<String>,
    /// Decimals shown for drop values.
    pub precision: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            net1: None,
            net2: None,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ViewSettings {
    /// Classifies the initial pair.
    pub fn selection(&self) -> NetSelection {
        NetSelection::new(self.net1.clone(), self.net2.clone())
    }
}

/// Resolves the initial net pair and precision.
///
/// `nets` from the command line replaces the file's list entirely.
pub fn resolve_view(
    config: &ViewerConfig,
    nets: Option<&[String]>,
) -> Result<ViewSettings, ConfigError> {
    let nets = nets.unwrap_or(config.view.nets.as_slice());
    if nets.len() > 2 {
        return Err(ConfigError::ValidationError(format!(
            "expected at most two nets, got {}",
            nets.len()
        )));
    }
    Ok(ViewSettings {
        net1: nets.first().cloned(),
        net2: nets.get(1).cloned(),
        precision: config.view.precision,
    })
}
