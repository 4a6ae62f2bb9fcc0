//! Configuration file loading and validation.

use std::path::Path;

use irhm_core::ArrayShape;

use crate::error::ConfigError;
use crate::types::{ViewerConfig, MAX_PRECISION};

/// File name looked up by [`discover_config`].
pub const CONFIG_FILE_NAME: &str = "irhm.toml";

/// Loads and validates the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<ViewerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = load_config_from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Loads `<dir>/irhm.toml` if it exists.
///
/// A missing file is not an error: `Ok(None)` is returned and the caller
/// falls back to defaults.
pub fn discover_config(dir: &Path) -> Result<Option<ViewerConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    load_config(&path).map(Some)
}

/// Parses and validates an `irhm.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ViewerConfig, ConfigError> {
    let config: ViewerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that configuration values are well-formed and consistent.
pub fn validate_config(config: &ViewerConfig) -> Result<(), ConfigError> {
    let grid = &config.grid;

    if let Some(array) = &grid.array {
        if array.trim().is_empty() {
            return Err(ConfigError::MissingField("grid.array".to_string()));
        }
        array
            .parse::<ArrayShape>()
            .map_err(|e| ConfigError::ValidationError(format!("grid.array: {e}")))?;
    }

    if let Some([width, height]) = grid.tile_size {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "grid.tile_size must be positive, got [{width}, {height}]"
            )));
        }
    }

    if grid.array.is_some() && grid.tile_size.is_some() {
        return Err(ConfigError::ValidationError(
            "grid.array and grid.tile_size are mutually exclusive".to_string(),
        ));
    }

    if let Some(expand) = grid.expand {
        if !expand.is_finite() || expand < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "grid.expand must be a non-negative number, got {expand}"
            )));
        }
    }

    if let Some([x, y]) = grid.origin {
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigError::ValidationError(
                "grid.origin must be finite".to_string(),
            ));
        }
    }

    if config.view.nets.len() > 2 {
        return Err(ConfigError::ValidationError(format!(
            "view.nets names at most two nets, got {}",
            config.view.nets.len()
        )));
    }

    if config.view.precision > MAX_PRECISION {
        return Err(ConfigError::ValidationError(format!(
            "view.precision must be at most {MAX_PRECISION}"
        )));
    }

    Ok(())
}
