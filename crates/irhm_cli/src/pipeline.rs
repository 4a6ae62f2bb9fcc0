//! Shared front half of the viewer and the report: configuration lookup,
//! settings resolution and sample loading.

use std::io;
use std::path::{Path, PathBuf};

use irhm_config::{
    discover_config, load_config, resolve_grid, resolve_view, ConfigError, GridOverrides,
    GridSettings, ViewSettings, ViewerConfig,
};
use irhm_core::SampleCollection;
use irhm_input::{load_files, load_reader, ParseError};

use crate::{GlobalArgs, ViewArgs};

/// Source name used in parse errors for standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// Everything needed to tile and display one dataset.
#[derive(Debug)]
pub struct Session {
    /// All loaded samples.
    pub samples: SampleCollection,
    /// Effective grid settings.
    pub grid: GridSettings,
    /// Effective view settings.
    pub view: ViewSettings,
}

/// Loads the configuration, resolves the settings and reads the samples.
pub fn prepare(
    args: &ViewArgs,
    global: &GlobalArgs,
) -> Result<Session, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = load_viewer_config(global.config.as_deref(), &cwd)?;
    let (grid, view) = resolve_settings(&config, args)?;
    tracing::debug!(
        shape = ?grid.shape,
        origin = ?grid.origin,
        expand = grid.expand(),
        "grid settings"
    );

    let samples = load_samples(&args.files)?;
    Ok(Session {
        samples,
        grid,
        view,
    })
}

/// Loads `explicit` if given, otherwise `irhm.toml` in `cwd` if present,
/// otherwise the defaults.
pub fn load_viewer_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<ViewerConfig, ConfigError> {
    match explicit {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration");
            load_config(path)
        }
        None => Ok(discover_config(cwd)?.unwrap_or_default()),
    }
}

/// Merges the command-line flags over `config`.
pub fn resolve_settings(
    config: &ViewerConfig,
    args: &ViewArgs,
) -> Result<(GridSettings, ViewSettings), ConfigError> {
    let overrides = GridOverrides {
        array: args.array,
        tile_size: args.tile_size,
        origin: args.origin,
        expand: args.expand,
    };
    let grid = resolve_grid(config, &overrides)?;
    let nets = (!args.nets.is_empty()).then_some(args.nets.as_slice());
    let view = resolve_view(config, nets)?;
    Ok((grid, view))
}

/// Loads `files` in order, or all of stdin when the list is empty.
pub fn load_samples(files: &[PathBuf]) -> Result<SampleCollection, ParseError> {
    if files.is_empty() {
        tracing::info!("reading samples from stdin");
        load_reader(io::stdin().lock(), STDIN_NAME)
    } else {
        load_files(files)
    }
}
