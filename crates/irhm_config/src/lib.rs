//! Parsing and validation of `irhm.toml` viewer configuration files.
//!
//! The file is optional. When present it supplies the default grid shape,
//! origin and margin, plus the initial net pair and display precision.
//! Command-line flags override it through [`resolve_grid`] and
//! [`resolve_view`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{discover_config, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{resolve_grid, resolve_view, GridOverrides, GridSettings, ViewSettings};
pub use types::*;
