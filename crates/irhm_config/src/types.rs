//! Configuration types deserialized from `irhm.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// Default number of decimals shown for drop values.
pub const DEFAULT_PRECISION: usize = 2;

/// Largest accepted `view.precision`.
pub const MAX_PRECISION: usize = 6;

/// The top-level configuration parsed from `irhm.toml`.
///
/// Every section is optional; an empty file is a valid configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ViewerConfig {
    /// Grid construction settings.
    #[serde(default)]
    pub grid: GridConfig,
    /// Display settings.
    #[serde(default)]
    pub view: ViewConfig,
}

/// The `[grid]` section.
///
/// `array` selects tile-count mode, `tile_size` selects tile-size mode. At
/// most one of them may be set.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    /// Tile counts as `COLxROW`, e.g. `"10x10"`.
    #[serde(default)]
    pub array: Option<String>,
    /// Fixed tile dimensions `[width, height]`.
    #[serde(default)]
    pub tile_size: Option<[f64; 2]>,
    /// Margin added around the data extent.
    #[serde(default)]
    pub expand: Option<f64>,
    /// Fixed lower-left corner `[x, y]`.
    #[serde(default)]
    pub origin: Option<[f64; 2]>,
}

/// The `[view]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewConfig {
    /// Initial net pair.
    ///
    /// Accepts either `nets = "VCC,VSS"` or `nets = ["VCC", "VSS"]`.
    #[serde(default, deserialize_with = "deserialize_net_list")]
    pub nets: Vec<String>,
    /// Decimals shown in tables and heatmap labels.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            nets: Vec::new(),
            precision: DEFAULT_PRECISION,
        }
    }
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

/// Deserializes a net list given either as a comma-separated string or as a
/// list of strings.
fn deserialize_net_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NetList;

    impl<'de> Visitor<'de> for NetList {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a comma-separated string or a list of net names")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(NetList)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_config_from_str;

    #[test]
    fn empty_file_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.view.precision, 2);
        assert!(config.grid.array.is_none());
    }

    #[test]
    fn nets_as_string() {
        let config = load_config_from_str("[view]\nnets = \"VCC, VSS\"\n").unwrap();
        assert_eq!(config.view.nets, vec!["VCC", "VSS"]);
    }

    #[test]
    fn nets_as_list() {
        let config = load_config_from_str("[view]\nnets = [\"VCCA\", \"VSSA\"]\n").unwrap();
        assert_eq!(config.view.nets, vec!["VCCA", "VSSA"]);
    }

    #[test]
    fn grid_arrays() {
        let toml = r#"
[grid]
tile_size = [2.5, 4.0]
origin = [0.0, -3.5]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.grid.tile_size, Some([2.5, 4.0]));
        assert_eq!(config.grid.origin, Some([0.0, -3.5]));
        assert_eq!(config.grid.expand, None);
    }
}
