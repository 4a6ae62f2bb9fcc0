//! irhm: IR-drop heatmap viewer.
//!
//! Reads IR-drop samples from files or stdin, partitions them into a grid of
//! tiles and either opens the interactive heatmap viewer or, with
//! `--report`, prints the ranked tile table for one pair of nets.

#![warn(missing_docs)]

mod pipeline;
mod report;
mod view;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, ValueEnum};
use irhm_core::{ArrayShape, Point, TileSize};
use tracing_subscriber::EnvFilter;

/// Interactive IR-drop heatmap over tiled sample data.
#[derive(Parser, Debug)]
#[command(name = "irhm", version, about = "IR-drop heatmap viewer")]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to an `irhm.toml` configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the ranked tile table instead of opening the viewer.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Input selection and grid settings.
    #[command(flatten)]
    pub view: ViewArgs,
}

/// Inputs and grid settings shared by the viewer and the report.
#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Sample files to load. Reads stdin when none are given.
    pub files: Vec<PathBuf>,

    /// Tile-count grid, e.g. `10x10`.
    #[arg(long, value_name = "COLxROW", conflicts_with = "tile_size")]
    pub array: Option<ArrayShape>,

    /// Fixed tile size, e.g. `2.5x2.5`.
    #[arg(long, value_name = "WxH")]
    pub tile_size: Option<TileSize>,

    /// Lower-left corner of the grid.
    #[arg(long, value_name = "X,Y", value_parser = parse_origin, allow_hyphen_values = true)]
    pub origin: Option<Point>,

    /// Margin added around the data extent.
    #[arg(long, value_name = "E")]
    pub expand: Option<f64>,

    /// Initial net pair.
    #[arg(long, value_name = "NET1,NET2", value_delimiter = ',')]
    pub nets: Vec<String>,
}

/// Output format for `--report`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned plain-text table.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Returns the default log filter for these flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parses an `X,Y` coordinate pair.
fn parse_origin(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |token: &str| -> Result<f64, String> {
        let token = token.trim();
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{token}' is not a finite number"))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

fn init_logging(global: &GlobalArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(global.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.report {
        Some(format) => report::run(&cli.view, format, &global),
        None => view::run(&cli.view, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["irhm"]);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(cli.report.is_none());
        assert!(cli.view.files.is_empty());
        assert!(cli.view.array.is_none());
        assert!(cli.view.tile_size.is_none());
        assert!(cli.view.origin.is_none());
        assert!(cli.view.expand.is_none());
        assert!(cli.view.nets.is_empty());
    }

    #[test]
    fn parse_files() {
        let cli = Cli::parse_from(["irhm", "a.ir", "b.ir"]);
        assert_eq!(
            cli.view.files,
            vec![PathBuf::from("a.ir"), PathBuf::from("b.ir")]
        );
    }

    #[test]
    fn parse_array() {
        let cli = Cli::parse_from(["irhm", "--array", "20x5"]);
        assert_eq!(cli.view.array, Some(ArrayShape { cols: 20, rows: 5 }));
    }

    #[test]
    fn parse_tile_size() {
        let cli = Cli::parse_from(["irhm", "--tile-size", "2.5x4"]);
        assert_eq!(
            cli.view.tile_size,
            Some(TileSize {
                width: 2.5,
                height: 4.0
            })
        );
    }

    #[test]
    fn array_conflicts_with_tile_size() {
        let result = Cli::try_parse_from(["irhm", "--array", "4x4", "--tile-size", "1x1"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_array_rejected() {
        assert!(Cli::try_parse_from(["irhm", "--array", "0x4"]).is_err());
        assert!(Cli::try_parse_from(["irhm", "--array", "wide"]).is_err());
    }

    #[test]
    fn parse_origin_flag() {
        let cli = Cli::parse_from(["irhm", "--origin", "-5,12.5"]);
        assert_eq!(cli.view.origin, Some(Point::new(-5.0, 12.5)));
    }

    #[test]
    fn origin_parser_errors() {
        assert!(parse_origin("1.0").is_err());
        assert!(parse_origin("a,2").is_err());
        assert!(parse_origin("1,inf").is_err());
        assert_eq!(parse_origin(" 1 , 2 "), Ok(Point::new(1.0, 2.0)));
    }

    #[test]
    fn parse_expand() {
        let cli = Cli::parse_from(["irhm", "--expand", "0.5"]);
        assert_eq!(cli.view.expand, Some(0.5));
    }

    #[test]
    fn parse_nets_list() {
        let cli = Cli::parse_from(["irhm", "--nets", "VCC,VSS"]);
        assert_eq!(cli.view.nets, vec!["VCC", "VSS"]);
    }

    #[test]
    fn parse_report_formats() {
        let cli = Cli::parse_from(["irhm", "--report", "text"]);
        assert_eq!(cli.report, Some(ReportFormat::Text));
        let cli = Cli::parse_from(["irhm", "--report", "json"]);
        assert_eq!(cli.report, Some(ReportFormat::Json));
        assert!(Cli::try_parse_from(["irhm", "--report", "csv"]).is_err());
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["irhm", "--config", "/path/to/irhm.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/irhm.toml")));
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::parse_from(["irhm", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["irhm", "-q", "-v"]).is_err());
    }

    #[test]
    fn log_levels() {
        let mut global = GlobalArgs {
            quiet: false,
            verbose: 0,
            config: None,
        };
        assert_eq!(global.log_level(), "warn");
        global.verbose = 1;
        assert_eq!(global.log_level(), "info");
        global.verbose = 2;
        assert_eq!(global.log_level(), "debug");
        global.verbose = 7;
        assert_eq!(global.log_level(), "trace");
        global.quiet = true;
        assert_eq!(global.log_level(), "error");
    }
}
