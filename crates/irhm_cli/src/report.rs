//! `irhm --report`: headless ranked tile table.
//!
//! Tiles the dataset exactly as the viewer would and prints every tile's
//! combined drop for the selected net pair, largest first.

use std::io::{self, Write};

use irhm_config::{GridSettings, ViewSettings};
use irhm_core::{BoundingBox, NetSelection, SampleCollection};
use serde::Serialize;

use crate::pipeline::prepare;
use crate::{GlobalArgs, ReportFormat, ViewArgs};

/// The full report for one net pair.
#[derive(Debug, Serialize)]
pub struct TileReport {
    /// First net.
    pub net1: String,
    /// Second net.
    pub net2: String,
    /// Combined worst drop over the whole dataset.
    pub total_drop: f64,
    /// Grid geometry.
    pub grid: GridSummary,
    /// Smallest combined drop over all tiles.
    pub min: Option<f64>,
    /// Largest combined drop over all tiles.
    pub max: Option<f64>,
    /// Tiles ranked by combined drop, largest first.
    pub tiles: Vec<RankedTile>,
}

/// Shape and coverage of the grid the report was computed on.
#[derive(Debug, Serialize)]
pub struct GridSummary {
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
    /// Tile width.
    pub tile_width: f64,
    /// Tile height.
    pub tile_height: f64,
    /// Area covered by the grid.
    pub bbox: BoundingBox,
    /// Samples loaded.
    pub samples: usize,
    /// Samples that landed in a tile.
    pub placed: usize,
}

/// One row of the ranked table.
#[derive(Debug, Serialize)]
pub struct RankedTile {
    /// 1-based rank.
    pub rank: usize,
    /// Tile column.
    pub col: usize,
    /// Tile row.
    pub row: usize,
    /// Combined drop.
    pub drop: f64,
    /// Worst drop of the first net in this tile.
    pub worst1: f64,
    /// Worst drop of the second net in this tile.
    pub worst2: f64,
    /// Physical extent of the tile.
    pub bounds: BoundingBox,
}

/// Runs `irhm --report`.
pub fn run(
    args: &ViewArgs,
    format: ReportFormat,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let session = prepare(args, global)?;
    let report = build_report(&session.samples, &session.grid, &session.view)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, format, session.view.precision)?;
    Ok(0)
}

/// Tiles `samples` and ranks the tiles for the pair in `view`.
///
/// Fails on an incomplete or duplicate selection and on an empty dataset.
/// A net absent from the data is allowed and contributes `0.0` everywhere.
pub fn build_report(
    samples: &SampleCollection,
    grid: &GridSettings,
    view: &ViewSettings,
) -> Result<TileReport, Box<dyn std::error::Error>> {
    let (net1, net2) = match view.selection() {
        NetSelection::Pair { first, second } => (first, second),
        NetSelection::Duplicate(net) => {
            return Err(
                format!("net '{net}' selected twice, a report needs two different nets").into(),
            )
        }
        NetSelection::Incomplete => {
            return Err("a report needs two nets, pass --nets NET1,NET2".into())
        }
    };
    if samples.is_empty() {
        return Err("no samples loaded".into());
    }
    for net in [&net1, &net2] {
        if !samples.contains_net(net) {
            tracing::warn!(net = %net, "net has no samples");
        }
    }

    let tiles = grid.tile(samples)?;
    let stats = tiles.array_info(&net1, &net2);
    let ranked = stats
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(i, (key, drop))| {
            let tile = tiles.tile_or_empty(key);
            RankedTile {
                rank: i + 1,
                col: key.col,
                row: key.row,
                drop,
                worst1: tile.worst(&net1),
                worst2: tile.worst(&net2),
                bounds: tiles.tile_bounds(key),
            }
        })
        .collect();

    Ok(TileReport {
        total_drop: samples.calc_drop(&net1, &net2),
        grid: GridSummary {
            cols: tiles.cols(),
            rows: tiles.rows(),
            tile_width: tiles.tile_width(),
            tile_height: tiles.tile_height(),
            bbox: tiles.bbox(),
            samples: samples.len(),
            placed: tiles.sample_count(),
        },
        min: stats.min,
        max: stats.max,
        tiles: ranked,
        net1,
        net2,
    })
}

/// Writes `report` to `out` in `format`. `precision` applies to text only.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &TileReport,
    format: ReportFormat,
    precision: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        ReportFormat::Text => write_text(out, report, precision)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, report: &TileReport, prec: usize) -> io::Result<()> {
    let g = &report.grid;
    writeln!(
        out,
        "{} - {} - {:.prec$}",
        report.net1, report.net2, report.total_drop
    )?;
    writeln!(
        out,
        "{}x{} tiles of {:.prec$} x {:.prec$}, {} of {} samples placed",
        g.cols, g.rows, g.tile_width, g.tile_height, g.placed, g.samples
    )?;
    if let (Some(min), Some(max)) = (report.min, report.max) {
        writeln!(out, "range {min:.prec$} .. {max:.prec$}")?;
    }
    writeln!(out)?;

    let value_width = 10.max(report.net1.len()).max(report.net2.len());
    writeln!(
        out,
        "{:>5}  {:<12}  {:>w$}  {:>w$}  {:>w$}",
        "rank",
        "tile",
        "drop",
        report.net1,
        report.net2,
        w = value_width
    )?;
    for t in &report.tiles {
        let key = format!("({}, {})", t.col, t.row);
        writeln!(
            out,
            "{:>5}  {:<12}  {:>w$.prec$}  {:>w$.prec$}  {:>w$.prec$}",
            t.rank,
            key,
            t.drop,
            t.worst1,
            t.worst2,
            w = value_width
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use irhm_core::{GridShape, Sample};

    /// Same layout as the viewer fixture: on a 2x2 grid the tiles hold
    /// (0,0)=12, (1,0)=8, (1,1)=4 and (0,1)=0.
    fn fixture() -> SampleCollection {
        let mut c = SampleCollection::new();
        c.push(Sample::new("VCC", 5.0, 0.5, 0.5).with_path("X1/VCC"));
        c.push(Sample::new("VCC", 9.0, 0.7, 0.2).with_path("X2/VCC"));
        c.push(Sample::new("VCC", 4.0, 3.5, 3.5).with_path("X3/VCC"));
        c.push(Sample::new("VSS", 3.0, 0.1, 0.9).with_path("X1/VSS"));
        c.push(Sample::new("VSS", 8.0, 2.0, 1.0).with_path("X4/VSS"));
        c
    }

    fn grid_2x2() -> GridSettings {
        GridSettings {
            shape: GridShape::Count { cols: 2, rows: 2 },
            ..GridSettings::default()
        }
    }

    fn pair(a: &str, b: &str) -> ViewSettings {
        ViewSettings {
            net1: Some(a.to_string()),
            net2: Some(b.to_string()),
            ..ViewSettings::default()
        }
    }

    #[test]
    fn ranks_tiles_by_drop() {
        let report = build_report(&fixture(), &grid_2x2(), &pair("VCC", "VSS")).unwrap();
        let order: Vec<(usize, usize, f64)> =
            report.tiles.iter().map(|t| (t.col, t.row, t.drop)).collect();
        assert_eq!(
            order,
            vec![(0, 0, 12.0), (1, 0, 8.0), (1, 1, 4.0), (0, 1, 0.0)]
        );
        assert_eq!(report.tiles[0].rank, 1);
        assert_eq!(report.tiles[0].worst1, 9.0);
        assert_eq!(report.tiles[0].worst2, 3.0);
        assert_eq!(report.total_drop, 17.0);
        assert_eq!(report.max, Some(12.0));
        assert_eq!(report.min, Some(0.0));
    }

    #[test]
    fn summary_counts_samples() {
        let report = build_report(&fixture(), &grid_2x2(), &pair("VCC", "VSS")).unwrap();
        assert_eq!(report.grid.cols, 2);
        assert_eq!(report.grid.rows, 2);
        assert_eq!(report.grid.samples, 5);
        assert_eq!(report.grid.placed, 5);
    }

    #[test]
    fn incomplete_selection_is_error() {
        let view = ViewSettings {
            net1: Some("VCC".into()),
            ..ViewSettings::default()
        };
        let err = build_report(&fixture(), &grid_2x2(), &view).unwrap_err();
        assert!(err.to_string().contains("two nets"));
    }

    #[test]
    fn duplicate_selection_is_error() {
        let err = build_report(&fixture(), &grid_2x2(), &pair("VCC", "VCC")).unwrap_err();
        assert!(err.to_string().contains("'VCC' selected twice"));
    }

    #[test]
    fn empty_dataset_is_error() {
        let err = build_report(
            &SampleCollection::new(),
            &grid_2x2(),
            &pair("VCC", "VSS"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "no samples loaded");
    }

    #[test]
    fn unknown_net_contributes_zero() {
        let report = build_report(&fixture(), &grid_2x2(), &pair("VCC", "GND")).unwrap();
        assert_eq!(report.tiles[0].drop, 9.0);
        assert_eq!(report.total_drop, 9.0);
    }

    #[test]
    fn text_output() {
        let report = build_report(&fixture(), &grid_2x2(), &pair("VCC", "VSS")).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &report, ReportFormat::Text, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "VCC - VSS - 17.00");
        assert!(lines[1].starts_with("2x2 tiles"));
        assert!(lines[1].ends_with("5 of 5 samples placed"));
        assert_eq!(lines[2], "range 0.00 .. 12.00");
        assert!(lines[4].contains("rank"));
        let first: Vec<&str> = lines[5].split_whitespace().collect();
        assert_eq!(first, vec!["1", "(0,", "0)", "12.00", "9.00", "3.00"]);
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn text_output_honours_precision() {
        let report = build_report(&fixture(), &grid_2x2(), &pair("VCC", "VSS")).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &report, ReportFormat::Text, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("VCC - VSS - 17\n"));
    }

    #[test]
    fn json_output() {
        let report = build_report(&fixture(), &grid_2x2(), &pair("VCC", "VSS")).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &report, ReportFormat::Json, 2).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["net1"], "VCC");
        assert_eq!(value["net2"], "VSS");
        assert_eq!(value["total_drop"], 17.0);
        assert_eq!(value["grid"]["cols"], 2);
        assert_eq!(value["tiles"].as_array().unwrap().len(), 4);
        assert_eq!(value["tiles"][0]["col"], 0);
        assert_eq!(value["tiles"][0]["row"], 0);
        assert_eq!(value["tiles"][0]["drop"], 12.0);
        assert!(value["tiles"][0]["bounds"]["x_min"].is_number());
    }
}
