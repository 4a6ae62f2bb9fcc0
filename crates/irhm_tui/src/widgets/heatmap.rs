//! Heatmap widget.
//!
//! Draws one colored cell per tile, row 0 at the bottom, with the combined
//! drop printed in each cell that is wide enough. Colors run along a
//! cool-to-warm ramp between the grid's min and max.

use irhm_core::{GridStatistics, TileKey};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::app::HeatmapApp;
use crate::state::FocusedPanel;
use crate::widgets::{border_style, HIGHLIGHT};

/// Cool-to-warm ramp anchors, blue through light gray to red.
const RAMP: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (59, 76, 192)),
    (0.25, (141, 176, 254)),
    (0.5, (221, 221, 221)),
    (0.75, (244, 154, 123)),
    (1.0, (180, 4, 38)),
];

/// Maps `t` in `[0, 1]` onto the ramp.
pub fn coolwarm(t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    for pair in RAMP.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
            return Color::Rgb(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2));
        }
    }
    let (_, (r, g, b)) = RAMP[RAMP.len() - 1];
    Color::Rgb(r, g, b)
}

/// Label color for `value`: white far from the middle of the range, black
/// near it.
pub fn label_color(stats: &GridStatistics, value: f64) -> Color {
    match (stats.midpoint(), stats.quarter_range()) {
        (Some(mid), Some(qtr)) if (value - mid).abs() > qtr => Color::White,
        _ => Color::Black,
    }
}

/// Placement of grid cells inside the heatmap panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeatmapGeometry {
    /// Area inside the panel border.
    pub inner: Rect,
    /// Grid columns.
    pub cols: usize,
    /// Grid rows.
    pub rows: usize,
    /// Cell width in terminal columns.
    pub cell_width: u16,
    /// Cell height in terminal rows.
    pub cell_height: u16,
}

impl HeatmapGeometry {
    /// Fits a `cols x rows` grid into the bordered panel `area`.
    ///
    /// Cells are at least one character; grids larger than the panel are
    /// clipped at the right and bottom.
    pub fn new(area: Rect, cols: usize, rows: usize) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let fit = |space: u16, n: usize| -> u16 {
            if n == 0 {
                1
            } else {
                (space as usize / n).clamp(1, u16::MAX as usize) as u16
            }
        };
        Self {
            inner,
            cols,
            rows,
            cell_width: fit(inner.width, cols),
            cell_height: fit(inner.height, rows),
        }
    }

    /// Returns the screen rectangle of tile `key`, before clipping.
    pub fn cell_rect(&self, key: TileKey) -> Rect {
        let from_top = self.rows.saturating_sub(key.row + 1);
        let x = self.inner.x as usize + key.col * self.cell_width as usize;
        let y = self.inner.y as usize + from_top * self.cell_height as usize;
        let clamp = |v: usize| v.min(u16::MAX as usize) as u16;
        Rect::new(clamp(x), clamp(y), self.cell_width, self.cell_height)
    }

    /// Returns the tile under screen position `(x, y)`.
    pub fn key_at(&self, x: u16, y: u16) -> Option<TileKey> {
        let inner = self.inner;
        if x < inner.x || x >= inner.right() || y < inner.y || y >= inner.bottom() {
            return None;
        }
        let fx = ((x - inner.x) as f64 + 0.5) / self.cell_width as f64;
        let fy = self.rows as f64 - ((y - inner.y) as f64 + 0.5) / self.cell_height as f64;
        TileKey::from_cell_coords(fx, fy, self.cols, self.rows)
    }
}

/// Renders the heatmap panel.
pub fn render_heatmap(app: &HeatmapApp, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!(" {} ", app.title()))
        .borders(Borders::ALL)
        .border_style(border_style(app.state.focused == FocusedPanel::Heatmap));

    let Some(grid) = app.grid.grid() else {
        let message = if app.state.status_message.is_empty() {
            "No grid".to_string()
        } else {
            app.state.status_message.clone()
        };
        Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .render(area, buf);
        return;
    };

    block.render(area, buf);
    let geometry = HeatmapGeometry::new(area, grid.cols(), grid.rows());
    if geometry.inner.is_empty() {
        return;
    }
    let stats = app.statistics();

    for key in grid.keys() {
        let cell = geometry.cell_rect(key).intersection(geometry.inner);
        if cell.is_empty() {
            continue;
        }
        let value = stats.and_then(|s| s.value(key));
        let selected = key == app.state.cursor;

        let bg = match (selected, stats, value) {
            (true, _, _) => HIGHLIGHT,
            (false, Some(s), Some(v)) => coolwarm(s.normalized(v)),
            _ => Color::DarkGray,
        };
        for y in cell.y..cell.bottom() {
            for x in cell.x..cell.right() {
                buf.get_mut(x, y).set_char(' ').set_bg(bg);
            }
        }

        if let (Some(s), Some(v)) = (stats, value) {
            let label = app.format_value(v);
            let width = label.chars().count() as u16;
            if width <= cell.width {
                let fg = if selected {
                    Color::Black
                } else {
                    label_color(s, v)
                };
                let x = cell.x + (cell.width - width) / 2;
                let y = cell.y + cell.height.saturating_sub(1) / 2;
                let style = Style::default().fg(fg).bg(bg);
                let style = if selected {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                };
                buf.set_string(x, y, &label, style);
            }
        }
    }
}
