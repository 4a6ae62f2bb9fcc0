//! Ranked tile table: every tile with its combined drop, largest first.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Row, StatefulWidget, Table, TableState, Widget};

use crate::app::HeatmapApp;
use crate::state::FocusedPanel;
use crate::widgets::{border_style, HIGHLIGHT};

/// Rows taken by the border and header above the first data row.
const HEADER_ROWS: u16 = 2;

/// Number of data rows that fit in `area`.
fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(HEADER_ROWS + 1) as usize
}

/// First ranked row shown, keeping `selected` in view.
fn window_offset(selected: Option<usize>, visible: usize) -> usize {
    match selected {
        Some(s) if visible > 0 && s >= visible => s + 1 - visible,
        _ => 0,
    }
}

/// Returns the ranked index of the table row at screen row `y`.
pub fn row_at(area: Rect, selected: Option<usize>, total: usize, y: u16) -> Option<usize> {
    let first = area.y + HEADER_ROWS;
    if y < first {
        return None;
    }
    let visible = visible_rows(area);
    let line = (y - first) as usize;
    let idx = window_offset(selected, visible) + line;
    (line < visible && idx < total).then_some(idx)
}

/// Renders the tile table.
pub fn render_tile_table(app: &HeatmapApp, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Tiles ")
        .borders(Borders::ALL)
        .border_style(border_style(app.state.focused == FocusedPanel::TileTable));

    let ranked = app.ranked();
    if ranked.is_empty() {
        Paragraph::new("Select two nets")
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .render(area, buf);
        return;
    }

    let selected = app.cursor_rank();
    let visible = visible_rows(area);
    let offset = window_offset(selected, visible);

    let rows: Vec<Row> = ranked
        .iter()
        .skip(offset)
        .take(visible)
        .map(|(key, value)| {
            Row::new(vec![
                key.col.to_string(),
                key.row.to_string(),
                app.format_value(*value),
            ])
        })
        .collect();

    let header = Row::new(vec!["Col", "Row", "Value"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(6),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().bg(HIGHLIGHT).fg(Color::Black));

    let mut state = TableState::default();
    state.select(selected.map(|s| s - offset));
    StatefulWidget::render(table, area, buf, &mut state);
}
