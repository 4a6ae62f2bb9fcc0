//! Status bar: input mode, grid, data size, cursor tile and the last
//! message.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::HeatmapApp;
use crate::state::InputMode;

/// Renders the status bar into the given area.
pub fn render_status_bar(app: &HeatmapApp, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let (mode_str, mode_style) = match app.state.mode {
        InputMode::Normal => (
            "NORMAL",
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        InputMode::Command => (
            "COMMAND",
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let grid_str = match app.grid.grid() {
        Some(grid) => format!(" {}x{} tiles", grid.cols(), grid.rows()),
        None => " NO GRID".to_string(),
    };

    let data_str = format!(
        " | {} samples, {} nets",
        app.collection.len(),
        app.collection.net_count()
    );

    let tile_str = match app.statistics() {
        Some(stats) => {
            let value = stats
                .value(app.state.cursor)
                .map(|v| app.format_value(v))
                .unwrap_or_else(|| "-".to_string());
            let range = match (stats.min, stats.max) {
                (Some(min), Some(max)) => {
                    format!(" [{}..{}]", app.format_value(min), app.format_value(max))
                }
                _ => String::new(),
            };
            format!(" | tile {} = {value}{range}", app.state.cursor)
        }
        None if app.grid.is_ready() => format!(" | tile {}", app.state.cursor),
        None => String::new(),
    };

    let status_msg = if app.state.status_message.is_empty() {
        String::new()
    } else {
        format!(" | {}", app.state.status_message)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {mode_str} "), mode_style),
        Span::styled(grid_str, Style::default().fg(Color::White)),
        Span::styled(data_str, Style::default().fg(Color::Gray)),
        Span::styled(tile_str, Style::default().fg(Color::Yellow)),
        Span::styled(status_msg, Style::default().fg(Color::Cyan)),
    ]);

    let bg_style = Style::default().bg(Color::DarkGray);
    for x in area.x..area.right().min(buf.area().right()) {
        buf.get_mut(x, area.y).set_style(bg_style);
    }

    Widget::render(line, area, buf);
}
