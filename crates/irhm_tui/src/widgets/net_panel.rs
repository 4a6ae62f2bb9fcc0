//! Net panel: the net chosen in one selector and its samples in the
//! selected tile.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Widget};

use crate::app::HeatmapApp;
use crate::state::{FocusedPanel, NetSlot};
use crate::widgets::border_style;

/// Renders the panel of `slot`.
pub fn render_net_panel(app: &HeatmapApp, slot: NetSlot, area: Rect, buf: &mut Buffer) {
    let (label, keys, panel) = match slot {
        NetSlot::First => ("Net 1", "[ ]", FocusedPanel::Net1),
        NetSlot::Second => ("Net 2", "{ }", FocusedPanel::Net2),
    };
    let net = app.net(slot);
    let block = Block::default()
        .title(format!(" {label}: {} ", net.unwrap_or("-")))
        .borders(Borders::ALL)
        .border_style(border_style(app.state.focused == panel));

    if net.is_none() {
        Paragraph::new(format!("No net selected ({keys} to choose)"))
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .render(area, buf);
        return;
    }

    let samples = app.tile_samples(slot);
    if samples.is_empty() {
        Paragraph::new(format!("No samples in tile {}", app.state.cursor))
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .render(area, buf);
        return;
    }

    let rows: Vec<Row> = samples
        .iter()
        .map(|s| {
            Row::new(vec![
                app.format_value(s.x),
                app.format_value(s.y),
                app.format_value(s.value),
                s.path.clone().unwrap_or_default(),
            ])
        })
        .collect();

    let header = Row::new(vec!["X", "Y", "Value", "Path"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(4),
        ],
    )
    .header(header)
    .block(block)
    .render(area, buf);
}
