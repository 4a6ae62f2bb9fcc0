//! Top-level rendering.
//!
//! Splits the terminal into panels and delegates to the widget modules. The
//! same split is used to route mouse clicks, see [`view_layout`].

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{help_text, HeatmapApp};
use crate::state::NetSlot;
use crate::widgets::{command_input, heatmap, net_panel, status_bar, tile_table};

/// Panel rectangles for one terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLayout {
    /// Ranked tile table.
    pub table: Rect,
    /// Heatmap.
    pub heatmap: Rect,
    /// First net panel.
    pub net1: Rect,
    /// Second net panel.
    pub net2: Rect,
    /// Status bar.
    pub status: Rect,
    /// Command bar.
    pub command: Rect,
}

/// Computes the panel layout.
///
/// ```text
/// ┌────────┬──────────────────┬──────────┐
/// │ Tiles  │                  │ Net 1    │
/// │ (22%)  │  Heatmap (48%)   ├──────────┤
/// │        │                  │ Net 2    │
/// ├────────┴──────────────────┴──────────┤
/// │ Status Bar                           │
/// ├──────────────────────────────────────┤
/// │ Command Input                        │
/// └──────────────────────────────────────┘
/// ```
pub fn view_layout(area: Rect) -> ViewLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(48),
            Constraint::Percentage(30),
        ])
        .split(vertical[0]);

    let nets = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(horizontal[2]);

    ViewLayout {
        table: horizontal[0],
        heatmap: horizontal[1],
        net1: nets[0],
        net2: nets[1],
        status: vertical[1],
        command: vertical[2],
    }
}

/// Renders the whole viewer into `frame`.
pub fn render(app: &HeatmapApp, frame: &mut Frame) {
    let layout = view_layout(frame.size());
    let buf = frame.buffer_mut();

    tile_table::render_tile_table(app, layout.table, buf);
    heatmap::render_heatmap(app, layout.heatmap, buf);
    net_panel::render_net_panel(app, NetSlot::First, layout.net1, buf);
    net_panel::render_net_panel(app, NetSlot::Second, layout.net2, buf);
    status_bar::render_status_bar(app, layout.status, buf);
    command_input::render_command_input(app, layout.command, buf);

    if app.state.show_help {
        render_help_popup(frame);
    }
}

fn render_help_popup(frame: &mut Frame) {
    let area = frame.size();
    let popup_width = 60u16.min(area.width.saturating_sub(4));
    let popup_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(popup_width) / 2;
    let y = area.y + area.height.saturating_sub(popup_height) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(help_text())
        .block(
            Block::default()
                .title(" Help (? to close) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    frame.render_widget(popup, popup_area);
}
