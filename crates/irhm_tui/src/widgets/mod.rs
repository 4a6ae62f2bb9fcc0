//! Viewer panels.
//!
//! Each module exposes a stateless rendering function that draws one panel
//! of the viewer into a ratatui `Buffer`.

pub mod command_input;
pub mod heatmap;
pub mod net_panel;
pub mod status_bar;
pub mod tile_table;

use ratatui::style::{Color, Style};

/// Background of the selected tile and table row.
pub const HIGHLIGHT: Color = Color::Rgb(0xF5, 0xD8, 0x3E);

/// Border style for a panel depending on focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
