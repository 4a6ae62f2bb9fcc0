//! Command bar: key hints in normal mode, the `:` prompt in command mode.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::HeatmapApp;
use crate::state::InputMode;

const HINTS: [(&str, &str); 7] = [
    ("q", "quit"),
    ("hjkl", "move"),
    ("[ ]", "net1"),
    ("{ }", "net2"),
    ("Tab", "focus"),
    (":", "cmd"),
    ("?", "help"),
];

/// Renders the command bar.
pub fn render_command_input(app: &HeatmapApp, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let line = match app.state.mode {
        InputMode::Normal => {
            let key_style = Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD);
            let text_style = Style::default().fg(Color::DarkGray);
            let spans: Vec<Span> = HINTS
                .iter()
                .flat_map(|(key, action)| {
                    [
                        Span::styled(format!(" {key}"), key_style),
                        Span::styled(format!(":{action}"), text_style),
                    ]
                })
                .collect();
            Line::from(spans)
        }
        InputMode::Command => Line::from(vec![
            Span::styled(
                ":",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(&app.state.command_buffer, Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::White)),
        ]),
    };

    Widget::render(line, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use irhm_config::{GridSettings, ViewSettings};
    use irhm_core::SampleCollection;

    fn make_app() -> HeatmapApp {
        HeatmapApp::new(
            SampleCollection::new(),
            GridSettings::default(),
            ViewSettings::default(),
        )
    }

    fn content(buf: &Buffer) -> String {
        (0..buf.area().width)
            .map(|x| buf.get(x, 0).symbol().to_string())
            .collect()
    }

    #[test]
    fn normal_mode_hints() {
        let app = make_app();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        render_command_input(&app, area, &mut buf);
        let text = content(&buf);
        assert!(text.contains("q:quit"));
        assert!(text.contains("[ ]:net1"));
    }

    #[test]
    fn command_mode_prompt() {
        let mut app = make_app();
        app.state.mode = InputMode::Command;
        app.state.command_buffer = "net1 VCC".to_string();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        render_command_input(&app, area, &mut buf);
        assert!(content(&buf).contains(":net1 VCC"));
    }

    #[test]
    fn zero_height() {
        let app = make_app();
        let area = Rect::new(0, 0, 80, 0);
        let mut buf = Buffer::empty(area);
        render_command_input(&app, area, &mut buf);
    }
}
