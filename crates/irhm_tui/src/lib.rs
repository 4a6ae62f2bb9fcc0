//! Terminal heatmap viewer for IR-drop samples.
//!
//! Shows the combined worst-case drop of two nets per tile as a colored grid,
//! next to a ranked tile table and the samples of the selected tile for each
//! net.
//!
//! # Usage
//!
//! ```ignore
//! use irhm_tui::run_viewer;
//!
//! let samples = irhm_input::load_files(&paths)?;
//! run_viewer(samples, grid_settings, view_settings)?;
//! ```
//!
//! # Layout
//!
//! - **Tiles** (left): every tile with its combined drop, largest first
//! - **Heatmap** (center): the grid, row 0 at the bottom
//! - **Net 1 / Net 2** (right): samples of the selected tile for each net
//! - **Status Bar** and **Command Input** at the bottom

#![warn(missing_docs)]

pub mod app;
pub mod commands;
pub mod error;
pub mod event;
pub mod render;
pub mod state;
pub mod terminal;
pub mod widgets;

use std::time::Duration;

use irhm_config::{GridSettings, ViewSettings};
use irhm_core::SampleCollection;

pub use app::{GridState, HeatmapApp};
pub use error::TuiError;

use event::{poll_event, TuiEvent};
use state::InputMode;
use terminal::{init_terminal, install_panic_hook, restore_terminal, Tui};

/// Opens the viewer on `samples` and runs it until the user quits.
///
/// The grid is built once before the first frame. An empty dataset still
/// opens the viewer, which then shows an empty-state message.
pub fn run_viewer(
    samples: SampleCollection,
    grid: GridSettings,
    view: ViewSettings,
) -> Result<(), TuiError> {
    let mut app = HeatmapApp::new(samples, grid, view);
    if let Err(err) = app.init() {
        tracing::debug!(error = %err, "viewer opened without a grid");
    }

    install_panic_hook();
    let mut terminal = init_terminal()?;
    let result = run_tui_loop(&mut app, &mut terminal);
    restore_terminal()?;
    result
}

fn run_tui_loop(app: &mut HeatmapApp, terminal: &mut Tui) -> Result<(), TuiError> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| render::render(app, frame))?;

        match poll_event(tick_rate)? {
            TuiEvent::Key(key) => match app.state.mode {
                InputMode::Normal => app.handle_normal_key(key.code),
                InputMode::Command => app.handle_command_key(key.code),
            },
            TuiEvent::Mouse(mouse) => {
                let area = terminal.size()?;
                app.handle_mouse(mouse, area);
            }
            TuiEvent::Resize(_, _) | TuiEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
