//! Default mode: open the interactive heatmap viewer.

use crate::pipeline::prepare;
use crate::{GlobalArgs, ViewArgs};

/// Loads the samples and runs the viewer until the user quits.
///
/// An empty dataset still opens the viewer in its empty state.
pub fn run(args: &ViewArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let session = prepare(args, global)?;
    if session.samples.is_empty() {
        tracing::warn!("no samples loaded");
    }
    irhm_tui::run_viewer(session.samples, session.grid, session.view)?;
    Ok(0)
}
