//! Event source for the viewer loop.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Events consumed by the main loop.
#[derive(Clone, Debug)]
pub enum TuiEvent {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button or movement event.
    Mouse(MouseEvent),
    /// The poll timed out without input.
    Tick,
    /// The terminal was resized.
    Resize(u16, u16),
}

/// Waits up to `timeout` for the next event.
///
/// Key releases and unhandled event kinds are reported as [`TuiEvent::Tick`].
pub fn poll_event(timeout: Duration) -> std::io::Result<TuiEvent> {
    if !event::poll(timeout)? {
        return Ok(TuiEvent::Tick);
    }
    let evt = match event::read()? {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => TuiEvent::Key(key),
        CrosstermEvent::Mouse(mouse) => TuiEvent::Mouse(mouse),
        CrosstermEvent::Resize(w, h) => TuiEvent::Resize(w, h),
        _ => TuiEvent::Tick,
    };
    Ok(evt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_event_without_terminal() {
        // Without a terminal crossterm may error or time out; both are fine.
        let _ = poll_event(Duration::from_millis(1));
    }

    #[test]
    fn tui_event_resize() {
        match TuiEvent::Resize(80, 24) {
            TuiEvent::Resize(w, h) => assert_eq!((w, h), (80, 24)),
            other => panic!("expected Resize, got {other:?}"),
        }
    }
}
