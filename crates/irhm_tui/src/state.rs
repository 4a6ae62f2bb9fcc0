//! Viewer UI state: focus, input mode, tile cursor and messages.

use irhm_core::TileKey;

/// Which panel has keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusedPanel {
    /// The ranked tile table on the left.
    TileTable,
    /// The heatmap in the center.
    Heatmap,
    /// The first net panel.
    Net1,
    /// The second net panel.
    Net2,
}

impl FocusedPanel {
    /// Returns the next panel in `Tab` order.
    pub fn next(self) -> Self {
        match self {
            FocusedPanel::TileTable => FocusedPanel::Heatmap,
            FocusedPanel::Heatmap => FocusedPanel::Net1,
            FocusedPanel::Net1 => FocusedPanel::Net2,
            FocusedPanel::Net2 => FocusedPanel::TileTable,
        }
    }
}

/// Current input mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys.
    Normal,
    /// Typing a `:` command.
    Command,
}

/// One of the two net selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetSlot {
    /// The first selector.
    First,
    /// The second selector.
    Second,
}

/// Full UI state, independent of the loaded data.
#[derive(Clone, Debug)]
pub struct TuiState {
    /// Current input mode.
    pub mode: InputMode,
    /// Which panel has focus.
    pub focused: FocusedPanel,
    /// Selected tile.
    pub cursor: TileKey,
    /// Text typed in command mode.
    pub command_buffer: String,
    /// Message shown in the status bar.
    pub status_message: String,
    /// Whether the help popup is visible.
    pub show_help: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            focused: FocusedPanel::Heatmap,
            cursor: TileKey::new(0, 0),
            command_buffer: String::new(),
            status_message: String::new(),
            show_help: false,
        }
    }
}

impl TuiState {
    /// Moves the cursor by `(dc, dr)`, staying inside a `cols x rows` grid.
    pub fn move_cursor(&mut self, dc: isize, dr: isize, cols: usize, rows: usize) {
        if cols == 0 || rows == 0 {
            return;
        }
        let col = self.cursor.col.saturating_add_signed(dc).min(cols - 1);
        let row = self.cursor.row.saturating_add_signed(dr).min(rows - 1);
        self.cursor = TileKey::new(col, row);
    }

    /// Pulls the cursor back inside a `cols x rows` grid after a rebuild.
    pub fn clamp_cursor(&mut self, cols: usize, rows: usize) {
        self.move_cursor(0, 0, cols, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_all_panels() {
        let mut focus = FocusedPanel::TileTable;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(focus);
            focus = focus.next();
        }
        assert_eq!(focus, FocusedPanel::TileTable);
        assert_eq!(seen.len(), 4);
        assert!(seen.contains(&FocusedPanel::Net2));
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut state = TuiState::default();
        state.move_cursor(-1, -1, 4, 3);
        assert_eq!(state.cursor, TileKey::new(0, 0));
        state.move_cursor(2, 1, 4, 3);
        assert_eq!(state.cursor, TileKey::new(2, 1));
        state.move_cursor(5, 5, 4, 3);
        assert_eq!(state.cursor, TileKey::new(3, 2));
    }

    #[test]
    fn clamp_after_shrink() {
        let mut state = TuiState {
            cursor: TileKey::new(9, 9),
            ..TuiState::default()
        };
        state.clamp_cursor(5, 2);
        assert_eq!(state.cursor, TileKey::new(4, 1));
    }

    #[test]
    fn empty_grid_leaves_cursor() {
        let mut state = TuiState::default();
        state.move_cursor(1, 1, 0, 0);
        assert_eq!(state.cursor, TileKey::new(0, 0));
    }
}
