//! Viewer application core.
//!
//! [`HeatmapApp`] owns the loaded samples, the current tile grid and the
//! statistics of the selected net pair. Every change of data, grid shape or
//! selection recomputes what depends on it; nothing is patched in place.

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use irhm_config::{GridSettings, ViewSettings};
use irhm_core::{
    CoreError, GridShape, GridStatistics, NetSelection, Sample, SampleCollection, TileGrid, TileKey,
};
use ratatui::layout::Rect;

use crate::commands::{parse_tui_command, TuiCommand};
use crate::render::{view_layout, ViewLayout};
use crate::state::{FocusedPanel, InputMode, NetSlot, TuiState};
use crate::widgets::{heatmap, tile_table};

/// Whether a tile grid has been built for the current data and shape.
#[derive(Clone, Debug, Default)]
pub enum GridState {
    /// No grid: nothing loaded yet, or the data or shape changed since the
    /// last build.
    #[default]
    Uninitialized,
    /// A grid built from the current data and shape.
    Ready(TileGrid),
}

impl GridState {
    /// Returns the grid if one is built.
    pub fn grid(&self) -> Option<&TileGrid> {
        match self {
            GridState::Ready(grid) => Some(grid),
            GridState::Uninitialized => None,
        }
    }

    /// Returns `true` once a grid is built.
    pub fn is_ready(&self) -> bool {
        matches!(self, GridState::Ready(_))
    }
}

/// The viewer application.
pub struct HeatmapApp {
    /// All loaded samples.
    pub collection: SampleCollection,
    /// Grid shape, origin and margin.
    pub settings: GridSettings,
    /// Current tile grid.
    pub grid: GridState,
    /// First selected net.
    pub net1: Option<String>,
    /// Second selected net.
    pub net2: Option<String>,
    /// Decimals shown for drop values.
    pub precision: usize,
    /// Statistics of the current pair on the current grid.
    stats: Option<GridStatistics>,
    /// Tiles ranked by combined drop, cached with `stats`.
    ranked: Vec<(TileKey, f64)>,
    /// UI state.
    pub state: TuiState,
    /// Set once the user asked to leave.
    pub should_quit: bool,
}

impl HeatmapApp {
    /// Creates the viewer in the [`GridState::Uninitialized`] state.
    pub fn new(collection: SampleCollection, settings: GridSettings, view: ViewSettings) -> Self {
        Self {
            collection,
            settings,
            grid: GridState::Uninitialized,
            net1: view.net1,
            net2: view.net2,
            precision: view.precision,
            stats: None,
            ranked: Vec::new(),
            state: TuiState::default(),
            should_quit: false,
        }
    }

    /// Builds the grid from the current data and settings.
    ///
    /// Moves to [`GridState::Ready`] only on success. An empty dataset or an
    /// invalid shape leaves the viewer uninitialized with a status message.
    pub fn init(&mut self) -> Result<(), CoreError> {
        self.grid = GridState::Uninitialized;
        self.stats = None;
        self.ranked.clear();

        if self.collection.is_empty() {
            self.state.status_message = "No samples loaded".to_string();
            tracing::warn!("viewer has no samples, grid not built");
            return Err(CoreError::EmptyCollection);
        }

        match self.settings.tile(&self.collection) {
            Ok(grid) => {
                tracing::debug!(
                    shape = %self.settings.shape,
                    cols = grid.cols(),
                    rows = grid.rows(),
                    "grid rebuilt"
                );
                self.state.clamp_cursor(grid.cols(), grid.rows());
                self.state.status_message = format!(
                    "{}x{} tiles, {} of {} samples placed",
                    grid.cols(),
                    grid.rows(),
                    grid.sample_count(),
                    self.collection.len()
                );
                self.grid = GridState::Ready(grid);
                self.refresh_statistics();
                Ok(())
            }
            Err(err) => {
                self.state.status_message = format!("Error: {err}");
                tracing::warn!(error = %err, "grid build failed");
                Err(err)
            }
        }
    }

    /// Replaces the dataset and rebuilds.
    ///
    /// Selected nets that the new data lacks are cleared.
    pub fn set_collection(&mut self, collection: SampleCollection) -> Result<(), CoreError> {
        self.collection = collection;
        self.grid = GridState::Uninitialized;
        for slot in [NetSlot::First, NetSlot::Second] {
            let missing = self
                .net(slot)
                .is_some_and(|n| !self.collection.contains_net(n));
            if missing {
                *self.net_mut(slot) = None;
            }
        }
        self.init()
    }

    /// Changes the grid shape and rebuilds.
    pub fn set_shape(&mut self, shape: GridShape) -> Result<(), CoreError> {
        self.settings.shape = shape;
        self.grid = GridState::Uninitialized;
        self.init()
    }

    /// Returns the net selected in `slot`.
    pub fn net(&self, slot: NetSlot) -> Option<&str> {
        match slot {
            NetSlot::First => self.net1.as_deref(),
            NetSlot::Second => self.net2.as_deref(),
        }
    }

    fn net_mut(&mut self, slot: NetSlot) -> &mut Option<String> {
        match slot {
            NetSlot::First => &mut self.net1,
            NetSlot::Second => &mut self.net2,
        }
    }

    /// Sets or clears the net of `slot`.
    ///
    /// Fails for a net with no samples; the selection is left unchanged.
    pub fn set_net(&mut self, slot: NetSlot, net: Option<String>) -> Result<(), String> {
        if let Some(name) = &net {
            if !self.collection.contains_net(name) {
                return Err(format!("unknown net '{name}'"));
            }
        }
        *self.net_mut(slot) = net;
        self.refresh_statistics();
        Ok(())
    }

    /// Steps the selector of `slot` through "unset" followed by every net in
    /// file order, wrapping around.
    pub fn cycle_net(&mut self, slot: NetSlot, forward: bool) {
        let options: Vec<Option<String>> = std::iter::once(None)
            .chain(self.collection.nets().map(|n| Some(n.to_string())))
            .collect();
        let current = self.net(slot).map(str::to_string);
        let idx = options.iter().position(|o| *o == current).unwrap_or(0);
        let next = if forward {
            (idx + 1) % options.len()
        } else {
            (idx + options.len() - 1) % options.len()
        };
        *self.net_mut(slot) = options[next].clone();
        self.refresh_statistics();
    }

    /// Returns the classified net pair.
    pub fn selection(&self) -> NetSelection {
        NetSelection::new(self.net1.clone(), self.net2.clone())
    }

    /// Recomputes the statistics of the current pair.
    fn refresh_statistics(&mut self) {
        let selection = self.selection();
        self.stats = self.grid.grid().and_then(|g| g.statistics(&selection));
        self.ranked = self
            .stats
            .as_ref()
            .map(GridStatistics::ranked)
            .unwrap_or_default();
        if let NetSelection::Duplicate(net) = &selection {
            self.state.status_message = format!("{net} selected twice");
        }
    }

    /// Returns the statistics of the current pair, if it is a valid pair on
    /// a built grid.
    pub fn statistics(&self) -> Option<&GridStatistics> {
        self.stats.as_ref()
    }

    /// Returns every tile ranked by combined drop, largest first.
    pub fn ranked(&self) -> &[(TileKey, f64)] {
        &self.ranked
    }

    /// Returns the position of the cursor tile in [`ranked`](Self::ranked).
    pub fn cursor_rank(&self) -> Option<usize> {
        self.ranked.iter().position(|(k, _)| *k == self.state.cursor)
    }

    /// Returns the samples of `slot`'s net in the cursor tile, largest drop
    /// first.
    pub fn tile_samples(&self, slot: NetSlot) -> Vec<&Sample> {
        match (self.grid.grid(), self.net(slot)) {
            (Some(grid), Some(net)) => grid
                .tile_or_empty(self.state.cursor)
                .store(net)
                .sorted_by_drop(),
            _ => Vec::new(),
        }
    }

    /// Heatmap title: both nets and the whole-dataset combined drop.
    pub fn title(&self) -> String {
        match self.selection().pair() {
            Some((a, b)) => format!(
                "{a} - {b} - {:.*}",
                self.precision,
                self.collection.calc_drop(a, b)
            ),
            None => "IR-drop heatmap".to_string(),
        }
    }

    /// Formats a drop value with the configured precision.
    pub fn format_value(&self, value: f64) -> String {
        format!("{value:.*}", self.precision)
    }

    /// Moves the cursor to `key` if it lies on the grid.
    pub fn goto(&mut self, key: TileKey) -> Result<(), String> {
        let Some(grid) = self.grid.grid() else {
            return Err("no grid".to_string());
        };
        if key.col >= grid.cols() || key.row >= grid.rows() {
            return Err(format!(
                "tile {key} outside {}x{} grid",
                grid.cols(),
                grid.rows()
            ));
        }
        self.state.cursor = key;
        Ok(())
    }

    fn move_cursor(&mut self, dc: isize, dr: isize) {
        if let Some(grid) = self.grid.grid() {
            let (cols, rows) = (grid.cols(), grid.rows());
            self.state.move_cursor(dc, dr, cols, rows);
        }
    }

    /// Moves the cursor `delta` places along the ranking.
    fn move_rank(&mut self, delta: isize) {
        if self.ranked.is_empty() {
            return;
        }
        let next = match self.cursor_rank() {
            Some(i) => i
                .saturating_add_signed(delta)
                .min(self.ranked.len() - 1),
            None => 0,
        };
        self.state.cursor = self.ranked[next].0;
    }

    /// Executes a command line.
    pub fn execute_command(&mut self, input: &str) -> Result<String, String> {
        match parse_tui_command(input)? {
            TuiCommand::Array(shape) => {
                self.set_shape(shape.into()).map_err(|e| e.to_string())?;
                Ok(self.state.status_message.clone())
            }
            TuiCommand::Size(size) => {
                self.set_shape(size.into()).map_err(|e| e.to_string())?;
                Ok(self.state.status_message.clone())
            }
            TuiCommand::Net1(net) => {
                self.set_net(NetSlot::First, net)?;
                Ok(self.title())
            }
            TuiCommand::Net2(net) => {
                self.set_net(NetSlot::Second, net)?;
                Ok(self.title())
            }
            TuiCommand::Goto(key) => {
                self.goto(key)?;
                Ok(format!("Tile {key}"))
            }
            TuiCommand::Refresh => {
                self.init().map_err(|e| e.to_string())?;
                Ok(self.state.status_message.clone())
            }
            TuiCommand::Help => {
                self.state.show_help = !self.state.show_help;
                Ok(String::new())
            }
            TuiCommand::Quit => {
                self.should_quit = true;
                Ok("Quitting".to_string())
            }
        }
    }

    /// Handles a key in normal mode.
    pub fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(':') => {
                self.state.mode = InputMode::Command;
                self.state.command_buffer.clear();
            }
            KeyCode::Char('?') => self.state.show_help = !self.state.show_help,
            KeyCode::Esc => self.state.show_help = false,
            KeyCode::Tab => self.state.focused = self.state.focused.next(),
            KeyCode::Char(']') => self.cycle_net(NetSlot::First, true),
            KeyCode::Char('[') => self.cycle_net(NetSlot::First, false),
            KeyCode::Char('}') => self.cycle_net(NetSlot::Second, true),
            KeyCode::Char('{') => self.cycle_net(NetSlot::Second, false),
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Char('k') | KeyCode::Up => self.vertical_key(true),
            KeyCode::Char('j') | KeyCode::Down => self.vertical_key(false),
            _ => {}
        }
    }

    /// Up/down: heatmap rows (row 0 at the bottom), ranking order in the
    /// table, net choice in a net panel.
    fn vertical_key(&mut self, up: bool) {
        match self.state.focused {
            FocusedPanel::Heatmap => self.move_cursor(0, if up { 1 } else { -1 }),
            FocusedPanel::TileTable => self.move_rank(if up { -1 } else { 1 }),
            FocusedPanel::Net1 => self.cycle_net(NetSlot::First, !up),
            FocusedPanel::Net2 => self.cycle_net(NetSlot::Second, !up),
        }
    }

    /// Handles a key in command mode.
    pub fn handle_command_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state.mode = InputMode::Normal;
                self.state.command_buffer.clear();
            }
            KeyCode::Enter => {
                let cmd = std::mem::take(&mut self.state.command_buffer);
                self.state.mode = InputMode::Normal;
                if cmd.trim().is_empty() {
                    return;
                }
                match self.execute_command(&cmd) {
                    Ok(msg) => {
                        if !msg.is_empty() {
                            self.state.status_message = msg;
                        }
                    }
                    Err(err) => self.state.status_message = format!("Error: {err}"),
                }
            }
            KeyCode::Backspace => {
                self.state.command_buffer.pop();
            }
            KeyCode::Char(c) => self.state.command_buffer.push(c),
            _ => {}
        }
    }

    /// Handles a mouse event; `area` is the full terminal area.
    ///
    /// A left click focuses the panel under the pointer. On the heatmap it
    /// selects the tile under the pointer, on the tile table that row's tile.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let layout = view_layout(area);
        let (x, y) = (mouse.column, mouse.row);

        if contains(layout.heatmap, x, y) {
            self.state.focused = FocusedPanel::Heatmap;
            if let Some(grid) = self.grid.grid() {
                let geometry =
                    heatmap::HeatmapGeometry::new(layout.heatmap, grid.cols(), grid.rows());
                if let Some(key) = geometry.key_at(x, y) {
                    self.state.cursor = key;
                }
            }
        } else if contains(layout.table, x, y) {
            self.state.focused = FocusedPanel::TileTable;
            if let Some(idx) =
                tile_table::row_at(layout.table, self.cursor_rank(), self.ranked.len(), y)
            {
                self.state.cursor = self.ranked[idx].0;
            }
        } else if contains(layout.net1, x, y) {
            self.state.focused = FocusedPanel::Net1;
        } else if contains(layout.net2, x, y) {
            self.state.focused = FocusedPanel::Net2;
        }
    }

    /// Returns the layout for a terminal of `area`.
    pub fn layout(&self, area: Rect) -> ViewLayout {
        view_layout(area)
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Returns the help text for the viewer.
pub fn help_text() -> &'static str {
    "\
Navigation:
  h/j/k/l or arrows   Move tile cursor
  [ / ]               Previous / next first net
  { / }               Previous / next second net
  Tab                 Switch panel focus
  Mouse click         Select tile (heatmap or table)
  ?                   Toggle help
  :                   Command mode
  q                   Quit

Commands:
  array CxR           Tile-count grid (e.g., 'array 10x10')
  size WxH            Tile-size grid (e.g., 'size 5x5')
  net1 NAME | -       Set or clear the first net
  net2 NAME | -       Set or clear the second net
  goto C R            Jump to tile
  refresh             Rebuild the grid
  quit (q)            Exit"
}
