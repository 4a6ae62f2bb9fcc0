//! Command-bar parsing.

use irhm_core::{ArrayShape, TileKey, TileSize};

/// A command typed after `:`.
#[derive(Clone, Debug, PartialEq)]
pub enum TuiCommand {
    /// Rebuild with a `COLxROW` tile-count grid.
    Array(ArrayShape),
    /// Rebuild with a `WxH` tile-size grid.
    Size(TileSize),
    /// Select the first net, `None` to unset.
    Net1(Option<String>),
    /// Select the second net, `None` to unset.
    Net2(Option<String>),
    /// Move the cursor to a tile.
    Goto(TileKey),
    /// Rebuild the grid with the current settings.
    Refresh,
    /// Toggle the help popup.
    Help,
    /// Leave the viewer.
    Quit,
}

/// Parses a command line typed in command mode.
pub fn parse_tui_command(input: &str) -> Result<TuiCommand, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Err("empty command".to_string());
    };
    let cmd = first.to_lowercase();
    let args = &parts[1..];

    match cmd.as_str() {
        "array" | "a" => {
            let [shape] = args else {
                return Err("array requires a shape (e.g., 'array 10x10')".to_string());
            };
            shape
                .parse::<ArrayShape>()
                .map(TuiCommand::Array)
                .map_err(|e| e.to_string())
        }
        "size" => {
            let [size] = args else {
                return Err("size requires a tile size (e.g., 'size 5x5')".to_string());
            };
            size.parse::<TileSize>()
                .map(TuiCommand::Size)
                .map_err(|e| e.to_string())
        }
        "net1" | "n1" => parse_net(args).map(TuiCommand::Net1),
        "net2" | "n2" => parse_net(args).map(TuiCommand::Net2),
        "goto" | "g" => {
            let [col, row] = args else {
                return Err("goto requires a column and a row (e.g., 'goto 3 4')".to_string());
            };
            let col = col
                .parse()
                .map_err(|_| format!("invalid column '{col}'"))?;
            let row = row.parse().map_err(|_| format!("invalid row '{row}'"))?;
            Ok(TuiCommand::Goto(TileKey::new(col, row)))
        }
        "refresh" | "r" => Ok(TuiCommand::Refresh),
        "help" | "h" | "?" => Ok(TuiCommand::Help),
        "quit" | "q" | "exit" => Ok(TuiCommand::Quit),
        _ => Err(format!("unknown command '{first}'")),
    }
}

fn parse_net(args: &[&str]) -> Result<Option<String>, String> {
    match args {
        ["-"] => Ok(None),
        [name] => Ok(Some((*name).to_string())),
        _ => Err("expected a net name or '-'".to_string()),
    }
}
