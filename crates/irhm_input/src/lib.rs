//! Reader for the IR-drop sample format.
//!
//! One sample per line, five whitespace-separated fields:
//!
//! ```text
//! # net   value   x       y       path
//! VCC     17.77   91.36   61.24   X14/X45
//! ```
//!
//! Blank lines and `#` comments are skipped. Everything else must have
//! exactly five fields or loading stops with a [`ParseError`] naming the
//! source, line and offending content.

pub mod error;
pub mod load;
pub mod parse;

pub use error::ParseError;
pub use load::{load_file, load_files, load_reader};
pub use parse::{parse_into, parse_line, parse_str};
