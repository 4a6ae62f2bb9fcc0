//! Error type for the viewer.

/// Errors that end a viewer session.
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    /// Terminal setup, drawing or event polling failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
