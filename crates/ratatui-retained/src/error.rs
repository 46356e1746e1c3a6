//! Error types for the application shell.

use thiserror::Error;

/// Result type for [`crate::window::Window`] operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Terminal or event-source I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The root surface has no usable area.
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidSurface { width: u16, height: u16 },
}
