//! Error types for the core widgets.

use thiserror::Error;

/// Rejection reasons for a `RRGGBB` color string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexColorError {
    /// Fewer than six digits after the optional `#`.
    #[error("hex color needs 6 digits, got {0}")]
    TooShort(usize),

    /// More than six digits after the optional `#`.
    #[error("hex color needs 6 digits, got {0}")]
    TooLong(usize),

    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}
