//! Error types for specline.

use std::fmt;

/// Result type alias for specline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for specline operations.
///
/// Only configuration can fail. Reconciliation itself is silent by design:
/// unresolvable, ambiguous, or malformed specifiers collapse to an invalid
/// item with the `WRONG` tag rather than surfacing here.
#[derive(Debug)]
pub enum Error {
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// A palette with no entries cannot cycle.
    EmptyPalette,
    /// Palettes are indexed by a single byte.
    PaletteTooLarge(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::EmptyPalette => write!(f, "palette has no entries"),
            Self::PaletteTooLarge(n) => {
                write!(f, "palette has {n} entries, at most 256 are supported")
            }
        }
    }
}

impl std::error::Error for Error {}
