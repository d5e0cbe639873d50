use std::{error::Error as StdError, fmt, result::Result as StdResult};

/// Geometry error type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A dimension was negative, infinite or NaN.
    InvalidDimensions {
        /// Offending width.
        w: f32,
        /// Offending height.
        h: f32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { w, h } => write!(f, "invalid dimensions {w}x{h}"),
        }
    }
}

impl StdError for Error {}

/// Result type for geometry operations.
pub type Result<T> = StdResult<T, Error>;
