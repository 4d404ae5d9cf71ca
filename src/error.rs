//! Error types.
//!
//! - `InvalidDimensions`: the grid cannot be built. Fatal to game setup.
//! - `Persistence`: the result store rejected a finished game. Logged and
//!   swallowed by the win flow.
//! - `Query`: the result store could not be read. Shown to the player as text.
//! - `Config`: a configuration file could not be read or decoded.

use derive_more::{Display, Error};

/// Why a grid descriptor or grid size was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum DimensionsError {
    /// The descriptor is not of the form `"<rows> x <cols>"`.
    #[display("malformed dimensions {input:?}, expected \"<rows> x <cols>\"")]
    Malformed { input: String },

    /// A dimension is zero or negative.
    #[display("dimensions must be positive, got {rows} x {cols}")]
    NonPositive { rows: i64, cols: i64 },

    /// `rows * cols` is odd, so the cards cannot all be paired.
    #[display("grid {rows} x {cols} has an odd number of cards")]
    OddCellCount { rows: u32, cols: u32 },

    /// More pairs than distinct shape/color combinations.
    #[display("grid needs {pairs} pairs but only {max} distinct cards exist")]
    TooManyPairs { pairs: usize, max: usize },
}

/// Failure inside a result store implementation.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    /// Underlying file or device error.
    #[display("store I/O failed: {_0}")]
    Io(std::io::Error),

    /// A record could not be encoded.
    #[display("could not encode record: {_0}")]
    Encode(serde_json::Error),

    /// The backend refused the request.
    #[display("store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encode(err)
    }
}

/// Top-level error for the engine.
#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("invalid dimensions: {_0}")]
    InvalidDimensions(DimensionsError),

    #[display("failed to persist game result: {_0}")]
    Persistence(StoreError),

    #[display("failed to query game results: {_0}")]
    Query(StoreError),

    #[display("bad configuration: {reason}")]
    Config { reason: String },
}

impl From<DimensionsError> for Error {
    fn from(err: DimensionsError) -> Self {
        Error::InvalidDimensions(err)
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_error_display() {
        let err = DimensionsError::OddCellCount { rows: 3, cols: 3 };
        assert_eq!(err.to_string(), "grid 3 x 3 has an odd number of cards");

        let err = DimensionsError::TooManyPairs { pairs: 20, max: 18 };
        assert_eq!(err.to_string(), "grid needs 20 pairs but only 18 distinct cards exist");
    }

    #[test]
    fn test_error_wraps_dimensions() {
        let err: Error = DimensionsError::NonPositive { rows: 0, cols: 4 }.into();
        assert!(matches!(err, Error::InvalidDimensions(_)));
        assert_eq!(
            err.to_string(),
            "invalid dimensions: dimensions must be positive, got 0 x 4"
        );
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
