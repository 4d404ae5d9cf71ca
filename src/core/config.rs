//! Game configuration types.
//!
//! - `Dimensions`: grid size, parsed from descriptors like `"3 x 4"`
//! - `GameConfig`: dimensions, timer delays, and an optional shuffle seed
//!
//! Configuration can be built in code with the `with_*` methods or read
//! from a TOML file:
//!
//! ```toml
//! dimensions = "4 x 4"
//! resolve_delay_ms = 800
//! seed = 7
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board;
use crate::error::{DimensionsError, Error, Result};

/// Grid size in rows and columns.
///
/// Parsing only checks the syntax and sign of each dimension. Whether a
/// board can actually be built is decided by [`board::check_dimensions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dimensions {
    pub rows: u32,
    pub cols: u32,
}

impl Dimensions {
    /// Create dimensions from rows and columns.
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Total number of cards on the grid.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(3, 4)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.rows, self.cols)
    }
}

impl FromStr for Dimensions {
    type Err = DimensionsError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let malformed = || DimensionsError::Malformed {
            input: input.to_string(),
        };

        let mut parts = input.split(|c: char| c == 'x' || c == 'X');
        let (Some(rows), Some(cols), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let rows: i64 = rows.trim().parse().map_err(|_| malformed())?;
        let cols: i64 = cols.trim().parse().map_err(|_| malformed())?;
        if rows <= 0 || cols <= 0 {
            return Err(DimensionsError::NonPositive { rows, cols });
        }

        let rows = u32::try_from(rows).map_err(|_| malformed())?;
        let cols = u32::try_from(cols).map_err(|_| malformed())?;
        Ok(Self::new(rows, cols))
    }
}

impl TryFrom<String> for Dimensions {
    type Error = DimensionsError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dimensions> for String {
    fn from(dimensions: Dimensions) -> Self {
        dimensions.to_string()
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Grid size. Defaults to `3 x 4`.
    pub dimensions: Dimensions,

    /// How long two revealed cards stay up before they are settled.
    pub resolve_delay_ms: u64,

    /// Pause between the final match and the win announcement.
    pub win_delay_ms: u64,

    /// Shuffle seed. `None` draws a fresh seed per session.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            resolve_delay_ms: 1000,
            win_delay_ms: 500,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default delays for the given grid.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    /// Set the grid dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Set the match-resolution delay.
    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay_ms = duration_millis(delay);
        self
    }

    /// Set the win-announcement delay.
    #[must_use]
    pub fn with_win_delay(mut self, delay: Duration) -> Self {
        self.win_delay_ms = duration_millis(delay);
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    #[must_use]
    pub fn win_delay(&self) -> Duration {
        Duration::from_millis(self.win_delay_ms)
    }

    /// Check that a board can be built from this configuration.
    pub fn validate(&self) -> Result<()> {
        board::check_dimensions(self.dimensions)?;
        Ok(())
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|err| Error::Config {
            reason: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::Config {
            reason: format!("{}: {err}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }
}

fn duration_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!("3 x 4".parse::<Dimensions>(), Ok(Dimensions::new(3, 4)));
        assert_eq!("2x2".parse::<Dimensions>(), Ok(Dimensions::new(2, 2)));
        assert_eq!(" 6 X 6 ".parse::<Dimensions>(), Ok(Dimensions::new(6, 6)));
    }

    #[test]
    fn test_parse_malformed_dimensions() {
        for input in ["", "3", "3 x", "x 4", "three x four", "3 x 4 x 5", "3 by 4", "2.5 x 2"] {
            assert!(
                matches!(input.parse::<Dimensions>(), Err(DimensionsError::Malformed { .. })),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_non_positive_dimensions() {
        assert_eq!(
            "0 x 4".parse::<Dimensions>(),
            Err(DimensionsError::NonPositive { rows: 0, cols: 4 })
        );
        assert_eq!(
            "-2 x 4".parse::<Dimensions>(),
            Err(DimensionsError::NonPositive { rows: -2, cols: 4 })
        );
    }

    #[test]
    fn test_dimensions_display_round_trips() {
        let dims = Dimensions::new(4, 5);
        assert_eq!(dims.to_string(), "4 x 5");
        assert_eq!(dims.to_string().parse::<Dimensions>(), Ok(dims));
        assert_eq!(dims.cell_count(), 20);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.dimensions, Dimensions::new(3, 4));
        assert_eq!(config.resolve_delay(), Duration::from_millis(1000));
        assert_eq!(config.win_delay(), Duration::from_millis(500));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new(Dimensions::new(2, 2))
            .with_resolve_delay(Duration::from_millis(10))
            .with_win_delay(Duration::from_millis(5))
            .with_seed(99);

        assert_eq!(config.dimensions, Dimensions::new(2, 2));
        assert_eq!(config.resolve_delay_ms, 10);
        assert_eq!(config.win_delay_ms, 5);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_config_from_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            dimensions = "4 x 4"
            resolve_delay_ms = 800
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.dimensions, Dimensions::new(4, 4));
        assert_eq!(config.resolve_delay_ms, 800);
        assert_eq!(config.win_delay_ms, 500);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_config_from_empty_toml_uses_defaults() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_dimensions() {
        let err = GameConfig::from_toml_str(r#"dimensions = "3 x 3""#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDimensions(DimensionsError::OddCellCount { rows: 3, cols: 3 })
        ));

        let err = GameConfig::from_toml_str(r#"dimensions = "wide""#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = GameConfig::from_toml_str("difficulty = 3").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/nonexistent/memory.toml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
