//! Board geometry and runtime configuration.
//!
//! Geometry is fixed at compile time. The initial tick interval and the seed
//! for the Random action can be overridden from the environment.

use crate::controller::parse_interval;
use crate::error::AppError;

/// Board width in logical pixels.
pub const BOARD_WIDTH: u32 = 1200;
/// Board height in logical pixels.
pub const BOARD_HEIGHT: u32 = 900;
/// Edge length of one cell in logical pixels.
pub const CELL_SIZE: u32 = 20;
/// Width of the grid lines between cells, in logical pixels.
pub const GRID_LINE_WIDTH: u32 = 1;

pub const COLS: usize = (BOARD_WIDTH / CELL_SIZE) as usize;
pub const ROWS: usize = (BOARD_HEIGHT / CELL_SIZE) as usize;

/// Top-left corner of the board inside the window, in logical pixels.
pub const BOARD_ORIGIN: [f64; 2] = [0.0, 0.0];
/// Height reserved below the board for the controls panel.
pub const CONTROLS_HEIGHT: u32 = 40;

pub const DEFAULT_UPDATE_INTERVAL_MS: &str = "100";

#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    /// Interval text shown in the controls at startup.
    pub update_interval: String,
    /// Seed for the Random action; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL_MS.to_owned(),
            seed: None,
        }
    }
}

impl LifeConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `LIFE_UPDATE_INTERVAL_MS` -- initial tick interval in milliseconds (default 100)
    /// - `LIFE_SEED` -- seed for the Random action (default: entropy)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`LifeConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let update_interval = lookup("LIFE_UPDATE_INTERVAL_MS")
            .unwrap_or_else(|| DEFAULT_UPDATE_INTERVAL_MS.to_owned());
        parse_interval(&update_interval)
            .map_err(|e| AppError::Config(format!("invalid LIFE_UPDATE_INTERVAL_MS: {e}")))?;

        let seed = lookup("LIFE_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("invalid LIFE_SEED: {e}")))
            })
            .transpose()?;

        Ok(Self {
            update_interval,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_geometry() {
        assert_eq!(COLS, 60);
        assert_eq!(ROWS, 45);
    }

    #[test]
    fn defaults_when_unset() {
        let config = LifeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, LifeConfig::default());
        assert_eq!(config.update_interval, "100");
    }

    #[test]
    fn reads_overrides() {
        let config = LifeConfig::from_lookup(|name| match name {
            "LIFE_UPDATE_INTERVAL_MS" => Some("250".to_owned()),
            "LIFE_SEED" => Some(" 42 ".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.update_interval, "250");
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_bad_values() {
        let interval = LifeConfig::from_lookup(|name| {
            (name == "LIFE_UPDATE_INTERVAL_MS").then(|| "fast".to_owned())
        });
        assert!(matches!(interval, Err(AppError::Config(_))));

        let huge = LifeConfig::from_lookup(|name| {
            (name == "LIFE_UPDATE_INTERVAL_MS").then(|| "1e30".to_owned())
        });
        assert!(matches!(huge, Err(AppError::Config(_))));

        let seed = LifeConfig::from_lookup(|name| (name == "LIFE_SEED").then(|| "-1".to_owned()));
        assert!(matches!(seed, Err(AppError::Config(_))));
    }
}
