//! Session configuration for grid layout, gesture timing, and window placement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_GRID_COLUMNS: i32 = 8;
pub const DEFAULT_CELL_SIZE: i32 = 96;
pub const DEFAULT_CELL_GAP: i32 = 8;
pub const DEFAULT_GRID_ROWS: i32 = 6;
pub const DEFAULT_TASKBAR_HEIGHT: i32 = 48;
/// Rubber-band gestures shorter than this are treated as clicks.
pub const DEFAULT_SELECTION_MIN_DURATION_MS: u64 = 150;
pub const DEFAULT_MAX_WINDOW_JITTER: i32 = 200;
pub const MIN_WINDOW_WIDTH: i32 = 220;
pub const MIN_WINDOW_HEIGHT: i32 = 140;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: i32,
    /// Square cell edge used when the container size is unknown.
    pub default_cell: i32,
    pub gap: i32,
    /// Row count used when the container height is unknown.
    pub default_rows: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            default_cell: DEFAULT_CELL_SIZE,
            gap: DEFAULT_CELL_GAP,
            default_rows: DEFAULT_GRID_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPlacementConfig {
    pub max_jitter: i32,
    /// Lower bound applied to live chrome resizes.
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for WindowPlacementConfig {
    fn default() -> Self {
        Self {
            max_jitter: DEFAULT_MAX_WINDOW_JITTER,
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for one desktop session. Every field has a default, so partial TOML is accepted.
pub struct DesktopConfig {
    pub grid: GridConfig,
    pub window: WindowPlacementConfig,
    pub taskbar_height: i32,
    pub selection_min_duration_ms: u64,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            window: WindowPlacementConfig::default(),
            taskbar_height: DEFAULT_TASKBAR_HEIGHT,
            selection_min_duration_ms: DEFAULT_SELECTION_MIN_DURATION_MS,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid desktop config: {0}")]
    Parse(String),
    #[error("grid.columns must be at least 1, found {0}")]
    Columns(i32),
}

impl DesktopConfig {
    /// Parses a TOML document, filling missing keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or the column count is not
    /// positive.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if config.grid.columns < 1 {
            return Err(ConfigError::Columns(config.grid.columns));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(
            DesktopConfig::from_toml_str("").expect("parse"),
            DesktopConfig::default()
        );
    }

    #[test]
    fn partial_document_overrides_only_named_keys() {
        let config = DesktopConfig::from_toml_str(
            "selection_min_duration_ms = 200\n\n[grid]\ncolumns = 4\n",
        )
        .expect("parse");
        assert_eq!(config.grid.columns, 4);
        assert_eq!(config.grid.gap, DEFAULT_CELL_GAP);
        assert_eq!(config.selection_min_duration_ms, 200);
        assert_eq!(config.taskbar_height, DEFAULT_TASKBAR_HEIGHT);
    }

    #[test]
    fn non_positive_columns_are_rejected() {
        assert_eq!(
            DesktopConfig::from_toml_str("[grid]\ncolumns = 0\n"),
            Err(ConfigError::Columns(0))
        );
        assert!(matches!(
            DesktopConfig::from_toml_str("grid = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
