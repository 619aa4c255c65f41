use std::fs;
use std::io;
use std::path::Path;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

/// Default number of cells per side.
pub const DEFAULT_GRID_SIZE: u16 = 10;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Logical grid dimensions passed through the simulation as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `cells` cells per side.
    #[must_use]
    pub fn square(cells: u16) -> Self {
        Self {
            width: cells,
            height: cells,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Cell the snake occupies when a simulation starts.
    #[must_use]
    pub fn start_body(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Cell the target occupies when a simulation starts.
    #[must_use]
    pub fn start_target(self) -> Position {
        Position {
            x: i32::from(self.width / 5),
            y: i32::from(self.height / 5),
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// Invalid simulation settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid {width}x{height} has a zero-sized axis")]
    EmptyGrid { width: u16, height: u16 },
    #[error("grid {width}x{height} is too small to separate the start body from the start target")]
    GridTooSmall { width: u16, height: u16 },
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
}

/// Settings fixed by the host when a simulation is constructed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid: GridSize,
    pub tick_interval_ms: u64,
    /// Seed for the food placement source; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Loads settings from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Checks that the grid can host a simulation and the tick period is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if self.grid.start_body() == self.grid.start_target() {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

/// Colors applied to the terminal rendering.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub target: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

pub const THEME_CHARMER: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    target: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Red,
};

/// Each logical cell is drawn two terminal columns wide so the grid looks square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_TARGET: &str = "()";
pub const GLYPH_EMPTY: &str = " ·";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";

#[cfg(test)]
mod tests {
    use super::{ConfigError, GridSize, SimulationConfig};
    use crate::snake::Position;

    #[test]
    fn default_grid_starts_body_and_target_apart() {
        let grid = GridSize::default();

        assert_eq!(grid.start_body(), Position { x: 5, y: 5 });
        assert_eq!(grid.start_target(), Position { x: 2, y: 2 });
        assert_eq!(grid.total_cells(), 100);
    }

    #[test]
    fn validation_rejects_degenerate_settings() {
        let mut config = SimulationConfig {
            grid: GridSize::square(0),
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 0
            })
        );

        config.grid = GridSize::square(1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 1,
                height: 1
            })
        );

        config.grid = GridSize::square(2);
        config.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));

        config.tick_interval_ms = 1;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "seed": 9 }"#).expect("partial config should parse");

        assert_eq!(config.grid, GridSize::square(10));
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.seed, Some(9));
    }
}
