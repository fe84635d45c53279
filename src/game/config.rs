use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// Smallest playable board side, in cells
pub const MIN_CELLS_PER_SIDE: i32 = 5;
/// Largest board side the cell canvas will allocate, in cells
pub const MAX_CELLS_PER_SIDE: i32 = 100;

/// Reasons a configuration cannot be played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),
    #[error("board size {board} must be a positive multiple of cell size {cell}")]
    MisalignedBoard { board: i32, cell: i32 },
    #[error("board must be at least {min}x{min} cells, got {cells}")]
    BoardTooSmall { cells: i32, min: i32 },
    #[error("board must be at most {max}x{max} cells, got {cells}")]
    BoardTooLarge { cells: i32, max: i32 },
    #[error("start position ({x}, {y}) is not a cell on the board")]
    InvalidStart { x: i32, y: i32 },
    #[error("tick interval {interval}ms is outside {min}..={max}ms")]
    IntervalOutOfRange { interval: u64, min: u64, max: u64 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board, in canvas units
    pub board_size: i32,
    /// Side length of one cell; every position is a multiple of it
    pub cell_size: i32,
    /// Where the single-segment snake spawns
    pub start_position: Position,
    /// Initial milliseconds between ticks
    pub tick_interval_ms: u64,
    pub min_tick_ms: u64,
    pub max_tick_ms: u64,
    /// Slider increment used by the faster/slower keys
    pub speed_step_ms: u64,
    /// How long the game-over overlay stays up
    pub game_over_display_ms: u64,
    pub show_grid: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 400,
            cell_size: 20,
            start_position: Position::new(200, 200),
            tick_interval_ms: 150,
            min_tick_ms: 50,
            max_tick_ms: 300,
            speed_step_ms: 25,
            game_over_display_ms: 3000,
            show_grid: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board, spawning in the middle cell
    pub fn new(board_size: i32, cell_size: i32) -> Self {
        let cells = if cell_size > 0 { board_size / cell_size } else { 0 };
        Self {
            board_size,
            cell_size,
            start_position: Position::new((cells / 2) * cell_size, (cells / 2) * cell_size),
            ..Default::default()
        }
    }

    /// A 10x10 board of unit cells, handy for tests
    pub fn small() -> Self {
        Self::new(10, 1)
    }

    /// Number of cells along one side of the board
    pub fn cells_per_side(&self) -> i32 {
        self.board_size.checked_div(self.cell_size).unwrap_or(0)
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.board_size <= 0 || self.board_size % self.cell_size != 0 {
            return Err(ConfigError::MisalignedBoard {
                board: self.board_size,
                cell: self.cell_size,
            });
        }
        let cells = self.cells_per_side();
        if cells < MIN_CELLS_PER_SIDE {
            return Err(ConfigError::BoardTooSmall {
                cells,
                min: MIN_CELLS_PER_SIDE,
            });
        }
        if cells > MAX_CELLS_PER_SIDE {
            return Err(ConfigError::BoardTooLarge {
                cells,
                max: MAX_CELLS_PER_SIDE,
            });
        }

        let Position { x, y } = self.start_position;
        let on_board = (0..self.board_size).contains(&x) && (0..self.board_size).contains(&y);
        if !on_board || x % self.cell_size != 0 || y % self.cell_size != 0 {
            return Err(ConfigError::InvalidStart { x, y });
        }

        if self.min_tick_ms == 0
            || self.min_tick_ms > self.max_tick_ms
            || !(self.min_tick_ms..=self.max_tick_ms).contains(&self.tick_interval_ms)
        {
            return Err(ConfigError::IntervalOutOfRange {
                interval: self.tick_interval_ms,
                min: self.min_tick_ms,
                max: self.max_tick_ms,
            });
        }

        Ok(())
    }

    /// Clamp a requested tick interval into the slider range
    pub fn clamp_interval(&self, ms: u64) -> u64 {
        ms.max(self.min_tick_ms).min(self.max_tick_ms)
    }
}
