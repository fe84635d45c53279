use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed-tick grid")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length in canvas units
    #[arg(long)]
    board_size: Option<i32>,

    /// Cell side length in canvas units
    #[arg(long)]
    cell_size: Option<i32>,

    /// Milliseconds between ticks
    #[arg(long)]
    speed: Option<u64>,

    /// Hide the background grid
    #[arg(long)]
    no_grid: bool,

    /// Write a debug log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if self.board_size.is_some() || self.cell_size.is_some() {
            let board_size = self.board_size.unwrap_or(config.board_size);
            let cell_size = self.cell_size.unwrap_or(config.cell_size);
            config.board_size = board_size;
            config.cell_size = cell_size;
            config.start_position = GameConfig::new(board_size, cell_size).start_position;
        }
        if let Some(speed) = self.speed {
            config.tick_interval_ms = speed;
        }
        if self.no_grid {
            config.show_grid = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    info!(
        "board {}x{} cells, {}ms per tick",
        config.cells_per_side(),
        config.cells_per_side(),
        config.tick_interval_ms
    );

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
