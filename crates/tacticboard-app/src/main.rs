//! Headless entry point: loads configuration and the saved roster, then
//! prints the board projection as JSON.
//!
//! Usage: `tacticboard [config.json]`

use kurbo::Rect;
use std::path::PathBuf;
use tacticboard_core::storage::{DEFAULT_ROSTER_KEY, FileStorage, load_roster};
use tacticboard_core::{Board, Config, ConfigError, PoolFilter, PoolSource, StorageError, SurfaceLayout};
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode board: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Field centred in its container with the pool to the right.
fn default_layout() -> SurfaceLayout {
    SurfaceLayout::new(
        Rect::new(60.0, 60.0, 860.0, 660.0),
        Rect::new(20.0, 20.0, 900.0, 700.0),
        Rect::new(940.0, 20.0, 1240.0, 700.0),
    )
}

fn load_config() -> Result<Config, AppError> {
    match std::env::args_os().nth(1) {
        Some(path) => Ok(Config::load(PathBuf::from(path))?),
        None => Ok(Config::default()),
    }
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    let storage = FileStorage::default_location()?;
    log::debug!("Roster storage at {}", storage.base_path().display());
    let roster = pollster::block_on(load_roster(&storage, DEFAULT_ROSTER_KEY))?;
    let filter = PoolFilter::default();

    let mut board = Board::new(config.board);
    let view = board.refresh(PoolSource::new(&roster, &filter), &default_layout());
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting TacticBoard");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
