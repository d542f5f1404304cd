pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::game;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub game: GameConfig,
    pub puzzle: PuzzleConfig,
}

impl Config {
    /// Replace the global config with the on-disk file, if it parses.
    pub fn load_global() -> Result<(), loader::ConfigError> {
        let loaded = loader::load_config_from_file()?;
        let mut config = CONFIG.write().unwrap();
        *config = loaded;
        Ok(())
    }
}

/// Tuning for the falling-block round. Board dimensions are fixed
/// constants; everything about pacing is adjustable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    pub speed_increment: f64,
    pub lines_per_level: u32,
    pub points_per_line: u32,
    pub round_seconds: u32,
    pub line_clear_bonus_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_speed_ms: game::INITIAL_SPEED_MS,
            min_speed_ms: game::MIN_SPEED_MS,
            speed_increment: game::SPEED_INCREMENT,
            lines_per_level: game::LINES_PER_LEVEL,
            points_per_line: game::POINTS_PER_LINE,
            round_seconds: game::ROUND_SECONDS,
            line_clear_bonus_seconds: game::LINE_CLEAR_BONUS_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub size: usize,
    pub prefill_ratio: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: game::PUZZLE_SIZE,
            prefill_ratio: game::PUZZLE_PREFILL_RATIO,
        }
    }
}
