#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Gravity speed curve: the tick interval starts at INITIAL_SPEED_MS and is
// multiplied by SPEED_INCREMENT once per level (LINES_PER_LEVEL cleared
// lines), floored at MIN_SPEED_MS.
pub const INITIAL_SPEED_MS: u64 = 800;
pub const MIN_SPEED_MS: u64 = 120;
pub const SPEED_INCREMENT: f64 = 0.85;
pub const LINES_PER_LEVEL: u32 = 5;

// Flat line-clear scoring, no combo or drop bonuses
pub const POINTS_PER_LINE: u32 = 100;

// Round clock
pub const ROUND_SECONDS: u32 = 120;
pub const LINE_CLEAR_BONUS_SECONDS: u32 = 5;

// Delay between marking rows as bursting and physically removing them,
// and the pause on the line-cleared banner before play resumes
pub const CLEAR_DELAY_MS: u64 = 400;
pub const LINE_CLEARED_PAUSE_MS: u64 = 700;

// Pillar puzzle
pub const PUZZLE_SIZE: usize = 5;
pub const PUZZLE_PREFILL_RATIO: f64 = 0.5;

/// Gravity tick interval for a given number of cleared lines.
///
/// Non-increasing in `lines_cleared`, floored at `MIN_SPEED_MS`.
#[must_use]
pub fn speed_ms(lines_cleared: u32) -> u64 {
    speed_ms_with(
        lines_cleared,
        INITIAL_SPEED_MS,
        MIN_SPEED_MS,
        SPEED_INCREMENT,
        LINES_PER_LEVEL,
    )
}

#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn speed_ms_with(
    lines_cleared: u32,
    initial_ms: u64,
    min_ms: u64,
    increment: f64,
    lines_per_level: u32,
) -> u64 {
    let level = lines_cleared / lines_per_level.max(1);
    let scaled = initial_ms as f64 * increment.powi(i32::try_from(level).unwrap_or(i32::MAX));
    (scaled.round() as u64).max(min_ms)
}
