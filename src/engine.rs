#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{Board, Piece, PieceKind, rotate_matrix};
use crate::config::GameConfig;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, speed_ms_with};

/// Horizontal wall-kick offsets tried, in order, when a rotation collides
/// at the unchanged position. No vertical kicks.
const KICK_OFFSETS: [i32; 5] = [0, 1, -1, 2, -2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    /// Completed rows identified but not yet removed; the host shows them
    /// bursting for a fixed delay before calling `finish_clearing`.
    Clearing,
    /// Rows removed and score committed; a short reward pause before
    /// `resume` spawns the next piece.
    LineCleared,
    Lost,
    Won,
}

/// The falling-piece state machine. Owns the settled board, the active and
/// next pieces, and the session counters; every mutation goes through the
/// board's collision check first.
#[derive(Resource, Debug, Clone)]
pub struct Engine {
    pub board: Board,
    pub active: Option<Piece>,
    pub next: PieceKind,
    pub status: GameStatus,
    pub score: u32,
    pub lines_cleared: u32,
    pub speed_ms: u64,
    /// Row indices marked complete but still on the board.
    pub bursting: Vec<usize>,
    tuning: GameConfig,
    clear_event: Option<u32>,
}

impl Engine {
    #[must_use]
    pub fn new(tuning: GameConfig) -> Self {
        let speed_ms = tuning.initial_speed_ms;
        Self {
            board: Board::new(BOARD_WIDTH, BOARD_HEIGHT),
            active: None,
            next: PieceKind::random(),
            status: GameStatus::Idle,
            score: 0,
            lines_cleared: 0,
            speed_ms,
            bursting: Vec::new(),
            tuning,
            clear_event: None,
        }
    }

    /// Start (or restart) a session: empty board, zeroed counters, initial
    /// speed, the queued piece spawned top-center and a fresh next drawn.
    pub fn start(&mut self) {
        info!("Starting falling-block session");
        self.board.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.speed_ms = self.tuning.initial_speed_ms;
        self.bursting.clear();
        self.clear_event = None;
        self.status = GameStatus::Playing;
        self.spawn_next();
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    pub fn unpause(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    /// The round clock ran out: surviving the clock is the win condition.
    pub fn expire_time(&mut self) {
        match self.status {
            GameStatus::Playing
            | GameStatus::Paused
            | GameStatus::Clearing
            | GameStatus::LineCleared => {
                info!(
                    "Time expired, session won (score {}, lines {})",
                    self.score, self.lines_cleared
                );
                self.status = GameStatus::Won;
            }
            _ => {}
        }
    }

    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    pub fn move_right(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, dx: i32) {
        if self.status != GameStatus::Playing {
            return;
        }
        if let Some(piece) = &mut self.active {
            if !self.board.collides(piece, dx, 0) {
                piece.x += dx;
            }
        }
    }

    /// One gravity step, shared by the tick and the player's soft drop.
    /// A blocked step locks the piece. Returns true if the piece moved.
    pub fn move_down(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = &mut self.active else {
            return false;
        };
        if self.board.collides(piece, 0, 1) {
            self.lock();
            false
        } else {
            piece.y += 1;
            true
        }
    }

    /// Rotate the active piece 90 degrees clockwise, trying the fixed
    /// horizontal kick offsets in order. A rotation with no legal offset is
    /// rejected and the piece is left untouched.
    pub fn rotate(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        let Some(piece) = &self.active else {
            return;
        };
        let mut candidate = piece.clone();
        candidate.shape = rotate_matrix(&piece.shape);

        for dx in KICK_OFFSETS {
            if !self.board.collides(&candidate, dx, 0) {
                candidate.x += dx;
                self.active = Some(candidate);
                return;
            }
        }
        debug!("Rotation rejected, no kick offset fits");
    }

    /// Merge the active piece into the board, then either spawn the next
    /// piece or enter the clearing phase when rows completed.
    fn lock(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        debug!("Locking {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        self.board.merge(&piece);

        let completed = self.board.completed_lines();
        if completed.is_empty() {
            self.spawn_next();
        } else {
            debug!("Rows {completed:?} complete, bursting");
            self.bursting = completed;
            self.status = GameStatus::Clearing;
        }
    }

    /// Physically remove the bursting rows, commit score and line count,
    /// recompute the speed curve, and hold in `LineCleared` until `resume`.
    pub fn finish_clearing(&mut self) {
        if self.status != GameStatus::Clearing {
            return;
        }
        let count = self.bursting.len() as u32;
        self.board.remove_lines(&self.bursting);
        self.bursting.clear();

        self.score += self.tuning.points_per_line * count;
        self.lines_cleared += count;
        self.speed_ms = speed_ms_with(
            self.lines_cleared,
            self.tuning.initial_speed_ms,
            self.tuning.min_speed_ms,
            self.tuning.speed_increment,
            self.tuning.lines_per_level,
        );
        self.clear_event = Some(count);
        self.status = GameStatus::LineCleared;
        info!(
            "Cleared {count} lines (score {}, lines {}, speed {}ms)",
            self.score, self.lines_cleared, self.speed_ms
        );
    }

    /// Leave the `LineCleared` pause: spawn the next piece and return to
    /// play (unless the spawn is blocked).
    pub fn resume(&mut self) {
        if self.status != GameStatus::LineCleared {
            return;
        }
        self.status = GameStatus::Playing;
        self.spawn_next();
    }

    /// The lines-cleared count of the most recent clear, surfaced once to
    /// the milestone observer.
    pub fn take_clear_event(&mut self) -> Option<u32> {
        self.clear_event.take()
    }

    /// A blocked spawn is the one true failure condition of the engine.
    fn spawn_next(&mut self) {
        let piece = Piece::spawn(self.next, self.board.width);
        if self.board.collides(&piece, 0, 0) {
            info!("Spawn blocked, session lost (score {})", self.score);
            self.active = None;
            self.status = GameStatus::Lost;
            return;
        }
        self.active = Some(piece);
        self.next = PieceKind::random();
    }

    /// Where the active piece would rest if dropped straight down. Pure
    /// projection of the current board and piece, computed on demand.
    #[must_use]
    pub fn ghost(&self) -> Option<Piece> {
        let mut ghost = self.active.clone()?;
        while !self.board.collides(&ghost, 0, 1) {
            ghost.y += 1;
        }
        Some(ghost)
    }
}

/// Whole seconds remaining in the round, decremented by the host's
/// one-per-second clock and topped up by line-clear bonuses.
#[derive(Resource, Debug, Clone)]
pub struct Countdown {
    pub remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    /// Returns the remaining seconds after the decrement.
    pub fn tick_second(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn add_bonus(&mut self, seconds: u32) {
        self.remaining += seconds;
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.remaining == 0
    }
}
