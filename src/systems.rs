#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info};
use std::time::Duration;

use crate::Time;
use crate::clock::{GravityClock, PhaseClock, SecondClock};
use crate::components::{Input, PuzzleInput};
use crate::engine::{Countdown, Engine, GameStatus};
use crate::game::{CLEAR_DELAY_MS, LINE_CLEARED_PAUSE_MS};
use crate::puzzle::{Pillar, Puzzle, PuzzleCursor};

/// How long the line-clear banner stays on screen.
const BANNER_SECONDS: f32 = 2.0;

/// Transient "cleared N lines" notice for the UI, written once per
/// completed-lines event and aged by the frame delta.
#[derive(Resource, Debug, Clone, Default)]
pub struct MilestoneBanner(pub Option<(u32, f32)>);

impl MilestoneBanner {
    #[must_use]
    pub fn current(&self) -> Option<u32> {
        match self.0 {
            Some((lines, remaining)) if remaining > 0.0 => Some(lines),
            _ => None,
        }
    }
}

/// Drain the per-tick input flags through the engine verbs. Every verb is
/// status-guarded inside the engine, so late input after a terminal state
/// is a no-op.
pub fn blocks_input_system(world: &mut World) {
    let input = std::mem::take(&mut *world.resource_mut::<Input>());
    let mut engine = world.resource_mut::<Engine>();

    if input.pause {
        match engine.status {
            GameStatus::Playing => engine.pause(),
            GameStatus::Paused => engine.unpause(),
            _ => {}
        }
    }

    if engine.status != GameStatus::Playing {
        return;
    }
    if input.left {
        engine.move_left();
    }
    if input.right {
        engine.move_right();
    }
    if input.rotate {
        engine.rotate();
    }
    if input.down {
        engine.move_down();
    }
}

/// Drive the clocks and the clearing phases. All transitions happen
/// synchronously here; a gravity fire after the status left `Playing` falls
/// through the match and does nothing.
pub fn game_tick_system(world: &mut World) {
    // Age the milestone banner by the frame delta
    let delta = world.resource::<Time>().delta_seconds();
    {
        let mut banner = world.resource_mut::<MilestoneBanner>();
        if let Some((_, remaining)) = &mut banner.0 {
            *remaining -= delta;
            if *remaining <= 0.0 {
                banner.0 = None;
            }
        }
    }

    let status = world.resource::<Engine>().status;

    match status {
        GameStatus::Playing => {
            if world.resource_mut::<GravityClock>().0.poll() {
                world.resource_mut::<Engine>().move_down();
            }
        }
        GameStatus::Clearing => {
            // Armed on entry; fires once after the bursting delay
            if !world.resource::<PhaseClock>().0.is_running() {
                world
                    .resource_mut::<PhaseClock>()
                    .0
                    .start(Duration::from_millis(CLEAR_DELAY_MS));
            } else if world.resource_mut::<PhaseClock>().0.poll_once() {
                let event = {
                    let mut engine = world.resource_mut::<Engine>();
                    engine.finish_clearing();
                    engine.take_clear_event()
                };
                if let Some(lines) = event {
                    let bonus = crate::config::CONFIG
                        .read()
                        .unwrap()
                        .game
                        .line_clear_bonus_seconds;
                    world.resource_mut::<Countdown>().add_bonus(bonus);
                    world.resource_mut::<MilestoneBanner>().0 = Some((lines, BANNER_SECONDS));
                    info!("Milestone: {lines} lines, +{bonus}s on the clock");
                }
                world
                    .resource_mut::<PhaseClock>()
                    .0
                    .start(Duration::from_millis(LINE_CLEARED_PAUSE_MS));
            }
        }
        GameStatus::LineCleared => {
            if world.resource_mut::<PhaseClock>().0.poll_once() {
                let speed_ms = {
                    let mut engine = world.resource_mut::<Engine>();
                    engine.resume();
                    engine.speed_ms
                };
                // The gravity cadence must be re-armed, not retargeted,
                // now that the speed curve moved
                world
                    .resource_mut::<GravityClock>()
                    .0
                    .reschedule(Duration::from_millis(speed_ms));
            }
        }
        GameStatus::Idle | GameStatus::Paused | GameStatus::Lost | GameStatus::Won => {}
    }

    // The countdown runs independently of the gravity loop while the round
    // is in progress
    if matches!(
        world.resource::<Engine>().status,
        GameStatus::Playing | GameStatus::Clearing | GameStatus::LineCleared
    ) && world.resource_mut::<SecondClock>().0.poll()
    {
        let remaining = world.resource_mut::<Countdown>().tick_second();
        if remaining == 0 {
            world.resource_mut::<Engine>().expire_time();
        }
    }

    // Terminal states silence both clocks unconditionally
    if matches!(
        world.resource::<Engine>().status,
        GameStatus::Lost | GameStatus::Won
    ) {
        world.resource_mut::<GravityClock>().0.stop();
        world.resource_mut::<SecondClock>().0.stop();
    }
}

/// Cursor movement and placement for the pillar puzzle.
pub fn puzzle_input_system(world: &mut World) {
    let input = std::mem::take(&mut *world.resource_mut::<PuzzleInput>());
    let size = world.resource::<Puzzle>().size();

    {
        let mut cursor = world.resource_mut::<PuzzleCursor>();
        if input.up {
            cursor.row = cursor.row.saturating_sub(1);
        }
        if input.down && cursor.row + 1 < size {
            cursor.row += 1;
        }
        if input.left {
            cursor.col = cursor.col.saturating_sub(1);
        }
        if input.right && cursor.col + 1 < size {
            cursor.col += 1;
        }
    }

    let cursor = *world.resource::<PuzzleCursor>();

    if let Some(digit) = input.place {
        if let Some(value) = Pillar::from_digit(digit, size) {
            let mut puzzle = world.resource_mut::<Puzzle>();
            let fits = puzzle.is_drop_valid(cursor.row, cursor.col, value);
            if puzzle.place(cursor.row, cursor.col, value) {
                debug!(
                    "Placed {:?} at ({}, {}), drop-valid: {fits}",
                    value, cursor.row, cursor.col
                );
                if puzzle.is_complete() {
                    info!("Pillar puzzle solved");
                }
            }
        }
    }

    if input.erase {
        world
            .resource_mut::<Puzzle>()
            .clear_cell(cursor.row, cursor.col);
    }
}
