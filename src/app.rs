#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::error;
use std::time::Duration;

use crate::Time;
use crate::clock::{GravityClock, PhaseClock, SecondClock};
use crate::components::{Input, PuzzleInput};
use crate::config::CONFIG;
use crate::engine::{Countdown, Engine};
use crate::menu::Menu;
use crate::puzzle::{Puzzle, PuzzleCursor};
use crate::systems::MilestoneBanner;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let (game_cfg, puzzle_cfg) = {
            let config = CONFIG.read().unwrap();
            (config.game.clone(), config.puzzle.clone())
        };

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(PuzzleInput::default());
        world.insert_resource(Engine::new(game_cfg.clone()));
        world.insert_resource(Countdown::new(game_cfg.round_seconds));
        world.insert_resource(GravityClock::default());
        world.insert_resource(SecondClock::default());
        world.insert_resource(PhaseClock::default());
        world.insert_resource(MilestoneBanner::default());
        world.insert_resource(Puzzle::generate(puzzle_cfg.size, puzzle_cfg.prefill_ratio));
        world.insert_resource(PuzzleCursor::default());

        Self {
            world,
            should_quit: false,
            menu: Menu::new(),
        }
    }

    /// Begin a fresh falling-block round. Every piece of session state is
    /// reinitialized; nothing carries over from a previous round.
    pub fn start_blocks(&mut self) {
        let game_cfg = CONFIG.read().unwrap().game.clone();

        let mut engine = Engine::new(game_cfg.clone());
        engine.start();
        let speed_ms = engine.speed_ms;
        self.world.insert_resource(engine);
        self.world
            .insert_resource(Countdown::new(game_cfg.round_seconds));
        self.world.insert_resource(Input::default());
        self.world.insert_resource(MilestoneBanner::default());

        let mut gravity = GravityClock::default();
        gravity.0.start(Duration::from_millis(speed_ms));
        self.world.insert_resource(gravity);

        let mut seconds = SecondClock::default();
        seconds.0.start(Duration::from_secs(1));
        self.world.insert_resource(seconds);

        self.world.insert_resource(PhaseClock::default());
    }

    /// Begin a fresh pillar puzzle session.
    pub fn start_puzzle(&mut self) {
        let puzzle_cfg = CONFIG.read().unwrap().puzzle.clone();
        self.world
            .insert_resource(Puzzle::generate(puzzle_cfg.size, puzzle_cfg.prefill_ratio));
        self.world.insert_resource(PuzzleCursor::default());
        self.world.insert_resource(PuzzleInput::default());
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
