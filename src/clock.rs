#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::time::{Duration, Instant};

/// Cooperative interval scheduler. The host loop polls it; there are no
/// threads and no callback storage, so a stray poll after `stop` is a
/// guaranteed no-op.
///
/// `reschedule` re-arms the deadline from "now" rather than adjusting the
/// remaining delay, which is what the gravity cadence needs whenever the
/// speed curve changes.
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    interval: Duration,
    deadline: Option<Instant>,
}

impl GameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.deadline = Some(Instant::now() + interval);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Re-arm with a new interval, measured from now.
    pub fn reschedule(&mut self, interval: Duration) {
        self.start(interval);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Repeating poll: true at most once per elapsed interval, re-arming
    /// itself on fire. A late poll fires once; missed intervals are not
    /// compensated.
    pub fn poll(&mut self) -> bool {
        let now = Instant::now();
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// One-shot poll: true once when the deadline passes, then disarmed.
    pub fn poll_once(&mut self) -> bool {
        let now = Instant::now();
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Gravity cadence for the falling-block game.
#[derive(Resource, Debug, Clone, Default)]
pub struct GravityClock(pub GameClock);

/// One-per-second cadence feeding the round countdown.
#[derive(Resource, Debug, Clone, Default)]
pub struct SecondClock(pub GameClock);

/// One-shot delays between clear phases (bursting rows, reward pause).
#[derive(Resource, Debug, Clone, Default)]
pub struct PhaseClock(pub GameClock);
