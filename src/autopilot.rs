//! Scripted player for headless runs.

use crate::world::{HeldKeys, Key, Phase, WorldState};
use std::ops::RangeInclusive;

/// Decides which keys to hold before each tick.
///
/// Starts the game, restarts after a crash, and jumps when the next obstacle
/// comes within its lead window.
#[derive(Debug, Clone, PartialEq)]
pub struct Autopilot {
    /// Obstacle-centre distance ahead of the character that triggers a jump.
    pub lead: RangeInclusive<f64>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { lead: 60.0..=84.0 }
    }
}

impl Autopilot {
    pub fn new(lead: RangeInclusive<f64>) -> Self {
        Self { lead }
    }

    pub fn keys(&self, world: &WorldState) -> HeldKeys {
        match world.phase {
            Phase::Idle => HeldKeys::none().with(Key::S),
            Phase::GameOver => HeldKeys::none().with(Key::R),
            Phase::Running if self.should_jump(world) => HeldKeys::none().with(Key::Space),
            Phase::Running => HeldKeys::none(),
        }
    }

    fn should_jump(&self, world: &WorldState) -> bool {
        world.character.is_grounded()
            && world
                .obstacles
                .iter()
                .any(|o| self.lead.contains(&(o.x - world.character.x)))
    }
}
