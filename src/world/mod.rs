//! The Dino Dash world: one character, three scrolling pools, one phase flag.
//!
//! A runner jumps over cacti that scroll past at constant speed while the
//! score ticks up. Everything here is pure state and rules; drawing and key
//! polling live behind the [`crate::render::Canvas`] and [`KeySource`] seams.

pub mod collision;
pub mod logic;
pub mod physics;
pub mod pools;
pub mod types;

pub use logic::*;
pub use types::*;
