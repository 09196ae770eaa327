//! Dino Dash - a side-scrolling obstacle runner for the terminal.
//!
//! The world simulation is pure and deterministic given a random source;
//! the terminal front end and the headless simulator both drive it through
//! [`render::run_frame`] / [`world::tick`].

pub mod autopilot;
pub mod build_info;
pub mod config;
pub mod render;
pub mod ui;
pub mod world;
