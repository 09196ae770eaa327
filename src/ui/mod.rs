//! Terminal front end: a ratatui canvas and crossterm key handling.

pub mod canvas;
pub mod keys;

pub use canvas::{render_scene, TerminalCanvas};
pub use keys::{is_quit, map_key, KeyLatch};
