//! Keyboard input for the terminal front end.
//!
//! Terminals report key presses, not held keys. [`KeyLatch`] treats a key as
//! held for a short window after its last press (auto-repeat keeps refreshing
//! it), which is what the world's "is pressing" query expects.

use crate::world::{Key, KeySource};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Map a terminal key to a game key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') | KeyCode::Up => Some(Key::Space),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::R),
        _ => None,
    }
}

/// q, Esc or Ctrl-C.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Remembers when each game key was last pressed.
#[derive(Debug, Clone)]
pub struct KeyLatch {
    hold: Duration,
    pressed_at: [Option<Instant>; 3],
    now: Instant,
}

impl KeyLatch {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            pressed_at: [None; 3],
            now: Instant::now(),
        }
    }

    pub fn press(&mut self, key: Key, at: Instant) {
        self.pressed_at[key.index()] = Some(at);
    }

    /// Record a terminal key event. Returns the game key it pressed, if any.
    pub fn handle_key_event(&mut self, event: &KeyEvent, at: Instant) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let key = map_key(event.code)?;
        self.press(key, at);
        Some(key)
    }

    /// Set the instant `is_pressing` is evaluated at. Call once per frame.
    pub fn set_now(&mut self, now: Instant) {
        self.now = now;
    }
}

impl KeySource for KeyLatch {
    fn is_pressing(&self, key: Key) -> bool {
        self.pressed_at[key.index()]
            .map_or(false, |at| self.now.saturating_duration_since(at) < self.hold)
    }
}
