//! Axis-aligned hit detection with padding, and push-out resolution.

use super::types::Character;

/// Penetration below this is treated as touching, not overlapping.
const CONTACT_EPSILON: f64 = 1e-9;

/// Axis-aligned box anchored at its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn centered(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Grow each side by `pad_x`/`pad_y` (negative shrinks, never below zero size).
    pub fn padded(&self, pad_x: f64, pad_y: f64) -> Self {
        Self {
            width: (self.width + 2.0 * pad_x).max(0.0),
            height: (self.height + 2.0 * pad_y).max(0.0),
            ..*self
        }
    }

    /// True when the boxes share area. Edge contact does not count.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.left() < other.right() - CONTACT_EPSILON
            && other.left() < self.right() - CONTACT_EPSILON
            && self.top() < other.bottom() - CONTACT_EPSILON
            && other.top() < self.bottom() - CONTACT_EPSILON
    }
}

/// Overlap test between `a` and `b`, with `b` padded on every side.
pub fn touches(a: &Hitbox, b: &Hitbox, pad_x: f64, pad_y: f64) -> bool {
    a.overlaps(&b.padded(pad_x, pad_y))
}

/// Smallest single-axis translation that moves `a` out of `b`.
///
/// Returns `None` when the boxes do not overlap. The push always points away
/// from `b`'s centre along the axis with the shallower penetration.
pub fn separation(a: &Hitbox, b: &Hitbox) -> Option<(f64, f64)> {
    if !a.overlaps(b) {
        return None;
    }

    let dx = if a.x < b.x {
        b.left() - a.right()
    } else {
        b.right() - a.left()
    };
    let dy = if a.y < b.y {
        b.top() - a.bottom()
    } else {
        b.bottom() - a.top()
    };

    if dx.abs() <= dy.abs() {
        Some((dx, 0.0))
    } else {
        Some((0.0, dy))
    }
}

/// Move the character to the nearest position where it no longer overlaps
/// `obstacle`. Returns true if it had to move.
pub fn resolve_overlap(character: &mut Character, obstacle: &Hitbox) -> bool {
    let own = character.hitbox();
    let Some((dx, dy)) = separation(&own, obstacle) else {
        return false;
    };

    // Snap to the contact edge rather than adding the delta, so rounding
    // cannot leave a sliver of overlap behind.
    if dx != 0.0 {
        character.x = if dx < 0.0 {
            obstacle.left() - own.width / 2.0
        } else {
            obstacle.right() + own.width / 2.0
        };
    }
    if dy != 0.0 {
        character.y = if dy < 0.0 {
            obstacle.top() - own.height / 2.0
        } else {
            obstacle.bottom() + own.height / 2.0
        };
    }
    true
}
