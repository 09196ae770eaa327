//! Character vertical motion: instant jump, gravity, landing, run animation.

use super::types::{
    Character, Phase, ANIMATION_STEP, DINO_FRAMES, GRAVITY, GROUND_LEVEL, JUMP_APEX,
};

/// Advance the character one tick.
///
/// Nothing moves outside the running phase; the idle pose comes from
/// [`Character::sprite_index`]. Returns true if a jump took effect.
pub fn step_character(character: &mut Character, phase: Phase, jump_requested: bool) -> bool {
    if phase != Phase::Running {
        return false;
    }

    // Jump is an instant lift, only from the ground
    let jumped = jump_requested && character.is_grounded();
    if jumped {
        character.y = JUMP_APEX;
    }

    if character.is_airborne() {
        character.vy += GRAVITY;
        character.y += character.vy;
    }

    // Land without bounce
    if character.y >= GROUND_LEVEL {
        character.y = GROUND_LEVEL;
        character.vy = 0.0;
    }

    character.frame_acc = (character.frame_acc + ANIMATION_STEP) % DINO_FRAMES as f64;

    jumped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_motion_unless_running() {
        let mut dino = Character::new();
        dino.y = 300.0;
        dino.vy = 2.0;
        let before = dino.clone();

        assert!(!step_character(&mut dino, Phase::Idle, true));
        assert_eq!(dino, before);
        assert!(!step_character(&mut dino, Phase::GameOver, true));
        assert_eq!(dino, before);
    }

    #[test]
    fn test_grounded_stays_put() {
        let mut dino = Character::new();
        for _ in 0..10 {
            assert!(!step_character(&mut dino, Phase::Running, false));
            assert_eq!(dino.y, GROUND_LEVEL);
            assert_eq!(dino.vy, 0.0);
        }
    }

    #[test]
    fn test_jump_lifts_then_gravity_applies() {
        let mut dino = Character::new();
        assert!(step_character(&mut dino, Phase::Running, true));
        // Lifted to the apex, then one gravity increment in the same tick
        assert!((dino.vy - GRAVITY).abs() < 1e-12);
        assert!((dino.y - (JUMP_APEX + GRAVITY)).abs() < 1e-12);

        let y1 = dino.y;
        step_character(&mut dino, Phase::Running, false);
        assert!((dino.vy - 2.0 * GRAVITY).abs() < 1e-12);
        assert!(dino.y > y1);
    }

    #[test]
    fn test_air_jump_ignored() {
        let mut dino = Character::new();
        dino.y = 300.0;
        dino.vy = 1.0;
        assert!(!step_character(&mut dino, Phase::Running, true));
        assert!(dino.y > 300.0);
    }

    #[test]
    fn test_landing_resets_velocity() {
        let mut dino = Character::new();
        dino.y = 369.0;
        dino.vy = 5.0;
        step_character(&mut dino, Phase::Running, false);
        assert_eq!(dino.y, GROUND_LEVEL);
        assert_eq!(dino.vy, 0.0);
    }

    #[test]
    fn test_full_jump_arc_stays_in_band() {
        let mut dino = Character::new();
        step_character(&mut dino, Phase::Running, true);

        let mut ticks = 1;
        while !dino.is_grounded() {
            assert!(dino.y >= JUMP_APEX && dino.y <= GROUND_LEVEL);
            step_character(&mut dino, Phase::Running, false);
            ticks += 1;
            assert!(ticks < 100, "never landed");
        }
        // 270 + 0.53 * n(n+1)/2 first reaches 370 at n = 19
        assert_eq!(ticks, 19);
        assert_eq!(dino.vy, 0.0);
    }

    #[test]
    fn test_animation_wraps() {
        let mut dino = Character::new();
        let mut frames = Vec::new();
        for _ in 0..5 {
            step_character(&mut dino, Phase::Running, false);
            assert!(dino.frame_acc >= 0.0 && dino.frame_acc < DINO_FRAMES as f64);
            frames.push(dino.sprite_index(Phase::Running));
        }
        // 0.8, 1.6, 0.4, 1.2, 0.0
        assert_eq!(frames, vec![0, 1, 0, 1, 0]);
    }
}
