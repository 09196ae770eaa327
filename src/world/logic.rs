//! Dino Dash per-tick logic: input-driven phase changes, character physics,
//! pool maintenance and collision.

use super::collision::{resolve_overlap, touches};
use super::physics::step_character;
use super::pools::advance_pool;
use super::types::*;
use rand::Rng;

/// Anything that can answer "is this key held right now?".
pub trait KeySource {
    fn is_pressing(&self, key: Key) -> bool;
}

/// A fixed set of held keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; 3],
}

impl HeldKeys {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }
}

impl KeySource for HeldKeys {
    fn is_pressing(&self, key: Key) -> bool {
        self.held[key.index()]
    }
}

/// Something notable that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Left the idle screen.
    Started,
    /// A jump took effect.
    Jumped,
    /// A pool gained a member.
    Spawned { pool: PoolKind, sprite: Sprite },
    /// The character hit an obstacle and the game is over.
    Crashed {
        obstacle: ObstacleKind,
        score: u64,
    },
    /// The world was reset after a game over.
    Restarted { previous_score: u64 },
}

/// Advance the world by one frame.
///
/// Never fails; random draws (cloud placement, obstacle kind) come from `rng`.
pub fn tick<K, R>(world: &mut WorldState, keys: &K, rng: &mut R) -> Vec<TickEvent>
where
    K: KeySource + ?Sized,
    R: Rng,
{
    let mut events = Vec::new();
    world.tick_count += 1;

    apply_phase_input(world, keys, &mut events);

    if step_character(
        &mut world.character,
        world.phase,
        keys.is_pressing(Key::Space),
    ) {
        events.push(TickEvent::Jumped);
    }
    if world.is_running() {
        world.score += SCORE_PER_TICK;
    }

    for kind in [PoolKind::Cloud, PoolKind::Ground, PoolKind::Obstacle] {
        let velocity = world.pool_velocity(kind);
        let pass = advance_pool(world.pool_mut(kind), velocity, rng);
        events.extend(
            pass.spawned
                .into_iter()
                .map(|sprite| TickEvent::Spawned { pool: kind, sprite }),
        );
    }

    if world.is_running() {
        if let Some(event) = check_collision(world) {
            events.push(event);
        }
    }

    events
}

/// Phase changes driven by the start and restart keys.
fn apply_phase_input<K: KeySource + ?Sized>(
    world: &mut WorldState,
    keys: &K,
    events: &mut Vec<TickEvent>,
) {
    match world.phase {
        Phase::Idle if keys.is_pressing(Key::S) => {
            world.phase = Phase::Running;
            log::info!("{} -> {}", Phase::Idle.name(), world.phase.name());
            events.push(TickEvent::Started);
        }
        Phase::GameOver if keys.is_pressing(Key::R) => {
            let previous_score = world.display_score();
            reset(world);
            log::info!(
                "{} -> {} after scoring {}",
                Phase::GameOver.name(),
                world.phase.name(),
                previous_score
            );
            events.push(TickEvent::Restarted { previous_score });
        }
        _ => {}
    }
}

/// Test the character against every obstacle; the first hit ends the run.
fn check_collision(world: &mut WorldState) -> Option<TickEvent> {
    let own = world.character.hitbox();
    let hit = world
        .obstacles
        .iter()
        .find(|o| touches(&own, &o.hitbox(), HIT_MARGIN, HIT_MARGIN))?;

    let obstacle = hit.obstacle_kind().unwrap_or(ObstacleKind::SmallCactus);
    let obstacle_box = hit.hitbox();
    resolve_overlap(&mut world.character, &obstacle_box);
    world.phase = Phase::GameOver;

    let score = world.display_score();
    log::info!(
        "{} -> {}: crashed into {} with score {}",
        Phase::Running.name(),
        world.phase.name(),
        obstacle.name(),
        score
    );
    Some(TickEvent::Crashed { obstacle, score })
}

/// Start a fresh run: empty pools, zero score, character back at spawn.
///
/// Goes straight to running; the idle phase only exists at process start.
pub fn reset(world: &mut WorldState) {
    for kind in PoolKind::ALL {
        world.pool_mut(kind).clear();
    }
    world.score = 0.0;
    world.character = Character::new();
    world.phase = Phase::Running;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    /// A world already past the start screen.
    fn running_world() -> WorldState {
        let mut world = WorldState::new();
        world.phase = Phase::Running;
        world
    }

    fn place_obstacle(world: &mut WorldState, kind: ObstacleKind, x: f64) {
        let mut obstacle = ScrollEntity::new(Sprite::Obstacle(kind), x, 390.0);
        obstacle.spawned_successor = true;
        world.obstacles.members.push(obstacle);
    }

    // ── Input / phase ──

    #[test]
    fn test_idle_ignores_everything_but_start() {
        let mut world = WorldState::new();
        let mut rng = create_test_rng();

        let keys = HeldKeys::none().with(Key::Space).with(Key::R);
        let events = tick(&mut world, &keys, &mut rng);
        assert_eq!(world.phase, Phase::Idle);
        assert_eq!(world.score, 0.0);
        assert_eq!(world.character, Character::new());
        assert!(!events.contains(&TickEvent::Jumped));
    }

    #[test]
    fn test_start_key_begins_run() {
        let mut world = WorldState::new();
        let mut rng = create_test_rng();

        let events = tick(&mut world, &HeldKeys::none().with(Key::S), &mut rng);
        assert_eq!(world.phase, Phase::Running);
        assert_eq!(events.first(), Some(&TickEvent::Started));
        assert!((world.score - 0.25).abs() < 1e-12);

        tick(&mut world, &HeldKeys::none(), &mut rng);
        assert!((world.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_start_key_does_nothing_once_running() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        let events = tick(&mut world, &HeldKeys::none().with(Key::S), &mut rng);
        assert!(!events.contains(&TickEvent::Started));
    }

    #[test]
    fn test_restart_key_only_after_game_over() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        world.score = 12.0;

        tick(&mut world, &HeldKeys::none().with(Key::R), &mut rng);
        assert_eq!(world.phase, Phase::Running);
        assert!(world.score > 12.0);
    }

    // ── Score ──

    #[test]
    fn test_score_frozen_outside_running() {
        let mut world = WorldState::new();
        let mut rng = create_test_rng();
        for _ in 0..10 {
            tick(&mut world, &HeldKeys::none(), &mut rng);
        }
        assert_eq!(world.score, 0.0);

        world.phase = Phase::GameOver;
        world.score = 7.5;
        for _ in 0..10 {
            tick(&mut world, &HeldKeys::none(), &mut rng);
        }
        assert_eq!(world.score, 7.5);
    }

    // ── Pools ──

    #[test]
    fn test_pools_populated_every_tick() {
        let mut world = WorldState::new();
        let mut rng = create_test_rng();
        tick(&mut world, &HeldKeys::none(), &mut rng);
        for kind in PoolKind::ALL {
            assert!(!world.pool(kind).is_empty(), "{} empty", kind.name());
        }
    }

    #[test]
    fn test_idle_pools_do_not_scroll() {
        let mut world = WorldState::new();
        let mut rng = create_test_rng();
        tick(&mut world, &HeldKeys::none(), &mut rng);
        let snapshot = world.obstacles.clone();
        tick(&mut world, &HeldKeys::none(), &mut rng);
        assert_eq!(world.obstacles, snapshot);
    }

    #[test]
    fn test_running_pools_scroll_at_their_speeds() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        tick(&mut world, &HeldKeys::none(), &mut rng);
        // Top-up happens before the scroll, so defaults have already moved once
        assert_eq!(world.obstacles.members[0].x, 842.0);
        assert_eq!(world.clouds.members[0].x, 899.0);
        assert_eq!(world.grounds.members[0].x, 392.0);
    }

    #[test]
    fn test_spawn_events_reported() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        place_obstacle(&mut world, ObstacleKind::BigCactus, 600.0);
        world.obstacles.members[0].spawned_successor = false;
        world.obstacles.members[0].x = 450.0;

        let events = tick(&mut world, &HeldKeys::none(), &mut rng);
        assert!(events.iter().any(|e| matches!(
            e,
            TickEvent::Spawned {
                pool: PoolKind::Obstacle,
                ..
            }
        )));
        assert_eq!(world.obstacles.len(), 2);
        assert_eq!(world.obstacles.members[1].x, 850.0);
    }

    // ── Collision ──

    #[test]
    fn test_collision_ends_run_and_separates() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        // Scrolls to x=62, inside the shrunk hit area
        place_obstacle(&mut world, ObstacleKind::BigCactus, 70.0);

        let events = tick(&mut world, &HeldKeys::none(), &mut rng);
        assert_eq!(world.phase, Phase::GameOver);
        assert!(events
            .iter()
            .any(|e| matches!(e, TickEvent::Crashed { obstacle: ObstacleKind::BigCactus, .. })));

        let cactus = world.obstacles.members[0].hitbox();
        assert!(!world.character.hitbox().overlaps(&cactus));
    }

    #[test]
    fn test_no_collision_inside_margin() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        // Scrolls to x=77: full boxes overlap, shrunk boxes do not
        place_obstacle(&mut world, ObstacleKind::BigCactus, 85.0);

        tick(&mut world, &HeldKeys::none(), &mut rng);
        assert_eq!(world.phase, Phase::Running);
    }

    #[test]
    fn test_collision_triggers_once() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        place_obstacle(&mut world, ObstacleKind::BigCactus, 70.0);

        let mut crashes = 0;
        for _ in 0..20 {
            let events = tick(&mut world, &HeldKeys::none(), &mut rng);
            crashes += events
                .iter()
                .filter(|e| matches!(e, TickEvent::Crashed { .. }))
                .count();
        }
        assert_eq!(crashes, 1);
        assert_eq!(world.phase, Phase::GameOver);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        place_obstacle(&mut world, ObstacleKind::BigCactus, 70.0);
        tick(&mut world, &HeldKeys::none(), &mut rng);
        assert_eq!(world.phase, Phase::GameOver);

        let obstacles = world.obstacles.clone();
        let character = world.character.clone();
        tick(&mut world, &HeldKeys::none().with(Key::Space), &mut rng);
        assert_eq!(world.obstacles, obstacles);
        assert_eq!(world.character, character);
    }

    // ── Reset ──

    #[test]
    fn test_reset_restores_fresh_run() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        for _ in 0..30 {
            tick(&mut world, &HeldKeys::none(), &mut rng);
        }
        world.phase = Phase::GameOver;
        world.character.x = 10.0;
        world.character.y = 340.0;

        reset(&mut world);
        assert_eq!(world.phase, Phase::Running);
        assert_eq!(world.score, 0.0);
        assert_eq!(world.character, Character::new());
        for kind in PoolKind::ALL {
            assert!(world.pool(kind).is_empty());
        }
    }

    #[test]
    fn test_restart_key_resets_and_repopulates() {
        let mut world = running_world();
        let mut rng = create_test_rng();
        place_obstacle(&mut world, ObstacleKind::BigCactus, 70.0);
        tick(&mut world, &HeldKeys::none(), &mut rng);
        assert_eq!(world.phase, Phase::GameOver);

        let events = tick(&mut world, &HeldKeys::none().with(Key::R), &mut rng);
        assert!(events
            .iter()
            .any(|e| matches!(e, TickEvent::Restarted { .. })));
        assert_eq!(world.phase, Phase::Running);
        // One running tick of score since the reset
        assert!((world.score - 0.25).abs() < 1e-12);
        assert_eq!(world.character.x, 35.0);
        assert_eq!(world.character.y, 370.0);
        for kind in PoolKind::ALL {
            assert!(!world.pool(kind).is_empty());
        }
        assert_eq!(world.obstacles.members[0].x, 842.0);
    }

    #[test]
    fn test_held_keys() {
        let mut keys = HeldKeys::none();
        assert!(!keys.is_pressing(Key::Space));
        keys.press(Key::Space);
        assert!(keys.is_pressing(Key::Space));
        assert!(!keys.is_pressing(Key::R));
        keys.release(Key::Space);
        assert!(!keys.is_pressing(Key::Space));
    }
}
