//! Scroll-entity pools: top-up, spawn, despawn and scrolling.
//!
//! All three pools share one pass. What differs per pool is captured in
//! [`PoolRules`]: where a member triggers its successor, where the successor
//! appears, and where members leave the world.

use super::types::{ObstacleKind, Pool, PoolKind, ScrollEntity, Sprite};
use rand::Rng;

/// Default ground pair. Two segments so the floor is continuous from the start.
const GROUND_Y: f64 = 400.0;
const GROUND_START_X: [f64; 2] = [400.0, 1200.0];
const GROUND_SPAWN_X: f64 = 1200.0;

const CLOUD_START: (f64, f64) = (900.0, 200.0);
const CLOUD_SPAWN_BASE_X: f64 = 800.0;
const CLOUD_SPAWN_X_SPREAD: u32 = 400;
const CLOUD_SPAWN_Y_SPREAD: u32 = 200;

const OBSTACLE_Y: f64 = 390.0;
const OBSTACLE_SPAWN_X: f64 = 850.0;

/// Per-pool thresholds, compared with `<=` so any speed crosses them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolRules {
    /// A member at or left of this x spawns one successor.
    pub spawn_at: f64,
    /// A member at or left of this x is removed.
    pub despawn_at: f64,
}

impl PoolKind {
    pub fn rules(&self) -> PoolRules {
        match self {
            // A segment is fully off-screen once its centre passes -400
            Self::Ground => PoolRules {
                spawn_at: 0.0,
                despawn_at: -400.0,
            },
            Self::Cloud => PoolRules {
                spawn_at: 400.0,
                despawn_at: -100.0,
            },
            Self::Obstacle => PoolRules {
                spawn_at: 450.0,
                despawn_at: -20.0,
            },
        }
    }
}

/// What one pool pass changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolPass {
    /// The pool was empty and got its default members.
    pub topped_up: bool,
    /// Sprites of members spawned this pass.
    pub spawned: Vec<Sprite>,
    pub despawned: usize,
}

/// Members an empty pool is refilled with.
pub fn default_members(kind: PoolKind) -> Vec<ScrollEntity> {
    match kind {
        PoolKind::Ground => GROUND_START_X
            .iter()
            .map(|&x| ScrollEntity::new(Sprite::Ground, x, GROUND_Y))
            .collect(),
        PoolKind::Cloud => vec![ScrollEntity::new(
            Sprite::Cloud,
            CLOUD_START.0,
            CLOUD_START.1,
        )],
        PoolKind::Obstacle => vec![ScrollEntity::new(
            Sprite::Obstacle(ObstacleKind::SmallCactus),
            OBSTACLE_SPAWN_X,
            OBSTACLE_Y,
        )],
    }
}

/// A fresh member entering from the right.
pub fn spawn_member<R: Rng>(kind: PoolKind, rng: &mut R) -> ScrollEntity {
    match kind {
        PoolKind::Ground => ScrollEntity::new(Sprite::Ground, GROUND_SPAWN_X, GROUND_Y),
        PoolKind::Cloud => {
            let x = CLOUD_SPAWN_BASE_X + rng.gen_range(0..CLOUD_SPAWN_X_SPREAD) as f64;
            let y = rng.gen_range(0..CLOUD_SPAWN_Y_SPREAD) as f64;
            ScrollEntity::new(Sprite::Cloud, x, y)
        }
        PoolKind::Obstacle => {
            let obstacle = ObstacleKind::from_index(rng.gen_range(0..ObstacleKind::ALL.len()));
            ScrollEntity::new(Sprite::Obstacle(obstacle), OBSTACLE_SPAWN_X, OBSTACLE_Y)
        }
    }
}

/// Refill an empty pool with its default members. Returns true if it did.
pub fn top_up(pool: &mut Pool) -> bool {
    if !pool.is_empty() {
        return false;
    }
    pool.members = default_members(pool.kind);
    true
}

/// Run one tick of pool maintenance.
///
/// Spawn and despawn checks use each member's position at the start of the
/// tick and run whatever the phase; only `velocity` (zero outside the
/// running phase) stops the scroll. Spawned members join after the pass and
/// first move next tick.
pub fn advance_pool<R: Rng>(pool: &mut Pool, velocity: f64, rng: &mut R) -> PoolPass {
    let mut pass = PoolPass {
        topped_up: top_up(pool),
        ..PoolPass::default()
    };
    debug_assert!(
        !pool.is_empty(),
        "{} pool empty after top-up",
        pool.kind.name()
    );

    let kind = pool.kind;
    let rules = kind.rules();
    let mut newcomers = Vec::new();

    for member in &mut pool.members {
        if !member.spawned_successor && member.x <= rules.spawn_at {
            member.spawned_successor = true;
            newcomers.push(spawn_member(kind, rng));
        }
    }

    let before = pool.members.len();
    pool.members.retain(|m| m.x > rules.despawn_at);
    pass.despawned = before - pool.members.len();
    if pass.despawned > 0 {
        log::debug!("despawned {} {} member(s)", pass.despawned, kind.name());
    }

    for member in &mut pool.members {
        member.vx = velocity;
        member.move_at_constant_speed();
    }

    for newcomer in &newcomers {
        log::debug!(
            "spawned {} at ({:.0}, {:.0})",
            kind.name(),
            newcomer.x,
            newcomer.y
        );
    }
    pass.spawned = newcomers.iter().map(|m| m.sprite).collect();
    pool.members.extend(newcomers);

    pass
}
