//! Dino Dash world data structures.
//!
//! A single-screen runner: the dino stays at a fixed column while ground
//! segments, clouds and cacti scroll past it. Positions are sprite centres
//! in an 800x600 world, y grows downward.

use super::collision::Hitbox;

/// World (camera) dimensions.
pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

/// Character spawn position. The column never changes while scrolling.
pub const CHARACTER_SPAWN_X: f64 = 35.0;
/// Ground line for the character's centre. At or below it the dino is grounded.
pub const GROUND_LEVEL: f64 = 370.0;
/// Height a jump lifts the character to, instantly.
pub const JUMP_APEX: f64 = 270.0;

/// Velocity added per airborne tick (positive = downward).
pub const GRAVITY: f64 = 0.53;

/// Animation accumulator step per running tick.
pub const ANIMATION_STEP: f64 = 0.8;
/// Frames in the dino sprite sheet. The last one is the idle pose.
pub const DINO_FRAMES: usize = 2;

/// Score gained per running tick.
pub const SCORE_PER_TICK: f64 = 0.25;

/// Scroll speed of ground and obstacles (units/tick).
pub const DEFAULT_OBSTACLE_SPEED: f64 = 8.0;
/// Scroll speed of clouds (units/tick).
pub const DEFAULT_CLOUD_SPEED: f64 = 1.0;

/// Padding applied to each side of an obstacle's box for hit detection.
/// Negative shrinks the box.
pub const HIT_MARGIN: f64 = -15.0;

/// Score up to which the jump hint stays on screen.
pub const JUMP_HINT_MAX_SCORE: f64 = 20.0;

/// Top-level game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first start. Only reachable at process start.
    Idle,
    Running,
    GameOver,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::GameOver => "game over",
        }
    }
}

/// Keys the game polls every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Jump.
    Space,
    /// Start.
    S,
    /// Restart after a crash.
    R,
}

impl Key {
    pub const ALL: [Key; 3] = [Key::Space, Key::S, Key::R];

    /// Stable slot index, used by key tables.
    pub fn index(&self) -> usize {
        match self {
            Self::Space => 0,
            Self::S => 1,
            Self::R => 2,
        }
    }
}

/// The six cactus sprites an obstacle can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    SmallCactus,
    BigCactus,
    SmallPair,
    BigPair,
    MixedPatch,
    TriplePatch,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::SmallCactus,
        ObstacleKind::BigCactus,
        ObstacleKind::SmallPair,
        ObstacleKind::BigPair,
        ObstacleKind::MixedPatch,
        ObstacleKind::TriplePatch,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(ObstacleKind::SmallCactus)
    }

    /// Sprite size in world units (width, height).
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::SmallCactus => (34.0, 40.0),
            Self::BigCactus => (50.0, 50.0),
            Self::SmallPair => (68.0, 40.0),
            Self::BigPair => (98.0, 50.0),
            Self::MixedPatch => (102.0, 50.0),
            Self::TriplePatch => (102.0, 40.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SmallCactus => "small cactus",
            Self::BigCactus => "big cactus",
            Self::SmallPair => "small cactus pair",
            Self::BigPair => "big cactus pair",
            Self::MixedPatch => "mixed cactus patch",
            Self::TriplePatch => "cactus triple",
        }
    }
}

/// Visual identifier of anything the world draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// The character, with its current sprite-sheet frame.
    Dino { frame: usize },
    Ground,
    Cloud,
    Obstacle(ObstacleKind),
}

impl Sprite {
    /// Size in world units (width, height).
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Dino { .. } => (44.0, 47.0),
            Self::Ground => (800.0, 24.0),
            Self::Cloud => (46.0, 14.0),
            Self::Obstacle(kind) => kind.size(),
        }
    }
}

/// Which scrolling pool an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Ground,
    Cloud,
    Obstacle,
}

impl PoolKind {
    pub const ALL: [PoolKind; 3] = [PoolKind::Ground, PoolKind::Cloud, PoolKind::Obstacle];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Cloud => "cloud",
            Self::Obstacle => "obstacle",
        }
    }
}

/// A ground segment, cloud or obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEntity {
    pub sprite: Sprite,
    pub x: f64,
    pub y: f64,
    /// Horizontal velocity (units/tick). Zero unless the game is running.
    pub vx: f64,
    /// Set once this member has triggered its pool's spawn threshold.
    pub spawned_successor: bool,
}

impl ScrollEntity {
    pub fn new(sprite: Sprite, x: f64, y: f64) -> Self {
        Self {
            sprite,
            x,
            y,
            vx: 0.0,
            spawned_successor: false,
        }
    }

    /// Integrate one tick of constant-velocity motion.
    pub fn move_at_constant_speed(&mut self) {
        self.x += self.vx;
    }

    pub fn hitbox(&self) -> Hitbox {
        let (width, height) = self.sprite.size();
        Hitbox::centered(self.x, self.y, width, height)
    }

    /// Obstacle kind, if this entity is an obstacle.
    pub fn obstacle_kind(&self) -> Option<ObstacleKind> {
        match self.sprite {
            Sprite::Obstacle(kind) => Some(kind),
            _ => None,
        }
    }
}

/// The live set of entities of one kind. Order carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub kind: PoolKind,
    pub members: Vec<ScrollEntity>,
}

impl Pool {
    pub fn new(kind: PoolKind) -> Self {
        Self {
            kind,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScrollEntity> {
        self.members.iter()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

/// The player-controlled dino.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity (positive = downward).
    pub vy: f64,
    /// Fractional animation accumulator in `[0, DINO_FRAMES)`.
    pub frame_acc: f64,
}

impl Character {
    pub fn new() -> Self {
        Self {
            x: CHARACTER_SPAWN_X,
            y: GROUND_LEVEL,
            vy: 0.0,
            frame_acc: 0.0,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.y >= GROUND_LEVEL
    }

    /// True between the jump apex and the ground line.
    pub fn is_airborne(&self) -> bool {
        self.y >= JUMP_APEX && self.y < GROUND_LEVEL
    }

    /// Sprite-sheet frame to draw. Pinned to the idle pose unless running.
    pub fn sprite_index(&self, phase: Phase) -> usize {
        if phase == Phase::Running {
            (self.frame_acc.floor() as usize).min(DINO_FRAMES - 1)
        } else {
            DINO_FRAMES - 1
        }
    }

    pub fn sprite(&self, phase: Phase) -> Sprite {
        Sprite::Dino {
            frame: self.sprite_index(phase),
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        let (width, height) = Sprite::Dino { frame: 0 }.size();
        Hitbox::centered(self.x, self.y, width, height)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one running game owns.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub phase: Phase,
    /// Fractional score; the display shows its floor.
    pub score: f64,
    pub character: Character,
    pub grounds: Pool,
    pub clouds: Pool,
    pub obstacles: Pool,
    /// Scroll speed of ground and obstacles while running.
    pub obstacle_speed: f64,
    /// Scroll speed of clouds while running.
    pub cloud_speed: f64,
    /// Ticks processed since the process started (not reset on restart).
    pub tick_count: u64,
}

impl WorldState {
    pub fn new() -> Self {
        Self::with_speeds(DEFAULT_OBSTACLE_SPEED, DEFAULT_CLOUD_SPEED)
    }

    pub fn with_speeds(obstacle_speed: f64, cloud_speed: f64) -> Self {
        Self {
            phase: Phase::Idle,
            score: 0.0,
            character: Character::new(),
            grounds: Pool::new(PoolKind::Ground),
            clouds: Pool::new(PoolKind::Cloud),
            obstacles: Pool::new(PoolKind::Obstacle),
            obstacle_speed,
            cloud_speed,
            tick_count: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whole points, as shown on screen.
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn pool(&self, kind: PoolKind) -> &Pool {
        match kind {
            PoolKind::Ground => &self.grounds,
            PoolKind::Cloud => &self.clouds,
            PoolKind::Obstacle => &self.obstacles,
        }
    }

    pub fn pool_mut(&mut self, kind: PoolKind) -> &mut Pool {
        match kind {
            PoolKind::Ground => &mut self.grounds,
            PoolKind::Cloud => &mut self.clouds,
            PoolKind::Obstacle => &mut self.obstacles,
        }
    }

    /// Scroll velocity for a pool in the current phase.
    pub fn pool_velocity(&self, kind: PoolKind) -> f64 {
        if !self.is_running() {
            return 0.0;
        }
        match kind {
            PoolKind::Cloud => -self.cloud_speed,
            PoolKind::Ground | PoolKind::Obstacle => -self.obstacle_speed,
        }
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}
