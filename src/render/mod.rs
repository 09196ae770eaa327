//! Drawing side of the frame: what gets drawn each tick, and the canvas seam
//! a display backend implements.
//!
//! The world never touches a backend directly. [`compose_frame`] turns the
//! current [`WorldState`] into an ordered list of [`DrawCommand`]s and
//! [`run_frame`] brackets one tick with `clear` / `present`.

use crate::world::{tick, KeySource, Phase, Sprite, TickEvent, WorldState, JUMP_HINT_MAX_SCORE};
use rand::Rng;
use std::io;

pub const START_PROMPT: &str = "Press the S Key to Start the Game";
pub const JUMP_HINT: &str = "Press the Space Key to Jump Over Moving Obstacles";
pub const GAME_OVER_TITLE: &str = "Game Over";
pub const RESTART_PROMPT: &str = "Press the R Key to Restart";

const PROMPT_SIZE: u16 = 30;
const TITLE_SIZE: u16 = 40;
const SCORE_SIZE: u16 = 24;

/// Named colours the game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    NavajoWhite,
    DarkGrey,
}

impl Tint {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::NavajoWhite => (255, 222, 173),
            Self::DarkGrey => (169, 169, 169),
        }
    }
}

/// Frame background.
pub const BACKGROUND: Tint = Tint::NavajoWhite;
/// Colour of every text item.
pub const TEXT_TINT: Tint = Tint::DarkGrey;

/// One visual for the current frame. Positions are centres in world units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: Sprite,
        x: f64,
        y: f64,
    },
    Text {
        content: String,
        x: f64,
        y: f64,
        size: u16,
        tint: Tint,
    },
}

impl DrawCommand {
    fn text(content: impl Into<String>, x: f64, y: f64, size: u16) -> Self {
        Self::Text {
            content: content.into(),
            x,
            y,
            size,
            tint: TEXT_TINT,
        }
    }

    /// Text content, if this is a text item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            Self::Sprite { .. } => None,
        }
    }
}

/// A display backend.
pub trait Canvas {
    /// Start a frame filled with `tint`.
    fn clear(&mut self, tint: Tint);
    /// Queue a visual for the current frame.
    fn draw(&mut self, command: &DrawCommand);
    /// Show the queued frame.
    fn present(&mut self) -> io::Result<()>;
}

/// Everything visible for the current world state, back to front.
pub fn compose_frame(world: &WorldState) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    match world.phase {
        Phase::Idle => commands.push(DrawCommand::text(START_PROMPT, 400.0, 260.0, PROMPT_SIZE)),
        Phase::Running if world.score <= JUMP_HINT_MAX_SCORE => {
            commands.push(DrawCommand::text(JUMP_HINT, 400.0, 260.0, PROMPT_SIZE))
        }
        _ => {}
    }

    for pool in [&world.clouds, &world.grounds, &world.obstacles] {
        commands.extend(pool.iter().map(|entity| DrawCommand::Sprite {
            sprite: entity.sprite,
            x: entity.x,
            y: entity.y,
        }));
    }

    if world.phase == Phase::GameOver {
        commands.push(DrawCommand::text(GAME_OVER_TITLE, 400.0, 250.0, TITLE_SIZE));
        commands.push(DrawCommand::text(RESTART_PROMPT, 400.0, 280.0, PROMPT_SIZE));
    }

    commands.push(DrawCommand::text(
        format!("Score: {}", world.display_score()),
        40.0,
        10.0,
        SCORE_SIZE,
    ));

    commands.push(DrawCommand::Sprite {
        sprite: world.character.sprite(world.phase),
        x: world.character.x,
        y: world.character.y,
    });

    commands
}

/// Run one frame: clear, tick, draw everything, present.
pub fn run_frame<C, K, R>(
    world: &mut WorldState,
    keys: &K,
    rng: &mut R,
    canvas: &mut C,
) -> io::Result<Vec<TickEvent>>
where
    C: Canvas + ?Sized,
    K: KeySource + ?Sized,
    R: Rng,
{
    canvas.clear(BACKGROUND);
    let events = tick(world, keys, rng);
    for command in compose_frame(world) {
        canvas.draw(&command);
    }
    canvas.present()?;
    Ok(events)
}

/// Canvas that keeps the last presented frame in memory.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub background: Option<Tint>,
    /// Commands of the last presented frame.
    pub frame: Vec<DrawCommand>,
    pub frames_presented: usize,
    pending: Vec<DrawCommand>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text items of the last presented frame, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.frame.iter().filter_map(DrawCommand::as_text).collect()
    }

    pub fn sprite_count(&self) -> usize {
        self.frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }
}

impl Canvas for FrameRecorder {
    fn clear(&mut self, tint: Tint) {
        self.background = Some(tint);
        self.pending.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.pending.push(command.clone());
    }

    fn present(&mut self) -> io::Result<()> {
        self.frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }
}
