//! Terminal canvas.
//!
//! Uses a cell buffer approach: draw commands are rasterised into a 2D grid
//! scaled from the 800x600 world to the terminal area, then stamped
//! row-by-row as Paragraph widgets.

use crate::render::{Canvas, DrawCommand, Tint};
use crate::world::{ObstacleKind, Sprite, WORLD_HEIGHT, WORLD_WIDTH};
use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;

/// Texts at or above this size are drawn bold.
const BOLD_TEXT_SIZE: u16 = 40;

const DINO_COLOR: Color = Color::Rgb(83, 83, 83);
const GROUND_COLOR: Color = Color::Rgb(120, 90, 60);
const CLOUD_COLOR: Color = Color::Rgb(250, 250, 250);
const CACTUS_COLOR: Color = Color::Rgb(46, 125, 50);

/// Cell in the render buffer.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg,
            bold: false,
        }
    }
}

fn tint_color(tint: Tint) -> Color {
    let (r, g, b) = tint.rgb();
    Color::Rgb(r, g, b)
}

/// A [`Canvas`] backed by a ratatui terminal.
pub struct TerminalCanvas<B: Backend> {
    terminal: Terminal<B>,
    background: Tint,
    queued: Vec<DrawCommand>,
}

impl<B: Backend> TerminalCanvas<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            background: Tint::NavajoWhite,
            queued: Vec::new(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Canvas for TerminalCanvas<B> {
    fn clear(&mut self, tint: Tint) {
        self.background = tint;
        self.queued.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.queued.push(command.clone());
    }

    fn present(&mut self) -> io::Result<()> {
        let background = self.background;
        let queued = &self.queued;
        self.terminal.draw(|frame| {
            let area = frame.size();
            render_scene(frame, area, background, queued);
        })?;
        Ok(())
    }
}

/// Rasterise `commands` over `area`, later commands on top.
pub fn render_scene(frame: &mut Frame, area: Rect, background: Tint, commands: &[DrawCommand]) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let bg = tint_color(background);
    let mut buffer = vec![vec![Cell::blank(bg); area.width as usize]; area.height as usize];

    let x_scale = area.width as f64 / WORLD_WIDTH;
    let y_scale = area.height as f64 / WORLD_HEIGHT;

    for command in commands {
        match command {
            DrawCommand::Sprite { sprite, x, y } => {
                paint_sprite(&mut buffer, *sprite, *x * x_scale, *y * y_scale, x_scale, y_scale)
            }
            DrawCommand::Text {
                content,
                x,
                y,
                size,
                tint,
            } => paint_text(
                &mut buffer,
                content,
                *x * x_scale,
                *y * y_scale,
                tint_color(*tint),
                *size >= BOLD_TEXT_SIZE,
            ),
        }
    }

    // ── Render buffer to terminal ─────────────────────────────────────
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_style = Style::default();
        let mut current_text = String::new();

        for cell in row_data {
            let mut style = Style::default().fg(cell.fg).bg(cell.bg);
            if cell.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            if style != current_style && !current_text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_text), current_style));
            }
            current_style = style;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(current_text, current_style));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

/// Glyph and colour for one row of a sprite. `bottom` is its lowest row.
fn sprite_glyph(sprite: Sprite, bottom: bool) -> (char, Color) {
    match sprite {
        Sprite::Dino { frame } if bottom => {
            // Alternate the leading leg
            let ch = if frame == 0 { '\u{259B}' } else { '\u{259C}' }; // ▛ ▜
            (ch, DINO_COLOR)
        }
        Sprite::Dino { .. } => ('\u{2588}', DINO_COLOR), // █
        Sprite::Ground => ('\u{2580}', GROUND_COLOR),    // ▀
        Sprite::Cloud => ('\u{2592}', CLOUD_COLOR),      // ▒
        Sprite::Obstacle(kind) => match kind {
            ObstacleKind::SmallCactus | ObstacleKind::SmallPair | ObstacleKind::TriplePatch => {
                ('\u{258C}', CACTUS_COLOR) // ▌
            }
            ObstacleKind::BigCactus | ObstacleKind::BigPair | ObstacleKind::MixedPatch => {
                ('\u{2588}', CACTUS_COLOR)
            }
        },
    }
}

/// Fill the cells covered by a sprite centred at (`cx`, `cy`) in cell space.
fn paint_sprite(
    buffer: &mut [Vec<Cell>],
    sprite: Sprite,
    cx: f64,
    cy: f64,
    x_scale: f64,
    y_scale: f64,
) {
    let (w, h) = sprite.size();
    let (w, h) = (w * x_scale, h * y_scale);

    let left = (cx - w / 2.0).floor() as i64;
    let right = ((cx + w / 2.0).ceil() as i64).max(left + 1);
    let top = (cy - h / 2.0).floor() as i64;
    let bottom = ((cy + h / 2.0).ceil() as i64).max(top + 1);

    let rows = buffer.len() as i64;
    for row in top.max(0)..bottom.min(rows) {
        let (ch, fg) = sprite_glyph(sprite, row == bottom - 1);
        let line = &mut buffer[row as usize];
        let cols = line.len() as i64;
        for col in left.max(0)..right.min(cols) {
            let cell = &mut line[col as usize];
            cell.ch = ch;
            cell.fg = fg;
            cell.bold = false;
        }
    }
}

/// Write a text line centred on (`cx`, `cy`) in cell space, clipped to the buffer.
fn paint_text(buffer: &mut [Vec<Cell>], content: &str, cx: f64, cy: f64, fg: Color, bold: bool) {
    let row = cy.floor();
    if row < 0.0 || row as usize >= buffer.len() {
        return;
    }
    let line = &mut buffer[row as usize];

    let len = content.chars().count() as i64;
    let start = (cx.round() as i64 - len / 2).max(0);
    for (i, ch) in content.chars().enumerate() {
        let col = start + i as i64;
        if col >= line.len() as i64 {
            break;
        }
        let cell = &mut line[col as usize];
        cell.ch = ch;
        cell.fg = fg;
        cell.bold = bold;
    }
}
