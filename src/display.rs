//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.  The 750×750 logical field is scaled onto
//! a block of terminal cells by `Viewport`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::compute::health_bar_fill;
use space_shooter::consts::{HEIGHT, WIDTH};
use space_shooter::entities::{Combatant, GameStatus, RunState};
use space_shooter::sprites::{Sprite, Tint};
use space_shooter::Settings;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_BANNER: Color = Color::White;
const C_HEALTH_EMPTY: Color = Color::Red;
const C_HEALTH_FULL: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

const PIXEL: &str = "█";

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Yellow => Color::Yellow,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Blue => Color::Blue,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The block of terminal cells showing the play field.  A cell is about
/// twice as tall as it is wide, so the block is twice as many columns as
/// rows to keep the field square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    /// Largest square-looking block that fits the terminal, centred.
    pub fn fit(term_width: u16, term_height: u16) -> Self {
        let mut rows = term_height.max(1);
        let mut cols = rows.saturating_mul(2);
        if cols > term_width {
            cols = term_width.max(2);
            rows = (cols / 2).max(1);
        }
        Viewport {
            left: term_width.saturating_sub(cols) / 2,
            top: term_height.saturating_sub(rows) / 2,
            cols,
            rows,
        }
    }

    /// Column of the viewport (not clamped) covering logical `x`.
    fn col_of(&self, x: i32) -> i32 {
        (x * self.cols as i32).div_euclid(WIDTH)
    }

    fn row_of(&self, y: i32) -> i32 {
        (y * self.rows as i32).div_euclid(HEIGHT)
    }

    /// Logical pixel at the centre of a viewport cell.
    fn centre_of(&self, col: i32, row: i32) -> (i32, i32) {
        (
            ((2 * col + 1) * WIDTH) / (2 * self.cols as i32),
            ((2 * row + 1) * HEIGHT) / (2 * self.rows as i32),
        )
    }

    /// Terminal position of a viewport cell, if it is inside the viewport.
    fn screen(&self, col: i32, row: i32) -> Option<(u16, u16)> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some((self.left + col as u16, self.top + row as u16))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &RunState,
    settings: &Settings,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let vp = Viewport::fit(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for enemy in &state.wave.enemies {
        draw_ship(out, &vp, enemy)?;
    }
    draw_ship(out, &vp, &state.player)?;
    draw_health_bar(out, &vp, &state.player)?;
    draw_hud(out, &vp, state)?;

    match state.status {
        GameStatus::PlayerWin => draw_banner(out, &vp, "You win! Congratulations!")?,
        GameStatus::GameOver => draw_banner(out, &vp, "You lose. GAME OVER")?,
        GameStatus::Playing | GameStatus::Terminated => {}
    }

    if settings.show_controls_hint {
        draw_controls_hint(out, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Render the title screen.
pub fn render_menu<W: Write>(out: &mut W, settings: &Settings) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let vp = Viewport::fit(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_banner(out, &vp, "Click mouse to begin...")?;

    let hint = "(or press Enter)   Q : Quit";
    if let Some((_, row)) = vp.screen(0, vp.row_of(350) + 2) {
        let col = (width / 2).saturating_sub(hint.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;
    }

    if settings.show_controls_hint {
        draw_controls_hint(out, height)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Draw a sprite with its top-left corner at logical `(x, y)`.  Each cell is
/// lit if the sprite is opaque at the cell's centre.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    sprite: &Sprite,
    x: i32,
    y: i32,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(tint_color(sprite.tint)))?;

    let (c0, c1) = (vp.col_of(x), vp.col_of(x + sprite.width()));
    let (r0, r1) = (vp.row_of(y), vp.row_of(y + sprite.height()));

    for row in r0.max(0)..=r1.min(vp.rows as i32 - 1) {
        for col in c0.max(0)..=c1.min(vp.cols as i32 - 1) {
            let (px, py) = vp.centre_of(col, row);
            if !sprite.mask.get(px - x, py - y) {
                continue;
            }
            if let Some((sx, sy)) = vp.screen(col, row) {
                out.queue(cursor::MoveTo(sx, sy))?;
                out.queue(Print(PIXEL))?;
            }
        }
    }
    Ok(())
}

/// A ship and every laser it has in flight.
fn draw_ship<W: Write>(out: &mut W, vp: &Viewport, ship: &Combatant) -> std::io::Result<()> {
    draw_sprite(out, vp, ship.ship(), ship.x, ship.y)?;
    for laser in &ship.projectiles {
        draw_sprite(out, vp, laser.sprite, laser.x, laser.y)?;
    }
    Ok(())
}

/// Red bar the width of the ship, 10 px under it, filled green in
/// proportion to the remaining health.
fn draw_health_bar<W: Write>(
    out: &mut W,
    vp: &Viewport,
    player: &Combatant,
) -> std::io::Result<()> {
    let y = player.y + player.height() + 10;
    let row = vp.row_of(y);
    let full_to = vp.col_of(player.x + health_bar_fill(player));
    let (c0, c1) = (vp.col_of(player.x), vp.col_of(player.x + player.width()));

    for col in c0..c1 {
        if let Some((sx, sy)) = vp.screen(col, row) {
            let color = if col < full_to { C_HEALTH_FULL } else { C_HEALTH_EMPTY };
            out.queue(cursor::MoveTo(sx, sy))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print("▀"))?;
        }
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, state: &RunState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;

    // Lives, top left
    let (lx, ly) = (vp.left + 1, vp.top);
    out.queue(cursor::MoveTo(lx, ly))?;
    out.queue(Print(format!("Lives: {}", state.lives.max(0))))?;

    // Level, top right
    let level = format!("Level: {}", state.wave.level);
    let rx = (vp.left + vp.cols).saturating_sub(level.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, ly))?;
    out.queue(Print(level))?;
    Ok(())
}

/// Centred line of text at logical row 350.
fn draw_banner<W: Write>(out: &mut W, vp: &Viewport, text: &str) -> std::io::Result<()> {
    let row = vp.top + vp.row_of(350).clamp(0, vp.rows as i32 - 1) as u16;
    let centre = vp.left + vp.cols / 2;
    let col = centre.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BANNER))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
