//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates a
//! state snapshot into terminal commands, scaling field coordinates onto
//! the terminal cell grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::compute::LAST_LEVEL;
use crate::entities::{Bullet, BulletOwner, Outcome, Phase, Rect, SimState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HUD_LEVEL: Color = Color::Yellow;
const C_HUD_COUNT: Color = Color::Green;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps field coordinates onto the terminal cell grid.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(state: &SimState, cols: u16, rows: u16) -> Viewport {
        Viewport {
            cols,
            rows,
            sx: cols as f32 / state.width,
            sy: rows as f32 / state.height,
        }
    }

    /// The cell a field point lands in, or `None` when it falls off screen
    /// (entities may sit slightly outside the field for a tick).
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let cx = (x * self.sx).floor();
        let cy = (y * self.sy).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f32 || cy >= self.rows as f32 {
            None
        } else {
            Some((cx as u16, cy as u16))
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame in a fixed order: clear, start text, player,
/// wave and bullets, end text, HUD, get-ready text.
pub fn render<W: Write>(out: &mut W, state: &SimState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport::new(state, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if state.phase == Phase::Start {
        draw_start_screen(out, &vp)?;
    }

    let staging = matches!(state.phase, Phase::GetReady { .. });
    if !staging {
        draw_player(out, &vp, state)?;
        draw_wave(out, &vp, state)?;
    }

    if state.phase == Phase::Ended {
        draw_end_screen(out, &vp, state)?;
    }

    draw_hud(out, &vp, state)?;

    if staging {
        draw_get_ready(out, &vp, state)?;
    }

    draw_controls_hint(out, &vp)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw a field rectangle as a run of `ch`, at least one cell wide.
fn draw_rect<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    ch: char,
    color: Color,
) -> std::io::Result<()> {
    let (cx, cy) = match vp.cell(rect.x, rect.y) {
        Some(cell) => cell,
        None => return Ok(()),
    };
    let w = ((rect.w * vp.sx).round() as u16).clamp(1, vp.cols - cx);
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(ch.to_string().repeat(w as usize)))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, vp: &Viewport, bullet: &Bullet) -> std::io::Result<()> {
    let (ch, color) = match bullet.owner {
        BulletOwner::Player => ('║', C_BULLET_PLAYER),
        BulletOwner::Enemy => ('↓', C_BULLET_ENEMY),
    };
    if let Some((cx, cy)) = vp.cell(bullet.rect.x, bullet.rect.y) {
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(ch))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, vp: &Viewport, state: &SimState) -> std::io::Result<()> {
    draw_rect(out, vp, &state.player.rect, '▀', C_PLAYER)?;
    for bullet in &state.player.bullets {
        draw_bullet(out, vp, bullet)?;
    }
    Ok(())
}

fn draw_wave<W: Write>(out: &mut W, vp: &Viewport, state: &SimState) -> std::io::Result<()> {
    for enemy in state.enemies.wave(state.active_level) {
        draw_rect(out, vp, &enemy.rect, '▓', C_ENEMY)?;
    }
    for bullet in &state.enemies.bullets {
        draw_bullet(out, vp, bullet)?;
    }
    Ok(())
}

// ── Text overlays ─────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_start_screen<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let mid = vp.rows / 2;
    draw_centered(out, vp, mid, "Try to reach the last level", C_TEXT)?;
    draw_centered(out, vp, mid + 2, "Press Enter to start", C_HINT)?;
    Ok(())
}

fn draw_end_screen<W: Write>(out: &mut W, vp: &Viewport, state: &SimState) -> std::io::Result<()> {
    let message = match state.outcome {
        Some(Outcome::Won) => "You won!",
        Some(Outcome::Lost) => "You lost!",
        None => "Game over",
    };
    let mid = vp.rows / 2;
    draw_centered(out, vp, mid, message, C_TEXT)?;
    draw_centered(out, vp, mid + 2, "Press Enter to restart", C_HINT)?;
    Ok(())
}

fn draw_get_ready<W: Write>(out: &mut W, vp: &Viewport, state: &SimState) -> std::io::Result<()> {
    let message = if state.active_level == LAST_LEVEL {
        "Last level".to_string()
    } else {
        format!("Level {} of {}", state.active_level, LAST_LEVEL)
    };
    draw_centered(out, vp, vp.rows / 2, &message, C_TEXT)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, state: &SimState) -> std::io::Result<()> {
    // Level indicator, left edge
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!(
        "Level {} of {}",
        state.active_level, LAST_LEVEL
    )))?;

    // Enemy count, right edge
    let count_text = format!(
        "Enemies left: {}",
        state.enemies.wave(state.active_level).len()
    );
    let col = vp
        .cols
        .saturating_sub(count_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COUNT))?;
    out.queue(Print(&count_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ENTER : Start / Restart   Q : Quit"))?;
    Ok(())
}
