//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `SimState` (and, where needed, an RNG handle) and returns a brand-new
//! `SimState`. Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bullet, BulletOwner, Enemy, Outcome, Phase, Player, Rect, SimState, WavePool,
};

// ── Tuning constants ─────────────────────────────────────────────────────────

pub const PLAYER_W: f32 = 40.0;
pub const PLAYER_H: f32 = 10.0;
/// Horizontal distance the cannon covers per tick while a direction is held.
pub const PLAYER_STEP: f32 = 5.0;
pub const PLAYER_BULLET_SPEED: f32 = -5.0;

pub const BULLET_W: f32 = 3.0;
pub const BULLET_H: f32 = 5.0;
/// Sideways speed bullets pick up on the final level.
pub const BULLET_DRIFT: f32 = 1.0;

pub const ENEMY_W: f32 = 20.0;
pub const ENEMY_H: f32 = 20.0;
pub const WAVE_COLS: u32 = 7;
pub const WAVE_ROWS: u32 = 3;
pub const COL_STEP: f32 = 40.0;
pub const ROW_STEP: f32 = 50.0;
pub const WAVE_SPEED: f32 = 2.0;
pub const FALL_INCREMENT: f32 = 1.0;

/// One enemy returns fire every this-many ticks.
pub const FIRE_INTERVAL: u64 = 10;
/// 1.5 s at 30 ticks per second.
pub const GET_READY_TICKS: u32 = 45;
pub const LAST_LEVEL: u8 = 4;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Strict axis-aligned overlap test: rectangles that only share an edge do
/// not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// One wave layout: a 7×3 grid, columns spaced 40 apart and rows 50 apart,
/// both starting one step in from the origin.
fn make_wave() -> Vec<Enemy> {
    let mut wave = Vec::with_capacity((WAVE_COLS * WAVE_ROWS) as usize);
    for col in 1..=WAVE_COLS {
        for row in 1..=WAVE_ROWS {
            wave.push(Enemy {
                rect: Rect {
                    x: col as f32 * COL_STEP,
                    y: row as f32 * ROW_STEP,
                    w: ENEMY_W,
                    h: ENEMY_H,
                },
            });
        }
    }
    wave
}

/// All four layouts are identical; the levels differ only in how the wave
/// update treats them.
fn make_wave_pool() -> WavePool {
    WavePool {
        waves: [make_wave(), make_wave(), make_wave(), make_wave()],
        bullets: Vec::new(),
        speed: WAVE_SPEED,
        fall_increment: FALL_INCREMENT,
    }
}

fn make_player(width: f32, height: f32) -> Player {
    Player {
        rect: Rect {
            x: width / 2.0 - PLAYER_W / 2.0,
            y: height - PLAYER_H,
            w: PLAYER_W,
            h: PLAYER_H,
        },
        vx: 0.0,
        bullets: Vec::new(),
    }
}

/// Bullets spawn at the shooter's center.
fn spawn_bullet(from: &Rect, vy: f32, owner: BulletOwner) -> Bullet {
    Bullet {
        rect: Rect {
            x: from.x + from.w / 2.0,
            y: from.y + from.h / 2.0,
            w: BULLET_W,
            h: BULLET_H,
        },
        vy,
        drift: BULLET_DRIFT,
        owner,
    }
}

/// Build the initial game state for the given field dimensions.
///
/// Panics on non-positive dimensions: a degenerate field is a programming
/// error, not a runtime condition.
pub fn init_state(width: f32, height: f32) -> SimState {
    assert!(
        width > 0.0 && height > 0.0,
        "field dimensions must be positive"
    );
    SimState {
        phase: Phase::Start,
        active_level: 1,
        outcome: None,
        player: make_player(width, height),
        enemies: make_wave_pool(),
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven transitions (pure) ──────────────────────────────────────────

/// Replace the player's horizontal speed. `dir` is −1, 0 or 1; there is no
/// acceleration or friction.
pub fn set_player_direction(state: &SimState, dir: i32) -> SimState {
    debug_assert!((-1..=1).contains(&dir));
    SimState {
        player: Player {
            vx: dir as f32 * PLAYER_STEP,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire one bullet from the cannon. Each call produces exactly one bullet;
/// the input layer is responsible for debouncing key auto-repeat.
pub fn player_fire(state: &SimState) -> SimState {
    let mut player = state.player.clone();
    player
        .bullets
        .push(spawn_bullet(&player.rect, PLAYER_BULLET_SPEED, BulletOwner::Player));
    SimState {
        player,
        ..state.clone()
    }
}

/// The context-sensitive begin/restart command: begins the game from the
/// start screen, or resets everything from the end screen. A no-op in any
/// other phase.
pub fn primary_action(state: &SimState) -> SimState {
    match state.phase {
        Phase::Start => SimState {
            phase: Phase::Playing,
            ..state.clone()
        },
        Phase::Ended => SimState {
            phase: Phase::Start,
            active_level: 1,
            outcome: None,
            player: make_player(state.width, state.height),
            enemies: make_wave_pool(),
            ..state.clone()
        },
        _ => state.clone(),
    }
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick. All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
pub fn step(state: &SimState, rng: &mut impl Rng) -> SimState {
    let mut next = state.clone();
    next.frame = state.frame + 1;

    match next.phase {
        Phase::GetReady { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            next.phase = if ticks_left == 0 {
                Phase::Playing
            } else {
                Phase::GetReady { ticks_left }
            };
        }
        Phase::Playing => {
            update_player(&mut next);
            // The player update may have ended the run.
            if next.phase == Phase::Playing {
                update_waves(&mut next, rng);
            }
        }
        Phase::Start | Phase::Ended => {}
    }

    next
}

fn end_with(s: &mut SimState, outcome: Outcome) {
    s.outcome = Some(outcome);
    s.active_level = 1;
    s.phase = Phase::Ended;
}

/// Move a bullet one tick. Only the final level's bullets weave sideways,
/// reflecting off the field edges instead of despawning there.
fn advance_bullet(b: &mut Bullet, level: u8, width: f32) {
    b.rect.y += b.vy;
    if level == LAST_LEVEL {
        b.rect.x += b.drift;
        if b.rect.x < 0.0 || b.rect.x > width {
            b.drift = -b.drift;
        }
    }
}

fn update_player(s: &mut SimState) {
    // ── Move & clamp ─────────────────────────────────────────────────────────
    // The clamp keeps the rect's center inside the field, so the body may
    // poke halfway past either edge.
    s.player.rect.x += s.player.vx;
    let half = s.player.rect.w / 2.0;
    if s.player.rect.x + half < 0.0 {
        s.player.rect.x = -half;
    } else if s.player.rect.x + half > s.width {
        s.player.rect.x = s.width - half;
    }

    // ── Enemy fire ↔ player ──────────────────────────────────────────────────
    let player_rect = s.player.rect;
    if s.enemies
        .bullets
        .iter()
        .any(|b| overlaps(&player_rect, &b.rect))
    {
        end_with(s, Outcome::Lost);
        return;
    }

    // ── Own bullets: advance, cull, resolve hits ─────────────────────────────
    let (level, width) = (s.active_level, s.width);
    for b in &mut s.player.bullets {
        advance_bullet(b, level, width);
    }

    // Removals are collected during the scan and applied after it, so
    // iteration never skips an element. Bullets resolve in order: of two
    // bullets reaching the same enemy this tick, the first claims the kill
    // and the second finds no target.
    let mut spent: Vec<usize> = Vec::new();
    let mut killed: Vec<usize> = Vec::new();
    {
        let active = s.enemies.wave(level);
        for (bi, bullet) in s.player.bullets.iter().enumerate() {
            if bullet.rect.y < 0.0 {
                spent.push(bi);
                continue;
            }
            for (ei, enemy) in active.iter().enumerate() {
                if !killed.contains(&ei) && overlaps(&bullet.rect, &enemy.rect) {
                    killed.push(ei);
                    spent.push(bi);
                    break;
                }
            }
        }
    }

    let bullets: Vec<Bullet> = s
        .player
        .bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !spent.contains(i))
        .map(|(_, b)| b.clone())
        .collect();
    s.player.bullets = bullets;

    let wave: Vec<Enemy> = s
        .enemies
        .wave(level)
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed.contains(i))
        .map(|(_, e)| e.clone())
        .collect();
    *s.enemies.wave_mut(level) = wave;
}

fn update_waves(s: &mut SimState, rng: &mut impl Rng) {
    let level = s.active_level;

    // ── Wave cleared ─────────────────────────────────────────────────────────
    // Fresh player and pool either way; then win outright or stage the next
    // level behind the countdown. Nothing else runs this tick.
    if s.enemies.wave(level).is_empty() {
        s.player = make_player(s.width, s.height);
        s.enemies = make_wave_pool();
        if level == LAST_LEVEL {
            end_with(s, Outcome::Won);
        } else {
            s.active_level = level + 1;
            s.phase = Phase::GetReady {
                ticks_left: GET_READY_TICKS,
            };
        }
        return;
    }

    // ── Enemy ↔ player / bottom boundary ─────────────────────────────────────
    let (player_rect, height) = (s.player.rect, s.height);
    if s.enemies
        .wave(level)
        .iter()
        .any(|e| overlaps(&player_rect, &e.rect) || e.rect.y + e.rect.h > height)
    {
        end_with(s, Outcome::Lost);
        return;
    }

    // ── Group advance ────────────────────────────────────────────────────────
    // Level 3 descends every tick, level 4 twice as fast; levels 1 and 2
    // only descend through bounces.
    let (speed, fall) = (s.enemies.speed, s.enemies.fall_increment);
    for e in s.enemies.wave_mut(level) {
        e.rect.x += speed;
        if level == 3 {
            e.rect.y += fall;
        } else if level == LAST_LEVEL {
            e.rect.y += fall * 2.0;
        }
    }

    // ── Edge bounce ──────────────────────────────────────────────────────────
    // Only the extremes matter; ties are arbitrary. Level 2 waves drop one
    // increment on the same tick they bounce.
    let wave = s.enemies.wave(level);
    let leftmost = wave.iter().map(|e| e.rect.x).fold(f32::INFINITY, f32::min);
    let rightmost = wave
        .iter()
        .map(|e| e.rect.x + e.rect.w)
        .fold(f32::NEG_INFINITY, f32::max);
    if leftmost < 0.0 || rightmost > s.width {
        s.enemies.speed = -s.enemies.speed;
        if level == 2 {
            for e in s.enemies.wave_mut(level) {
                e.rect.y += fall;
            }
        }
    }

    // ── Return fire ──────────────────────────────────────────────────────────
    // Every 10th tick one enemy shoots. The bullet reuses the wave's advance
    // speed as its fall speed, magnitude only, since the sign flips on every
    // bounce.
    if s.frame % FIRE_INTERVAL == 0 {
        let wave = s.enemies.wave(level);
        let shooter = &wave[rng.gen_range(0..wave.len())];
        let bullet = spawn_bullet(&shooter.rect, s.enemies.speed.abs(), BulletOwner::Enemy);
        s.enemies.bullets.push(bullet);
    }

    // ── Pool bullets ─────────────────────────────────────────────────────────
    let (width, height) = (s.width, s.height);
    for b in &mut s.enemies.bullets {
        advance_bullet(b, level, width);
    }
    let bullets: Vec<Bullet> = s
        .enemies
        .bullets
        .iter()
        .filter(|b| b.rect.y <= height)
        .cloned()
        .collect();
    s.enemies.bullets = bullets;
}
