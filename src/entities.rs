//! All game entity types: pure data, no logic.

/// Axis-aligned rectangle in field units. `w` and `h` are never negative;
/// the constructors in `compute` only build non-negative sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Who fired a bullet. Player bullets only hurt enemies, enemy bullets only
/// hurt the player, and the two despawn at opposite field edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical speed per tick; negative moves up.
    pub vy: f32,
    /// Horizontal speed per tick, applied on the final level only. Sign
    /// flips when the bullet reaches a field edge.
    pub drift: f32,
    pub owner: BulletOwner,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal speed; zero unless a direction is held.
    pub vx: f32,
    pub bullets: Vec<Bullet>,
}

/// Enemies are bare rectangles: their advance speed is shared wave-wide and
/// lives on `WavePool`, so a wave can never drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
}

// ── Wave pool ─────────────────────────────────────────────────────────────────

/// The four pre-built waves, one per level, plus the bullet pool shared by
/// every enemy. Only the wave matching the active level is live; the other
/// three sit dormant until a restart rebuilds all four.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePool {
    pub waves: [Vec<Enemy>; 4],
    pub bullets: Vec<Bullet>,
    /// Shared horizontal speed; sign flips on an edge bounce.
    pub speed: f32,
    pub fall_increment: f32,
}

impl WavePool {
    /// The wave for a 1-based level number.
    pub fn wave(&self, level: u8) -> &Vec<Enemy> {
        &self.waves[(level - 1) as usize]
    }

    pub fn wave_mut(&mut self, level: u8) -> &mut Vec<Enemy> {
        &mut self.waves[(level - 1) as usize]
    }
}

// ── Game state machine ────────────────────────────────────────────────────────

/// The get-ready countdown lives inside its variant: entering the phase
/// arms exactly one timer, and leaving the phase destroys it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Start,
    GetReady { ticks_left: u32 },
    Playing,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Won,
    Lost,
}

// ── Master simulation state ───────────────────────────────────────────────────

/// The entire simulation state. Cloneable so the pure update functions in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct SimState {
    pub phase: Phase,
    /// Level currently being played, 1 through 4. Selects the live wave.
    pub active_level: u8,
    /// Pending end-screen message once the run is over.
    pub outcome: Option<Outcome>,
    pub player: Player,
    pub enemies: WavePool,
    /// Process-wide tick counter; drives the enemy fire cadence.
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}
