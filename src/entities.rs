//! All game entity types: plain data plus accessors.  Behaviour lives in
//! `compute`.

use crate::consts::START_WAVE_LENGTH;
use crate::mask::{Hitbox, Mask};
use crate::sprites::{sheet, EnemyColor, Sprite};

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Who a combatant fights for.  Players aim up and hit any enemy; enemies
/// aim down and only ever hit the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Player,
    Enemy(EnemyColor),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Lost; the banner is held for a few seconds.
    GameOver,
    /// Won; the banner is held for a few seconds.
    PlayerWin,
    /// Hold elapsed, the run is over.
    Terminated,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub sprite: &'static Sprite,
}

impl Projectile {
    pub fn new(x: i32, y: i32, sprite: &'static Sprite) -> Self {
        Projectile { x, y, sprite }
    }

    /// Move vertically; positive is down.
    pub fn advance(&mut self, velocity: i32) {
        self.y += velocity;
    }

    /// Outside the vertical band `[0, height]`.
    pub fn is_off_screen(&self, height: i32) -> bool {
        self.y < 0 || self.y > height
    }
}

impl Hitbox for Projectile {
    fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Combatant {
    pub x: i32,
    pub y: i32,
    pub role: Role,
    /// May dip below zero for a frame before the loop reacts.
    pub health: i32,
    pub max_health: i32,
    /// 0 = ready to fire, otherwise frames since the last shot.
    pub cooldown: u32,
    pub projectiles: Vec<Projectile>,
}

impl Combatant {
    pub fn new(x: i32, y: i32, role: Role, health: i32) -> Self {
        Combatant {
            x,
            y,
            role,
            health,
            max_health: health,
            cooldown: 0,
            projectiles: Vec::new(),
        }
    }

    pub fn ship(&self) -> &'static Sprite {
        match self.role {
            Role::Player => &sheet().player_ship,
            Role::Enemy(color) => sheet().enemy_ship(color),
        }
    }

    pub fn laser(&self) -> &'static Sprite {
        match self.role {
            Role::Player => &sheet().player_laser,
            Role::Enemy(color) => sheet().enemy_laser(color),
        }
    }

    pub fn width(&self) -> i32 {
        self.ship().width()
    }

    pub fn height(&self) -> i32 {
        self.ship().height()
    }

    pub fn is_player(&self) -> bool {
        self.role == Role::Player
    }
}

impl Hitbox for Combatant {
    fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        &self.ship().mask
    }
}

// ── Waves ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct WaveState {
    pub level: u32,
    /// Enemies in the most recent wave.
    pub wave_length: u32,
    /// Live enemies; order carries no meaning.
    pub enemies: Vec<Combatant>,
}

impl WaveState {
    pub fn new() -> Self {
        WaveState {
            level: 0,
            wave_length: START_WAVE_LENGTH,
            enemies: Vec::new(),
        }
    }

    /// Every enemy of the current wave is gone.
    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held keys for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// Everything one run of the game needs, threaded through the frame loop.
#[derive(Clone, Debug)]
pub struct RunState {
    pub player: Combatant,
    pub lives: i32,
    pub wave: WaveState,
    pub status: GameStatus,
    /// Frames spent on the game-over banner.
    pub game_over_frames: u32,
    /// Frames spent on the win banner.
    pub win_frames: u32,
    pub frame: u64,
}
