//! Space Shooter - a wave-based arcade shooter for the terminal.
//!
//! Core modules:
//! - `entities`: pure data (combatants, projectiles, wave and run state)
//! - `compute`: per-frame simulation (firing, projectile lifecycle, waves, win/lose)
//! - `mask`: per-pixel collision masks and the shared hit test
//! - `sprites`: built-in ship and laser bitmaps
//! - `settings`: user preferences loaded from a JSON file

pub mod compute;
pub mod entities;
pub mod mask;
pub mod settings;
pub mod sprites;

pub use settings::Settings;

/// Fixed gameplay constants. Everything is in logical pixels and frames.
pub mod consts {
    use std::ops::Range;

    /// Logical play field
    pub const WIDTH: i32 = 750;
    pub const HEIGHT: i32 = 750;

    /// Frame pacing; all timers below count frames at this rate
    pub const FPS: u32 = 60;
    /// Frames the win/lose banner stays up before the run ends (3 s)
    pub const END_HOLD_FRAMES: u32 = FPS * 3;

    /// Minimum frames between two shots of one combatant
    pub const COOLDOWN: u32 = 30;

    pub const PLAYER_START: (i32, i32) = (300, 630);
    pub const START_HEALTH: i32 = 100;
    pub const START_LIVES: i32 = 3;
    pub const PLAYER_VELOCITY: i32 = 5;
    /// Gap kept between the player ship and the bottom edge (room for the health bar)
    pub const PLAYER_BOTTOM_MARGIN: i32 = 20;

    pub const START_WAVE_LENGTH: u32 = 5;
    pub const WAVE_STEP: u32 = 5;
    /// Reaching this level wins the game
    pub const WIN_LEVEL: u32 = 3;

    pub const ENEMY_VELOCITY: i32 = 1;
    /// Spawn area for new enemies; y is above the screen so waves trickle in
    pub const ENEMY_X_RANGE: Range<i32> = 50..WIDTH - 100;
    pub const ENEMY_Y_RANGE: Range<i32> = -1500..-100;
    /// One shot attempt in this many per enemy per frame (~4 s at 60 FPS)
    pub const ENEMY_FIRE_ODDS: u32 = 4 * FPS;
    /// Enemy lasers are wider than the ship; shift left to centre the bolt
    pub const ENEMY_LASER_OFFSET: i32 = 20;

    pub const LASER_VELOCITY: i32 = 4;
    /// Damage an enemy laser deals to the player
    pub const LASER_DAMAGE: i32 = 25;
    /// Damage the player takes when an enemy ship rams it
    pub const CONTACT_DAMAGE: i32 = 10;
}
