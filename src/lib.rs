//! Barrel Run - a fixed-step 2D platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `layout`: Level layouts handed to the simulation at construction
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors surfaced at construction time

pub mod error;
pub mod layout;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use layout::LevelLayout;
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the compile-time defaults behind [`Tuning::default`].
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;

    /// Default frame budget for a level (~2m46s at 60 Hz)
    pub const MAX_FRAMES: u32 = 10_000;

    /// Avatar physics
    pub const AVATAR_GRAVITY: f32 = 0.2;
    pub const AVATAR_TERMINAL_VELOCITY: f32 = 10.0;
    pub const AVATAR_MOVE_SPEED: f32 = 3.5;
    pub const AVATAR_CLIMB_SPEED: f32 = 2.0;
    /// Magnitude of the upward launch velocity
    pub const AVATAR_JUMP_SPEED: f32 = 5.0;

    /// Ranged weapon
    pub const AMMO_PER_PICKUP: u32 = 5;
    pub const SHOT_COOLDOWN_TICKS: u32 = 10;
    pub const SHOT_OFFSET_X: f32 = 20.0;
    pub const SHOT_OFFSET_Y: f32 = -5.0;

    /// Boss
    pub const BOSS_GRAVITY: f32 = 0.4;
    pub const BOSS_TERMINAL_VELOCITY: f32 = 5.0;
    pub const BOSS_MAX_HEALTH: u8 = 5;
    /// Invulnerability window after a hit
    pub const BOSS_HIT_COOLDOWN_TICKS: u32 = 20;

    /// Hazards (barrels)
    pub const HAZARD_GRAVITY: f32 = 0.4;
    pub const HAZARD_TERMINAL_VELOCITY: f32 = 5.0;

    /// Patrolling enemies
    pub const PLAIN_ENEMY_GRAVITY: f32 = 0.4;
    pub const PLAIN_ENEMY_TERMINAL_VELOCITY: f32 = 5.0;
    pub const RANGED_ENEMY_GRAVITY: f32 = 0.5;
    pub const RANGED_ENEMY_TERMINAL_VELOCITY: f32 = 5.0;
    pub const PATROL_SPEED: f32 = 0.5;
    /// How close an enemy's feet must be to a platform top to stand on it
    pub const PATROL_FOOTING_TOLERANCE: f32 = 5.0;
    /// 5 seconds at 60 Hz
    pub const SHOOT_INTERVAL_TICKS: u32 = 300;

    /// Projectiles
    pub const FIRED_SPEED: f32 = 3.8;
    pub const FIRED_MAX_RANGE: f32 = 300.0;
    pub const LOBBED_SPEED: f32 = 1.8;
    pub const LOBBED_MAX_RANGE: f32 = 300.0;

    /// Score awards
    pub const HAZARD_CLEARED_SCORE: u32 = 30;
    pub const HAZARD_DESTROYED_SCORE: u32 = 100;
    pub const PLAIN_ENEMY_SCORE: u32 = 100;
    pub const RANGED_ENEMY_SCORE: u32 = 100;

    /// Horizontal tolerance for the jump-over test
    pub const JUMP_OVER_TOLERANCE: f32 = 1.0;
}

/// Tolerance for position comparisons that the game treats as exact
pub const POSITION_EPSILON: f32 = 1e-3;

/// Float equality within [`POSITION_EPSILON`]
#[inline]
pub fn nearly_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= POSITION_EPSILON
}
