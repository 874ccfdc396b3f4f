//! Game balance and sprite dimensions
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON table can override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};
use crate::sim::body::{BodyParams, Footing};
use crate::sim::state::Weapon;

/// Avatar movement and weapon constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarTuning {
    pub body: BodyParams,
    pub move_speed: f32,
    pub climb_speed: f32,
    pub jump_speed: f32,
    pub ammo_per_pickup: u32,
    pub shot_cooldown: u32,
    /// Spawn offset of a fired shot when facing right (x is mirrored when facing left)
    pub shot_offset: Vec2,
}

impl Default for AvatarTuning {
    fn default() -> Self {
        Self {
            body: BodyParams {
                gravity: AVATAR_GRAVITY,
                terminal_velocity: AVATAR_TERMINAL_VELOCITY,
                footing: Footing::Crossing,
            },
            move_speed: AVATAR_MOVE_SPEED,
            climb_speed: AVATAR_CLIMB_SPEED,
            jump_speed: AVATAR_JUMP_SPEED,
            ammo_per_pickup: AMMO_PER_PICKUP,
            shot_cooldown: SHOT_COOLDOWN_TICKS,
            shot_offset: Vec2::new(SHOT_OFFSET_X, SHOT_OFFSET_Y),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub body: BodyParams,
    pub max_health: u8,
    pub hit_cooldown: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            body: BodyParams {
                gravity: BOSS_GRAVITY,
                terminal_velocity: BOSS_TERMINAL_VELOCITY,
                footing: Footing::Overlap,
            },
            max_health: BOSS_MAX_HEALTH,
            hit_cooldown: BOSS_HIT_COOLDOWN_TICKS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolTuning {
    pub plain: BodyParams,
    pub ranged: BodyParams,
    pub speed: f32,
    pub shoot_interval: u32,
}

impl Default for PatrolTuning {
    fn default() -> Self {
        let feet = Footing::Feet {
            tolerance: PATROL_FOOTING_TOLERANCE,
        };
        Self {
            plain: BodyParams {
                gravity: PLAIN_ENEMY_GRAVITY,
                terminal_velocity: PLAIN_ENEMY_TERMINAL_VELOCITY,
                footing: feet,
            },
            ranged: BodyParams {
                gravity: RANGED_ENEMY_GRAVITY,
                terminal_velocity: RANGED_ENEMY_TERMINAL_VELOCITY,
                footing: feet,
            },
            speed: PATROL_SPEED,
            shoot_interval: SHOOT_INTERVAL_TICKS,
        }
    }
}

/// Straight-line projectile constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub max_range: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    /// Awarded for each successful jump over a hazard
    pub hazard_cleared: u32,
    pub hazard_destroyed: u32,
    pub plain_enemy: u32,
    pub ranged_enemy: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            hazard_cleared: HAZARD_CLEARED_SCORE,
            hazard_destroyed: HAZARD_DESTROYED_SCORE,
            plain_enemy: PLAIN_ENEMY_SCORE,
            ranged_enemy: RANGED_ENEMY_SCORE,
        }
    }
}

/// Sprite dimensions (width, height). The renderer owns the images; the
/// simulation only needs their sizes for bounding boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub avatar: Vec2,
    pub avatar_melee: Vec2,
    pub avatar_ranged: Vec2,
    pub boss: Vec2,
    pub hazard: Vec2,
    pub platform: Vec2,
    pub ladder: Vec2,
    pub melee_pickup: Vec2,
    pub ranged_pickup: Vec2,
    pub plain_enemy: Vec2,
    pub ranged_enemy: Vec2,
    pub lobbed: Vec2,
    pub fired: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            avatar: Vec2::new(30.0, 40.0),
            avatar_melee: Vec2::new(50.0, 48.0),
            avatar_ranged: Vec2::new(44.0, 40.0),
            boss: Vec2::new(90.0, 70.0),
            hazard: Vec2::new(28.0, 28.0),
            platform: Vec2::new(128.0, 20.0),
            ladder: Vec2::new(40.0, 158.0),
            melee_pickup: Vec2::new(30.0, 30.0),
            ranged_pickup: Vec2::new(32.0, 24.0),
            plain_enemy: Vec2::new(40.0, 40.0),
            ranged_enemy: Vec2::new(42.0, 42.0),
            lobbed: Vec2::new(20.0, 14.0),
            fired: Vec2::new(20.0, 8.0),
        }
    }
}

impl SpriteSizes {
    /// Avatar sprite for the held weapon
    pub fn avatar_for(&self, weapon: Weapon) -> Vec2 {
        match weapon {
            Weapon::None => self.avatar,
            Weapon::Melee => self.avatar_melee,
            Weapon::Ranged => self.avatar_ranged,
        }
    }

    fn all(&self) -> [(&'static str, Vec2); 13] {
        [
            ("sprites.avatar", self.avatar),
            ("sprites.avatar_melee", self.avatar_melee),
            ("sprites.avatar_ranged", self.avatar_ranged),
            ("sprites.boss", self.boss),
            ("sprites.hazard", self.hazard),
            ("sprites.platform", self.platform),
            ("sprites.ladder", self.ladder),
            ("sprites.melee_pickup", self.melee_pickup),
            ("sprites.ranged_pickup", self.ranged_pickup),
            ("sprites.plain_enemy", self.plain_enemy),
            ("sprites.ranged_enemy", self.ranged_enemy),
            ("sprites.lobbed", self.lobbed),
            ("sprites.fired", self.fired),
        ]
    }
}

/// Complete tuning table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen: Vec2,
    pub tick_rate: u32,
    pub avatar: AvatarTuning,
    pub boss: BossTuning,
    pub hazard: BodyParams,
    pub patrol: PatrolTuning,
    pub fired: ProjectileTuning,
    pub lobbed: ProjectileTuning,
    pub scores: ScoreTuning,
    pub sprites: SpriteSizes,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            tick_rate: TICK_RATE,
            avatar: AvatarTuning::default(),
            boss: BossTuning::default(),
            hazard: BodyParams {
                gravity: HAZARD_GRAVITY,
                terminal_velocity: HAZARD_TERMINAL_VELOCITY,
                footing: Footing::Overlap,
            },
            patrol: PatrolTuning::default(),
            fired: ProjectileTuning {
                speed: FIRED_SPEED,
                max_range: FIRED_MAX_RANGE,
            },
            lobbed: ProjectileTuning {
                speed: LOBBED_SPEED,
                max_range: LOBBED_MAX_RANGE,
            },
            scores: ScoreTuning::default(),
            sprites: SpriteSizes::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table; missing fields keep their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        positive("screen.width", self.screen.x)?;
        positive("screen.height", self.screen.y)?;
        positive("tick_rate", self.tick_rate as f32)?;
        positive("avatar.move_speed", self.avatar.move_speed)?;
        positive("avatar.climb_speed", self.avatar.climb_speed)?;
        positive("avatar.jump_speed", self.avatar.jump_speed)?;
        // The jump-over apex divides by the avatar's gravity
        body(
            [
                "avatar.body.gravity",
                "avatar.body.terminal_velocity",
                "avatar.body.footing.tolerance",
            ],
            &self.avatar.body,
        )?;
        body(
            [
                "boss.body.gravity",
                "boss.body.terminal_velocity",
                "boss.body.footing.tolerance",
            ],
            &self.boss.body,
        )?;
        body(
            [
                "hazard.gravity",
                "hazard.terminal_velocity",
                "hazard.footing.tolerance",
            ],
            &self.hazard,
        )?;
        body(
            [
                "patrol.plain.gravity",
                "patrol.plain.terminal_velocity",
                "patrol.plain.footing.tolerance",
            ],
            &self.patrol.plain,
        )?;
        body(
            [
                "patrol.ranged.gravity",
                "patrol.ranged.terminal_velocity",
                "patrol.ranged.footing.tolerance",
            ],
            &self.patrol.ranged,
        )?;
        positive("patrol.speed", self.patrol.speed)?;
        positive("patrol.shoot_interval", self.patrol.shoot_interval as f32)?;
        positive("fired.speed", self.fired.speed)?;
        positive("fired.max_range", self.fired.max_range)?;
        positive("lobbed.speed", self.lobbed.speed)?;
        positive("lobbed.max_range", self.lobbed.max_range)?;
        positive("boss.max_health", self.boss.max_health as f32)?;
        if self.boss.max_health > BOSS_MAX_HEALTH {
            return Err(ConfigError::InvalidTuning {
                name: "boss.max_health",
                value: self.boss.max_health as f32,
            });
        }
        for (name, size) in self.sprites.all() {
            positive(name, size.x)?;
            positive(name, size.y)?;
        }
        Ok(())
    }
}

/// Gravity, terminal velocity and feet tolerance of one body kind
fn body(names: [&'static str; 3], params: &BodyParams) -> ConfigResult<()> {
    let [gravity, terminal_velocity, tolerance] = names;
    positive(gravity, params.gravity)?;
    positive(terminal_velocity, params.terminal_velocity)?;
    if let Footing::Feet { tolerance: value } = params.footing {
        positive(tolerance, value)?;
    }
    Ok(())
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning { name, value })
    }
}
