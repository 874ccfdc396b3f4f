//! Level layouts
//!
//! A layout is the fully-resolved entity placement handed to
//! [`LevelSession::new`](crate::sim::LevelSession::new). It can be loaded from
//! JSON or taken from the built-in defaults for either variant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAMES;
use crate::error::{ConfigError, ConfigResult};
use crate::sim::{Facing, LevelVariant};
use crate::tuning::Tuning;

fn default_max_frames() -> u32 {
    MAX_FRAMES
}

/// Spawn point and patrol route of one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolSpawn {
    pub pos: Vec2,
    #[serde(default)]
    pub facing: Facing,
    /// Walking distances between turns, cycled in order
    pub waypoints: Vec<u32>,
}

impl PatrolSpawn {
    pub fn new(pos: Vec2, facing: Facing, waypoints: &[u32]) -> Self {
        Self {
            pos,
            facing,
            waypoints: waypoints.to_vec(),
        }
    }
}

/// Entity positions for one level (centre points, screen space)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub variant: LevelVariant,
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
    pub avatar: Vec2,
    pub boss: Vec2,
    #[serde(default)]
    pub hazards: Vec<Vec2>,
    #[serde(default)]
    pub platforms: Vec<Vec2>,
    #[serde(default)]
    pub ladders: Vec<Vec2>,
    #[serde(default)]
    pub melee_pickups: Vec<Vec2>,
    #[serde(default)]
    pub ranged_pickups: Vec<Vec2>,
    #[serde(default)]
    pub plain_enemies: Vec<PatrolSpawn>,
    #[serde(default)]
    pub ranged_enemies: Vec<PatrolSpawn>,
}

impl LevelLayout {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the layout against the screen and the variant's rules
    pub fn validate(&self, tuning: &Tuning) -> ConfigResult<()> {
        if self.max_frames == 0 {
            return Err(ConfigError::ZeroFrameBudget);
        }
        if self.platforms.is_empty() {
            return Err(ConfigError::NoPlatforms);
        }

        if self.variant == LevelVariant::Basic {
            if !self.plain_enemies.is_empty() || !self.ranged_enemies.is_empty() {
                return Err(ConfigError::UnsupportedEntity {
                    kind: "enemy",
                    variant: self.variant,
                });
            }
            if !self.ranged_pickups.is_empty() {
                return Err(ConfigError::UnsupportedEntity {
                    kind: "ranged pickup",
                    variant: self.variant,
                });
            }
        }

        let screen = tuning.screen;
        check_positions("avatar", std::slice::from_ref(&self.avatar), screen)?;
        check_positions("boss", std::slice::from_ref(&self.boss), screen)?;
        check_positions("hazard", &self.hazards, screen)?;
        check_positions("platform", &self.platforms, screen)?;
        check_positions("ladder", &self.ladders, screen)?;
        check_positions("melee pickup", &self.melee_pickups, screen)?;
        check_positions("ranged pickup", &self.ranged_pickups, screen)?;

        for (kind, spawns) in [
            ("plain enemy", &self.plain_enemies),
            ("ranged enemy", &self.ranged_enemies),
        ] {
            for (index, spawn) in spawns.iter().enumerate() {
                check_position(kind, index, spawn.pos, screen)?;
                if spawn.waypoints.is_empty() {
                    return Err(ConfigError::EmptyWaypoints { kind, index });
                }
            }
        }

        Ok(())
    }

    /// The built-in level for a variant
    pub fn default_for(variant: LevelVariant) -> Self {
        let mut platforms = Vec::new();
        // (row centre y, first tile x, tile count)
        for (y, first_x, tiles) in [
            (758.0, 64.0, 8),
            (600.0, 64.0, 7),
            (442.0, 192.0, 7),
            (284.0, 64.0, 7),
            (126.0, 320.0, 4),
        ] {
            for i in 0..tiles {
                platforms.push(Vec2::new(first_x + 128.0 * i as f32, y));
            }
        }

        let mut layout = Self {
            variant,
            max_frames: MAX_FRAMES,
            avatar: Vec2::new(100.0, 728.0),
            boss: Vec2::new(512.0, 60.0),
            hazards: vec![
                Vec2::new(300.0, 400.0),
                Vec2::new(600.0, 250.0),
                Vec2::new(850.0, 550.0),
            ],
            platforms,
            ladders: vec![
                Vec2::new(700.0, 669.0),
                Vec2::new(250.0, 511.0),
                Vec2::new(760.0, 353.0),
                Vec2::new(400.0, 195.0),
            ],
            melee_pickups: vec![Vec2::new(150.0, 575.0)],
            ranged_pickups: Vec::new(),
            plain_enemies: Vec::new(),
            ranged_enemies: Vec::new(),
        };

        if variant == LevelVariant::Armed {
            layout.plain_enemies = vec![
                PatrolSpawn::new(Vec2::new(400.0, 570.0), Facing::Right, &[100, 150]),
                PatrolSpawn::new(Vec2::new(300.0, 254.0), Facing::Left, &[80, 120, 60]),
            ];
            layout.ranged_enemies = vec![PatrolSpawn::new(
                Vec2::new(600.0, 411.0),
                Facing::Left,
                &[120, 90],
            )];
            layout.ranged_pickups = vec![Vec2::new(900.0, 420.0)];
        }

        layout
    }
}

fn check_positions(kind: &'static str, positions: &[Vec2], screen: Vec2) -> ConfigResult<()> {
    positions
        .iter()
        .enumerate()
        .try_for_each(|(index, &pos)| check_position(kind, index, pos, screen))
}

fn check_position(kind: &'static str, index: usize, pos: Vec2, screen: Vec2) -> ConfigResult<()> {
    if !pos.is_finite() {
        return Err(ConfigError::NonFinitePosition { kind, index });
    }
    if pos.x < 0.0 || pos.x > screen.x || pos.y < 0.0 || pos.y > screen.y {
        return Err(ConfigError::OffScreen {
            kind,
            index,
            x: pos.x,
            y: pos.y,
        });
    }
    Ok(())
}
