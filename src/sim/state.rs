//! Session state and core simulation types
//!
//! The [`LevelSession`] exclusively owns every entity. Entities are plain data;
//! their per-tick behaviour lives in the sibling modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body;
use super::rect::Rect;
use crate::error::ConfigResult;
use crate::layout::LevelLayout;
use crate::tuning::{ProjectileTuning, Tuning};

/// Which rule set a level runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelVariant {
    /// Hazards, pickups of the melee weapon and a boss that can only be reached
    Basic,
    /// Adds patrolling enemies, thrown projectiles, the ranged weapon and a
    /// boss that can be shot down
    Armed,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing,
    /// Level won (terminal)
    Completed,
    /// Level lost (terminal)
    GameOver,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        self != SessionPhase::Playing
    }
}

/// Lifecycle of destructible and collectible entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityState {
    #[default]
    Active,
    /// Destroyed, or collected in the case of a pickup. Never reverts.
    Destroyed,
}

impl EntityState {
    #[inline]
    pub fn is_active(self) -> bool {
        self == EntityState::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Weapon held by the avatar (at most one at a time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    None,
    Melee,
    Ranged,
}

/// A static platform tile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// A static ladder
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ladder {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Ladder {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// Immutable level geometry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terrain {
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
}

/// The player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub vel_y: f32,
    pub facing: Facing,
    pub jumping: bool,
    pub weapon: Weapon,
    /// Current sprite dimensions
    pub size: Vec2,
    /// Ticks until the ranged weapon can fire again
    pub shot_cooldown: u32,
    /// Shots fired by the avatar that are still in flight
    pub shots: Vec<Projectile>,
}

impl Avatar {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel_y: 0.0,
            facing: Facing::Right,
            jumping: false,
            weapon: Weapon::None,
            size,
            shot_cooldown: 0,
            shots: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    #[inline]
    pub fn holds_melee(&self) -> bool {
        self.weapon == Weapon::Melee
    }

    #[inline]
    pub fn holds_ranged(&self) -> bool {
        self.weapon == Weapon::Ranged
    }

    /// Switch to the sprite matching the held weapon, keeping the feet in place
    pub fn resize(&mut self, size: Vec2) {
        let old_bottom = self.bottom();
        self.size = size;
        self.pos.y += old_bottom - self.bottom();
    }
}

/// The boss: fixed x anchor, falls onto platforms, takes ranged hits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub health: u8,
    pub defeated: bool,
    /// Invulnerability ticks remaining after a hit
    pub hit_cooldown: u32,
}

impl Boss {
    pub fn new(pos: Vec2, size: Vec2, health: u8) -> Self {
        Self {
            pos,
            vel_y: 0.0,
            size,
            health,
            defeated: false,
            hit_cooldown: 0,
        }
    }

    /// The boss stays collidable when defeated (it can still be reached)
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Gravity and landing; the hit cooldown keeps ticking after defeat
    pub fn update(&mut self, platforms: &[Platform], tuning: &Tuning) {
        self.hit_cooldown = self.hit_cooldown.saturating_sub(1);
        if self.defeated {
            return;
        }
        body::fall(
            &mut self.pos,
            &mut self.vel_y,
            self.size,
            platforms,
            &tuning.boss.body,
        );
    }

    /// Attempt to damage the boss.
    ///
    /// Rejected while the invulnerability window is open or once defeated.
    /// Returns true if this hit defeated the boss.
    pub fn take_hit(&mut self, cooldown: u32) -> bool {
        if self.hit_cooldown > 0 || self.defeated {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        self.hit_cooldown = cooldown;
        log::info!("Boss hit! Health: {}", self.health);

        if self.health == 0 {
            self.defeated = true;
            log::info!("Boss defeated");
            return true;
        }
        false
    }
}

/// A falling barrel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub state: EntityState,
}

impl Hazard {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel_y: 0.0,
            size,
            state: EntityState::Active,
        }
    }

    pub fn bounds(&self) -> Rect {
        if self.state.is_active() {
            Rect::from_center(self.pos, self.size)
        } else {
            Rect::EMPTY
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// Patrolling enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Plain,
    /// Throws a lobbed projectile every shoot interval
    Ranged { shoot_timer: u32 },
}

/// A waypoint-driven patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    /// Walking direction; horizontal velocity is `facing.sign() * speed`
    pub facing: Facing,
    /// Distance to walk before each turn, cycled in order
    pub waypoints: Vec<f32>,
    pub waypoint_index: usize,
    /// Distance walked since the last waypoint turn
    pub distance: f32,
    pub state: EntityState,
}

impl Enemy {
    pub fn new(
        kind: EnemyKind,
        pos: Vec2,
        size: Vec2,
        facing: Facing,
        waypoints: Vec<f32>,
    ) -> Self {
        Self {
            kind,
            pos,
            vel_y: 0.0,
            size,
            facing,
            waypoints,
            waypoint_index: 0,
            distance: 0.0,
            state: EntityState::Active,
        }
    }

    pub fn bounds(&self) -> Rect {
        if self.state.is_active() {
            Rect::from_center(self.pos, self.size)
        } else {
            Rect::EMPTY
        }
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self.kind, EnemyKind::Ranged { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Thrown by ranged enemies; fatal to the avatar
    Lobbed,
    /// Fired by the avatar's ranged weapon
    Fired,
}

/// A straight-line projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    /// Signed horizontal speed (pixels/tick)
    pub vel_x: f32,
    pub distance: f32,
    pub max_range: f32,
    pub size: Vec2,
    pub state: EntityState,
}

impl Projectile {
    pub fn new(
        kind: ProjectileKind,
        pos: Vec2,
        facing: Facing,
        params: &ProjectileTuning,
        size: Vec2,
    ) -> Self {
        Self {
            kind,
            pos,
            vel_x: facing.sign() * params.speed,
            distance: 0.0,
            max_range: params.max_range,
            size,
            state: EntityState::Active,
        }
    }

    pub fn bounds(&self) -> Rect {
        if self.state.is_active() {
            Rect::from_center(self.pos, self.size)
        } else {
            Rect::EMPTY
        }
    }

    pub fn facing(&self) -> Facing {
        if self.vel_x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Melee,
    Ranged,
}

/// A weapon lying in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub state: EntityState,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            pos,
            size,
            state: EntityState::Active,
        }
    }

    pub fn bounds(&self) -> Rect {
        if self.state.is_active() {
            Rect::from_center(self.pos, self.size)
        } else {
            Rect::EMPTY
        }
    }

    pub fn collect(&mut self) {
        log::info!(
            "{:?} pickup at ({}, {}) collected",
            self.kind,
            self.pos.x,
            self.pos.y
        );
        self.state = EntityState::Destroyed;
    }
}

/// One playthrough of one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSession {
    pub variant: LevelVariant,
    pub tuning: Tuning,
    /// Ticks simulated so far
    pub frame: u32,
    /// Ticks allowed before the level is lost
    pub max_frames: u32,
    pub score: u32,
    /// Ranged ammo credit (armed variant)
    pub ammo: u32,
    pub phase: SessionPhase,
    pub avatar: Avatar,
    pub boss: Boss,
    pub hazards: Vec<Hazard>,
    /// Plain enemies first, then ranged ones
    pub enemies: Vec<Enemy>,
    /// Projectiles thrown by ranged enemies
    pub lobbed: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub terrain: Terrain,
    /// Set once the player confirms a terminal outcome
    acknowledged: bool,
}

impl LevelSession {
    /// Build a session from a resolved layout.
    ///
    /// Fails if the layout or tuning is invalid; no partially-valid session
    /// is ever produced.
    pub fn new(layout: &LevelLayout, tuning: Tuning) -> ConfigResult<Self> {
        tuning.validate()?;
        layout.validate(&tuning)?;

        let sprites = &tuning.sprites;
        let platforms = layout
            .platforms
            .iter()
            .map(|&p| Platform::new(p, sprites.platform))
            .collect();
        let ladders = layout
            .ladders
            .iter()
            .map(|&p| Ladder::new(p, sprites.ladder))
            .collect();

        let hazards = layout
            .hazards
            .iter()
            .map(|&p| Hazard::new(p, sprites.hazard))
            .collect();

        let (melee_size, ranged_size) = (sprites.melee_pickup, sprites.ranged_pickup);
        let pickups = layout
            .melee_pickups
            .iter()
            .map(|&p| Pickup::new(PickupKind::Melee, p, melee_size))
            .chain(
                layout
                    .ranged_pickups
                    .iter()
                    .map(|&p| Pickup::new(PickupKind::Ranged, p, ranged_size)),
            )
            .collect();

        let thrower = EnemyKind::Ranged { shoot_timer: 0 };
        let enemies = layout
            .plain_enemies
            .iter()
            .map(|spawn| (EnemyKind::Plain, sprites.plain_enemy, spawn))
            .chain(
                layout
                    .ranged_enemies
                    .iter()
                    .map(|spawn| (thrower, sprites.ranged_enemy, spawn)),
            )
            .map(|(kind, size, spawn)| {
                Enemy::new(
                    kind,
                    spawn.pos,
                    size,
                    spawn.facing,
                    spawn.waypoints.iter().map(|&w| w as f32).collect(),
                )
            })
            .collect();

        let session = Self {
            variant: layout.variant,
            frame: 0,
            max_frames: layout.max_frames,
            score: 0,
            ammo: 0,
            phase: SessionPhase::Playing,
            avatar: Avatar::new(layout.avatar, sprites.avatar),
            boss: Boss::new(layout.boss, sprites.boss, tuning.boss.max_health),
            hazards,
            enemies,
            lobbed: Vec::new(),
            pickups,
            terrain: Terrain { platforms, ladders },
            acknowledged: false,
            tuning,
        };

        log::info!(
            "{:?} level ready: {} hazards, {} enemies, {} platforms, {} ladders, {} frames",
            session.variant,
            session.hazards.len(),
            session.enemies.len(),
            session.terrain.platforms.len(),
            session.terrain.ladders.len(),
            session.max_frames
        );

        Ok(session)
    }

    /// Whole seconds remaining in the frame budget
    pub fn seconds_left(&self) -> u32 {
        self.max_frames.saturating_sub(self.frame) / self.tuning.tick_rate
    }

    /// True once a terminal outcome has been confirmed by the player
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub(crate) fn acknowledge(&mut self) {
        if !self.acknowledged {
            log::info!("{:?} acknowledged", self.phase);
        }
        self.acknowledged = true;
    }
}
