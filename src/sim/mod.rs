//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (layout order)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod body;
pub mod collision;
pub mod patrol;
pub mod projectile;
pub mod rect;
pub mod resolve;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::{BodyParams, Footing};
pub use collision::Collider;
pub use rect::Rect;
pub use resolve::CollisionOutcome;
pub use snapshot::{EntityView, Hud, Snapshot, SpriteKey, build_snapshot};
pub use state::{
    Avatar, Boss, Enemy, EnemyKind, EntityState, Facing, Hazard, Ladder, LevelSession,
    LevelVariant, Pickup, PickupKind, Platform, Projectile, ProjectileKind, SessionPhase, Terrain,
    Weapon,
};
pub use tick::{SessionResult, TickInput, tick};
