//! Collision predicates
//!
//! Every predicate re-checks the entity state before any geometry, so a
//! destroyed or collected entity can never be hit, collected or scored twice.

use super::rect::Rect;
use super::state::{Avatar, Boss, Enemy, Hazard, Pickup, Projectile};

/// Anything the avatar or a fired shot can touch
pub trait Collider {
    fn bounds(&self) -> Rect;
    fn is_active(&self) -> bool;
}

macro_rules! impl_collider {
    ($($ty:ty),*) => {
        $(impl Collider for $ty {
            #[inline]
            fn bounds(&self) -> Rect {
                <$ty>::bounds(self)
            }

            #[inline]
            fn is_active(&self) -> bool {
                self.state.is_active()
            }
        })*
    };
}

impl_collider!(Hazard, Enemy, Projectile, Pickup);

/// Active-state check first, then box intersection
#[inline]
pub fn touching(body: &Rect, other: &impl Collider) -> bool {
    other.is_active() && body.intersects(&other.bounds())
}

/// Both sides must be active
#[inline]
pub fn overlaps(a: &impl Collider, b: &impl Collider) -> bool {
    a.is_active() && b.is_active() && a.bounds().intersects(&b.bounds())
}

/// The avatar has reached the boss
pub fn reached(avatar: &Avatar, boss: &Boss) -> bool {
    avatar.bounds().intersects(&boss.bounds())
}

/// The avatar is jumping directly above an active hazard, high enough to clear it.
///
/// `apex` is the height of a full jump, `jump_speed² / (2 * gravity)`.
pub fn jump_over(avatar: &Avatar, hazard: &Hazard, apex: f32, tolerance: f32) -> bool {
    hazard.state.is_active()
        && avatar.jumping
        && (avatar.pos.x - hazard.pos.x).abs() <= tolerance
        && avatar.pos.y < hazard.pos.y
        && avatar.bottom() >= hazard.bottom() - apex - avatar.size.y / 2.0
}
