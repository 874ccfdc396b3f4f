//! Straight-line projectile flight
//!
//! Lobbed and fired projectiles share one motion rule: constant horizontal
//! speed, destroyed after `max_range` pixels or on leaving the screen.

use glam::Vec2;

use super::state::{EntityState, Projectile};

impl Projectile {
    /// Advance one tick. Returns true if the projectile is (now) destroyed.
    pub fn advance(&mut self, screen: Vec2) -> bool {
        if !self.state.is_active() {
            return true;
        }

        self.pos.x += self.vel_x;
        self.distance += self.vel_x.abs();

        let off_screen =
            self.pos.x < 0.0 || self.pos.x > screen.x || self.pos.y < 0.0 || self.pos.y > screen.y;
        if self.distance >= self.max_range || off_screen {
            self.state = EntityState::Destroyed;
        }
        !self.state.is_active()
    }
}

/// Advance every projectile and drop the destroyed ones
pub fn advance_all(projectiles: &mut Vec<Projectile>, screen: Vec2) {
    projectiles.retain_mut(|p| !p.advance(screen));
}
