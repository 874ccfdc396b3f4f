//! Waypoint patrol and enemy throwing
//!
//! An enemy walks at constant speed while grounded. It turns around when the
//! distance walked reaches the current waypoint, or when the next step would
//! carry its leading edge past the end of the supporting platform.

use glam::Vec2;

use super::body::{self, BodyParams};
use super::state::{Enemy, EnemyKind, Facing, Platform, Projectile, ProjectileKind};
use crate::tuning::ProjectileTuning;

impl Enemy {
    /// One tick of gravity and patrol movement
    pub fn patrol(&mut self, platforms: &[Platform], params: &BodyParams, speed: f32) {
        if !self.state.is_active() {
            return;
        }

        let Some(ground) = body::fall(&mut self.pos, &mut self.vel_y, self.size, platforms, params)
        else {
            return;
        };
        let support = platforms[ground].bounds();

        self.pos.x += self.facing.sign() * speed;
        self.distance += speed;

        let reached = self
            .waypoints
            .get(self.waypoint_index)
            .is_some_and(|&w| self.distance >= w);

        let half = self.size.x / 2.0;
        let at_edge = match self.facing {
            Facing::Right => self.pos.x + half + speed > support.right(),
            Facing::Left => self.pos.x - half - speed < support.left,
        };

        if reached || at_edge {
            self.facing = self.facing.flipped();
        }
        if reached {
            self.distance = 0.0;
            self.waypoint_index = (self.waypoint_index + 1) % self.waypoints.len();
        }
    }

    /// Ranged enemies throw once every `interval` ticks, starting from the
    /// leading edge at body height
    pub fn tick_shooter(
        &mut self,
        interval: u32,
        params: &ProjectileTuning,
        size: Vec2,
    ) -> Option<Projectile> {
        if !self.state.is_active() {
            return None;
        }
        let EnemyKind::Ranged { shoot_timer } = &mut self.kind else {
            return None;
        };

        *shoot_timer += 1;
        if *shoot_timer < interval {
            return None;
        }
        *shoot_timer = 0;

        let origin = Vec2::new(
            self.pos.x + self.facing.sign() * self.size.x / 2.0,
            self.pos.y,
        );
        log::debug!("Enemy threw at ({}, {})", origin.x, origin.y);
        Some(Projectile::new(
            ProjectileKind::Lobbed,
            origin,
            self.facing,
            params,
            size,
        ))
    }
}
