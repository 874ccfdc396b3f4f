//! Kinematic body: gravity, terminal velocity and platform landing
//!
//! Every falling thing (avatar, boss, hazards, enemies) runs the same
//! integration with its own constants. Only the landing test differs per kind,
//! selected by [`Footing`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Platform;
use crate::POSITION_EPSILON;

/// How a body decides it is standing on a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Footing {
    /// Any overlap with the platform box
    Overlap,
    /// Feet within `tolerance` of the platform top, horizontal spans touching
    Feet { tolerance: f32 },
    /// Overlap, and the feet crossed the platform top during this tick's fall
    Crossing,
}

/// Per-kind physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    /// Added to vertical velocity every tick (pixels/tick²)
    pub gravity: f32,
    /// Maximum downward velocity (pixels/tick)
    pub terminal_velocity: f32,
    pub footing: Footing,
}

/// Apply one tick of gravity, clamped to terminal velocity
#[inline]
pub fn accelerate(vel_y: f32, params: &BodyParams) -> f32 {
    (vel_y + params.gravity).min(params.terminal_velocity)
}

/// Snap the body onto the first platform it rests on.
///
/// Only evaluated while not ascending. Returns the index of the supporting
/// platform, with the body's bottom edge on the platform top and `vel_y` zeroed.
pub fn land(
    pos: &mut Vec2,
    vel_y: &mut f32,
    size: Vec2,
    platforms: &[Platform],
    footing: Footing,
) -> Option<usize> {
    if *vel_y < 0.0 {
        return None;
    }

    let body = Rect::from_center(*pos, size);
    let index = platforms
        .iter()
        .position(|p| rests_on(&body, *vel_y, &p.bounds(), footing))?;

    pos.y = platforms[index].bounds().top - size.y / 2.0;
    *vel_y = 0.0;
    Some(index)
}

fn rests_on(body: &Rect, vel_y: f32, platform: &Rect, footing: Footing) -> bool {
    match footing {
        Footing::Overlap => body.intersects(platform),
        Footing::Feet { tolerance } => {
            (body.bottom() - platform.top).abs() < tolerance
                && body.right() >= platform.left
                && body.left <= platform.right()
        }
        Footing::Crossing => {
            body.intersects(platform) && body.bottom() <= platform.top + vel_y + POSITION_EPSILON
        }
    }
}

/// Full kinematic step: accelerate, integrate, land
pub fn fall(
    pos: &mut Vec2,
    vel_y: &mut f32,
    size: Vec2,
    platforms: &[Platform],
    params: &BodyParams,
) -> Option<usize> {
    *vel_y = accelerate(*vel_y, params);
    pos.y += *vel_y;
    land(pos, vel_y, size, platforms, params.footing)
}
