//! Avatar controller
//!
//! Input-driven movement, ladders, jumping, weapon pickup and shooting. The
//! update runs as a fixed sequence of steps; each reads the position left by
//! the previous one.

use glam::Vec2;

use super::body;
use super::collision::touching;
use super::projectile;
use super::state::{
    Avatar, Facing, Ladder, Pickup, PickupKind, Projectile, ProjectileKind, Terrain, Weapon,
};
use super::tick::TickInput;
use crate::nearly_eq;
use crate::tuning::Tuning;

/// Advance the avatar by one tick.
///
/// `ammo` is the session's ranged ammo counter; `None` in the basic variant,
/// which disables ranged pickups and shooting.
pub fn update(
    avatar: &mut Avatar,
    input: &TickInput,
    terrain: &Terrain,
    pickups: &mut [Pickup],
    mut ammo: Option<&mut u32>,
    tuning: &Tuning,
) {
    refresh_sprite(avatar, tuning);

    walk(avatar, input, tuning.avatar.move_speed);

    collect(avatar, pickups, PickupKind::Melee);
    if let Some(ammo) = ammo.as_deref_mut() {
        if collect(avatar, pickups, PickupKind::Ranged) {
            *ammo += tuning.avatar.ammo_per_pickup;
        }
    }

    if let Some(ammo) = ammo.as_deref_mut() {
        shoot(avatar, input, ammo, tuning);
    }

    let on_ladder = climb(avatar, input, &terrain.ladders, tuning.avatar.climb_speed);

    let params = &tuning.avatar.body;
    if !on_ladder {
        avatar.vel_y = body::accelerate(avatar.vel_y, params);
    }
    avatar.pos.y += avatar.vel_y;

    let landed = body::land(
        &mut avatar.pos,
        &mut avatar.vel_y,
        avatar.size,
        &terrain.platforms,
        params.footing,
    )
    .is_some();
    if landed {
        avatar.jumping = false;
    }

    if landed && input.jump {
        avatar.vel_y = -tuning.avatar.jump_speed;
        avatar.jumping = true;
    }

    clamp_to_screen(avatar, tuning.screen);

    projectile::advance_all(&mut avatar.shots, tuning.screen);

    refresh_sprite(avatar, tuning);
}

/// Match the sprite to the held weapon, keeping the feet in place
fn refresh_sprite(avatar: &mut Avatar, tuning: &Tuning) {
    let size = tuning.sprites.avatar_for(avatar.weapon);
    if avatar.size != size {
        avatar.resize(size);
    }
}

fn walk(avatar: &mut Avatar, input: &TickInput, speed: f32) {
    if input.move_left {
        avatar.pos.x -= speed;
        avatar.facing = Facing::Left;
    } else if input.move_right {
        avatar.pos.x += speed;
        avatar.facing = Facing::Right;
    }
}

/// Collect the first touching pickup of `kind`. Returns true on collection.
///
/// The sprite keeps its old size until the end of the update.
fn collect(avatar: &mut Avatar, pickups: &mut [Pickup], kind: PickupKind) -> bool {
    let body = avatar.bounds();
    let Some(pickup) = pickups
        .iter_mut()
        .find(|p| p.kind == kind && touching(&body, &**p))
    else {
        return false;
    };

    pickup.collect();
    avatar.weapon = match kind {
        PickupKind::Melee => Weapon::Melee,
        PickupKind::Ranged => Weapon::Ranged,
    };
    true
}

fn shoot(avatar: &mut Avatar, input: &TickInput, ammo: &mut u32, tuning: &Tuning) {
    avatar.shot_cooldown = avatar.shot_cooldown.saturating_sub(1);

    if !(input.fire && avatar.holds_ranged() && avatar.shot_cooldown == 0 && *ammo > 0) {
        return;
    }

    let offset = tuning.avatar.shot_offset;
    let origin = Vec2::new(
        avatar.pos.x + avatar.facing.sign() * offset.x,
        avatar.pos.y + offset.y,
    );
    avatar.shots.push(Projectile::new(
        ProjectileKind::Fired,
        origin,
        avatar.facing,
        &tuning.fired,
        tuning.sprites.fired,
    ));
    *ammo -= 1;
    avatar.shot_cooldown = tuning.avatar.shot_cooldown;
    log::debug!("Shot fired, {} left", *ammo);
}

/// Ladder handling; returns true while the avatar is held by a ladder.
///
/// Every ladder is checked, so overlapping ladders can each move the avatar.
fn climb(avatar: &mut Avatar, input: &TickInput, ladders: &[Ladder], speed: f32) -> bool {
    let mut on_ladder = false;

    for ladder in ladders {
        let rung = ladder.bounds();
        let centred = rung.spans_x(avatar.pos.x);
        let bottom = avatar.bottom();

        if avatar.bounds().intersects(&rung) {
            if !centred {
                continue;
            }
            on_ladder = true;

            if !input.move_up && !input.move_down {
                avatar.vel_y = 0.0;
            }
            if input.move_up {
                avatar.pos.y -= speed;
                avatar.vel_y = 0.0;
            }
            if input.move_down {
                // Bottom as it stood before any climb this tick
                let next_bottom = avatar.bottom() + speed;
                if bottom > rung.top && next_bottom <= rung.bottom() {
                    avatar.pos.y += speed;
                    avatar.vel_y = 0.0;
                } else if nearly_eq(bottom, rung.bottom()) {
                    avatar.vel_y = 0.0;
                } else if rung.bottom() - bottom < speed {
                    avatar.pos.y += rung.bottom() - bottom;
                    avatar.vel_y = 0.0;
                }
            }
        } else if input.move_down && centred {
            // Standing exactly on the ladder top steps onto it
            if nearly_eq(bottom, rung.top) {
                avatar.pos.y += speed;
                avatar.vel_y = 0.0;
                on_ladder = true;
            } else if nearly_eq(bottom, rung.bottom()) {
                avatar.vel_y = 0.0;
                on_ladder = true;
            }
        }
    }

    on_ladder
}

fn clamp_to_screen(avatar: &mut Avatar, screen: Vec2) {
    let half_w = avatar.size.x / 2.0;
    avatar.pos.x = avatar.pos.x.max(half_w).min(screen.x - half_w);

    if avatar.bottom() > screen.y {
        avatar.pos.y = screen.y - avatar.size.y / 2.0;
        avatar.vel_y = 0.0;
        avatar.jumping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityState, Platform};

    fn tuning() -> Tuning {
        Tuning::default()
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// One update with no pickups and no ammo counter
    fn step(avatar: &mut Avatar, input: &TickInput, terrain: &Terrain) {
        update(avatar, input, terrain, &mut [], None, &tuning());
    }

    /// One idle update over `pickups`, no ammo counter
    fn collect_idle(avatar: &mut Avatar, terrain: &Terrain, pickups: &mut [Pickup]) {
        update(avatar, &idle(), terrain, pickups, None, &tuning());
    }

    /// One platform whose top is at y = 500, spanning x in [0, 640]
    fn floor() -> Terrain {
        Terrain {
            platforms: vec![Platform::new(
                Vec2::new(320.0, 510.0),
                Vec2::new(640.0, 20.0),
            )],
            ladders: Vec::new(),
        }
    }

    /// Avatar standing on the floor (bottom at 500)
    fn standing(x: f32) -> Avatar {
        Avatar::new(Vec2::new(x, 480.0), Vec2::new(30.0, 40.0))
    }

    #[test]
    fn test_standing_is_stable() {
        let terrain = floor();
        let mut avatar = standing(100.0);
        for _ in 0..30 {
            step(&mut avatar, &idle(), &terrain);
        }
        assert_eq!(avatar.pos, Vec2::new(100.0, 480.0));
        assert_eq!(avatar.vel_y, 0.0);
        assert!(!avatar.jumping);
    }

    #[test]
    fn test_left_has_priority() {
        let terrain = floor();
        let mut avatar = standing(100.0);
        let input = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        step(&mut avatar, &input, &terrain);
        assert_eq!(avatar.pos.x, 96.5);
        assert_eq!(avatar.facing, Facing::Left);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let terrain = floor();
        let mut avatar = standing(100.0);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        step(&mut avatar, &jump, &terrain);
        assert!(avatar.jumping);
        assert_eq!(avatar.vel_y, -5.0);

        // Mid-air jump presses are ignored
        step(&mut avatar, &jump, &terrain);
        assert!((avatar.vel_y + 4.8).abs() < 1e-5);
    }

    #[test]
    fn test_clamped_to_screen() {
        let terrain = floor();
        let mut avatar = standing(16.0);
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        step(&mut avatar, &input, &terrain);
        assert_eq!(avatar.pos.x, 15.0);

        let mut falling = Avatar::new(Vec2::new(900.0, 740.0), Vec2::new(30.0, 40.0));
        falling.vel_y = 8.0;
        step(&mut falling, &idle(), &terrain);
        assert_eq!(falling.bottom(), 768.0);
        assert_eq!(falling.vel_y, 0.0);
    }

    #[test]
    fn test_melee_pickup_resizes_from_feet() {
        let terrain = floor();
        let mut avatar = standing(100.0);
        let mut pickups = vec![Pickup::new(
            PickupKind::Melee,
            Vec2::new(110.0, 485.0),
            Vec2::new(30.0, 30.0),
        )];
        collect_idle(&mut avatar, &terrain, &mut pickups);
        assert_eq!(avatar.weapon, Weapon::Melee);
        assert_eq!(avatar.size, tuning().sprites.avatar_melee);
        assert_eq!(avatar.bottom(), 500.0);
        assert_eq!(pickups[0].state, EntityState::Destroyed);
    }

    #[test]
    fn test_ranged_pickup_ignored_without_ammo_counter() {
        let terrain = floor();
        let mut avatar = standing(100.0);
        let mut pickups = vec![Pickup::new(
            PickupKind::Ranged,
            Vec2::new(100.0, 485.0),
            Vec2::new(32.0, 24.0),
        )];
        collect_idle(&mut avatar, &terrain, &mut pickups);
        assert_eq!(avatar.weapon, Weapon::None);
        assert!(pickups[0].state.is_active());
    }

    #[test]
    fn test_ranged_pickup_and_shooting() {
        let terrain = floor();
        let tuning = tuning();
        let mut avatar = standing(100.0);
        let mut ammo = 0;
        let mut pickups = vec![Pickup::new(
            PickupKind::Ranged,
            Vec2::new(100.0, 485.0),
            Vec2::new(32.0, 24.0),
        )];
        let idle = idle();
        update(
            &mut avatar,
            &idle,
            &terrain,
            &mut pickups,
            Some(&mut ammo),
            &tuning,
        );
        assert_eq!(avatar.weapon, Weapon::Ranged);
        assert_eq!(ammo, 5);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        update(
            &mut avatar,
            &fire,
            &terrain,
            &mut pickups,
            Some(&mut ammo),
            &tuning,
        );
        assert_eq!(ammo, 4);
        assert_eq!(avatar.shots.len(), 1);
        // Spawned at x + 20, then advanced once
        assert_eq!(avatar.shots[0].pos.x, 120.0 + tuning.fired.speed);
        assert_eq!(avatar.shots[0].pos.y, avatar.pos.y - 5.0);

        // Cooldown blocks the next press
        update(
            &mut avatar,
            &fire,
            &terrain,
            &mut pickups,
            Some(&mut ammo),
            &tuning,
        );
        assert_eq!(ammo, 4);
        assert_eq!(avatar.shots.len(), 1);
    }

    #[test]
    fn test_no_shot_without_ammo() {
        let terrain = floor();
        let mut avatar = standing(100.0);
        avatar.weapon = Weapon::Ranged;
        let mut ammo = 0;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        update(
            &mut avatar,
            &fire,
            &terrain,
            &mut [],
            Some(&mut ammo),
            &tuning(),
        );
        assert!(avatar.shots.is_empty());
    }

    #[test]
    fn test_climb_up_ladder() {
        let mut terrain = floor();
        // Spans y in [342, 500], x in [80, 120]
        terrain
            .ladders
            .push(Ladder::new(Vec2::new(100.0, 421.0), Vec2::new(40.0, 158.0)));
        let mut avatar = standing(100.0);
        let up = TickInput {
            move_up: true,
            ..Default::default()
        };
        for _ in 0..10 {
            step(&mut avatar, &up, &terrain);
        }
        assert_eq!(avatar.pos.y, 460.0);
        assert_eq!(avatar.vel_y, 0.0);

        // Releasing the keys holds position on the ladder
        step(&mut avatar, &idle(), &terrain);
        assert_eq!(avatar.pos.y, 460.0);
    }

    #[test]
    fn test_step_down_from_ladder_top() {
        let mut terrain = floor();
        // Upper platform top at 342, ladder top at 342
        terrain.platforms.push(Platform::new(
            Vec2::new(300.0, 352.0),
            Vec2::new(128.0, 20.0),
        ));
        terrain
            .ladders
            .push(Ladder::new(Vec2::new(300.0, 421.0), Vec2::new(40.0, 158.0)));
        let mut avatar = Avatar::new(Vec2::new(300.0, 322.0), Vec2::new(30.0, 40.0));
        let down = TickInput {
            move_down: true,
            ..Default::default()
        };
        step(&mut avatar, &down, &terrain);
        assert_eq!(avatar.bottom(), 344.0);
        assert_eq!(avatar.vel_y, 0.0);
    }

    /// Ladder spanning y in [342, 500] at x = 100, its foot on the floor
    fn floor_with_ladder() -> Terrain {
        let mut terrain = floor();
        terrain
            .ladders
            .push(Ladder::new(Vec2::new(100.0, 421.0), Vec2::new(40.0, 158.0)));
        terrain
    }

    fn feet_at(bottom: f32) -> Avatar {
        let mut avatar = Avatar::new(Vec2::new(100.0, bottom - 20.0), Vec2::new(30.0, 40.0));
        avatar.vel_y = 1.0;
        avatar
    }

    #[test]
    fn test_climb_down_stops_at_ladder_bottom() {
        let terrain = floor_with_ladder();
        let down = TickInput {
            move_down: true,
            ..Default::default()
        };

        let mut avatar = feet_at(399.0);
        step(&mut avatar, &down, &terrain);
        assert_eq!(avatar.bottom(), 401.0);
        assert_eq!(avatar.vel_y, 0.0);

        for _ in 0..80 {
            step(&mut avatar, &down, &terrain);
        }
        assert_eq!(avatar.bottom(), 500.0);
        assert_eq!(avatar.vel_y, 0.0);
    }

    #[test]
    fn test_climb_down_snaps_last_partial_step() {
        let terrain = floor_with_ladder();
        let down = TickInput {
            move_down: true,
            ..Default::default()
        };
        let mut avatar = feet_at(499.0);
        step(&mut avatar, &down, &terrain);
        assert_eq!(avatar.bottom(), 500.0);
        assert_eq!(avatar.vel_y, 0.0);
    }

    #[test]
    fn test_holds_at_ladder_bottom() {
        let terrain = floor_with_ladder();
        let down = TickInput {
            move_down: true,
            ..Default::default()
        };
        let mut avatar = feet_at(500.0);
        for _ in 0..5 {
            step(&mut avatar, &down, &terrain);
            assert_eq!(avatar.bottom(), 500.0);
            assert_eq!(avatar.vel_y, 0.0);
        }
    }

    #[test]
    fn test_pickup_resize_waits_for_end_of_update() {
        let mut terrain = floor();
        // Ladder bottom at 276, four pixels above the unarmed head
        terrain
            .ladders
            .push(Ladder::new(Vec2::new(100.0, 197.0), Vec2::new(40.0, 158.0)));
        let mut avatar = Avatar::new(Vec2::new(100.0, 300.0), Vec2::new(30.0, 40.0));
        let mut pickups = vec![Pickup::new(
            PickupKind::Melee,
            Vec2::new(100.0, 300.0),
            Vec2::new(30.0, 30.0),
        )];

        collect_idle(&mut avatar, &terrain, &mut pickups);
        assert_eq!(avatar.weapon, Weapon::Melee);
        assert_eq!(avatar.size, tuning().sprites.avatar_melee);
        // Fell under gravity with the unarmed box, then grew from the feet
        assert!((avatar.vel_y - 0.2).abs() < 1e-5);
        assert!((avatar.bottom() - 320.2).abs() < 1e-3);
        assert!((avatar.pos.y - 296.2).abs() < 1e-3);
    }

    #[test]
    fn test_off_centre_ladder_is_ignored() {
        let mut terrain = floor();
        terrain
            .ladders
            .push(Ladder::new(Vec2::new(100.0, 421.0), Vec2::new(40.0, 158.0)));
        // Boxes overlap but the centre lies outside the ladder span
        let mut avatar = standing(125.0);
        let up = TickInput {
            move_up: true,
            ..Default::default()
        };
        step(&mut avatar, &up, &terrain);
        assert_eq!(avatar.pos.y, 480.0);
    }
}
