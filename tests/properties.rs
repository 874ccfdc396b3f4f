use barrel_run::sim::body::{self, BodyParams, Footing};
use barrel_run::sim::resolve::resolve;
use barrel_run::sim::{
    Enemy, EnemyKind, EntityState, Facing, Hazard, LevelSession, LevelVariant, Platform,
    Projectile, ProjectileKind,
};
use barrel_run::tuning::ProjectileTuning;
use barrel_run::{LevelLayout, Tuning};
use glam::Vec2;
use proptest::prelude::*;

const SCREEN: Vec2 = Vec2::new(1024.0, 768.0);

fn footing() -> impl Strategy<Value = Footing> {
    prop_oneof![
        Just(Footing::Overlap),
        (2.5f32..10.0).prop_map(|tolerance| Footing::Feet { tolerance }),
        Just(Footing::Crossing),
    ]
}

fn facing() -> impl Strategy<Value = Facing> {
    prop_oneof![Just(Facing::Left), Just(Facing::Right)]
}

proptest! {
    /// A destroyed entity overlapping the avatar is never scored or fatal
    #[test]
    fn destroyed_entities_never_collide(
        offset in prop::array::uniform2(-20.0f32..20.0),
        armed in any::<bool>(),
    ) {
        let variant = if armed { LevelVariant::Armed } else { LevelVariant::Basic };
        let mut layout = LevelLayout::default_for(variant);
        layout.hazards.clear();
        layout.plain_enemies.clear();
        layout.ranged_enemies.clear();
        let mut session = LevelSession::new(&layout, Tuning::default()).unwrap();

        let at = session.avatar.pos + Vec2::from(offset);
        let mut hazard = Hazard::new(at, Vec2::splat(28.0));
        hazard.state = EntityState::Destroyed;
        session.hazards.push(hazard);

        let mut enemy = Enemy::new(EnemyKind::Plain, at, Vec2::splat(40.0), Facing::Left, vec![10.0]);
        enemy.state = EntityState::Destroyed;
        session.enemies.push(enemy);

        let outcome = resolve(&mut session);
        prop_assert!(!outcome.game_over);
        prop_assert_eq!(outcome.score_delta, 0);
    }

    /// Resting on a platform is a fixed point of the kinematic step
    #[test]
    fn rest_on_platform_is_stable(
        platform_pos in (100.0f32..900.0, 100.0f32..700.0),
        width in 40.0f32..300.0,
        body_size in (4.0f32..40.0, 4.0f32..60.0),
        gravity in 0.1f32..2.0,
        footing in footing(),
        ticks in 1usize..200,
    ) {
        let platforms = [Platform::new(Vec2::new(platform_pos.0, platform_pos.1), Vec2::new(width, 20.0))];
        let size = Vec2::new(body_size.0, body_size.1);
        let params = BodyParams { gravity, terminal_velocity: 5.0, footing };

        let rest_y = platforms[0].bounds().top - size.y / 2.0;
        let mut pos = Vec2::new(platform_pos.0, rest_y);
        let mut vel_y = 0.0;
        for _ in 0..ticks {
            let landed = body::fall(&mut pos, &mut vel_y, size, &platforms, &params);
            prop_assert_eq!(landed, Some(0));
        }
        prop_assert_eq!(pos.y, rest_y);
        prop_assert_eq!(vel_y, 0.0);
    }

    /// The waypoint index always stays inside the route
    #[test]
    fn waypoint_index_stays_in_range(
        waypoints in prop::collection::vec(1u32..200, 1..6),
        start_x in 200.0f32..800.0,
        facing in facing(),
        ticks in 0usize..3000,
    ) {
        let platforms = [Platform::new(Vec2::new(512.0, 510.0), Vec2::new(1024.0, 20.0))];
        let params = BodyParams {
            gravity: 0.4,
            terminal_velocity: 5.0,
            footing: Footing::Feet { tolerance: 5.0 },
        };
        let len = waypoints.len();
        let mut enemy = Enemy::new(
            EnemyKind::Plain,
            Vec2::new(start_x, 480.0),
            Vec2::splat(40.0),
            facing,
            waypoints.into_iter().map(|w| w as f32).collect(),
        );

        for _ in 0..ticks {
            enemy.patrol(&platforms, &params, 0.5);
            prop_assert!(enemy.waypoint_index < len);
        }
    }

    /// A projectile is only destroyed at max range or off-screen
    #[test]
    fn projectile_destruction_has_a_cause(
        start in (0.0f32..1024.0, 0.0f32..768.0),
        facing in facing(),
        speed in 0.5f32..10.0,
        max_range in 10.0f32..600.0,
    ) {
        let params = ProjectileTuning { speed, max_range };
        let mut projectile = Projectile::new(
            ProjectileKind::Fired,
            Vec2::new(start.0, start.1),
            facing,
            &params,
            Vec2::new(20.0, 8.0),
        );

        let mut destroyed = false;
        for _ in 0..2000 {
            if projectile.advance(SCREEN) {
                destroyed = true;
                break;
            }
            prop_assert!(projectile.distance < max_range);
        }
        prop_assert!(destroyed);

        let p = projectile.pos;
        let off_screen = p.x < 0.0 || p.x > SCREEN.x || p.y < 0.0 || p.y > SCREEN.y;
        prop_assert!(projectile.distance >= max_range || off_screen);
    }
}
