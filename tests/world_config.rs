use approx::assert_relative_eq;

use polyarena_rs::dynamics::{BodyDef, World, WorldConfig};
use polyarena_rs::math::Vec2;

#[test]
fn integration_world_step_dt_zero_is_noop_for_state() {
    let mut world = World::default();

    let h = world
        .create_body(BodyDef {
            position: Vec2::new(300.0, 200.0),
            velocity: Vec2::new(5.0, 5.0),
            ..Default::default()
        })
        .unwrap();

    let before_pos = world.body(h).unwrap().position();
    let before_vel = world.body(h).unwrap().velocity();

    world.step(0.0);

    let b = world.body(h).unwrap();
    assert_eq!(b.position(), before_pos);
    assert_eq!(b.velocity(), before_vel);
}

#[test]
fn integration_config_unscaled_gravity_is_per_tick() {
    let dt = 1.0 / 60.0;
    let mut scaled = World::default();
    let mut per_tick = World::new(WorldConfig {
        scale_gravity_by_dt: false,
        ..WorldConfig::default()
    });

    for w in [&mut scaled, &mut per_tick] {
        w.create_body(BodyDef {
            position: Vec2::new(300.0, 200.0),
            ..Default::default()
        })
        .unwrap();
    }

    scaled.step(dt);
    per_tick.step(dt);

    let vs = scaled.bodies().next().unwrap().1.velocity().y;
    let vp = per_tick.bodies().next().unwrap().1.velocity().y;
    assert_relative_eq!(vs, 4.0 * dt, epsilon = 1e-6);
    assert_relative_eq!(vp, 4.0, epsilon = 1e-6);
}

#[test]
fn integration_config_restitution_zero_matches_velocities() {
    let mut world = World::new(WorldConfig {
        gravity: 0.0,
        restitution: 0.0,
        ..WorldConfig::default()
    });
    let a = world
        .create_body(BodyDef {
            position: Vec2::new(300.0, 300.0),
            velocity: Vec2::new(10.0, 0.0),
            mass: 1.0,
            ..Default::default()
        })
        .unwrap();
    let b = world
        .create_body(BodyDef {
            position: Vec2::new(330.0, 300.0),
            velocity: Vec2::new(-10.0, 0.0),
            mass: 1.0,
            ..Default::default()
        })
        .unwrap();

    world.resolve_collisions();

    // Perfectly inelastic along the normal: both end at the centre-of-mass velocity.
    assert_relative_eq!(world.body(a).unwrap().velocity().x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(world.body(b).unwrap().velocity().x, 0.0, epsilon = 1e-5);
}

#[test]
fn integration_config_custom_arena_clamps() {
    let mut world = World::new(WorldConfig {
        arena: Vec2::new(200.0, 100.0),
        ..WorldConfig::default()
    });
    let h = world
        .create_body(BodyDef {
            half_extent: Vec2::new(10.0, 10.0),
            position: Vec2::new(500.0, 500.0),
            ..Default::default()
        })
        .unwrap();

    world.step(1.0 / 60.0);

    let p = world.body(h).unwrap().position();
    assert_relative_eq!(p.x, 190.0);
    assert_relative_eq!(p.y, 90.0);
}
