//! Integrate velocities and gravity into positions.
//!
//! Velocities are in pixels per reference tick, so every step is scaled by
//! the fraction of a tick that `WorldTime::delta_ms` covers. Bodies that land
//! on the floor are clamped to it and marked grounded; confined bodies are
//! kept inside the playfield horizontally.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::playfield::Playfield;
use crate::resources::worldtime::WorldTime;
use crate::systems::time::tick_fraction;

pub fn movement(
    mut query: Query<(&mut MapPosition, &mut RigidBody, &BoxCollider)>,
    time: Res<WorldTime>,
    playfield: Res<Playfield>,
) {
    let ticks = tick_fraction(time.delta_ms);
    for (mut position, mut rigidbody, collider) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let accel = rigidbody.total_acceleration();
        rigidbody.velocity += accel.scale_by(ticks);
        position.pos += rigidbody.velocity.scale_by(ticks);

        if rigidbody.lands_on_floor {
            let floor = playfield.floor_y();
            if position.pos.y >= floor {
                position.pos.y = floor;
                if rigidbody.velocity.y > 0.0 {
                    rigidbody.velocity.y = 0.0;
                }
                rigidbody.grounded = true;
            } else {
                rigidbody.grounded = false;
            }
        }

        if rigidbody.confined {
            position.pos.x = playfield.clamp_x(position.pos.x, collider.size.x * 0.5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    fn world_with(dt_ms: u32) -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta_ms: dt_ms,
            ..WorldTime::default()
        });
        world.insert_resource(Playfield::new(800.0, 600.0, 10.0));
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(movement);
        schedule.run(world);
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let mut world = world_with(1000 / 60);
        let mut body = RigidBody::grounded_walker(1.0);
        body.velocity = Vector2::new(0.0, -20.0);
        body.grounded = false;
        let e = world
            .spawn((MapPosition::new(100.0, 590.0), body, BoxCollider::new(40.0, 80.0)))
            .id();
        run(&mut world);
        let y = world.get::<MapPosition>(e).unwrap().pos.y;
        assert!(y < 590.0);
        assert!(!world.get::<RigidBody>(e).unwrap().grounded);
        for _ in 0..120 {
            run(&mut world);
        }
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos.y, 590.0);
        let body = world.get::<RigidBody>(e).unwrap();
        assert!(body.grounded);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_frozen_body_does_not_move() {
        let mut world = world_with(16);
        let mut body = RigidBody::new();
        body.velocity = Vector2::new(5.0, 0.0);
        body.freeze();
        let e = world
            .spawn((MapPosition::new(100.0, 300.0), body, BoxCollider::new(40.0, 80.0)))
            .id();
        run(&mut world);
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos.x, 100.0);
    }

    #[test]
    fn test_confined_body_stops_at_edge() {
        let mut world = world_with(16);
        let mut body = RigidBody::new();
        body.confined = true;
        body.velocity = Vector2::new(-50.0, 0.0);
        let e = world
            .spawn((MapPosition::new(30.0, 300.0), body, BoxCollider::new(40.0, 80.0)))
            .id();
        run(&mut world);
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos.x, 20.0);
    }
}
