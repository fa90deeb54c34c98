//! Track-sized scenarios run through the full collision world
//!
//! A small "track" of closed-box meshes plus a few moving bodies, queried
//! through the public world API.

use std::rc::Rc;

use crate::core::config::{PartitionConfig, PhysicsConfig};
use crate::foundation::math::{Quat, Vec3};
use crate::physics::{
    CollisionObject, CollisionObjectSettings, CollisionSettings, CollisionWorld, ObjectHandle, ObjectId,
    SurfaceType, TrackSurface,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Closed box mesh of 12 triangles
    fn box_mesh(center: Vec3, half: f32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let vertices = (0..8)
            .map(|i| {
                let sx = if i & 1 == 0 { -half } else { half };
                let sy = if i & 2 == 0 { -half } else { half };
                let sz = if i & 4 == 0 { -half } else { half };
                center + Vec3::new(sx, sy, sz)
            })
            .collect();
        let faces = vec![
            [0, 2, 1], [1, 2, 3],
            [4, 5, 6], [5, 7, 6],
            [0, 1, 4], [1, 5, 4],
            [2, 6, 3], [3, 6, 7],
            [0, 4, 2], [2, 4, 6],
            [1, 3, 5], [3, 7, 5],
        ];
        (vertices, faces)
    }

    fn track_piece(center: Vec3, settings: CollisionObjectSettings) -> ObjectHandle {
        let (vertices, faces) = box_mesh(center, 2.0);
        assert_eq!(faces.len(), 12);
        CollisionObject::trimesh(&vertices, &faces, settings)
            .expect("closed box mesh")
            .with_surface(Rc::new(TrackSurface::new(SurfaceType::Asphalt)))
            .into_handle()
    }

    fn body(position: Vec3, settings: CollisionObjectSettings) -> ObjectHandle {
        CollisionObject::cuboid(Vec3::new(1.0, 1.0, 1.0), settings)
            .expect("valid box")
            .with_pose(position, Quat::identity())
            .into_handle()
    }

    struct Track {
        world: CollisionWorld,
        pieces: Vec<ObjectHandle>,
        car: ObjectHandle,
    }

    fn build_track() -> Track {
        let mut world = CollisionWorld::new(&PhysicsConfig::default());
        let pieces: Vec<ObjectHandle> = [-20.0, 0.0, 20.0]
            .iter()
            .map(|&x| track_piece(Vec3::new(x, 0.0, 0.0), CollisionObjectSettings::new_static()))
            .collect();
        for piece in &pieces {
            world.add_physics_object(piece);
        }

        let car = body(Vec3::new(0.0, 3.5, 0.0), CollisionObjectSettings::new_dynamic().with_object_id(ObjectId(1)));
        world.add_physics_object(&car);
        world.optimize_objects();

        Track { world, pieces, car }
    }

    fn everything() -> CollisionSettings {
        CollisionSettings::new().with_static_collide(true).with_dynamic_collide(true)
    }

    #[test]
    fn test_ray_through_one_piece_next_to_car() {
        let track = build_track();
        assert_eq!(track.world.static_tree().root().leaf_count(), 3);

        // Enters the top of the middle piece at (1, 1.5, 2), passes beside the car
        let origin = Vec3::new(-7.0, 1.5, 10.0);
        let direction = Vec3::new(1.0, 0.0, -1.0);
        let contacts = track.world.collide_ray(&origin, &direction, 20.0, &everything());

        assert_eq!(contacts.len(), 1);
        let contact = &contacts[0];
        assert_eq!(contact.object(), Some(&track.pieces[1]));
        assert_relative_eq!(contact.depth(), 8.0 * std::f32::consts::SQRT_2, epsilon = 1e-4);
        assert_relative_eq!(contact.position(), Vec3::new(1.0, 1.5, 2.0), epsilon = 1e-4);
        assert_eq!(contact.surface().surface_type, SurfaceType::Asphalt);
        assert!(contact.patch_id().is_some());
    }

    #[test]
    fn test_static_only_settings_ignore_bodies() {
        let track = build_track();

        // Straight down through the car; no track piece underneath
        let origin = Vec3::new(0.0, 3.5, 10.0);
        let down = Vec3::new(0.0, 0.0, -1.0);
        assert!(track.world.collide_ray(&origin, &down, 20.0, &CollisionSettings::default()).is_empty());

        let contacts = track.world.collide_ray(&origin, &down, 20.0, &everything());
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].object(), Some(&track.car));
        assert_relative_eq!(contacts[0].depth(), 9.0, epsilon = 1e-4);

        let probe_half = Vec3::new(0.5, 0.5, 0.5);
        let overlap_car = track
            .world
            .collide_box(&Vec3::new(0.0, 3.5, 1.2), &Quat::identity(), &probe_half, &CollisionSettings::default());
        assert!(overlap_car.is_empty());

        let with_bodies = track
            .world
            .collide_box(&Vec3::new(0.0, 3.5, 1.2), &Quat::identity(), &probe_half, &everything());
        assert_eq!(with_bodies.len(), 1);
        assert_eq!(with_bodies[0].object(), Some(&track.car));
        // Centred on the car roof, sunk 0.3
        assert_relative_eq!(with_bodies[0].depth(), 0.3, epsilon = 1e-4);
        assert_relative_eq!(with_bodies[0].normal(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-4);
    }

    #[test]
    fn test_exception_list_hides_owner() {
        let track = build_track();

        let settings = everything().with_exception(ObjectId(1));
        let contacts = track.world.collide_box(
            &Vec3::new(0.0, 3.5, 1.2),
            &Quat::identity(),
            &Vec3::new(0.5, 0.5, 0.5),
            &settings,
        );
        assert!(contacts.iter().all(|c| c.object() != Some(&track.car)));

        let hit = track
            .world
            .cast_ray(&Vec3::new(0.0, 3.5, 10.0), &Vec3::new(0.0, 0.0, -1.0), 20.0, &settings);
        assert!(hit.is_none());
    }

    #[test]
    fn test_excepted_static_piece_never_reported() {
        let mut world = CollisionWorld::new(&PhysicsConfig::default());
        let owned = track_piece(Vec3::zeros(), CollisionObjectSettings::new_static().with_object_id(ObjectId(9)));
        world.add_physics_object(&owned);
        world.optimize_objects();

        let settings = CollisionSettings::default().with_exception(ObjectId(9));
        let contacts = world.collide_ray(&Vec3::new(0.0, 0.0, 10.0), &Vec3::new(0.0, 0.0, -1.0), 20.0, &settings);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_parts_of_same_car_do_not_collide() {
        let mut world = CollisionWorld::new(&PhysicsConfig::default());
        let car_a = CollisionObjectSettings::new_dynamic().with_object_id(ObjectId(1));
        let car_b = CollisionObjectSettings::new_dynamic().with_object_id(ObjectId(2));

        let chassis = body(Vec3::new(0.0, 0.0, 0.0), car_a);
        let wheel = body(Vec3::new(1.5, 0.0, 0.0), car_a);
        let other_car = body(Vec3::new(3.0, 0.0, 0.0), car_b);
        for object in [&chassis, &wheel, &other_car] {
            world.add_physics_object(object);
        }

        let contacts = world.collide_dynamic_objects();
        assert!(!contacts.contains_key(&chassis));
        assert_eq!(contacts[&wheel].len(), 1);
        assert_eq!(contacts[&wheel][0].object(), Some(&other_car));
        assert_eq!(contacts[&other_car][0].object(), Some(&wheel));
    }

    #[test]
    fn test_moving_box_hits_piece_ahead() {
        let track = build_track();

        let contacts = track.world.collide_moving_box(
            &Vec3::new(8.0, 0.0, 0.0),
            &Vec3::new(20.0, 0.0, 0.0),
            &Quat::identity(),
            &Vec3::new(0.5, 0.5, 0.5),
            &CollisionSettings::default(),
            1.0,
        );

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].object(), Some(&track.pieces[2]));
        // Leading face at 8.5 meets the piece face at 18
        assert_relative_eq!(contacts[0].depth(), 9.5, epsilon = 1e-3);
    }

    #[test]
    fn test_delete_keeps_loader_handles_alive() {
        let mut track = build_track();
        let middle = track.pieces[1].clone();

        track.world.delete_physics_object_with_hint(&middle, &middle.bbox());
        track.world.delete_physics_object(&track.car);
        assert_eq!(track.world.static_object_count(), 2);
        assert_eq!(track.world.dynamic_object_count(), 0);

        let origin = Vec3::new(0.0, 0.0, 10.0);
        let contacts = track.world.collide_ray(&origin, &Vec3::new(0.0, 0.0, -1.0), 20.0, &everything());
        assert!(contacts.is_empty());

        // The loader still owns the geometry and can query it directly
        assert_relative_eq!(middle.bbox().center(), Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_rebuild_with_larger_leaves() {
        let config = PhysicsConfig::default().with_partition(PartitionConfig::new().with_ideal_objects_per_node(3));
        let mut world = CollisionWorld::new(&config);
        for x in [-20.0, 0.0, 20.0] {
            world.add_physics_object(&track_piece(Vec3::new(x, 0.0, 0.0), CollisionObjectSettings::new_static()));
        }
        world.optimize_objects();

        assert_eq!(world.static_tree().root().leaf_count(), 1);
        let hit = world.cast_ray(&Vec3::new(20.0, 0.0, 10.0), &Vec3::new(0.0, 0.0, -1.0), 20.0, &CollisionSettings::default());
        assert_relative_eq!(hit.map(|c| c.depth()).unwrap_or(f32::NAN), 8.0, epsilon = 1e-4);
    }
}
