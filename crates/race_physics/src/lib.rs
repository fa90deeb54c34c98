//! # Race Physics
//!
//! Collision detection for a racing simulation: an AABB space-partitioning
//! tree for static track geometry, a sweep-and-prune broadphase for cars and
//! props, and a collision world that answers ray, box and swept-box queries
//! against both.
//!
//! ## Features
//!
//! - **AABB Tree**: median-split bounding volume tree with ray, box and frustum queries
//! - **Collision World**: filtered, depth-sorted contacts from static and dynamic objects
//! - **Dynamic Broadphase**: group/mask and owner filtering for pairwise contacts
//! - **Track Surfaces**: per-object surface properties carried through every contact
//! - **Configuration**: TOML or RON tuning files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use race_physics::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PhysicsConfig::default();
//!     let mut world = CollisionWorld::new(&config);
//!
//!     let ground = CollisionObject::cuboid(Vec3::new(50.0, 50.0, 1.0), CollisionObjectSettings::new_static())?
//!         .into_handle();
//!     world.add_physics_object(&ground);
//!     world.optimize_objects();
//!
//!     let settings = CollisionSettings::default();
//!     if let Some(contact) = world.cast_ray(&Vec3::new(0.0, 0.0, 5.0), &Vec3::new(0.0, 0.0, -1.0), 10.0, &settings) {
//!         println!("ground is {} below", contact.depth());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Configuration
pub mod config;
pub mod core;

// Shared math and logging
pub mod foundation;

// Collision layers
pub mod spatial;
pub mod physics;

/// Common imports for collision users
pub mod prelude {
    pub use crate::{
        core::config::{Config, PartitionConfig, PhysicsConfig},
        foundation::math::{Iso3, Quat, Vec3},
        physics::{
            CollisionContact, CollisionGroups, CollisionObject, CollisionObjectSettings, CollisionSettings,
            CollisionWorld, ObjectHandle, ObjectId, PhysicsError, SurfaceType, TrackSurface,
        },
        spatial::{Aabb, AabbTree, Frustum, Intersection, QueryShape, SegmentRay},
    };
}
