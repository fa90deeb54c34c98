//! Collision detection for track geometry and moving bodies
//!
//! Static track pieces live in the world's AABB tree, cars and props in a
//! sweep-and-prune broadphase. Narrow-phase geometry comes from `parry3d`.

pub mod backend;
pub mod broadphase;
pub mod collision_layers;
pub mod collision_world;
pub mod contact;
pub mod error;
mod narrow_phase;
pub mod object;
pub mod settings;
pub mod surface;

#[cfg(test)]
mod tests;

pub use backend::{DynamicBackend, PairContacts, ProxyKey};
pub use broadphase::SweepBroadphase;
pub use collision_layers::CollisionGroups;
pub use collision_world::CollisionWorld;
pub use contact::CollisionContact;
pub use error::PhysicsError;
pub use object::{CollisionObject, CollisionObjectSettings, ObjectHandle, ObjectId, ObjectType};
pub use settings::CollisionSettings;
pub use surface::{SurfaceType, TrackSurface};
