//! Interface to the collision backend that tracks dynamic objects
//!
//! The collision world keeps static track geometry in its own AABB tree and
//! hands everything that moves to a [`DynamicBackend`]. The default
//! implementation is [`SweepBroadphase`](crate::physics::SweepBroadphase);
//! tests and tools may plug in their own.

use std::collections::HashMap;

use parry3d::shape::Shape;

use crate::foundation::math::Iso3;
use crate::physics::collision_layers::CollisionGroups;
use crate::physics::contact::CollisionContact;
use crate::physics::object::ObjectHandle;
use crate::spatial::SegmentRay;

slotmap::new_key_type! {
    /// Registration handle issued by a dynamic backend
    pub struct ProxyKey;
}

/// Contacts per object from a pairwise pass
pub type PairContacts = HashMap<ObjectHandle, Vec<CollisionContact>>;

/// Broadphase and narrow phase for moving objects
pub trait DynamicBackend {
    /// Register an object with its collision group and mask
    fn add_object(&mut self, object: ObjectHandle, group: CollisionGroups, mask: CollisionGroups) -> ProxyKey;

    /// Unregister an object, returning it if the key was live
    fn remove_object(&mut self, key: ProxyKey) -> Option<ObjectHandle>;

    /// Hits of a segment against every registered object
    fn ray_test(&self, ray: &SegmentRay) -> Vec<CollisionContact>;

    /// Penetration contacts of a shape placed at `pose`
    fn contact_test(&self, shape: &dyn Shape, pose: &Iso3, prediction: f32) -> Vec<CollisionContact>;

    /// First impacts of a shape translated from `from` to `to`
    ///
    /// Only the translation is swept; the shape keeps the orientation of `from`.
    fn convex_sweep_test(&self, shape: &dyn Shape, from: &Iso3, to: &Iso3) -> Vec<CollisionContact>;

    /// Narrow-phase contacts among all registered objects
    fn pairwise_collide(&self) -> PairContacts;

    /// Number of registered objects
    fn object_count(&self) -> usize;

    /// Unregister everything
    fn clear(&mut self);
}
