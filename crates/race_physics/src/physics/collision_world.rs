//! Collision world: static track geometry plus dynamic bodies
//!
//! Static objects go into an [`AabbTree`] that is rebuilt on demand with
//! [`CollisionWorld::optimize_objects`]. Dynamic objects are handed to a
//! [`DynamicBackend`]. Every query runs against both, merges the results,
//! applies the caller's [`CollisionSettings`] and returns contacts sorted by
//! depth.
//!
//! The world never owns the geometry. Loaders keep their own
//! [`ObjectHandle`]s and must delete them from the world before dropping
//! the track or car they belong to.

use std::collections::HashMap;
use std::io::{self, Write};

use parry3d::shape::{Cuboid, Shape};

use crate::core::config::PhysicsConfig;
use crate::foundation::math::{isometry, Iso3, Quat, Vec3};
use crate::physics::backend::{DynamicBackend, PairContacts, ProxyKey};
use crate::physics::broadphase::SweepBroadphase;
use crate::physics::contact::{sort_by_depth, CollisionContact};
use crate::physics::object::ObjectHandle;
use crate::physics::settings::CollisionSettings;
use crate::spatial::{Aabb, AabbTree, BoundsQuery, SegmentRay};

/// Registry of collidable objects and entry point for collision queries
pub struct CollisionWorld {
    backend: Box<dyn DynamicBackend>,
    static_tree: AabbTree<ObjectHandle>,
    dynamic_objects: HashMap<ObjectHandle, ProxyKey>,
    // Boxes static objects were registered with, for hinted deletes
    static_boxes: HashMap<ObjectHandle, Aabb>,
    contact_prediction: f32,
}

impl CollisionWorld {
    /// World backed by the default sweep-and-prune broadphase
    pub fn new(config: &PhysicsConfig) -> Self {
        Self::with_backend(Box::new(SweepBroadphase::new()), config)
    }

    /// World backed by a custom dynamic backend
    pub fn with_backend(backend: Box<dyn DynamicBackend>, config: &PhysicsConfig) -> Self {
        Self {
            backend,
            static_tree: AabbTree::new(config.partition.clone()),
            dynamic_objects: HashMap::new(),
            static_boxes: HashMap::new(),
            contact_prediction: config.contact_prediction,
        }
    }

    /// Register an object
    ///
    /// Static objects are only queryable through the tree after the next
    /// [`CollisionWorld::optimize_objects`]; until then they sit in the root
    /// and are still found, just without culling.
    pub fn add_physics_object(&mut self, object: &ObjectHandle) {
        if object.is_static() {
            let bbox = object.bbox();
            self.static_boxes
                .entry(object.clone())
                .and_modify(|registered| registered.combine_with(&bbox))
                .or_insert(bbox);
            self.static_tree.add(object.clone(), bbox);
            return;
        }

        if self.dynamic_objects.contains_key(object) {
            log::warn!("Dynamic object {:?} is already registered", object.bbox());
            return;
        }

        let settings = object.settings();
        let key = self.backend.add_object(object.clone(), settings.group(), settings.mask());
        self.dynamic_objects.insert(object.clone(), key);
    }

    /// Unregister an object; unknown objects are ignored
    pub fn delete_physics_object(&mut self, object: &ObjectHandle) {
        if object.is_static() {
            self.static_boxes.remove(object);
            self.static_tree.delete(object);
        } else {
            self.delete_dynamic(object);
        }
    }

    /// Unregister a static object, searching only the tree nodes its box touches
    ///
    /// Much faster than a full scan on a large track. The search covers the
    /// hint and the box the object was registered with, so a static object
    /// moved after registration is still found. Dynamic objects ignore the
    /// hint.
    pub fn delete_physics_object_with_hint(&mut self, object: &ObjectHandle, hint: &Aabb) {
        if object.is_static() {
            let search = match self.static_boxes.remove(object) {
                Some(registered) => {
                    if registered != object.bbox() {
                        log::warn!(
                            "Static object moved after registration: registered {}, now {}",
                            registered,
                            object.bbox()
                        );
                    }
                    registered.union(hint)
                }
                None => *hint,
            };
            self.static_tree.delete_with_hint(object, &search);
        } else {
            self.delete_dynamic(object);
        }
    }

    fn delete_dynamic(&mut self, object: &ObjectHandle) {
        if let Some(key) = self.dynamic_objects.remove(object) {
            self.backend.remove_object(key);
        }
    }

    /// Rebuild the static tree after a batch of additions
    pub fn optimize_objects(&mut self) {
        self.static_tree.optimize();
    }

    /// Unregister everything
    pub fn clear(&mut self) {
        self.static_tree.clear();
        self.static_boxes.clear();
        self.dynamic_objects.clear();
        self.backend.clear();
    }

    /// Number of static registrations
    pub fn static_object_count(&self) -> usize {
        self.static_tree.len()
    }

    /// Number of dynamic registrations
    pub fn dynamic_object_count(&self) -> usize {
        self.backend.object_count()
    }

    /// Static tree, for inspection
    pub fn static_tree(&self) -> &AabbTree<ObjectHandle> {
        &self.static_tree
    }

    /// All hits of a segment, nearest first
    ///
    /// `direction` need not be normalised; a zero direction or a
    /// non-positive length gives no contacts.
    pub fn collide_ray(
        &self,
        origin: &Vec3,
        direction: &Vec3,
        length: f32,
        settings: &CollisionSettings,
    ) -> Vec<CollisionContact> {
        if length <= 0.0 || direction.norm_squared() == 0.0 {
            return Vec::new();
        }

        let ray = SegmentRay::new(*origin, *direction, length);
        let mut contacts = Vec::new();

        if settings.static_collide() {
            contacts.extend(
                self.static_candidates(&ray, settings)
                    .iter()
                    .filter_map(|object| object.cast_ray(&ray)),
            );
        }

        if settings.dynamic_collide() {
            contacts.extend(self.backend.ray_test(&ray));
        }

        filter_and_sort(contacts, settings)
    }

    /// Nearest hit of a segment
    pub fn cast_ray(
        &self,
        origin: &Vec3,
        direction: &Vec3,
        length: f32,
        settings: &CollisionSettings,
    ) -> Option<CollisionContact> {
        self.collide_ray(origin, direction, length, settings).into_iter().next()
    }

    /// Penetration contacts of an oriented box
    pub fn collide_box(
        &self,
        position: &Vec3,
        orientation: &Quat,
        half_extents: &Vec3,
        settings: &CollisionSettings,
    ) -> Vec<CollisionContact> {
        let probe = Cuboid::new(*half_extents);
        let pose = isometry(position, orientation);
        let bounds = padded_bounds(&probe, &pose, self.contact_prediction);
        let mut contacts = Vec::new();

        if settings.static_collide() {
            contacts.extend(
                self.static_candidates(&bounds, settings)
                    .iter()
                    .filter_map(|object| object.contact(&probe, &pose, self.contact_prediction)),
            );
        }

        if settings.dynamic_collide() {
            contacts.extend(self.backend.contact_test(&probe, &pose, self.contact_prediction));
        }

        filter_and_sort(contacts, settings)
    }

    /// First impacts of an oriented box moving at `velocity` for `dt` seconds
    ///
    /// Contact depth is the distance travelled before impact.
    pub fn collide_moving_box(
        &self,
        position: &Vec3,
        velocity: &Vec3,
        orientation: &Quat,
        half_extents: &Vec3,
        settings: &CollisionSettings,
        dt: f32,
    ) -> Vec<CollisionContact> {
        let probe = Cuboid::new(*half_extents);
        let motion = velocity * dt;
        let from = isometry(position, orientation);
        let to = isometry(&(position + motion), orientation);

        let start = padded_bounds(&probe, &from, 0.0);
        let end = padded_bounds(&probe, &to, 0.0);
        let swept = start.union(&end);
        let mut contacts = Vec::new();

        if settings.static_collide() {
            contacts.extend(
                self.static_candidates(&swept, settings)
                    .iter()
                    .filter_map(|object| object.sweep(&probe, &from, &motion)),
            );
        }

        if settings.dynamic_collide() {
            contacts.extend(self.backend.convex_sweep_test(&probe, &from, &to));
        }

        filter_and_sort(contacts, settings)
    }

    /// Narrow-phase contacts among registered dynamic objects
    pub fn collide_dynamic_objects(&self) -> PairContacts {
        self.backend.pairwise_collide()
    }

    /// Write a summary line followed by the static tree dump
    pub fn debug_print<W: Write>(&self, verbose: bool, output: &mut W) -> io::Result<()> {
        writeln!(
            output,
            "Collision objects: {} (internal), {} (external)",
            self.dynamic_object_count(),
            self.static_object_count()
        )?;
        self.static_tree.debug_print(verbose, output)
    }

    fn static_candidates<Q: BoundsQuery>(&self, shape: &Q, settings: &CollisionSettings) -> Vec<ObjectHandle> {
        let mut candidates = Vec::new();
        self.static_tree.query(shape, &mut candidates);
        candidates.retain(|object| settings.passes_filter(object));
        candidates
    }
}

fn filter_and_sort(mut contacts: Vec<CollisionContact>, settings: &CollisionSettings) -> Vec<CollisionContact> {
    contacts.retain(|contact| contact.object().map_or(false, |object| settings.passes_filter(object)));
    sort_by_depth(&mut contacts);
    contacts
}

fn padded_bounds(probe: &Cuboid, pose: &Iso3, margin: f32) -> Aabb {
    let bounds = probe.compute_aabb(pose);
    let margin = Vec3::repeat(margin);
    Aabb::from_corners(&(bounds.mins.coords - margin), &(bounds.maxs.coords + margin))
}
