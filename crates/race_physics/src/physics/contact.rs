//! Contact records returned by collision queries

use std::rc::Rc;

use crate::foundation::math::Vec3;
use crate::physics::object::ObjectHandle;
use crate::physics::surface::TrackSurface;

/// A single point of contact produced by a query
///
/// Created fresh per query. `object` is the object that was struck; for
/// pairwise results `other` is the object whose contact list this record
/// belongs to.
#[derive(Debug, Clone)]
pub struct CollisionContact {
    position: Vec3,
    normal: Vec3,
    depth: f32,
    patch_id: Option<i32>,
    surface: Rc<TrackSurface>,
    object: Option<ObjectHandle>,
    other: Option<ObjectHandle>,
}

impl Default for CollisionContact {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            normal: Vec3::zeros(),
            depth: 0.0,
            patch_id: None,
            surface: Rc::new(TrackSurface::default()),
            object: None,
            other: None,
        }
    }
}

impl CollisionContact {
    /// Contact against `object`
    pub fn new(position: Vec3, normal: Vec3, depth: f32, surface: Rc<TrackSurface>, object: ObjectHandle) -> Self {
        Self {
            position,
            normal,
            depth,
            patch_id: None,
            surface,
            object: Some(object),
            other: None,
        }
    }

    /// Tag the contact with a road patch index
    #[must_use]
    pub fn with_patch_id(mut self, patch_id: i32) -> Self {
        self.patch_id = Some(patch_id);
        self
    }

    /// Record the other object of a colliding pair
    #[must_use]
    pub fn with_other(mut self, other: ObjectHandle) -> Self {
        self.other = Some(other);
        self
    }

    /// World-space contact point
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Surface normal at the contact point
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Ray distance, penetration or travel distance depending on the query
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Road patch index, if the contact came from a road surface
    pub fn patch_id(&self) -> Option<i32> {
        self.patch_id
    }

    /// Surface of the struck object
    pub fn surface(&self) -> &TrackSurface {
        &self.surface
    }

    /// The struck object
    pub fn object(&self) -> Option<&ObjectHandle> {
        self.object.as_ref()
    }

    /// The other object of a colliding pair
    pub fn other(&self) -> Option<&ObjectHandle> {
        self.other.as_ref()
    }

    /// Re-cast a ray against the plane of this contact
    ///
    /// Cheap update for a contact cached from an earlier frame. Returns true
    /// when the ray faces the plane, placing the contact where the ray meets
    /// it. Otherwise the contact moves to the end of the ray with
    /// `depth = length` and false is returned.
    pub fn cast_ray(&mut self, origin: &Vec3, direction: &Vec3, length: f32) -> bool {
        let nd = self.normal.dot(direction);
        if nd < 0.0 {
            self.depth = self.normal.dot(&(self.position - origin)) / nd;
            self.position = origin + direction * self.depth;
            return true;
        }

        self.position = origin + direction * length;
        self.depth = length;
        false
    }
}

/// Order contacts by ascending depth
pub fn sort_by_depth(contacts: &mut [CollisionContact]) {
    contacts.sort_by(|a, b| a.depth.total_cmp(&b.depth));
}
