//! Collidable objects and the handles the world keeps to them
//!
//! A [`CollisionObject`] pairs a collision shape with its pose, cached
//! bounds and filtering settings. Loaders own their objects through
//! [`ObjectHandle`]s and register clones of those handles with the
//! collision world, so removing an object from the world never frees the
//! geometry behind it.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use parry3d::query::{self, Ray, RayCast};
use parry3d::shape::{FeatureId, SharedShape, Shape};

use crate::foundation::math::{constants, isometry, Iso3, Point3, Quat, Vec3};
use crate::physics::collision_layers::CollisionGroups;
use crate::physics::contact::CollisionContact;
use crate::physics::error::PhysicsError;
use crate::physics::narrow_phase;
use crate::physics::surface::TrackSurface;
use crate::spatial::{Aabb, SegmentRay};

/// Whether an object lives in the static tree or the dynamic broadphase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Track geometry that never moves after loading
    #[default]
    Static,
    /// Bodies that move every frame
    Dynamic,
}

/// Logical owner of one or more collision objects (e.g. one car)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Registration settings of a collision object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionObjectSettings {
    object_type: ObjectType,
    object_id: Option<ObjectId>,
    group: CollisionGroups,
    mask: CollisionGroups,
}

impl CollisionObjectSettings {
    /// Settings for static track geometry
    pub fn new_static() -> Self {
        Self::default()
    }

    /// Settings for a moving body
    pub fn new_dynamic() -> Self {
        Self {
            object_type: ObjectType::Dynamic,
            ..Self::default()
        }
    }

    /// Set the logical owner
    pub fn set_object_id(&mut self, id: ObjectId) {
        self.object_id = Some(id);
    }

    /// Join or leave group `group_id` (0 through 15)
    pub fn set_dynamic_object_group(&mut self, group_id: u8, member: bool) {
        self.group.set_index(group_id, member);
    }

    /// Enable or disable collisions with group `mask_id` (0 through 15)
    pub fn set_dynamic_object_mask(&mut self, mask_id: u8, enable: bool) {
        self.mask.set_index(mask_id, enable);
    }

    /// Set the logical owner
    pub fn with_object_id(mut self, id: ObjectId) -> Self {
        self.set_object_id(id);
        self
    }

    /// Replace all group bits
    pub fn with_group(mut self, group: CollisionGroups) -> Self {
        self.group = group;
        self
    }

    /// Replace all mask bits
    pub fn with_mask(mut self, mask: CollisionGroups) -> Self {
        self.mask = mask;
        self
    }

    /// Static or dynamic
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Logical owner, if any
    pub fn object_id(&self) -> Option<ObjectId> {
        self.object_id
    }

    /// Groups this object belongs to
    pub fn group(&self) -> CollisionGroups {
        self.group
    }

    /// Groups this object collides with
    pub fn mask(&self) -> CollisionGroups {
        self.mask
    }
}

/// A collidable shape with pose, bounds and settings
pub struct CollisionObject {
    shape: SharedShape,
    /// Shape-space correction applied before the pose (e.g. Z-up cylinders)
    local_frame: Iso3,
    pose: Cell<Iso3>,
    bbox: Cell<Aabb>,
    settings: CollisionObjectSettings,
    surface: Rc<TrackSurface>,
}

impl fmt::Debug for CollisionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionObject")
            .field("shape", &self.shape.shape_type())
            .field("position", &self.position())
            .field("bbox", &self.bbox())
            .field("settings", &self.settings)
            .field("surface", &self.surface.surface_type)
            .finish()
    }
}

impl CollisionObject {
    fn from_shape(shape: SharedShape, local_frame: Iso3, settings: CollisionObjectSettings) -> Self {
        let object = Self {
            shape,
            local_frame,
            pose: Cell::new(Iso3::identity()),
            bbox: Cell::new(Aabb::default()),
            settings,
            surface: Rc::new(TrackSurface::default()),
        };
        object.update_bbox();
        object
    }

    /// Triangle mesh from vertices and counter-clockwise faces
    pub fn trimesh(
        vertices: &[Vec3],
        faces: &[[u32; 3]],
        settings: CollisionObjectSettings,
    ) -> Result<Self, PhysicsError> {
        if faces.is_empty() {
            return Err(PhysicsError::EmptyMesh);
        }

        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(PhysicsError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let points = vertices.iter().map(|v| Point3::from(*v)).collect();
        let shape = SharedShape::trimesh(points, faces.to_vec());
        Ok(Self::from_shape(shape, Iso3::identity(), settings))
    }

    /// Convex hull of a point cloud
    pub fn convex_hull(points: &[Vec3], settings: CollisionObjectSettings) -> Result<Self, PhysicsError> {
        // A solid hull needs at least a tetrahedron
        if points.len() < 4 {
            return Err(PhysicsError::DegenerateHull(points.len()));
        }

        let points: Vec<Point3> = points.iter().map(|v| Point3::from(*v)).collect();
        let shape = SharedShape::convex_hull(&points)
            .ok_or(PhysicsError::DegenerateHull(points.len()))?;
        Ok(Self::from_shape(shape, Iso3::identity(), settings))
    }

    /// Box centered on the object origin
    pub fn cuboid(half_extents: Vec3, settings: CollisionObjectSettings) -> Result<Self, PhysicsError> {
        validate_extents(&half_extents)?;
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        Ok(Self::from_shape(shape, Iso3::identity(), settings))
    }

    /// Cylinder whose axis is Z
    ///
    /// The radius is `half_extents.x` and the half height `half_extents.z`.
    pub fn cylinder_z(half_extents: Vec3, settings: CollisionObjectSettings) -> Result<Self, PhysicsError> {
        validate_extents(&half_extents)?;
        let shape = SharedShape::cylinder(half_extents.z, half_extents.x);
        // Shape cylinders are built along Y; a quarter turn about X aligns them with Z
        let local_frame = Iso3::rotation(Vec3::x() * constants::HALF_PI);
        Ok(Self::from_shape(shape, local_frame, settings))
    }

    /// Attach a track surface, reported by every contact against this object
    #[must_use]
    pub fn with_surface(mut self, surface: Rc<TrackSurface>) -> Self {
        self.surface = surface;
        self
    }

    /// Place the object before registering it
    #[must_use]
    pub fn with_pose(self, position: Vec3, rotation: Quat) -> Self {
        self.set_pose(&position, &rotation);
        self
    }

    /// Wrap the object in a shareable handle
    pub fn into_handle(self) -> ObjectHandle {
        ObjectHandle::new(self)
    }

    /// Move the object; the cached bounds follow
    ///
    /// Static objects must be re-registered after moving, the tree keeps the
    /// box they were added with.
    pub fn set_position(&self, position: &Vec3) {
        let rotation = self.pose.get().rotation;
        self.set_pose(position, &rotation);
    }

    /// Rotate the object; the cached bounds follow
    pub fn set_rotation(&self, rotation: &Quat) {
        let position = self.position();
        self.set_pose(&position, rotation);
    }

    /// Set position and rotation together
    pub fn set_pose(&self, position: &Vec3, rotation: &Quat) {
        self.pose.set(isometry(position, rotation));
        self.update_bbox();
    }

    fn update_bbox(&self) {
        let bounds = self.shape.compute_aabb(&self.shape_pose());
        self.bbox.set(Aabb::from_corners(&bounds.mins.coords, &bounds.maxs.coords));
    }

    /// World position of the object origin
    pub fn position(&self) -> Vec3 {
        self.pose.get().translation.vector
    }

    /// World orientation
    pub fn rotation(&self) -> Quat {
        self.pose.get().rotation
    }

    /// World pose of the object origin
    pub fn pose(&self) -> Iso3 {
        self.pose.get()
    }

    /// World pose of the underlying shape
    fn shape_pose(&self) -> Iso3 {
        self.pose.get() * self.local_frame
    }

    /// World-space bounds at the current pose
    pub fn bbox(&self) -> Aabb {
        self.bbox.get()
    }

    /// Registration settings
    pub fn settings(&self) -> &CollisionObjectSettings {
        &self.settings
    }

    /// Surface reported by contacts
    pub fn surface(&self) -> &Rc<TrackSurface> {
        &self.surface
    }

    /// Collision geometry
    pub fn shape(&self) -> &dyn Shape {
        &*self.shape
    }

    /// True when registered with the static tree
    pub fn is_static(&self) -> bool {
        self.settings.object_type == ObjectType::Static
    }

    /// True when registered with the dynamic broadphase
    pub fn is_dynamic(&self) -> bool {
        self.settings.object_type == ObjectType::Dynamic
    }
}

fn validate_extents(half_extents: &Vec3) -> Result<(), PhysicsError> {
    if half_extents.iter().all(|e| e.is_finite() && *e > 0.0) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidExtents {
            x: half_extents.x,
            y: half_extents.y,
            z: half_extents.z,
        })
    }
}

/// Shared, identity-compared reference to a [`CollisionObject`]
///
/// Two handles are equal only when they point at the same object, which
/// is what the tree and the broadphase use to find registrations.
#[derive(Clone)]
pub struct ObjectHandle(Rc<CollisionObject>);

impl ObjectHandle {
    /// Take ownership of an object
    pub fn new(object: CollisionObject) -> Self {
        Self(Rc::new(object))
    }

    /// Closest hit of a segment against this object
    ///
    /// The contact depth is the distance from the segment origin to the hit.
    pub fn cast_ray(&self, ray: &SegmentRay) -> Option<CollisionContact> {
        let parry_ray = Ray::new(Point3::from(ray.origin), ray.direction);
        let hit = self
            .shape
            .cast_ray_and_get_normal(&self.shape_pose(), &parry_ray, ray.length, true)?;

        let contact = CollisionContact::new(
            ray.point_at(hit.toi),
            hit.normal,
            hit.toi,
            Rc::clone(&self.surface),
            self.clone(),
        );
        Some(match self.mesh_patch(hit.feature) {
            Some(patch) => contact.with_patch_id(patch),
            None => contact,
        })
    }

    /// Triangle index of a mesh hit; other shapes have no patches
    fn mesh_patch(&self, feature: FeatureId) -> Option<i32> {
        let mesh = self.shape.as_trimesh()?;
        let FeatureId::Face(face) = feature else {
            return None;
        };
        // Back-face hits are reported past the end of the triangle list
        let triangles = mesh.indices().len();
        if triangles == 0 {
            return None;
        }
        i32::try_from(face as usize % triangles).ok()
    }

    /// Penetration contact between a query shape and this object
    ///
    /// Positive depth means overlap. The normal points out of this object
    /// and the position lies on its surface.
    pub fn contact(&self, shape: &dyn Shape, pose: &Iso3, prediction: f32) -> Option<CollisionContact> {
        let hit = narrow_phase::contact(shape, pose, self.shape(), &self.shape_pose(), prediction)?;
        Some(CollisionContact::new(
            hit.position,
            hit.normal,
            hit.depth,
            Rc::clone(&self.surface),
            self.clone(),
        ))
    }

    /// First impact of a query shape translated by `motion` from `pose`
    ///
    /// The contact depth is the distance travelled before impact.
    pub fn sweep(&self, shape: &dyn Shape, pose: &Iso3, motion: &Vec3) -> Option<CollisionContact> {
        let target_pose = self.shape_pose();
        let result = query::time_of_impact(
            pose,
            motion,
            shape,
            &target_pose,
            &Vec3::zeros(),
            self.shape(),
            1.0,
            true,
        );

        match result {
            Ok(Some(toi)) => Some(CollisionContact::new(
                target_pose.transform_point(&toi.witness2).coords,
                target_pose.rotation * toi.normal2.into_inner(),
                toi.toi * motion.magnitude(),
                Rc::clone(&self.surface),
                self.clone(),
            )),
            Ok(None) => None,
            Err(_) => {
                log::warn!(
                    "Unsupported sweep query between {:?} and {:?}",
                    shape.shape_type(),
                    self.shape.shape_type()
                );
                None
            }
        }
    }

    /// Contacts for both sides of an overlap with another object
    ///
    /// The first contact belongs to `self` and references `other` as the
    /// struck object; the second is the mirror image.
    pub fn contact_pair(&self, other: &Self) -> Option<(CollisionContact, CollisionContact)> {
        let on_self = other.contact(self.shape(), &self.shape_pose(), 0.0)?;
        if on_self.depth() < -constants::DISTANCE_EPSILON {
            return None;
        }
        let on_other = self.contact(other.shape(), &other.shape_pose(), 0.0)?;

        Some((on_self.with_other(self.clone()), on_other.with_other(other.clone())))
    }
}

impl Deref for ObjectHandle {
    type Target = CollisionObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<CollisionObject> for ObjectHandle {
    fn from(object: CollisionObject) -> Self {
        Self::new(object)
    }
}

impl PartialEq for ObjectHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ObjectHandle {}

impl Hash for ObjectHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectHandle")
            .field(&Rc::as_ptr(&self.0))
            .field(&self.0)
            .finish()
    }
}
