//! Query shapes accepted by the space partitioning tree
//!
//! The tree only needs one capability from a query: classify a box as out,
//! partially overlapping or fully contained. [`BoundsQuery`] names that
//! capability so the tree can be driven by [`QueryShape`] in production and
//! by instrumented shapes in tests.

use crate::spatial::aabb::{Aabb, Intersection, SegmentRay};
use crate::spatial::frustum::Frustum;

/// Anything that can classify an axis-aligned box
pub trait BoundsQuery {
    /// Classify `bounds` relative to this query
    fn classify(&self, bounds: &Aabb) -> Intersection;
}

/// Marker query that contains everything
///
/// Used to enumerate every object in a subtree through the normal query
/// path without any culling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntersectAlways;

impl BoundsQuery for IntersectAlways {
    fn classify(&self, _bounds: &Aabb) -> Intersection {
        Intersection::In
    }
}

/// Closed set of query shapes understood by the collision world
#[derive(Debug, Clone, PartialEq)]
pub enum QueryShape {
    /// Finite segment
    Ray(SegmentRay),
    /// Box overlap
    Aabb(Aabb),
    /// Visibility volume
    Frustum(Frustum),
    /// Matches everything
    Always,
}

impl BoundsQuery for QueryShape {
    fn classify(&self, bounds: &Aabb) -> Intersection {
        bounds.intersect(self)
    }
}

impl BoundsQuery for SegmentRay {
    fn classify(&self, bounds: &Aabb) -> Intersection {
        bounds.intersect_ray(self)
    }
}

impl BoundsQuery for Aabb {
    fn classify(&self, bounds: &Aabb) -> Intersection {
        bounds.intersect_aabb(self)
    }
}

impl BoundsQuery for Frustum {
    fn classify(&self, bounds: &Aabb) -> Intersection {
        bounds.intersect_frustum(self)
    }
}

impl Aabb {
    /// Classify this box against any supported query shape
    pub fn intersect(&self, shape: &QueryShape) -> Intersection {
        match shape {
            QueryShape::Ray(ray) => self.intersect_ray(ray),
            QueryShape::Aabb(other) => self.intersect_aabb(other),
            QueryShape::Frustum(frustum) => self.intersect_frustum(frustum),
            QueryShape::Always => Intersection::In,
        }
    }
}

impl From<SegmentRay> for QueryShape {
    fn from(ray: SegmentRay) -> Self {
        Self::Ray(ray)
    }
}

impl From<Aabb> for QueryShape {
    fn from(aabb: Aabb) -> Self {
        Self::Aabb(aabb)
    }
}

impl From<Frustum> for QueryShape {
    fn from(frustum: Frustum) -> Self {
        Self::Frustum(frustum)
    }
}

impl From<IntersectAlways> for QueryShape {
    fn from(_: IntersectAlways) -> Self {
        Self::Always
    }
}
