//! Axis-aligned bounding boxes
//!
//! The box is stored as a minimum corner plus a size, with the center and
//! bounding-sphere radius cached because the tree queries read them far more
//! often than boxes are rebuilt.

use std::fmt;

use crate::foundation::math::Vec3;
use crate::spatial::frustum::Frustum;

/// Result of classifying a box against a query shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intersection {
    /// No overlap at all
    Out,
    /// Partial overlap, or overlap that could not be proven to be containment
    Intersect,
    /// The box lies entirely within the query shape
    In,
}

impl Intersection {
    /// True for anything other than [`Intersection::Out`]
    pub fn is_hit(self) -> bool {
        self != Self::Out
    }
}

/// Finite ray segment used for box culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRay {
    /// Start of the segment
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Segment length along `direction`
    pub length: f32,
}

impl SegmentRay {
    /// Create a segment; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3, length: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            length,
        }
    }

    /// Point at distance `t` along the segment
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pos: Vec3,
    size: Vec3,
    center: Vec3,
    radius: f32,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            pos: Vec3::zeros(),
            size: Vec3::zeros(),
            center: Vec3::zeros(),
            radius: 0.0,
        }
    }
}

impl Aabb {
    /// Build a box spanning two arbitrary corners
    pub fn from_corners(c1: &Vec3, c2: &Vec3) -> Self {
        let mut aabb = Self::default();
        aabb.set_from_corners(c1, c2);
        aabb
    }

    /// Build the box enclosing a sphere
    pub fn from_sphere(center: &Vec3, radius: f32) -> Self {
        let mut aabb = Self::default();
        aabb.set_from_sphere(center, radius);
        aabb
    }

    /// Reset the box to span two corners given in any order
    pub fn set_from_corners(&mut self, c1: &Vec3, c2: &Vec3) {
        self.pos = c1.inf(c2);
        self.size = c1.sup(c2) - self.pos;
        self.recompute_cache();
    }

    /// Reset the box to enclose a sphere
    pub fn set_from_sphere(&mut self, center: &Vec3, radius: f32) {
        let r = Vec3::repeat(radius);
        self.pos = center - r;
        self.size = r * 2.0;
        self.recompute_cache();
    }

    /// Grow this box to the union of itself and `other`
    pub fn combine_with(&mut self, other: &Self) {
        let min = self.min().inf(&other.min());
        let max = self.max().sup(&other.max());
        self.set_from_corners(&min, &max);
    }

    /// Union of two boxes
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.combine_with(other);
        out
    }

    fn recompute_cache(&mut self) {
        self.center = self.pos + self.size * 0.5;
        self.radius = self.size.magnitude() * 0.5;
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.pos
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.pos + self.size
    }

    /// Edge lengths
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Half edge lengths
    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }

    /// Geometric center
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius of the bounding sphere around the center
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let max = self.max();
        (0..3).all(|i| point[i] >= self.pos[i] && point[i] <= max[i])
    }

    /// True when `other` lies entirely inside this box
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(&other.min()) && self.contains_point(&other.max())
    }

    /// Classify against a finite segment
    ///
    /// Separating axis test: the three box axes first, then the cross
    /// products of the segment direction with each box axis. Rays never
    /// report [`Intersection::In`].
    pub fn intersect_ray(&self, ray: &SegmentRay) -> Intersection {
        let half = self.half_extents();
        let half_segment = ray.direction * (ray.length * 0.5);
        let segment_center = ray.origin + half_segment;
        let diff = segment_center - self.center;
        let abs_segment = half_segment.abs();

        for i in 0..3 {
            if diff[i].abs() > half[i] + abs_segment[i] {
                return Intersection::Out;
            }
        }

        let cross = half_segment.cross(&diff);
        if cross.x.abs() > half.y * abs_segment.z + half.z * abs_segment.y {
            return Intersection::Out;
        }
        if cross.y.abs() > half.x * abs_segment.z + half.z * abs_segment.x {
            return Intersection::Out;
        }
        if cross.z.abs() > half.x * abs_segment.y + half.y * abs_segment.x {
            return Intersection::Out;
        }

        Intersection::Intersect
    }

    /// Classify against another box; touching faces count as overlap
    pub fn intersect_aabb(&self, other: &Self) -> Intersection {
        let (min1, max1) = (self.min(), self.max());
        let (min2, max2) = (other.min(), other.max());

        for i in 0..3 {
            if min1[i] > max2[i] || max1[i] < min2[i] {
                return Intersection::Out;
            }
        }

        Intersection::Intersect
    }

    /// Classify against a view frustum using the bounding sphere
    ///
    /// Conservative: a box fully inside the frustum still reports
    /// [`Intersection::Intersect`].
    pub fn intersect_frustum(&self, frustum: &Frustum) -> Intersection {
        for plane in frustum.planes() {
            if plane.distance_to_point(&self.center) < -self.radius {
                return Intersection::Out;
            }
        }

        Intersection::Intersect
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = (self.min(), self.max());
        write!(
            f,
            "({}, {}, {}) to ({}, {}, {})",
            min.x, min.y, min.z, max.x, max.y, max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::frustum::Plane;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb {
        Aabb::from_corners(&Vec3::new(-1.0, -1.0, -1.0), &Vec3::new(1.0, 1.0, 1.0))
    }

    fn uniform_frustum(a: f32, b: f32, c: f32, d: f32) -> Frustum {
        Frustum::from_coefficients([[a, b, c, d]; 6])
    }

    #[test]
    fn test_corners_are_normalized() {
        let aabb = Aabb::from_corners(&Vec3::new(2.0, -1.0, 5.0), &Vec3::new(-2.0, 3.0, 1.0));
        assert_relative_eq!(aabb.min(), Vec3::new(-2.0, -1.0, 1.0));
        assert_relative_eq!(aabb.max(), Vec3::new(2.0, 3.0, 5.0));
        assert_relative_eq!(aabb.size(), Vec3::new(4.0, 4.0, 4.0));
        assert_relative_eq!(aabb.center(), Vec3::new(0.0, 1.0, 3.0));
        assert_relative_eq!(aabb.radius(), 48.0_f32.sqrt() * 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_box() {
        let aabb = Aabb::from_sphere(&Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert_relative_eq!(aabb.min(), Vec3::new(0.5, 1.5, 2.5));
        assert_relative_eq!(aabb.size(), Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_union_contains_both_and_is_minimal() {
        let cases = [
            (Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0),
             Vec3::new(3.0, -2.0, 0.5), Vec3::new(4.0, -1.0, 0.75)),
            (Vec3::new(-5.0, 2.0, 2.0), Vec3::new(-4.0, 3.0, 9.0),
             Vec3::new(-4.5, 2.5, 1.0), Vec3::new(-4.2, 2.7, 1.5)),
            (Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0),
             Vec3::new(-1.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 3.0)),
        ];

        for (a1, a2, b1, b2) in cases {
            let a = Aabb::from_corners(&a1, &a2);
            let b = Aabb::from_corners(&b1, &b2);
            let u = a.union(&b);

            assert!(u.contains(&a));
            assert!(u.contains(&b));

            // Every face of the union touches one of the inputs
            for i in 0..3 {
                assert_relative_eq!(u.min()[i], a.min()[i].min(b.min()[i]));
                assert_relative_eq!(u.max()[i], a.max()[i].max(b.max()[i]));
            }
        }
    }

    #[test]
    fn test_box_intersection_is_symmetric() {
        let boxes = [
            unit_box(),
            Aabb::from_corners(&Vec3::new(-0.01, -0.01, 0.0), &Vec3::new(0.01, 0.01, 2.0)),
            Aabb::from_corners(&Vec3::new(-0.01, -0.01, 2.0), &Vec3::new(0.01, 0.01, 3.0)),
            Aabb::from_corners(&Vec3::new(1.0, 1.0, 1.0), &Vec3::new(2.0, 2.0, 2.0)),
            Aabb::from_corners(&Vec3::new(-10.0, -10.0, -10.0), &Vec3::new(10.0, 10.0, 10.0)),
        ];

        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersect_aabb(b).is_hit(), b.intersect_aabb(a).is_hit());
            }
        }
    }

    #[test]
    fn test_box_overlap_cases() {
        let box1 = unit_box();
        let box2 = Aabb::from_corners(&Vec3::new(-0.01, -0.01, 0.0), &Vec3::new(0.01, 0.01, 2.0));
        let box3 = Aabb::from_corners(&Vec3::new(-0.01, -0.01, 2.0), &Vec3::new(0.01, 0.01, 3.0));

        assert_eq!(box1.intersect_aabb(&box2), Intersection::Intersect);
        assert_eq!(box1.intersect_aabb(&box3), Intersection::Out);
    }

    #[test]
    fn test_segment_hits_and_misses() {
        let box1 = unit_box();

        let toward = SegmentRay::new(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0), 4.0);
        assert_eq!(box1.intersect_ray(&toward), Intersection::Intersect);

        let away = SegmentRay::new(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, 1.0), 4.0);
        assert_eq!(box1.intersect_ray(&away), Intersection::Out);

        let short = SegmentRay::new(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0), 1.0);
        assert_eq!(box1.intersect_ray(&short), Intersection::Out);
    }

    #[test]
    fn test_segment_passing_beside_box_misses() {
        let box1 = unit_box();
        // Diagonal segment whose slab projections overlap but which passes the corner
        let ray = SegmentRay::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(-1.0, 1.0, 0.0), 6.0);
        assert_eq!(box1.intersect_ray(&ray), Intersection::Out);
    }

    #[test]
    fn test_frustum_classification() {
        let box1 = unit_box();
        assert_eq!(box1.intersect_frustum(&uniform_frustum(0.0, 0.0, 1.0, 10.0)), Intersection::Intersect);
        assert_eq!(box1.intersect_frustum(&uniform_frustum(0.0, 0.0, 1.0, 0.0)), Intersection::Intersect);
        assert_eq!(box1.intersect_frustum(&uniform_frustum(0.0, 0.0, 1.0, -10.0)), Intersection::Out);
        assert_eq!(box1.intersect_frustum(&uniform_frustum(-1.0, 0.0, 0.0, 10000.0)), Intersection::Intersect);
        assert_eq!(box1.intersect_frustum(&uniform_frustum(1.0, 0.0, 0.0, -119.0)), Intersection::Out);
    }

    #[test]
    fn test_single_plane_out_rejects_box() {
        let mut planes = [Plane::new(Vec3::new(0.0, 0.0, 1.0), 100.0); 6];
        planes[3] = Plane::new(Vec3::new(0.0, 1.0, 0.0), -5.0);
        let frustum = Frustum::new(planes);
        assert_eq!(unit_box().intersect_frustum(&frustum), Intersection::Out);
    }

    #[test]
    fn test_display_shows_corners() {
        let aabb = Aabb::from_corners(&Vec3::new(0.0, 1.0, 2.0), &Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(aabb.to_string(), "(0, 1, 2) to (3, 4, 5)");
    }
}
