//! View frustum planes for visibility culling of tree nodes

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Plane defined by normal and signed offset: `normal . p + distance = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized when built through [`Plane::new`])
    pub normal: Vec3,
    /// Offset along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal: normal.normalize(), distance }
    }

    /// Create a plane from raw `[a, b, c, d]` coefficients without normalizing
    pub fn from_coefficients(coefficients: [f32; 4]) -> Self {
        let [a, b, c, d] = coefficients;
        Self {
            normal: Vec3::new(a, b, c),
            distance: d,
        }
    }

    fn from_row_combination(row: Vec4) -> Self {
        let normal = row.xyz();
        let length = normal.magnitude();
        if length > 0.0 {
            Self {
                normal: normal / length,
                distance: row.w / length,
            }
        } else {
            Self { normal, distance: row.w }
        }
    }

    /// Signed distance from the plane; positive on the side the normal faces
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Frustum for visibility culling
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six planes whose normals face inward
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Create a frustum from six raw `[a, b, c, d]` plane equations
    pub fn from_coefficients(coefficients: [[f32; 4]; 6]) -> Self {
        Self {
            planes: coefficients.map(Plane::from_coefficients),
        }
    }

    /// Extract the planes of `projection * view` (Gribb-Hartmann)
    ///
    /// Plane order is right, left, bottom, top, far, near. Each plane is
    /// normalized so distances are in world units.
    pub fn from_matrices(projection: &Mat4, view: &Mat4) -> Self {
        let clip = projection * view;
        let row = |i: usize| -> Vec4 { clip.row(i).transpose() };
        let (x, y, z, w) = (row(0), row(1), row(2), row(3));

        Self {
            planes: [
                Plane::from_row_combination(w - x),
                Plane::from_row_combination(w + x),
                Plane::from_row_combination(w + y),
                Plane::from_row_combination(w - y),
                Plane::from_row_combination(w - z),
                Plane::from_row_combination(w + z),
            ],
        }
    }

    /// The six bounding planes
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::aabb::{Aabb, Intersection};
    use approx::assert_relative_eq;

    fn camera_frustum() -> Frustum {
        let projection = Mat4::new_perspective(1.0, std::f32::consts::FRAC_PI_2, 0.1, 100.0);
        Frustum::from_matrices(&projection, &Mat4::identity())
    }

    #[test]
    fn test_extracted_planes_are_normalized() {
        for plane in camera_frustum().planes() {
            assert_relative_eq!(plane.normal.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_box_in_front_of_camera_is_visible() {
        let frustum = camera_frustum();
        let ahead = Aabb::from_sphere(&Vec3::new(0.0, 0.0, -10.0), 0.5);
        assert_eq!(ahead.intersect_frustum(&frustum), Intersection::Intersect);
    }

    #[test]
    fn test_box_behind_or_beside_camera_is_culled() {
        let frustum = camera_frustum();
        let behind = Aabb::from_sphere(&Vec3::new(0.0, 0.0, 10.0), 0.5);
        let beside = Aabb::from_sphere(&Vec3::new(1000.0, 0.0, -10.0), 0.5);
        let beyond_far = Aabb::from_sphere(&Vec3::new(0.0, 0.0, -500.0), 0.5);

        assert_eq!(behind.intersect_frustum(&frustum), Intersection::Out);
        assert_eq!(beside.intersect_frustum(&frustum), Intersection::Out);
        assert_eq!(beyond_far.intersect_frustum(&frustum), Intersection::Out);
    }

    #[test]
    fn test_plane_distance_sign() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), -1.0);
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(0.0, 3.0, 0.0)), 2.0);
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(5.0, 0.0, 5.0)), -1.0);
    }
}
