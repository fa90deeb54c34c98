//! Math utilities and types
//!
//! Provides the fundamental math types shared by the spatial and physics
//! layers. Everything is `f32`, matching the collision geometry backend.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
    Isometry3,
    Translation3,
    UnitQuaternion,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Rigid transform (rotation followed by translation)
pub type Iso3 = Isometry3<f32>;

/// Build a rigid transform from a position and an orientation
pub fn isometry(position: &Vec3, rotation: &Quat) -> Iso3 {
    Iso3::from_parts(Translation3::from(*position), *rotation)
}

/// Index of the axis with the strictly largest component
///
/// Returns 0 (X) when no single component is strictly greater than both
/// others, so a perfect cube or a flat square always splits along X.
pub fn dominant_axis(v: &Vec3) -> usize {
    if v.y > v.x && v.y > v.z {
        1
    } else if v.z > v.x && v.z > v.y {
        2
    } else {
        0
    }
}

/// Mathematical constants
pub mod constants {
    /// Tolerance used when comparing distances produced by the narrow phase
    pub const DISTANCE_EPSILON: f32 = 1.0e-5;

    /// Quarter turn in radians
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;
}
