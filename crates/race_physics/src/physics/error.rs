//! Errors raised while building collision geometry

/// Collision geometry construction errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Triangle mesh without any faces
    #[error("Triangle mesh has no faces")]
    EmptyMesh,

    /// Face referencing a vertex that does not exist
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        /// Offending face
        face: usize,
        /// Offending vertex index
        index: u32,
        /// Number of vertices supplied
        vertex_count: usize,
    },

    /// Point cloud too small or too flat for a hull
    #[error("Convex hull of {0} points is degenerate")]
    DegenerateHull(usize),

    /// Box or cylinder extent that is not a positive finite number
    #[error("Invalid half extents: ({x}, {y}, {z})")]
    InvalidExtents {
        /// X half extent
        x: f32,
        /// Y half extent
        y: f32,
        /// Z half extent
        z: f32,
    },
}
