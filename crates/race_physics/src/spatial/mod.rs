//! Spatial partitioning data structures
//!
//! Bounding boxes, query shapes and the AABB tree that accelerates
//! static-geometry collision queries.

pub mod aabb;
pub mod frustum;
pub mod partition;
pub mod query;

pub use aabb::{Aabb, Intersection, SegmentRay};
pub use frustum::{Frustum, Plane};
pub use partition::{AabbTree, SpacePartitionNode};
pub use query::{BoundsQuery, IntersectAlways, QueryShape};
