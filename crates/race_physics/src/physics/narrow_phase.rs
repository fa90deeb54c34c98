//! Penetration contacts between pairs of shapes
//!
//! Most pairs go straight to parry3d. Two boxes are separated here along
//! the axis of least overlap, because the general contact query loses the
//! penetration axis when one box is centred over the other.

use parry3d::query;
use parry3d::shape::{Cuboid, Shape, SupportMap};

use crate::foundation::math::{Iso3, Vec3};

/// Extra overlap an edge-edge axis must save before it beats a face axis
const EDGE_AXIS_BIAS: f32 = 1.0e-3;

/// Shortest axis accepted from an edge-edge cross product
const MIN_AXIS_LENGTH: f32 = 1.0e-6;

/// Contact on the surface of the struck shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SurfaceContact {
    /// Point on the struck shape's surface
    pub position: Vec3,
    /// Unit normal out of the struck shape, towards the query shape
    pub normal: Vec3,
    /// Penetration depth, negative while within the prediction margin
    pub depth: f32,
}

/// Contact of `shape` at `pose` against `target` at `target_pose`
///
/// Returns `None` when the shapes are further apart than `prediction`.
pub(crate) fn contact(
    shape: &dyn Shape,
    pose: &Iso3,
    target: &dyn Shape,
    target_pose: &Iso3,
    prediction: f32,
) -> Option<SurfaceContact> {
    if let (Some(cuboid), Some(target_cuboid)) = (shape.as_cuboid(), target.as_cuboid()) {
        return cuboid_contact(cuboid, pose, target_cuboid, target_pose, prediction);
    }

    match query::contact(pose, shape, target_pose, target, prediction) {
        Ok(Some(hit)) => Some(SurfaceContact {
            position: hit.point2.coords,
            normal: hit.normal2.into_inner(),
            depth: -hit.dist,
        }),
        Ok(None) => None,
        Err(_) => {
            log::warn!(
                "Unsupported contact query between {:?} and {:?}",
                shape.shape_type(),
                target.shape_type()
            );
            None
        }
    }
}

/// Separating axis test over the 15 box-box axes
fn cuboid_contact(
    cuboid: &Cuboid,
    pose: &Iso3,
    target: &Cuboid,
    target_pose: &Iso3,
    prediction: f32,
) -> Option<SurfaceContact> {
    let axes = box_axes(pose);
    let target_axes = box_axes(target_pose);
    let offset = pose.translation.vector - target_pose.translation.vector;

    let faces = axes.iter().chain(target_axes.iter()).map(|axis| (*axis, false));
    let edges = axes
        .iter()
        .flat_map(|a| target_axes.iter().map(move |b| (a.cross(b), true)));

    // (score, overlap, axis)
    let mut best: Option<(f32, f32, Vec3)> = None;
    for (axis, is_edge) in faces.chain(edges) {
        let length = axis.norm();
        if length < MIN_AXIS_LENGTH {
            continue;
        }
        let axis = axis / length;

        let overlap = projected_radius(&cuboid.half_extents, &axes, &axis)
            + projected_radius(&target.half_extents, &target_axes, &axis)
            - offset.dot(&axis).abs();
        if overlap < -prediction {
            return None;
        }

        let score = if is_edge { overlap + EDGE_AXIS_BIAS } else { overlap };
        if best.map_or(true, |(best_score, _, _)| score < best_score) {
            best = Some((score, overlap, axis));
        }
    }

    let (_, depth, axis) = best?;
    let normal = if offset.dot(&axis) < 0.0 { -axis } else { axis };

    // Deepest point of the query box, pushed back onto the struck surface
    let deepest = cuboid.support_point(pose, &-normal);
    Some(SurfaceContact {
        position: deepest.coords + normal * depth,
        normal,
        depth,
    })
}

fn box_axes(pose: &Iso3) -> [Vec3; 3] {
    [pose.rotation * Vec3::x(), pose.rotation * Vec3::y(), pose.rotation * Vec3::z()]
}

/// Half-length of a box's shadow on `axis`
fn projected_radius(half_extents: &Vec3, axes: &[Vec3; 3], axis: &Vec3) -> f32 {
    axes.iter()
        .zip(half_extents.iter())
        .map(|(box_axis, half)| half * box_axis.dot(axis).abs())
        .sum()
}
