//! Sweep-and-prune broadphase for dynamic objects
//!
//! Bounds are read from the objects on every query, so bodies may move
//! freely between frames without re-registering. Pairs are found by sorting
//! bounds along X and sweeping an active list; candidates then go through
//! the group/mask and owner filters before the narrow phase.

use parry3d::shape::Shape;
use slotmap::SlotMap;

use crate::foundation::math::{Iso3, Vec3};
use crate::physics::backend::{DynamicBackend, PairContacts, ProxyKey};
use crate::physics::collision_layers::CollisionGroups;
use crate::physics::contact::CollisionContact;
use crate::physics::object::ObjectHandle;
use crate::spatial::{Aabb, SegmentRay};

#[derive(Debug, Clone)]
struct Proxy {
    object: ObjectHandle,
    group: CollisionGroups,
    mask: CollisionGroups,
}

impl Proxy {
    /// Group/mask must match both ways, and parts of the same owner never pair
    fn pairs_with(&self, other: &Self) -> bool {
        if !CollisionGroups::should_collide(self.group, self.mask, other.group, other.mask) {
            return false;
        }

        match (self.object.settings().object_id(), other.object.settings().object_id()) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }
}

/// Default [`DynamicBackend`]
#[derive(Debug, Default)]
pub struct SweepBroadphase {
    proxies: SlotMap<ProxyKey, Proxy>,
}

impl SweepBroadphase {
    /// Empty broadphase
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate pairs whose bounds overlap and that pass the pair filter
    fn broad_phase(&self) -> Vec<(ProxyKey, ProxyKey)> {
        let mut endpoints: Vec<(ProxyKey, Aabb)> = self
            .proxies
            .iter()
            .map(|(key, proxy)| (key, proxy.object.bbox()))
            .collect();
        endpoints.sort_by(|a, b| a.1.min().x.total_cmp(&b.1.min().x));

        let mut pairs = Vec::new();
        let mut active: Vec<(ProxyKey, Aabb)> = Vec::new();

        for (key, bbox) in endpoints {
            let min_x = bbox.min().x;
            active.retain(|(_, other)| other.max().x >= min_x);

            for (other_key, other_bbox) in &active {
                if !bbox.intersect_aabb(other_bbox).is_hit() {
                    continue;
                }

                let (Some(a), Some(b)) = (self.proxies.get(*other_key), self.proxies.get(key)) else {
                    continue;
                };
                if a.pairs_with(b) {
                    pairs.push((*other_key, key));
                }
            }

            active.push((key, bbox));
        }

        pairs
    }

    fn objects_overlapping(&self, bounds: &Aabb) -> impl Iterator<Item = &ObjectHandle> + '_ {
        let bounds = *bounds;
        self.proxies
            .values()
            .filter(move |proxy| proxy.object.bbox().intersect_aabb(&bounds).is_hit())
            .map(|proxy| &proxy.object)
    }
}

impl DynamicBackend for SweepBroadphase {
    fn add_object(&mut self, object: ObjectHandle, group: CollisionGroups, mask: CollisionGroups) -> ProxyKey {
        self.proxies.insert(Proxy { object, group, mask })
    }

    fn remove_object(&mut self, key: ProxyKey) -> Option<ObjectHandle> {
        self.proxies.remove(key).map(|proxy| proxy.object)
    }

    fn ray_test(&self, ray: &SegmentRay) -> Vec<CollisionContact> {
        self.proxies
            .values()
            .filter(|proxy| proxy.object.bbox().intersect_ray(ray).is_hit())
            .filter_map(|proxy| proxy.object.cast_ray(ray))
            .collect()
    }

    fn contact_test(&self, shape: &dyn Shape, pose: &Iso3, prediction: f32) -> Vec<CollisionContact> {
        let bounds = shape.compute_aabb(pose);
        let margin = Vec3::repeat(prediction.max(0.0));
        let query = Aabb::from_corners(&(bounds.mins.coords - margin), &(bounds.maxs.coords + margin));

        self.objects_overlapping(&query)
            .filter_map(|object| object.contact(shape, pose, prediction))
            .collect()
    }

    fn convex_sweep_test(&self, shape: &dyn Shape, from: &Iso3, to: &Iso3) -> Vec<CollisionContact> {
        let start = shape.compute_aabb(from);
        let motion = to.translation.vector - from.translation.vector;
        let query = Aabb::from_corners(&start.mins.coords, &start.maxs.coords)
            .union(&Aabb::from_corners(&(start.mins.coords + motion), &(start.maxs.coords + motion)));

        self.objects_overlapping(&query)
            .filter_map(|object| object.sweep(shape, from, &motion))
            .collect()
    }

    fn pairwise_collide(&self) -> PairContacts {
        let mut output = PairContacts::new();

        for (key_a, key_b) in self.broad_phase() {
            let (Some(a), Some(b)) = (self.proxies.get(key_a), self.proxies.get(key_b)) else {
                continue;
            };

            if let Some((on_a, on_b)) = a.object.contact_pair(&b.object) {
                output.entry(a.object.clone()).or_default().push(on_a);
                output.entry(b.object.clone()).or_default().push(on_b);
            }
        }

        log::trace!("Pairwise pass: {} objects in contact", output.len());
        output
    }

    fn object_count(&self) -> usize {
        self.proxies.len()
    }

    fn clear(&mut self) {
        self.proxies.clear();
    }
}
