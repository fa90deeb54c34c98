//! AABB space partitioning tree
//!
//! A bounding volume hierarchy for static geometry. Objects are appended to
//! the root with [`SpacePartitionNode::add`] and the hierarchy is rebuilt in
//! one pass by [`SpacePartitionNode::optimize`], normally once per track
//! load. Each rebuild flattens the tree and bisects it again around the mean
//! object center along the longest axis of each node.
//!
//! Every node owns its children directly. A node has either no children or
//! exactly two.

use std::collections::HashSet;
use std::hash::Hash;
use std::io::{self, Write};

use crate::core::config::PartitionConfig;
use crate::foundation::math::{dominant_axis, Vec3};
use crate::spatial::aabb::{Aabb, Intersection};
use crate::spatial::query::BoundsQuery;

/// Single node in the partition hierarchy
#[derive(Debug, Clone)]
pub struct SpacePartitionNode<T> {
    /// Objects stored directly in this node with their box snapshots
    objects: Vec<(T, Aabb)>,

    /// Either empty or exactly two nodes: front, back
    children: Vec<SpacePartitionNode<T>>,

    /// Encloses every object and child in the subtree
    bbox: Aabb,
}

impl<T> Default for SpacePartitionNode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpacePartitionNode<T> {
    /// Create an empty leaf node
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            children: Vec::new(),
            bbox: Aabb::default(),
        }
    }

    /// Bounds of everything in this subtree
    pub fn bbox(&self) -> &Aabb {
        &self.bbox
    }

    /// Objects held directly by this node
    pub fn objects(&self) -> &[(T, Aabb)] {
        &self.objects
    }

    /// Child nodes (none or two)
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when no object is stored anywhere in the subtree
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.children.iter().all(Self::is_empty)
    }

    /// Drop every object and child node
    pub fn clear(&mut self) {
        self.objects.clear();
        self.children.clear();
        self.bbox = Aabb::default();
    }

    /// Count objects in this node and all children
    pub fn size(&self) -> usize {
        self.objects.len() + self.children.iter().map(Self::size).sum::<usize>()
    }

    /// Number of leaf nodes in the subtree
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Self::leaf_count).sum()
        }
    }

    /// Longest root-to-leaf path, counting this node as depth 0
    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    /// Append an object to this node without descending or rebalancing
    pub fn add(&mut self, object: T, aabb: Aabb) {
        // Combining with the default box would drag the bounds to the origin
        if self.is_empty() {
            self.bbox = aabb;
        } else {
            self.bbox.combine_with(&aabb);
        }
        self.objects.push((object, aabb));
    }

    /// Collect a reference to every object in the subtree
    pub fn contained_objects<'a>(&'a self, output: &mut Vec<&'a T>) {
        output.extend(self.objects.iter().map(|(object, _)| object));
        for child in &self.children {
            child.contained_objects(output);
        }
    }

    /// Move every object in this subtree into `target` and empty the subtree
    pub fn collapse_to(&mut self, target: &mut Self) {
        for (object, aabb) in self.objects.drain(..) {
            target.add(object, aabb);
        }
        for mut child in self.children.drain(..) {
            child.collapse_to(target);
        }
    }

    /// Flatten all descendants into this node's own object list
    fn collapse(&mut self) {
        let children = std::mem::take(&mut self.children);
        for mut child in children {
            child.collapse_to(self);
        }
    }

    /// Rebuild the subtree below this node from its flattened objects
    ///
    /// Returns the deepest level reached. A split that would leave either
    /// half empty, or that cannot separate anything because every center
    /// lies on the split plane, is abandoned and the node stays an
    /// oversized leaf.
    pub fn distribute_objects_to_children(&mut self, level: usize, config: &PartitionConfig) -> usize {
        self.collapse();

        if self.objects.len() <= config.ideal_objects_per_node.max(1) {
            return level;
        }

        let count = self.objects.len() as f32;
        let centroid = self
            .objects
            .iter()
            .fold(Vec3::zeros(), |sum, (_, aabb)| sum + aabb.center())
            / count;

        let axis = dominant_axis(&self.bbox.size());
        let split = centroid[axis];

        let mut front = Self::new();
        let mut back = Self::new();
        let mut ties = 0_usize;
        let mut separated = false;

        for (object, aabb) in self.objects.drain(..) {
            let coordinate = aabb.center()[axis];
            if coordinate > split {
                separated = true;
                front.add(object, aabb);
            } else if coordinate < split {
                separated = true;
                back.add(object, aabb);
            } else {
                if ties % 2 == 0 {
                    front.add(object, aabb);
                } else {
                    back.add(object, aabb);
                }
                ties += 1;
            }
        }

        if !separated || front.objects.is_empty() || back.objects.is_empty() {
            for (object, aabb) in front.objects.into_iter().chain(back.objects) {
                self.add(object, aabb);
            }
            return level;
        }

        let front_depth = front.distribute_objects_to_children(level + 1, config);
        let back_depth = back.distribute_objects_to_children(level + 1, config);
        self.children = vec![front, back];

        front_depth.max(back_depth)
    }

    /// Write an indented dump of the subtree
    ///
    /// `object_count` accumulates across the recursion; the root call
    /// (level 0) appends the total.
    pub fn debug_print<W: Write>(
        &self,
        level: usize,
        object_count: &mut usize,
        verbose: bool,
        output: &mut W,
    ) -> io::Result<()> {
        if verbose {
            writeln!(
                output,
                "{}objects: {}, child nodes: {}, aabb: {}",
                "-".repeat(level),
                self.objects.len(),
                self.children.len(),
                self.bbox
            )?;
        }

        *object_count += self.objects.len();

        for child in &self.children {
            child.debug_print(level + 1, object_count, verbose, output)?;
        }

        if level == 0 {
            if verbose {
                writeln!(output, "================")?;
            }
            writeln!(output, "TOTAL OBJECTS: {}", object_count)?;
        }

        Ok(())
    }
}

impl<T: PartialEq> SpacePartitionNode<T> {
    /// Remove every entry for `object`, searching the whole subtree
    pub fn delete(&mut self, object: &T) {
        self.objects.retain(|(candidate, _)| candidate != object);
        for child in &mut self.children {
            child.delete(object);
        }
        self.refit_bounds();
    }

    /// Remove every entry for `object`, skipping subtrees `hint` cannot reach
    ///
    /// `hint` must overlap the box the object was registered with.
    pub fn delete_with_hint(&mut self, object: &T, hint: &Aabb) {
        self.objects.retain(|(candidate, _)| candidate != object);
        for child in &mut self.children {
            if child.bbox.intersect_aabb(hint).is_hit() {
                child.delete_with_hint(object, hint);
            }
        }
        self.refit_bounds();
    }

    /// Shrink the bounds to the remaining objects and non-empty children
    fn refit_bounds(&mut self) {
        let boxes = self
            .objects
            .iter()
            .map(|(_, aabb)| aabb)
            .chain(self.children.iter().filter(|child| !child.is_empty()).map(Self::bbox));

        self.bbox = boxes.copied().reduce(|bounds, aabb| bounds.union(&aabb)).unwrap_or_default();
    }
}

impl<T: Clone> SpacePartitionNode<T> {
    /// Collect every object whose box is not outside `shape`
    ///
    /// Tests this node's own bounds first and then descends.
    pub fn query<Q: BoundsQuery + ?Sized>(&self, shape: &Q, output: &mut Vec<T>) {
        match shape.classify(&self.bbox) {
            Intersection::Out => {}
            result => self.query_children(shape, output, result == Intersection::Intersect),
        }
    }

    /// Query recursion below a node whose bounds already passed
    ///
    /// With `test_objects` false the caller has proven this whole subtree
    /// lies inside `shape`, so objects are returned without testing. A leaf
    /// with a single object is never tested individually either: its bounds
    /// equal the object's box and were tested by the caller.
    pub fn query_children<Q: BoundsQuery + ?Sized>(&self, shape: &Q, output: &mut Vec<T>, test_objects: bool) {
        debug_assert!(
            self.children.is_empty() || self.children.len() == 2,
            "partition node with {} children",
            self.children.len()
        );

        // An object added above existing children does not define the node bounds
        let bounds_are_object = self.objects.len() == 1 && self.children.is_empty();
        if test_objects && !bounds_are_object {
            output.extend(
                self.objects
                    .iter()
                    .filter(|(_, aabb)| shape.classify(aabb).is_hit())
                    .map(|(object, _)| object.clone()),
            );
        } else {
            output.extend(self.objects.iter().map(|(object, _)| object.clone()));
        }

        for child in &self.children {
            let result = shape.classify(&child.bbox);
            if result.is_hit() {
                child.query_children(shape, output, result == Intersection::Intersect);
            }
        }
    }
}

impl<T: Eq + Hash> SpacePartitionNode<T> {
    /// Flatten, deduplicate and rebuild the whole subtree
    ///
    /// Returns the depth of the rebuilt tree.
    pub fn optimize(&mut self, config: &PartitionConfig) -> usize {
        self.collapse();
        if config.remove_duplicates {
            let removed = self.remove_duplicate_objects();
            if removed > 0 {
                log::debug!("Dropped {} duplicate partition entries", removed);
            }
        }
        self.distribute_objects_to_children(0, config)
    }

    /// Keep only the most recent entry for each object in this node
    ///
    /// Returns how many entries were dropped.
    pub fn remove_duplicate_objects(&mut self) -> usize {
        let before = self.objects.len();
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(before);
            let mut keep = vec![false; before];
            for (index, (object, _)) in self.objects.iter().enumerate().rev() {
                keep[index] = seen.insert(object);
            }
            keep
        };

        let mut flags = keep.into_iter();
        self.objects.retain(|_| flags.next().unwrap_or(true));
        before - self.objects.len()
    }
}

/// Partition tree root bundled with its rebuild configuration
#[derive(Debug, Clone, Default)]
pub struct AabbTree<T> {
    root: SpacePartitionNode<T>,
    config: PartitionConfig,
}

impl<T> AabbTree<T> {
    /// Create an empty tree
    pub fn new(config: PartitionConfig) -> Self {
        Self {
            root: SpacePartitionNode::new(),
            config,
        }
    }

    /// Root node, for inspection and debug dumps
    pub fn root(&self) -> &SpacePartitionNode<T> {
        &self.root
    }

    /// Register an object at the root; call [`AabbTree::optimize`] afterwards
    pub fn add(&mut self, object: T, aabb: Aabb) {
        self.root.add(object, aabb);
    }

    /// Total stored entries
    pub fn len(&self) -> usize {
        self.root.size()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Write the tree dump produced by [`SpacePartitionNode::debug_print`]
    pub fn debug_print<W: Write>(&self, verbose: bool, output: &mut W) -> io::Result<()> {
        let mut count = 0;
        self.root.debug_print(0, &mut count, verbose, output)
    }
}

impl<T: PartialEq> AabbTree<T> {
    /// Remove an object by scanning the whole tree
    pub fn delete(&mut self, object: &T) {
        self.root.delete(object);
    }

    /// Remove an object using its last known box to prune the search
    pub fn delete_with_hint(&mut self, object: &T, hint: &Aabb) {
        self.root.delete_with_hint(object, hint);
    }
}

impl<T: Clone> AabbTree<T> {
    /// Collect every object whose box is not outside `shape`
    pub fn query<Q: BoundsQuery + ?Sized>(&self, shape: &Q, output: &mut Vec<T>) {
        self.root.query(shape, output);
    }
}

impl<T: Eq + Hash> AabbTree<T> {
    /// Rebuild the hierarchy from scratch
    pub fn optimize(&mut self) {
        let depth = self.root.optimize(&self.config);
        log::debug!(
            "Partition tree rebuilt: {} objects in {} leaves, depth {}",
            self.root.size(),
            self.root.leaf_count(),
            depth
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::aabb::SegmentRay;
    use crate::spatial::query::{IntersectAlways, QueryShape};
    use std::cell::Cell;

    fn unit_box_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_sphere(&Vec3::new(x, y, z), 0.5)
    }

    fn row_of_boxes(count: u32) -> SpacePartitionNode<u32> {
        let mut node = SpacePartitionNode::new();
        for i in 0..count {
            node.add(i, unit_box_at(i as f32 * 3.0, 0.0, 0.0));
        }
        node
    }

    fn sorted(mut values: Vec<u32>) -> Vec<u32> {
        values.sort_unstable();
        values
    }

    /// Returns a fixed classification and counts how often it was asked
    struct CountingQuery {
        result: Intersection,
        calls: Cell<usize>,
    }

    impl CountingQuery {
        fn new(result: Intersection) -> Self {
            Self { result, calls: Cell::new(0) }
        }
    }

    impl BoundsQuery for CountingQuery {
        fn classify(&self, _bounds: &Aabb) -> Intersection {
            self.calls.set(self.calls.get() + 1);
            self.result
        }
    }

    fn assert_children_invariant<T>(node: &SpacePartitionNode<T>) {
        assert!(node.children().is_empty() || node.children().len() == 2);
        for child in node.children() {
            assert!(node.bbox().contains(child.bbox()));
            assert_children_invariant(child);
        }
        for (_, aabb) in node.objects() {
            assert!(node.bbox().contains(aabb));
        }
    }

    #[test]
    fn test_empty_node() {
        let node: SpacePartitionNode<u32> = SpacePartitionNode::new();
        assert_eq!(node.size(), 0);
        assert!(node.is_empty());

        let mut out = Vec::new();
        node.query(&QueryShape::Always, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_first_add_assigns_bounds() {
        let mut node = SpacePartitionNode::new();
        node.add(1_u32, unit_box_at(10.0, 10.0, 10.0));
        assert_eq!(*node.bbox(), unit_box_at(10.0, 10.0, 10.0));

        node.add(2, unit_box_at(20.0, 10.0, 10.0));
        assert_eq!(node.bbox().min(), Vec3::new(9.5, 9.5, 9.5));
        assert_eq!(node.bbox().max(), Vec3::new(20.5, 10.5, 10.5));
    }

    #[test]
    fn test_optimize_round_trip_returns_every_object_once() {
        let mut node = SpacePartitionNode::new();
        let mut expected = Vec::new();
        for i in 0..40_u32 {
            let x = (i % 7) as f32 * 4.0;
            let y = (i / 7) as f32 * 2.5;
            let z = (i % 3) as f32;
            node.add(i, unit_box_at(x, y, z));
            expected.push(i);
        }

        node.optimize(&PartitionConfig::default());
        assert_children_invariant(&node);
        assert!(!node.is_leaf());

        let mut out = Vec::new();
        node.query(&IntersectAlways, &mut out);
        assert_eq!(sorted(out), expected);
        assert_eq!(node.size(), 40);
    }

    #[test]
    fn test_leaves_respect_ideal_size() {
        let mut node = row_of_boxes(16);
        node.optimize(&PartitionConfig::new().with_ideal_objects_per_node(2));

        fn check(node: &SpacePartitionNode<u32>) {
            if node.is_leaf() {
                assert!(node.objects().len() <= 2);
            } else {
                assert!(node.objects().is_empty());
                node.children().iter().for_each(check);
            }
        }
        check(&node);
        assert_eq!(node.size(), 16);
    }

    #[test]
    fn test_split_puts_greater_coordinates_in_front() {
        let mut node = row_of_boxes(2);
        node.optimize(&PartitionConfig::default());

        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0].objects()[0].0, 1);
        assert_eq!(node.children()[1].objects()[0].0, 0);
    }

    #[test]
    fn test_coincident_objects_stay_in_one_leaf() {
        for position in [Vec3::zeros(), Vec3::new(0.1, 0.7, -3.3)] {
            let mut node = SpacePartitionNode::new();
            for i in 0..9_u32 {
                node.add(i, Aabb::from_sphere(&position, 1.0));
            }
            node.optimize(&PartitionConfig::default());

            assert!(node.is_leaf());
            assert_eq!(node.objects().len(), 9);
        }
    }

    #[test]
    fn test_ties_on_split_plane_alternate() {
        let mut node = SpacePartitionNode::new();
        node.add(0_u32, unit_box_at(-4.0, 0.0, 0.0));
        node.add(1, unit_box_at(0.0, 0.0, 0.0));
        node.add(2, unit_box_at(0.0, 0.0, 0.0));
        node.add(3, unit_box_at(4.0, 0.0, 0.0));

        let config = PartitionConfig::new().with_ideal_objects_per_node(4);
        node.distribute_objects_to_children(0, &config);
        assert!(node.is_leaf());

        let config = PartitionConfig::new().with_ideal_objects_per_node(2);
        node.distribute_objects_to_children(0, &config);
        let front: Vec<u32> = node.children()[0].objects().iter().map(|(o, _)| *o).collect();
        let back: Vec<u32> = node.children()[1].objects().iter().map(|(o, _)| *o).collect();
        assert_eq!(sorted(front), vec![1, 3]);
        assert_eq!(sorted(back), vec![0, 2]);
    }

    #[test]
    fn test_delete_removes_exactly_one_object() {
        let mut node = row_of_boxes(10);
        node.optimize(&PartitionConfig::default());
        assert_eq!(node.size(), 10);

        node.delete(&4);
        assert_eq!(node.size(), 9);

        let mut out = Vec::new();
        node.query(&IntersectAlways, &mut out);
        assert!(!out.contains(&4));

        // Missing objects are ignored
        node.delete(&4);
        node.delete(&99);
        assert_eq!(node.size(), 9);
    }

    #[test]
    fn test_delete_with_hint_prunes_but_finds_target() {
        let mut node = row_of_boxes(10);
        node.optimize(&PartitionConfig::default());

        node.delete_with_hint(&7, &unit_box_at(21.0, 0.0, 0.0));
        assert_eq!(node.size(), 9);

        // A hint far from the object cannot reach it
        node.delete_with_hint(&2, &unit_box_at(500.0, 0.0, 0.0));
        assert_eq!(node.size(), 9);
    }

    #[test]
    fn test_delete_shrinks_bounds_of_remaining_objects() {
        // Same centre, so the split is abandoned and both share one leaf
        let mut node = SpacePartitionNode::new();
        node.add(1_u32, Aabb::from_sphere(&Vec3::zeros(), 5.0));
        node.add(2, Aabb::from_sphere(&Vec3::zeros(), 0.5));
        node.add(3, unit_box_at(20.0, 0.0, 0.0));
        node.optimize(&PartitionConfig::default());

        node.delete_with_hint(&1, &Aabb::from_sphere(&Vec3::zeros(), 5.0));
        assert_eq!(node.size(), 2);
        assert_children_invariant(&node);
        assert_eq!(node.bbox().min(), Vec3::new(-0.5, -0.5, -0.5));

        // Inside the deleted box only; the small one must not come back
        let mut out = Vec::new();
        node.query(&unit_box_at(3.0, 3.0, 0.0), &mut out);
        assert!(out.is_empty());

        node.delete(&2);
        node.delete(&3);
        assert!(node.is_empty());
        assert_eq!(*node.bbox(), Aabb::default());
    }

    #[test]
    fn test_duplicates_removed_keeping_latest_box() {
        let mut node = SpacePartitionNode::new();
        node.add(1_u32, unit_box_at(0.0, 0.0, 0.0));
        node.add(2, unit_box_at(5.0, 0.0, 0.0));
        node.add(1, unit_box_at(10.0, 0.0, 0.0));

        node.optimize(&PartitionConfig::default());
        assert_eq!(node.size(), 2);

        let mut out = Vec::new();
        node.query(&unit_box_at(10.0, 0.0, 0.0), &mut out);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn test_duplicates_kept_when_disabled() {
        let mut node = SpacePartitionNode::new();
        node.add(1_u32, unit_box_at(0.0, 0.0, 0.0));
        node.add(1, unit_box_at(0.0, 0.0, 0.0));

        node.optimize(&PartitionConfig::new().with_remove_duplicates(false));
        assert_eq!(node.size(), 2);
    }

    #[test]
    fn test_ray_query_finds_only_boxes_on_segment() {
        let mut node = row_of_boxes(8);
        node.optimize(&PartitionConfig::default());

        // Straight down through the box at x = 9
        let ray = SegmentRay::new(Vec3::new(9.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 10.0);
        let mut out = Vec::new();
        node.query(&QueryShape::Ray(ray), &mut out);
        assert_eq!(out, vec![3]);
    }

    #[test]
    fn test_box_query_against_flat_root() {
        // Not optimized: objects at the root are tested one by one
        let node = row_of_boxes(5);
        let mut out = Vec::new();
        node.query(&QueryShape::Aabb(Aabb::from_corners(
            &Vec3::new(2.0, -1.0, -1.0),
            &Vec3::new(7.0, 1.0, 1.0),
        )), &mut out);
        assert_eq!(sorted(out), vec![1, 2]);
    }

    #[test]
    fn test_containment_skips_object_tests() {
        let mut node = row_of_boxes(4);
        node.optimize(&PartitionConfig::new().with_ideal_objects_per_node(2));
        assert_eq!(node.children().len(), 2);
        assert!(node.children().iter().all(SpacePartitionNode::is_leaf));

        // Root + two children; leaf objects trusted
        let inside = CountingQuery::new(Intersection::In);
        let mut out = Vec::new();
        node.query(&inside, &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!(inside.calls.get(), 3);

        // Root + two children + every object in the two-object leaves
        let partial = CountingQuery::new(Intersection::Intersect);
        let mut out = Vec::new();
        node.query(&partial, &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!(partial.calls.get(), 7);
    }

    #[test]
    fn test_out_root_stops_descent() {
        let mut node = row_of_boxes(4);
        node.optimize(&PartitionConfig::default());

        let outside = CountingQuery::new(Intersection::Out);
        let mut out = Vec::new();
        node.query(&outside, &mut out);
        assert!(out.is_empty());
        assert_eq!(outside.calls.get(), 1);
    }

    #[test]
    fn test_add_after_optimize_keeps_children_inside_bounds() {
        let mut node = row_of_boxes(4);
        node.optimize(&PartitionConfig::default());
        node.add(100, unit_box_at(-50.0, 0.0, 0.0));
        assert_children_invariant(&node);

        let mut out = Vec::new();
        node.query(&unit_box_at(9.0, 0.0, 0.0), &mut out);
        assert_eq!(out, vec![3]);
    }

    #[test]
    fn test_collapse_to_moves_everything() {
        let mut source = row_of_boxes(6);
        source.optimize(&PartitionConfig::default());
        let mut target = SpacePartitionNode::new();
        target.add(50, unit_box_at(-3.0, 0.0, 0.0));

        source.collapse_to(&mut target);
        assert!(source.is_empty());
        assert!(target.is_leaf());
        assert_eq!(target.size(), 7);

        let mut contained = Vec::new();
        target.contained_objects(&mut contained);
        assert_eq!(contained.len(), 7);
    }

    #[test]
    fn test_clear_resets_tree() {
        let mut tree = AabbTree::new(PartitionConfig::default());
        for i in 0..5_u32 {
            tree.add(i, unit_box_at(i as f32, 0.0, 0.0));
        }
        tree.optimize();
        assert_eq!(tree.len(), 5);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_debug_print_format() {
        let mut tree = AabbTree::new(PartitionConfig::default());
        tree.add(0_u32, Aabb::from_corners(&Vec3::new(0.0, 0.0, 0.0), &Vec3::new(1.0, 1.0, 1.0)));
        tree.add(1, Aabb::from_corners(&Vec3::new(4.0, 0.0, 0.0), &Vec3::new(5.0, 1.0, 1.0)));
        tree.optimize();

        let mut buffer = Vec::new();
        tree.debug_print(true, &mut buffer).expect("write to memory");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "objects: 0, child nodes: 2, aabb: (0, 0, 0) to (5, 1, 1)");
        assert_eq!(lines[1], "-objects: 1, child nodes: 0, aabb: (4, 0, 0) to (5, 1, 1)");
        assert_eq!(lines[2], "-objects: 1, child nodes: 0, aabb: (0, 0, 0) to (1, 1, 1)");
        assert_eq!(lines[3], "================");
        assert_eq!(lines[4], "TOTAL OBJECTS: 2");

        let mut buffer = Vec::new();
        tree.debug_print(false, &mut buffer).expect("write to memory");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "TOTAL OBJECTS: 2\n");
    }
}
