//! Collision group and mask bits for dynamic objects
//!
//! Every dynamic object belongs to one or more of sixteen groups and carries
//! a mask naming the groups it wants to touch. Two objects are paired only
//! when each one's group appears in the other's mask.

bitflags::bitflags! {
    /// Sixteen collision group bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionGroups: u16 {
        /// Group 0, which every object joins by default
        const DEFAULT = 1 << 0;
        /// Car bodies
        const CHASSIS = 1 << 1;
        /// Wheel and suspension probes
        const WHEEL = 1 << 2;
        /// Loose track-side props (cones, tyre stacks)
        const PROP = 1 << 3;
        /// Detached car parts
        const DEBRIS = 1 << 4;
        /// Group 5
        const GROUP_5 = 1 << 5;
        /// Group 6
        const GROUP_6 = 1 << 6;
        /// Group 7
        const GROUP_7 = 1 << 7;
        /// Group 8
        const GROUP_8 = 1 << 8;
        /// Group 9
        const GROUP_9 = 1 << 9;
        /// Group 10
        const GROUP_10 = 1 << 10;
        /// Group 11
        const GROUP_11 = 1 << 11;
        /// Group 12
        const GROUP_12 = 1 << 12;
        /// Group 13
        const GROUP_13 = 1 << 13;
        /// Group 14
        const GROUP_14 = 1 << 14;
        /// Group 15
        const GROUP_15 = 1 << 15;
    }
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CollisionGroups {
    /// Number of distinct group bits
    pub const COUNT: u8 = 16;

    /// The single bit for group `index` (0 through 15)
    pub fn from_index(index: u8) -> Option<Self> {
        (index < Self::COUNT).then(|| Self::from_bits_retain(1 << index))
    }

    /// Add or remove the bit for group `index`; out-of-range indices are ignored
    pub fn set_index(&mut self, index: u8, enabled: bool) {
        debug_assert!(index < Self::COUNT, "collision group {} out of range", index);
        if let Some(bit) = Self::from_index(index) {
            self.set(bit, enabled);
        }
    }

    /// Check if two objects should collide based on their groups and masks
    ///
    /// A's group must be in B's mask AND B's group must be in A's mask.
    ///
    /// # Example
    /// ```
    /// use race_physics::physics::CollisionGroups;
    ///
    /// let chassis = (CollisionGroups::CHASSIS, CollisionGroups::CHASSIS | CollisionGroups::PROP);
    /// let prop = (CollisionGroups::PROP, CollisionGroups::CHASSIS);
    ///
    /// assert!(CollisionGroups::should_collide(chassis.0, chassis.1, prop.0, prop.1));
    /// ```
    pub fn should_collide(group_a: Self, mask_a: Self, group_b: Self, mask_b: Self) -> bool {
        group_a.intersects(mask_b) && group_b.intersects(mask_a)
    }
}
