//! Per-query collision filtering

use crate::physics::object::{CollisionObject, ObjectId};

/// Filter applied to every collision query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionSettings {
    static_collide: bool,
    dynamic_collide: bool,
    exceptions: Vec<ObjectId>,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            static_collide: true,
            dynamic_collide: false,
            exceptions: Vec::new(),
        }
    }
}

impl CollisionSettings {
    /// Static geometry only, no exceptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Include or skip static objects
    pub fn with_static_collide(mut self, enabled: bool) -> Self {
        self.static_collide = enabled;
        self
    }

    /// Include or skip dynamic objects
    pub fn with_dynamic_collide(mut self, enabled: bool) -> Self {
        self.dynamic_collide = enabled;
        self
    }

    /// Skip every object owned by `id`
    pub fn with_exception(mut self, id: ObjectId) -> Self {
        self.add_exception(id);
        self
    }

    /// Skip every object owned by `id`
    pub fn add_exception(&mut self, id: ObjectId) {
        if !self.exceptions.contains(&id) {
            self.exceptions.push(id);
        }
    }

    /// Whether static objects are queried
    pub fn static_collide(&self) -> bool {
        self.static_collide
    }

    /// Whether dynamic objects are queried
    pub fn dynamic_collide(&self) -> bool {
        self.dynamic_collide
    }

    /// Owners whose objects are never reported
    pub fn exceptions(&self) -> &[ObjectId] {
        &self.exceptions
    }

    /// True if objects owned by `id` may be reported
    pub fn can_collide(&self, id: Option<ObjectId>) -> bool {
        id.map_or(true, |id| !self.exceptions.contains(&id))
    }

    /// True if `object` may appear in a query result
    pub fn passes_filter(&self, object: &CollisionObject) -> bool {
        let type_allowed = (self.static_collide && object.is_static()) || (self.dynamic_collide && object.is_dynamic());
        type_allowed && self.can_collide(object.settings().object_id())
    }
}
