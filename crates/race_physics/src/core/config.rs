//! # Collision Configuration
//!
//! Tunables for the collision subsystem, loadable from TOML or RON through
//! the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Partition Config**: how the static AABB tree is rebuilt
//! - **Physics Config**: narrow-phase tolerances and log filtering

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Partition Configuration
///
/// Controls how `SpacePartitionNode::optimize` reshapes the static tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// A node holding this many objects or fewer becomes a leaf
    pub ideal_objects_per_node: usize,
    /// Drop repeated registrations of the same object during a rebuild
    pub remove_duplicates: bool,
}

impl PartitionConfig {
    /// Create a partition configuration with default tuning
    pub fn new() -> Self {
        Self {
            ideal_objects_per_node: 1,
            remove_duplicates: true,
        }
    }

    /// Set the leaf size threshold
    pub fn with_ideal_objects_per_node(mut self, count: usize) -> Self {
        self.ideal_objects_per_node = count;
        self
    }

    /// Enable or disable duplicate removal on rebuild
    pub fn with_remove_duplicates(mut self, enabled: bool) -> Self {
        self.remove_duplicates = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ideal_objects_per_node == 0 {
            return Err("Ideal objects per node must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Physics Configuration
///
/// Top-level configuration consumed by `CollisionWorld` and the probe tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Static tree rebuild settings
    pub partition: PartitionConfig,
    /// Separation distance below which box queries already report a contact
    pub contact_prediction: f32,
    /// Log filter passed to `env_logger`
    pub log_level: String,
}

impl PhysicsConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            partition: PartitionConfig::default(),
            contact_prediction: 0.0,
            log_level: "info".to_string(),
        }
    }

    /// Set partition tree tuning
    pub fn with_partition(mut self, partition: PartitionConfig) -> Self {
        self.partition = partition;
        self
    }

    /// Set the contact prediction distance for box queries
    pub fn with_contact_prediction(mut self, distance: f32) -> Self {
        self.contact_prediction = distance;
        self
    }

    /// Set the log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PhysicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.partition.validate().map_err(ConfigError::Invalid)?;

        if !self.contact_prediction.is_finite() || self.contact_prediction < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Contact prediction must be a finite non-negative distance, got {}",
                self.contact_prediction
            )));
        }

        Ok(())
    }
}
