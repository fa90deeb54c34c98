//! # Core Module
//!
//! Shared configuration types for the collision subsystem.
//!
//! ## Organization
//!
//! - **Config**: partition tree tuning, narrow-phase tolerances and logging

pub mod config;

// Re-export commonly used config types
pub use config::{
    PhysicsConfig,
    PartitionConfig,
    Config,
    ConfigError,
};
