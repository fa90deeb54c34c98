//! Track surface descriptions attached to static geometry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of surface a wheel is rolling on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    /// Unclassified surface
    #[default]
    None,
    /// Asphalt
    Asphalt,
    /// Grass
    Grass,
    /// Gravel
    Gravel,
    /// Concrete
    Concrete,
    /// Sand
    Sand,
    /// Cobbles
    Cobbles,
}

impl SurfaceType {
    /// Map a track file surface name; unknown names give [`SurfaceType::None`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "asphalt" => Self::Asphalt,
            "grass" => Self::Grass,
            "gravel" => Self::Gravel,
            "concrete" => Self::Concrete,
            "sand" => Self::Sand,
            "cobbles" => Self::Cobbles,
            _ => Self::None,
        }
    }

    /// Lowercase name used in track files
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Asphalt => "asphalt",
            Self::Grass => "grass",
            Self::Gravel => "gravel",
            Self::Concrete => "concrete",
            Self::Sand => "sand",
            Self::Cobbles => "cobbles",
        }
    }
}

impl FromStr for SurfaceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical properties of a track surface
///
/// Only carried through contacts; the tyre model decides what they mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSurface {
    /// Surface classification
    #[serde(rename = "type")]
    pub surface_type: SurfaceType,
    /// Wavelength of procedural bumps
    pub bump_wave_length: f32,
    /// Amplitude of procedural bumps
    pub bump_amplitude: f32,
    /// Friction for the sidewall and other non-tread contact
    pub friction_non_tread: f32,
    /// Friction for the tread
    pub friction_tread: f32,
    /// Rolling resistance coefficient
    pub roll_resistance_coefficient: f32,
    /// Velocity-proportional rolling drag
    pub rolling_drag: f32,
}

impl Default for TrackSurface {
    fn default() -> Self {
        Self {
            surface_type: SurfaceType::None,
            bump_wave_length: 1.0,
            bump_amplitude: 0.0,
            friction_non_tread: 0.0,
            friction_tread: 0.0,
            roll_resistance_coefficient: 0.0,
            rolling_drag: 0.0,
        }
    }
}

impl TrackSurface {
    /// Default properties with the given classification
    pub fn new(surface_type: SurfaceType) -> Self {
        Self {
            surface_type,
            ..Self::default()
        }
    }

    /// Set the classification from a track file name
    pub fn set_type(&mut self, name: &str) {
        self.surface_type = SurfaceType::from_name(name);
    }

    /// Set tread and non-tread friction
    pub fn with_friction(mut self, tread: f32, non_tread: f32) -> Self {
        self.friction_tread = tread;
        self.friction_non_tread = non_tread;
        self
    }

    /// Set procedural bump shape
    pub fn with_bumps(mut self, wave_length: f32, amplitude: f32) -> Self {
        self.bump_wave_length = wave_length;
        self.bump_amplitude = amplitude;
        self
    }

    /// Set rolling resistance terms
    pub fn with_rolling(mut self, resistance_coefficient: f32, drag: f32) -> Self {
        self.roll_resistance_coefficient = resistance_coefficient;
        self.rolling_drag = drag;
        self
    }
}
