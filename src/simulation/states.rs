//! Core state types for the orbital engine.
//!
//! A single `Body` record covers planets, moons and minor bodies; the
//! distinction lives in `BodyKind`:
//! - `Primary`   orbits the central star
//! - `Satellite` orbits a named primary
//! - `Minor`     asteroids and the like, same dynamics as a primary
//!
//! Position and velocity are always present and start at zero.

use std::f64::consts::TAU;
use std::fmt;

use nalgebra::Vector3;

use super::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

/// Wrap an angle into `[0, 2π)`
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Osculating orbital elements, angles in radians, lengths in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    pub argument_of_periapsis: f64,
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        longitude_of_ascending_node: f64,
        argument_of_periapsis: f64,
        mean_anomaly: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            longitude_of_ascending_node,
            argument_of_periapsis,
            mean_anomaly: wrap_angle(mean_anomaly),
        }
    }

    /// Circular, uninclined orbit of radius `a` starting at periapsis
    pub fn circular(a: f64) -> Self {
        Self::new(a, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Reject elements no propagator can work with
    pub fn validate(&self, body: &str) -> SimResult<()> {
        let invalid = |reason: String| SimError::InvalidElement {
            body: body.to_string(),
            reason,
        };

        if !self.semi_major_axis.is_finite() || self.semi_major_axis <= 0.0 {
            return Err(invalid(format!(
                "semi-major axis must be > 0, got {}",
                self.semi_major_axis
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(invalid(format!(
                "eccentricity must lie in [0, 1), got {}",
                self.eccentricity
            )));
        }
        let angles = [
            self.inclination,
            self.longitude_of_ascending_node,
            self.argument_of_periapsis,
            self.mean_anomaly,
        ];
        if angles.iter().any(|a| !a.is_finite()) {
            return Err(invalid("angles must be finite".to_string()));
        }
        Ok(())
    }
}

/// Which collection a body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyCategory {
    Primary,
    Satellite,
    Minor,
}

impl fmt::Display for BodyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BodyCategory::Primary => "primary body",
            BodyCategory::Satellite => "satellite",
            BodyCategory::Minor => "minor body",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Primary,
    /// Non-owning reference to a primary, resolved once at insertion
    Satellite { parent: String },
    Minor,
}

impl BodyKind {
    pub fn category(&self) -> BodyCategory {
        match self {
            BodyKind::Primary => BodyCategory::Primary,
            BodyKind::Satellite { .. } => BodyCategory::Satellite,
            BodyKind::Minor => BodyCategory::Minor,
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            BodyKind::Satellite { parent } => Some(parent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    pub mass: f64,   // kg
    pub radius: f64, // m, not used by the dynamics
    pub elements: OrbitalElements,
    pub position: NVec3, // m
    pub velocity: NVec3, // m/s
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        kind: BodyKind,
        mass: f64,
        radius: f64,
        elements: OrbitalElements,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            mass,
            radius,
            elements,
            position: NVec3::zeros(),
            velocity: NVec3::zeros(),
        }
    }

    pub fn primary(name: impl Into<String>, mass: f64, radius: f64, elements: OrbitalElements) -> Self {
        Self::new(name, BodyKind::Primary, mass, radius, elements)
    }

    pub fn satellite(
        name: impl Into<String>,
        parent: impl Into<String>,
        mass: f64,
        radius: f64,
        elements: OrbitalElements,
    ) -> Self {
        let kind = BodyKind::Satellite {
            parent: parent.into(),
        };
        Self::new(name, kind, mass, radius, elements)
    }

    pub fn minor(name: impl Into<String>, mass: f64, radius: f64, elements: OrbitalElements) -> Self {
        Self::new(name, BodyKind::Minor, mass, radius, elements)
    }

    /// Seed the kinematic state explicitly
    pub fn with_state(mut self, position: NVec3, velocity: NVec3) -> Self {
        self.position = position;
        self.velocity = velocity;
        self
    }

    pub fn category(&self) -> BodyCategory {
        self.kind.category()
    }

    /// Mass and element checks performed once when a body is registered
    pub fn validate(&self) -> SimResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SimError::InvalidElement {
                body: self.name.clone(),
                reason: format!("mass must be > 0, got {}", self.mass),
            });
        }
        self.elements.validate(&self.name)
    }
}
