//! Physical constants and unit conversions
//!
//! The engine works in SI units (m, kg, s). Conversions from the
//! catalog's units happen once, in the scenario builder.

use super::error::{SimError, SimResult};

/// Astronomical unit in meters
pub const AU: f64 = 1.496e11;
/// Kilometer in meters
pub const KM: f64 = 1.0e3;
/// Day in seconds
pub const DAY: f64 = 86_400.0;
/// Julian year in days
pub const YEAR_DAYS: f64 = 365.25;

pub const DEFAULT_G: f64 = 6.67430e-11; // m^3 kg^-1 s^-2
pub const SOLAR_MASS: f64 = 1.989e30; // kg
pub const SOLAR_RADIUS: f64 = 6.9634e8; // m

/// Gravitational constant plus the central body's mass and radius.
///
/// Built once per scenario and handed to the solver, propagator and force
/// terms; nothing reads it from global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub g: f64,            // gravitational constant
    pub central_mass: f64, // kg
    pub central_radius: f64, // m, informational
}

impl PhysicalConstants {
    pub fn new(g: f64, central_mass: f64, central_radius: f64) -> SimResult<Self> {
        for (name, value) in [
            ("G", g),
            ("central_mass", central_mass),
            ("central_radius", central_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidConstant { name, value });
            }
        }
        Ok(Self {
            g,
            central_mass,
            central_radius,
        })
    }

    /// Standard gravitational parameter of the central body
    pub fn mu(&self) -> f64 {
        self.g * self.central_mass
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            central_mass: SOLAR_MASS,
            central_radius: SOLAR_RADIUS,
        }
    }
}
