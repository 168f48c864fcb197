//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – propagation mode, integrator and projection
//! - [`ParametersConfig`] – step size and run length
//! - [`ConstantsConfig`]  – optional override of G and the central star
//! - [`UnitsConfig`]      – units the catalog values are written in
//! - [`BodyConfig`]       – one entry per primary, satellite or minor body
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   mode: "nbody"             # or "kepler"
//!   integrator: "euler"       # or "verlet"
//!   projection: "simplified"  # or "full"
//!
//! parameters:
//!   dt_days: 1.0
//!   years: 15.0
//!
//! units:
//!   length: "au"              # "m", "km" or "au"
//!   angle: "deg"              # "rad" or "deg"
//!
//! primaries:
//!   - name: Earth
//!     mass: 5.972e24
//!     radius: 6371.0          # km
//!     a: 1.0
//!     e: 0.0167
//!
//! satellites:
//!   - name: Moon
//!     parent: Earth
//!     mass: 7.342e22
//!     radius: 1737.1
//!     a: 384400.0
//!     e: 0.0549
//!     i: 5.145
//!     length: "km"            # per-body override
//! ```
//!
//! Everything is converted to SI by the scenario builder; nothing in the
//! engine sees these units.

use serde::Deserialize;

use crate::simulation::constants::{AU, KM};

/// Propagation mode. `mode: "kepler"` or `mode: "nbody"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeConfig {
    #[default]
    Kepler, // each body on its own two-body ellipse
    #[serde(alias = "n-body")]
    NBody, // mutual gravity, step by step
}

/// Which integrator the n-body mode uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorConfig {
    #[default]
    Euler, // explicit first order
    Verlet, // velocity Verlet, two force evaluations per step
}

/// Orientation of the orbital plane
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionConfig {
    #[default]
    Simplified, // single inclination lift
    Full, // node, inclination and periapsis rotations
}

fn yes() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub mode: ModeConfig,
    #[serde(default)]
    pub integrator: IntegratorConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default = "yes")]
    pub central_attraction: bool,
    #[serde(default = "yes")]
    pub seed_velocities: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ModeConfig::default(),
            integrator: IntegratorConfig::default(),
            projection: ProjectionConfig::default(),
            central_attraction: true,
            seed_velocities: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt_days: f64,       // step size in days
    pub years: Option<f64>, // run length, ignored when `steps` is set
    pub steps: Option<usize>,
}

/// Optional override of the physical constants, SI units
#[derive(Deserialize, Debug, Clone)]
pub struct ConstantsConfig {
    #[serde(rename = "G")]
    pub g: Option<f64>,
    pub central_name: Option<String>,
    pub central_mass: Option<f64>,   // kg
    pub central_radius: Option<f64>, // m
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    M,
    #[default]
    Km,
    Au,
}

impl LengthUnit {
    /// Meters per unit
    pub fn to_meters(self) -> f64 {
        match self {
            LengthUnit::M => 1.0,
            LengthUnit::Km => KM,
            LengthUnit::Au => AU,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Rad,
    Deg,
}

impl AngleUnit {
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Rad => value,
            AngleUnit::Deg => value.to_radians(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct UnitsConfig {
    #[serde(default)]
    pub length: LengthUnit, // semi-major axes
    #[serde(default)]
    pub angle: AngleUnit,
}

/// One catalog entry. Radii are always kilometers.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub parent: Option<String>, // satellites only
    pub mass: f64,              // kg
    #[serde(default)]
    pub radius: f64, // km, informational
    pub a: f64,      // semi-major axis
    #[serde(default)]
    pub e: f64,
    #[serde(default)]
    pub i: f64, // inclination
    #[serde(default)]
    pub node: f64, // longitude of ascending node
    #[serde(default)]
    pub periapsis: f64, // argument of periapsis
    #[serde(default)]
    pub mean_anomaly: f64,
    pub length: Option<LengthUnit>, // overrides `units.length`
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub constants: Option<ConstantsConfig>,
    #[serde(default)]
    pub units: UnitsConfig,
    #[serde(default)]
    pub primaries: Vec<BodyConfig>,
    #[serde(default)]
    pub satellites: Vec<BodyConfig>,
    #[serde(default)]
    pub minor_bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
