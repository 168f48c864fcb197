//! High-level runtime engine settings
//!
//! Selects how bodies are advanced (analytic Kepler propagation or n-body
//! integration), the integrator, the orbital-plane projection and the
//! fixed step size.

use super::constants::DAY;
use super::kepler::Projection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Each body follows its own two-body ellipse, no mutual gravity
    #[default]
    Kepler,
    /// Mutual gravity integrated step by step
    NBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorKind {
    #[default]
    Euler,
    Verlet,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub mode: Mode,
    pub integrator: IntegratorKind, // n-body only
    pub projection: Projection,
    pub central_attraction: bool, // n-body: include the star's pull
    pub seed_velocities: bool,    // n-body: start on Keplerian velocities
    pub dt: f64,                  // step size in seconds
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            integrator: IntegratorKind::default(),
            projection: Projection::default(),
            central_attraction: true,
            seed_velocities: true,
            dt: DAY,
        }
    }
}
