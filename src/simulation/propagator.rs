//! Analytic two-body propagation of the mean anomaly
//!
//! Each body is treated as orbiting a single attractor; other bodies are
//! ignored. Only the mean anomaly changes, callers materialise position
//! through [`KeplerSolver`](super::kepler::KeplerSolver).

use std::f64::consts::TAU;

use super::constants::PhysicalConstants;
use super::error::{SimError, SimResult};
use super::states::{wrap_angle, Body, OrbitalElements};

#[derive(Debug, Clone, Copy)]
pub struct OrbitalPropagator {
    pub constants: PhysicalConstants,
}

impl OrbitalPropagator {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    /// Kepler's third law, `T = 2π √(a³ / (G M))`, in seconds
    pub fn orbital_period(&self, body: &str, el: &OrbitalElements, central_mass: f64) -> SimResult<f64> {
        el.validate(body)?;
        if !central_mass.is_finite() || central_mass <= 0.0 {
            return Err(SimError::InvalidElement {
                body: body.to_string(),
                reason: format!("attracting mass must be > 0, got {central_mass}"),
            });
        }
        let a = el.semi_major_axis;
        Ok(TAU * (a * a * a / (self.constants.g * central_mass)).sqrt())
    }

    /// Advance `body`'s mean anomaly by `dt` seconds around `central_mass`.
    /// The body is untouched when an error is returned.
    pub fn advance(&self, body: &mut Body, dt: f64, central_mass: f64) -> SimResult<()> {
        let period = self.orbital_period(&body.name, &body.elements, central_mass)?;
        let el = &mut body.elements;
        el.mean_anomaly = wrap_angle(el.mean_anomaly + TAU * dt / period);
        Ok(())
    }
}
