//! Kepler's equation and positions on the orbital ellipse
//!
//! Solves `E = M + e sin E` by fixed-point iteration. The contraction
//! factor is `e |cos E|`, so convergence inside the iteration budget is
//! only reliable for small eccentricities (the catalog stays below 0.3).
//! When the budget runs out the last iterate is returned and the
//! solution is flagged as unconverged.

use nalgebra::Matrix3;

use super::states::{wrap_angle, NVec3, OrbitalElements};

pub const DEFAULT_MAX_ITERATIONS: usize = 10;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// How the in-plane ellipse is oriented in space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Lift the ellipse by the inclination only, `z = a sin(i) sin(E)`.
    /// Ascending node and argument of periapsis are ignored.
    #[default]
    SingleInclination,
    /// Rotate the perifocal frame by `R_z(Ω) R_x(i) R_z(ω)`
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: f64,
    pub true_anomaly: f64,
    pub iterations: usize, // fixed-point updates performed
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct KeplerSolver {
    pub max_iterations: usize,
    pub tolerance: f64, // radians
    pub projection: Projection,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            projection: Projection::default(),
        }
    }
}

impl KeplerSolver {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            ..Self::default()
        }
    }

    /// Eccentric and true anomaly for mean anomaly `m` and eccentricity `e`
    pub fn solve(&self, m: f64, e: f64) -> KeplerSolution {
        let mut ecc = m + e * m.sin();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            let next = m + e * ecc.sin();
            iterations += 1;
            let delta = (next - ecc).abs();
            ecc = next;
            if delta < self.tolerance {
                converged = true;
                break;
            }
        }

        KeplerSolution {
            eccentric_anomaly: ecc,
            true_anomaly: true_from_eccentric(ecc, e),
            iterations,
            converged,
        }
    }

    /// Position relative to the focus at mean anomaly `m`
    pub fn position_from_mean_anomaly(&self, el: &OrbitalElements, m: f64) -> (NVec3, KeplerSolution) {
        let sol = self.solve(m, el.eccentricity);
        let (sin_e, cos_e) = sol.eccentric_anomaly.sin_cos();
        let a = el.semi_major_axis;
        let e = el.eccentricity;
        let b = a * (1.0 - e * e).sqrt();

        let pos = match self.projection {
            Projection::SingleInclination => NVec3::new(
                a * (cos_e - e),
                b * sin_e,
                a * el.inclination.sin() * sin_e,
            ),
            Projection::Full => perifocal_to_reference(el) * NVec3::new(a * (cos_e - e), b * sin_e, 0.0),
        };
        (pos, sol)
    }

    /// Time derivative of `position_from_mean_anomaly` for an attractor
    /// with gravitational parameter `mu`
    pub fn velocity_from_mean_anomaly(&self, el: &OrbitalElements, m: f64, mu: f64) -> NVec3 {
        let sol = self.solve(m, el.eccentricity);
        let (sin_e, cos_e) = sol.eccentric_anomaly.sin_cos();
        let a = el.semi_major_axis;
        let e = el.eccentricity;
        let b = a * (1.0 - e * e).sqrt();

        let mean_motion = (mu / (a * a * a)).sqrt();
        let e_dot = mean_motion / (1.0 - e * cos_e);

        match self.projection {
            Projection::SingleInclination => NVec3::new(
                -a * sin_e * e_dot,
                b * cos_e * e_dot,
                a * el.inclination.sin() * cos_e * e_dot,
            ),
            Projection::Full => {
                perifocal_to_reference(el) * NVec3::new(-a * sin_e * e_dot, b * cos_e * e_dot, 0.0)
            }
        }
    }
}

/// `ν = 2 atan2(√(1+e) sin(E/2), √(1-e) cos(E/2))`, wrapped to `[0, 2π)`
pub fn true_from_eccentric(ecc_anomaly: f64, e: f64) -> f64 {
    let (s, c) = (ecc_anomaly / 2.0).sin_cos();
    wrap_angle(2.0 * ((1.0 + e).sqrt() * s).atan2((1.0 - e).sqrt() * c))
}

/// Rotation from the perifocal frame (x toward periapsis) to the
/// reference frame
pub fn perifocal_to_reference(el: &OrbitalElements) -> Matrix3<f64> {
    let (sin_o, cos_o) = el.longitude_of_ascending_node.sin_cos();
    let (sin_i, cos_i) = el.inclination.sin_cos();
    let (sin_w, cos_w) = el.argument_of_periapsis.sin_cos();

    Matrix3::new(
        cos_o * cos_w - sin_o * sin_w * cos_i,
        -cos_o * sin_w - sin_o * cos_w * cos_i,
        sin_o * sin_i,
        sin_o * cos_w + cos_o * sin_w * cos_i,
        -sin_o * sin_w + cos_o * cos_w * cos_i,
        -cos_o * sin_i,
        sin_w * sin_i,
        cos_w * sin_i,
        cos_i,
    )
}
