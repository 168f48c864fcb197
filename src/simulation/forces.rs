//! Acceleration contributors for the n-body integrator
//!
//! Force evaluation sits behind the [`Acceleration`] trait so the direct
//! O(n²) sum can be replaced (tree code, pairwise cutoff) without touching
//! the integrators or the driver.

use tracing::debug;

use super::states::{Body, NVec3};

/// Observable side effects of one force evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForceStats {
    /// Pairs skipped because the two bodies coincide
    pub degenerate_pairs: usize,
}

impl std::ops::AddAssign for ForceStats {
    fn add_assign(&mut self, rhs: Self) {
        self.degenerate_pairs += rhs.degenerate_pairs;
    }
}

/// Trait for acceleration sources.
/// Implementations add their contribution into `out[i]` for each body.
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) -> ForceStats;
}

/// Collection of acceleration terms whose contributions are summed into a
/// single acceleration vector per body
#[derive(Default)]
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations for all bodies.
    /// `out[i]` is overwritten with the sum of contributions from all terms.
    pub fn accumulate_accels(&self, bodies: &[Body], out: &mut [NVec3]) -> ForceStats {
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        let mut stats = ForceStats::default();
        for term in &self.terms {
            stats += term.acceleration(bodies, out);
        }
        stats
    }
}

/// Direct pairwise Newtonian gravity, no softening.
/// Coincident pairs contribute nothing.
pub struct NewtonianGravity {
    pub g: f64,
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) -> ForceStats {
        let n = bodies.len();
        let mut stats = ForceStats::default();

        // Each unordered pair once; i is pulled along +r, j along -r
        for i in 0..n {
            let bi = &bodies[i];
            for j in (i + 1)..n {
                let bj = &bodies[j];

                let r = bj.position - bi.position;
                let dist = r.norm();
                if dist == 0.0 {
                    debug!(a = %bi.name, b = %bj.name, "coincident bodies, pair skipped");
                    stats.degenerate_pairs += 1;
                    continue;
                }

                // G / |r|^3, so that coef * m * r = G m / |r|^2 along r-hat
                let coef = self.g / (dist * dist * dist);

                out[i] += coef * bj.mass * r;
                out[j] -= coef * bi.mass * r;
            }
        }
        stats
    }
}

/// Pull of the central star, held fixed at the origin
pub struct CentralField {
    pub g: f64,
    pub central_mass: f64,
}

impl Acceleration for CentralField {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) -> ForceStats {
        let mut stats = ForceStats::default();
        let mu = self.g * self.central_mass;

        for (b, a) in bodies.iter().zip(out.iter_mut()) {
            let dist = b.position.norm();
            if dist == 0.0 {
                debug!(body = %b.name, "body at the central star, pull skipped");
                stats.degenerate_pairs += 1;
                continue;
            }
            *a -= mu / (dist * dist * dist) * b.position;
        }
        stats
    }
}
