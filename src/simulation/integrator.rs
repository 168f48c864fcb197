//! Fixed-step time integrators for the n-body system
//!
//! Both integrators evaluate every acceleration from one snapshot of the
//! positions before any body is moved, so a step never mixes positions
//! from two different times.

use super::forces::{AccelSet, ForceStats};
use super::states::{Body, NVec3};

/// What happened during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub force_evaluations: usize,
    pub stats: ForceStats,
}

/// Advance all bodies by one explicit Euler step:
/// `v ← v + a dt`, then `x ← x + v dt` with the updated velocity.
///
/// First order in `dt`, no energy or momentum correction.
pub fn euler_step(bodies: &mut [Body], forces: &AccelSet, dt: f64) -> StepReport {
    let n = bodies.len();
    if n == 0 {
        return StepReport::default();
    }

    let mut accel = vec![NVec3::zeros(); n];
    let stats = forces.accumulate_accels(bodies, &mut accel);

    for (b, a) in bodies.iter_mut().zip(accel.iter()) {
        b.velocity += dt * *a;
        b.position += dt * b.velocity;
    }

    StepReport {
        force_evaluations: 1,
        stats,
    }
}

/// Advance all bodies by one velocity-Verlet step.
/// Two force evaluations per step, symplectic.
pub fn verlet_step(bodies: &mut [Body], forces: &AccelSet, dt: f64) -> StepReport {
    let n = bodies.len();
    if n == 0 {
        return StepReport::default();
    }
    let half_dt = 0.5 * dt;

    // a_n from x_n
    let mut a_old = vec![NVec3::zeros(); n];
    let mut stats = forces.accumulate_accels(bodies, &mut a_old);

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    for (b, a) in bodies.iter_mut().zip(a_old.iter()) {
        b.velocity += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for b in bodies.iter_mut() {
        b.position += dt * b.velocity;
    }

    // a_n+1 from x_n+1
    let mut a_new = vec![NVec3::zeros(); n];
    stats += forces.accumulate_accels(bodies, &mut a_new);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    for (b, a) in bodies.iter_mut().zip(a_new.iter()) {
        b.velocity += half_dt * *a;
    }

    StepReport {
        force_evaluations: 2,
        stats,
    }
}
