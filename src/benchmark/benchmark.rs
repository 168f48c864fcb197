//! Wall-clock benchmarks for the hot loops
//!
//! Plain `Instant` timing printed as tables, run with `--bench`.

use std::time::Instant;

use crate::simulation::constants::{PhysicalConstants, AU};
use crate::simulation::forces::{AccelSet, Acceleration, CentralField, NewtonianGravity};
use crate::simulation::integrator::{euler_step, verlet_step};
use crate::simulation::kepler::{KeplerSolver, Projection};
use crate::simulation::states::{Body, NVec3, OrbitalElements};

/// Deterministic ring of `n` asteroid-sized bodies between 1 and 5 AU
fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let position = NVec3::new(
                (i_f * 0.37).sin() * 5.0 * AU,
                (i_f * 0.13).cos() * 5.0 * AU,
                (i_f * 0.07).sin() * 0.1 * AU,
            );
            Body::minor(format!("b{i}"), 1.0e20, 1.0e5, OrbitalElements::circular(AU))
                .with_state(position, NVec3::zeros())
        })
        .collect()
}

/// Time one direct-sum force evaluation for growing `n`
pub fn bench_gravity() {
    let constants = PhysicalConstants::default();
    let ns = [50, 100, 200, 400, 800, 1600];

    for n in ns {
        let bodies = make_bodies(n);
        let mut out = vec![NVec3::zeros(); n];
        let direct = NewtonianGravity { g: constants.g };

        // Warm up
        direct.acceleration(&bodies, &mut out);

        let t0 = Instant::now();
        direct.acceleration(&bodies, &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {:8.6} s", dt_direct);
    }
}

/// Time one Euler and one Verlet step for growing `n`
pub fn bench_nbody_step() {
    let constants = PhysicalConstants::default();
    let ns = [50, 100, 200, 400, 800];
    let steps = 5;
    let dt = 86_400.0;

    let forces = AccelSet::new()
        .with(NewtonianGravity { g: constants.g })
        .with(CentralField {
            g: constants.g,
            central_mass: constants.central_mass,
        });

    for n in ns {
        let template = make_bodies(n);

        let mut bodies = template.clone();
        let t0 = Instant::now();
        for _ in 0..steps {
            euler_step(&mut bodies, &forces, dt);
        }
        let euler_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        let mut bodies = template.clone();
        let t1 = Instant::now();
        for _ in 0..steps {
            verlet_step(&mut bodies, &forces, dt);
        }
        let verlet_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        println!(
            "N = {:5}, euler step = {:8.6} s,   verlet step = {:8.6} s",
            n, euler_per_step, verlet_per_step
        );
    }
}

/// Nanoseconds per position solve, per eccentricity, for both projections
pub fn bench_kepler() {
    let samples = 100_000;
    println!("e,simplified_ns,full_ns");

    for e in [0.0, 0.1, 0.2, 0.3, 0.5] {
        let el = OrbitalElements::new(AU, e, 0.1, 0.5, 1.0, 0.0);
        let mut times = [0.0; 2];

        for (slot, projection) in [Projection::SingleInclination, Projection::Full].into_iter().enumerate() {
            let solver = KeplerSolver::new(projection);
            let mut sink = 0.0;
            let t0 = Instant::now();
            for k in 0..samples {
                let m = k as f64 * std::f64::consts::TAU / samples as f64;
                sink += solver.position_from_mean_anomaly(&el, m).0.x;
            }
            times[slot] = t0.elapsed().as_secs_f64() * 1e9 / samples as f64;
            std::hint::black_box(sink);
        }

        println!("{},{:.1},{:.1}", e, times[0], times[1]);
    }
}
