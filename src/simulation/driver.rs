//! Synchronous simulation driver
//!
//! A [`Simulation`] holds the seeded initial state and produces the
//! position time series as a lazy, finite iterator of [`Snapshot`]s.
//! Every call to [`Simulation::snapshots`] restarts from the initial
//! state, so a run is deterministic and can be replayed or consumed frame
//! by frame by a renderer that knows nothing about the physics.

use tracing::{debug, info, warn};

use super::constants::PhysicalConstants;
use super::engine::{EngineSettings, IntegratorKind, Mode};
use super::error::{SimError, SimResult};
use super::forces::{AccelSet, CentralField, NewtonianGravity};
use super::integrator::{euler_step, verlet_step};
use super::kepler::KeplerSolver;
use super::propagator::OrbitalPropagator;
use super::registry::Registry;
use super::states::{BodyCategory, NVec3};

// track storage reserved up front, longer runs grow as they go
const RESERVE_STEPS: usize = 1 << 16;

/// Conditions that were handled but should not go unnoticed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepDiagnostics {
    pub degenerate_pairs: usize, // coincident pairs skipped by the force terms
    pub unconverged: usize,      // Kepler solves that ran out of iterations
}

impl std::ops::AddAssign for StepDiagnostics {
    fn add_assign(&mut self, rhs: Self) {
        self.degenerate_pairs += rhs.degenerate_pairs;
        self.unconverged += rhs.unconverged;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyPosition {
    pub category: BodyCategory,
    pub name: String,
    pub position: NVec3,
}

/// State of every body after one step
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub step: usize, // 1 for the first step
    pub time: f64,   // seconds since the start
    pub positions: Vec<BodyPosition>,
    pub diagnostics: StepDiagnostics,
}

impl Snapshot {
    pub fn position(&self, category: BodyCategory, name: &str) -> Option<NVec3> {
        self.positions
            .iter()
            .find(|p| p.category == category && p.name == name)
            .map(|p| p.position)
    }
}

/// One body's positions over a whole run
#[derive(Debug, Clone)]
pub struct Track {
    pub category: BodyCategory,
    pub name: String,
    pub points: Vec<NVec3>,
}

#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    pub times: Vec<f64>,
    pub tracks: Vec<Track>,
    pub diagnostics: StepDiagnostics, // totals over the run
}

impl Trajectory {
    pub fn track(&self, category: BodyCategory, name: &str) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|t| t.category == category && t.name == name)
    }

    pub fn steps(&self) -> usize {
        self.times.len()
    }
}

pub struct Simulation {
    engine: EngineSettings,
    constants: PhysicalConstants,
    solver: KeplerSolver,
    propagator: OrbitalPropagator,
    forces: AccelSet,
    initial: Registry,
    parents: Vec<Option<usize>>, // parent index per body, satellites only
}

impl Simulation {
    /// Seed positions (and, for n-body runs, velocities) from the orbital
    /// elements and prepare the force terms.
    pub fn new(registry: Registry, engine: EngineSettings, constants: PhysicalConstants) -> SimResult<Self> {
        if !engine.dt.is_finite() || engine.dt <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "time step must be > 0 seconds, got {}",
                engine.dt
            )));
        }

        let parents = registry
            .bodies()
            .iter()
            .map(|b| match b.kind.parent() {
                Some(parent) => registry
                    .index_of(BodyCategory::Primary, parent)
                    .map(Some)
                    .ok_or_else(|| SimError::UnresolvedParent {
                        name: b.name.clone(),
                        parent: parent.to_string(),
                    }),
                None => Ok(None),
            })
            .collect::<SimResult<Vec<_>>>()?;

        let mut forces = AccelSet::new().with(NewtonianGravity { g: constants.g });
        if engine.central_attraction {
            forces = forces.with(CentralField {
                g: constants.g,
                central_mass: constants.central_mass,
            });
        }

        debug!(
            terms = forces.len(),
            bodies = registry.len(),
            mu = constants.mu(),
            "force terms ready"
        );

        let mut sim = Self {
            solver: KeplerSolver::new(engine.projection),
            propagator: OrbitalPropagator::new(constants),
            engine,
            constants,
            forces,
            initial: registry,
            parents,
        };
        let unconverged = sim.seed();
        if unconverged > 0 {
            warn!(unconverged, "initial Kepler solves did not converge");
        }
        Ok(sim)
    }

    /// Place every body on its ellipse. Primaries and minor bodies go
    /// first so satellites can be offset from their parent.
    fn seed(&mut self) -> usize {
        let seed_velocity = self.engine.mode == Mode::NBody && self.engine.seed_velocities;
        let central_mu = self.constants.mu();
        let mut unconverged = 0;
        let bodies = self.initial.bodies_mut();

        for satellites in [false, true] {
            for i in 0..bodies.len() {
                let parent = self.parents[i];
                if parent.is_some() != satellites {
                    continue;
                }
                let (origin, drift, mu) = match parent {
                    Some(p) => (
                        bodies[p].position,
                        bodies[p].velocity,
                        self.constants.g * bodies[p].mass,
                    ),
                    None => (NVec3::zeros(), NVec3::zeros(), central_mu),
                };

                let b = &mut bodies[i];
                let m = b.elements.mean_anomaly;
                let (rel, sol) = self.solver.position_from_mean_anomaly(&b.elements, m);
                if !sol.converged {
                    unconverged += 1;
                }
                b.position = origin + rel;
                if seed_velocity {
                    b.velocity = drift + self.solver.velocity_from_mean_anomaly(&b.elements, m, mu);
                }
            }
        }
        unconverged
    }

    pub fn engine(&self) -> &EngineSettings {
        &self.engine
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Seeded state at time zero
    pub fn initial(&self) -> &Registry {
        &self.initial
    }

    /// Lazily produce `steps` snapshots, starting over from the initial state
    pub fn snapshots(&self, steps: usize) -> Snapshots<'_> {
        Snapshots {
            sim: self,
            registry: self.initial.clone(),
            step: 0,
            steps,
        }
    }

    /// Run `steps` steps and collect every body's track
    pub fn run(&self, steps: usize) -> Trajectory {
        let reserve = steps.min(RESERVE_STEPS);
        let mut trajectory = Trajectory {
            times: Vec::with_capacity(reserve),
            tracks: self
                .initial
                .bodies()
                .iter()
                .map(|b| Track {
                    category: b.category(),
                    name: b.name.clone(),
                    points: Vec::with_capacity(reserve),
                })
                .collect(),
            diagnostics: StepDiagnostics::default(),
        };

        for snap in self.snapshots(steps) {
            trajectory.times.push(snap.time);
            for (track, p) in trajectory.tracks.iter_mut().zip(snap.positions) {
                track.points.push(p.position);
            }
            trajectory.diagnostics += snap.diagnostics;
        }

        if trajectory.diagnostics.unconverged > 0 {
            warn!(
                unconverged = trajectory.diagnostics.unconverged,
                "some Kepler solves ran out of iterations, positions are approximate"
            );
        }
        info!(
            steps,
            bodies = self.initial.len(),
            degenerate_pairs = trajectory.diagnostics.degenerate_pairs,
            unconverged = trajectory.diagnostics.unconverged,
            "simulation finished"
        );
        trajectory
    }

    /// Advance `registry` by one step in place
    fn step(&self, registry: &mut Registry) -> StepDiagnostics {
        match self.engine.mode {
            Mode::Kepler => self.kepler_step(registry),
            Mode::NBody => {
                let bodies = registry.bodies_mut();
                let report = match self.engine.integrator {
                    IntegratorKind::Euler => euler_step(bodies, &self.forces, self.engine.dt),
                    IntegratorKind::Verlet => verlet_step(bodies, &self.forces, self.engine.dt),
                };
                StepDiagnostics {
                    degenerate_pairs: report.stats.degenerate_pairs,
                    unconverged: 0,
                }
            }
        }
    }

    fn kepler_step(&self, registry: &mut Registry) -> StepDiagnostics {
        let dt = self.engine.dt;
        let central_mass = self.constants.central_mass;
        let mut diag = StepDiagnostics::default();
        let bodies = registry.bodies_mut();

        for satellites in [false, true] {
            for i in 0..bodies.len() {
                let parent = self.parents[i];
                if parent.is_some() != satellites {
                    continue;
                }
                let (origin, mass) = match parent {
                    Some(p) => (bodies[p].position, bodies[p].mass),
                    None => (NVec3::zeros(), central_mass),
                };

                let b = &mut bodies[i];
                if let Err(e) = self.propagator.advance(b, dt, mass) {
                    warn!(body = %b.name, "propagation skipped: {e}");
                    continue;
                }
                let (rel, sol) = self
                    .solver
                    .position_from_mean_anomaly(&b.elements, b.elements.mean_anomaly);
                if !sol.converged {
                    debug!(
                        body = %b.name,
                        iterations = sol.iterations,
                        "Kepler solve did not converge, using last iterate"
                    );
                    diag.unconverged += 1;
                }
                b.position = origin + rel;
            }
        }
        diag
    }
}

/// Iterator over the snapshots of one run
pub struct Snapshots<'a> {
    sim: &'a Simulation,
    registry: Registry,
    step: usize,
    steps: usize,
}

impl Iterator for Snapshots<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.step >= self.steps {
            return None;
        }
        let diagnostics = self.sim.step(&mut self.registry);
        self.step += 1;

        let positions = self
            .registry
            .bodies()
            .iter()
            .map(|b| BodyPosition {
                category: b.category(),
                name: b.name.clone(),
                position: b.position,
            })
            .collect();

        Some(Snapshot {
            step: self.step,
            time: self.step as f64 * self.sim.engine.dt,
            positions,
            diagnostics,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps - self.step;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Snapshots<'_> {}
