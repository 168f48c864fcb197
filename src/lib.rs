pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::constants::PhysicalConstants;
pub use simulation::states::{Body, BodyKind, BodyCategory, OrbitalElements, NVec3};
pub use simulation::error::{SimError, SimResult};
pub use simulation::kepler::{KeplerSolver, KeplerSolution, Projection};
pub use simulation::propagator::OrbitalPropagator;
pub use simulation::forces::{Acceleration, AccelSet, ForceStats, NewtonianGravity, CentralField};
pub use simulation::integrator::{euler_step, verlet_step, StepReport};
pub use simulation::registry::{Registry, CentralBody};
pub use simulation::engine::{EngineSettings, IntegratorKind, Mode};
pub use simulation::driver::{Simulation, Snapshot, Snapshots, Trajectory, Track, StepDiagnostics};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, BodyConfig, UnitsConfig};

pub use benchmark::benchmark::{bench_gravity, bench_nbody_step, bench_kepler};
