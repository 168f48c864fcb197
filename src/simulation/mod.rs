pub mod constants;
pub mod states;
pub mod error;
pub mod kepler;
pub mod propagator;
pub mod forces;
pub mod integrator;
pub mod registry;
pub mod engine;
pub mod driver;
pub mod scenario;
