//! Build a ready-to-run simulation from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), converts every value to SI and
//! produces a [`Scenario`] holding the run length and the seeded
//! [`Simulation`]. Catalog entries the registry rejects are logged and
//! counted, the rest of the catalog still loads.

use tracing::info;

use crate::configuration::config::{
    BodyConfig, IntegratorConfig, ModeConfig, ProjectionConfig, ScenarioConfig, UnitsConfig,
};
use crate::simulation::constants::{PhysicalConstants, DAY, KM, YEAR_DAYS};
use crate::simulation::driver::Simulation;
use crate::simulation::engine::{EngineSettings, IntegratorKind, Mode};
use crate::simulation::error::{SimError, SimResult};
use crate::simulation::kepler::Projection;
use crate::simulation::registry::{CentralBody, Registry};
use crate::simulation::states::{Body, BodyKind, OrbitalElements};

pub struct Scenario {
    pub steps: usize,
    pub simulation: Simulation,
    /// Catalog entries that were not registered
    pub rejected: Vec<SimError>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let constants = build_constants(&cfg)?;
        let engine = build_engine(&cfg)?;
        let steps = step_count(&cfg)?;

        let central_name = cfg
            .constants
            .as_ref()
            .and_then(|c| c.central_name.clone())
            .unwrap_or_else(|| "Sun".to_string());
        let mut registry = Registry::new(Some(CentralBody::from_constants(central_name, &constants)));
        let mut rejected = Vec::new();

        // Primaries first so satellites can resolve their parent
        for bc in &cfg.primaries {
            let body = body_from_config(bc, BodyKind::Primary, &cfg.units);
            if let Err(e) = registry.add_primary(body) {
                rejected.push(e);
            }
        }
        for bc in &cfg.satellites {
            let parent = bc.parent.clone().unwrap_or_default();
            let body = body_from_config(bc, BodyKind::Satellite { parent }, &cfg.units);
            if let Err(e) = registry.add_satellite(body) {
                rejected.push(e);
            }
        }
        for bc in &cfg.minor_bodies {
            let body = body_from_config(bc, BodyKind::Minor, &cfg.units);
            if let Err(e) = registry.add_minor_body(body) {
                rejected.push(e);
            }
        }

        info!(
            primaries = registry.primaries().count(),
            satellites = registry.satellites().count(),
            minor_bodies = registry.minor_bodies().count(),
            rejected = rejected.len(),
            steps,
            "scenario loaded"
        );

        let simulation = Simulation::new(registry, engine, constants)?;
        Ok(Self {
            steps,
            simulation,
            rejected,
        })
    }
}

fn build_constants(cfg: &ScenarioConfig) -> SimResult<PhysicalConstants> {
    let d = PhysicalConstants::default();
    match &cfg.constants {
        None => Ok(d),
        Some(c) => PhysicalConstants::new(
            c.g.unwrap_or(d.g),
            c.central_mass.unwrap_or(d.central_mass),
            c.central_radius.unwrap_or(d.central_radius),
        ),
    }
}

fn build_engine(cfg: &ScenarioConfig) -> SimResult<EngineSettings> {
    let dt_days = cfg.parameters.dt_days;
    if !dt_days.is_finite() || dt_days <= 0.0 {
        return Err(SimError::InvalidConfig(format!(
            "dt_days must be > 0, got {dt_days}"
        )));
    }

    let e = &cfg.engine;
    Ok(EngineSettings {
        mode: match e.mode {
            ModeConfig::Kepler => Mode::Kepler,
            ModeConfig::NBody => Mode::NBody,
        },
        integrator: match e.integrator {
            IntegratorConfig::Euler => IntegratorKind::Euler,
            IntegratorConfig::Verlet => IntegratorKind::Verlet,
        },
        projection: match e.projection {
            ProjectionConfig::Simplified => Projection::SingleInclination,
            ProjectionConfig::Full => Projection::Full,
        },
        central_attraction: e.central_attraction,
        seed_velocities: e.seed_velocities,
        dt: dt_days * DAY,
    })
}

/// Longest run a scenario may ask for
pub const MAX_STEPS: usize = 1_000_000_000;

/// `steps` wins over `years`; one of them is required
fn step_count(cfg: &ScenarioConfig) -> SimResult<usize> {
    let p = &cfg.parameters;
    let steps = match (p.steps, p.years) {
        (Some(steps), _) => steps,
        (None, Some(years)) if years.is_finite() && years >= 0.0 => {
            let steps = (years * YEAR_DAYS / p.dt_days).round();
            if steps > MAX_STEPS as f64 {
                return Err(SimError::InvalidConfig(format!(
                    "{years} years at {} days per step is more than {MAX_STEPS} steps",
                    p.dt_days
                )));
            }
            steps as usize
        }
        (None, Some(years)) => {
            return Err(SimError::InvalidConfig(format!(
                "years must be >= 0, got {years}"
            )))
        }
        (None, None) => {
            return Err(SimError::InvalidConfig(
                "parameters need either `steps` or `years`".to_string(),
            ))
        }
    };
    if steps > MAX_STEPS {
        return Err(SimError::InvalidConfig(format!(
            "{steps} steps requested, the limit is {MAX_STEPS}"
        )));
    }
    Ok(steps)
}

fn body_from_config(bc: &BodyConfig, kind: BodyKind, units: &UnitsConfig) -> Body {
    let length = bc.length.unwrap_or(units.length).to_meters();
    let angle = |v: f64| units.angle.to_radians(v);

    let elements = OrbitalElements::new(
        bc.a * length,
        bc.e,
        angle(bc.i),
        angle(bc.node),
        angle(bc.periapsis),
        angle(bc.mean_anomaly),
    );
    Body::new(bc.name.clone(), kind, bc.mass, bc.radius * KM, elements)
}
