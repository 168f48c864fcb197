//! Owner of every orbiting body in a run
//!
//! Bodies live in one insertion-ordered vector tagged by [`BodyKind`]; the
//! primary, satellite and minor-body collections are views over it. The
//! integrators mutate the whole slice in place.
//!
//! Rejected insertions (duplicate name, unknown parent, invalid elements)
//! leave the registry unchanged and are returned as errors. Callers that
//! want best-effort loading log them and carry on, see
//! [`Scenario`](super::scenario::Scenario).

use tracing::warn;

use super::constants::PhysicalConstants;
use super::error::{SimError, SimResult};
use super::states::{Body, BodyCategory};

/// The star everything orbits. Fixed at the origin, never integrated.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralBody {
    pub name: String,
    pub mass: f64,   // kg
    pub radius: f64, // m
}

impl CentralBody {
    pub fn from_constants(name: impl Into<String>, constants: &PhysicalConstants) -> Self {
        Self {
            name: name.into(),
            mass: constants.central_mass,
            radius: constants.central_radius,
        }
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        Self::from_constants("Sun", &PhysicalConstants::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    central: CentralBody,
    bodies: Vec<Body>,
}

impl Registry {
    pub fn new(central: Option<CentralBody>) -> Self {
        Self {
            central: central.unwrap_or_default(),
            bodies: Vec::new(),
        }
    }

    pub fn central(&self) -> &CentralBody {
        &self.central
    }

    pub fn add_primary(&mut self, body: Body) -> SimResult<()> {
        self.insert(body, BodyCategory::Primary)
    }

    /// Requires the parent primary to be registered already
    pub fn add_satellite(&mut self, body: Body) -> SimResult<()> {
        self.insert(body, BodyCategory::Satellite)
    }

    pub fn add_minor_body(&mut self, body: Body) -> SimResult<()> {
        self.insert(body, BodyCategory::Minor)
    }

    fn insert(&mut self, body: Body, expected: BodyCategory) -> SimResult<()> {
        let result = self.check_insert(&body, expected);
        match result {
            Ok(()) => self.bodies.push(body),
            Err(ref e) => warn!(body = %body.name, "insertion skipped: {e}"),
        }
        result
    }

    fn check_insert(&self, body: &Body, expected: BodyCategory) -> SimResult<()> {
        let found = body.category();
        if found != expected {
            return Err(SimError::InvalidKind {
                name: body.name.clone(),
                expected,
                found,
            });
        }
        body.validate()?;

        if self.find(expected, &body.name).is_some() {
            return Err(SimError::DuplicateName {
                category: expected,
                name: body.name.clone(),
            });
        }

        if let Some(parent) = body.kind.parent() {
            if self.find(BodyCategory::Primary, parent).is_none() {
                return Err(SimError::UnresolvedParent {
                    name: body.name.clone(),
                    parent: parent.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn find(&self, category: BodyCategory, name: &str) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|b| b.category() == category && b.name == name)
    }

    /// Index of a body in [`bodies`](Self::bodies)
    pub fn index_of(&self, category: BodyCategory, name: &str) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.category() == category && b.name == name)
    }

    pub fn in_category(&self, category: BodyCategory) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.category() == category)
    }

    pub fn primaries(&self) -> impl Iterator<Item = &Body> {
        self.in_category(BodyCategory::Primary)
    }

    pub fn satellites(&self) -> impl Iterator<Item = &Body> {
        self.in_category(BodyCategory::Satellite)
    }

    pub fn minor_bodies(&self) -> impl Iterator<Item = &Body> {
        self.in_category(BodyCategory::Minor)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
