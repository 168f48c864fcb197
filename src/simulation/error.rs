//! Error types for the orbital engine
//!
//! Every variant is local and recoverable during a run except
//! `InvalidConstant`, which is only raised while setting up a scenario.

use thiserror::Error;

use super::states::BodyCategory;

/// Result type for engine operations
pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid physical constant {name}: {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("invalid orbital element for {body}: {reason}")]
    InvalidElement { body: String, reason: String },

    #[error("{category} named {name} already registered")]
    DuplicateName { category: BodyCategory, name: String },

    #[error("satellite {name} references unknown primary {parent}")]
    UnresolvedParent { name: String, parent: String },

    #[error("{name} is a {found}, expected a {expected}")]
    InvalidKind {
        name: String,
        expected: BodyCategory,
        found: BodyCategory,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
