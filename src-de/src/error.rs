//! Error types for the Differential Evolution engine

use thiserror::Error;

/// Errors raised while configuring or setting up a DE run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DEError {
    #[error("bound[{index}] has upper < lower ({upper} < {lower})")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    #[error("bound[{index}] is not finite ({value})")]
    NonFiniteBound { index: usize, value: f64 },

    #[error("lower/upper size mismatch: {lower} != {upper}")]
    BoundsMismatch { lower: usize, upper: usize },

    #[error("population multiplier must be at least 1, got {pop_size}")]
    PopulationTooSmall { pop_size: usize },

    #[error("mutation factor must lie in [0, 2], got [{min}, {max})")]
    InvalidMutation { min: f64, max: f64 },

    #[error("recombination must lie in [0, 1], got {0}")]
    InvalidRecombination(f64),

    #[error("at least one island is required")]
    InvalidIslands,

    #[error("migration interval must be at least one generation")]
    InvalidMigrationInterval,
}

pub type Result<T> = std::result::Result<T, DEError>;
