//! Per-dimension bound buffers

use crate::error::AdapterError;

/// Owner of the two broadcast bound buffers
///
/// Both buffers are released when the value is dropped, whichever way the
/// caller leaves the scope.
#[derive(Debug)]
pub struct BoundBuffers {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl BoundBuffers {
    /// Allocate `dimension`-long buffers filled with `lower` and `upper`.
    ///
    /// # Errors
    ///
    /// `AdapterError::Allocation` when either buffer cannot be reserved. A
    /// lower buffer obtained before the upper one failed is released before
    /// returning.
    pub fn try_broadcast(dimension: usize, lower: f64, upper: f64) -> Result<Self, AdapterError> {
        let lower = filled(dimension, lower, "lower")?;
        let upper = filled(dimension, upper, "upper")?;
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }
}

fn filled(dimension: usize, value: f64, buffer: &'static str) -> Result<Vec<f64>, AdapterError> {
    let mut v = Vec::new();
    v.try_reserve_exact(dimension)
        .map_err(|source| AdapterError::Allocation { buffer, dimension, source })?;
    v.resize(dimension, value);
    Ok(v)
}
