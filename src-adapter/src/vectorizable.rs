//! Optimizing structured values by flattening them to a point

use crate::adapter::optimize;
use crate::error::AdapterError;
use crate::params::OptimizerParams;

/// A value that can be flattened to a point and rebuilt from one
///
/// `Context` carries whatever `from_vec` needs besides the numbers (shapes,
/// names, fixed fields).
pub trait Vectorizable {
    type Context;

    fn to_vec(&self) -> (Vec<f64>, Self::Context);

    fn from_vec(vec: &[f64], context: &Self::Context) -> Self;
}

/// Optimize a structured value.
///
/// `archetype` fixes the dimension and the context; its current values are
/// not used as a starting point. Every candidate is rebuilt with
/// `T::from_vec` before being handed to `evaluate`.
///
/// # Errors
///
/// Propagates `AdapterError::Allocation` from the adapter.
pub fn optimize_entity<T, F>(
    archetype: &T,
    params: &OptimizerParams,
    evaluate: F,
) -> Result<T, AdapterError>
where
    T: Vectorizable,
    F: Fn(T) -> f64,
{
    let (archetype_vec, context) = archetype.to_vec();
    let mut out = vec![0.0; archetype_vec.len()];
    optimize(&mut out, params, |x| evaluate(T::from_vec(x, &context)))?;
    Ok(T::from_vec(&out, &context))
}
