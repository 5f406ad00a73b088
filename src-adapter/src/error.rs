//! Adapter errors and the flat status codes they map to at the C boundary

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors recognized by the adapter itself
///
/// Failures inside the minimizer or the evaluator are not represented here.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("could not allocate the {buffer} bound buffer for {dimension} dimensions")]
    Allocation {
        buffer: &'static str,
        dimension: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("null pointer passed for `{0}`")]
    NullPointer(&'static str),

    #[error("negative dimension: {0}")]
    NegativeDimension(i32),

    #[error("bounds must be finite, got [{lower}, {upper}]")]
    NonFiniteBound { lower: f64, upper: f64 },
}

/// Status codes returned across the C ABI
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success = 0,
    AllocationFailure = -1,
    InvalidArgument = -2,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Static NUL-terminated description, for `boxopt_status_message`
    pub fn message(code: i32) -> &'static std::ffi::CStr {
        match code {
            0 => c"success",
            -1 => c"allocation failure",
            -2 => c"invalid argument",
            _ => c"unknown status",
        }
    }
}

impl From<&AdapterError> for Status {
    fn from(err: &AdapterError) -> Self {
        match err {
            AdapterError::Allocation { .. } => Status::AllocationFailure,
            AdapterError::NullPointer(_)
            | AdapterError::NegativeDimension(_)
            | AdapterError::NonFiniteBound { .. } => Status::InvalidArgument,
        }
    }
}

impl<T> From<&Result<T, AdapterError>> for Status {
    fn from(result: &Result<T, AdapterError>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => Status::from(e),
        }
    }
}
