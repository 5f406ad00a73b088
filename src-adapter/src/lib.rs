//! boxopt - box-constrained minimization behind a flat calling convention
//!
//! The crate exposes one operation, "minimize this black-box objective over a
//! box", in two shapes:
//! - a safe Rust API ([`optimize`], [`optimize_with_context`],
//!   [`optimize_with`], [`optimize_entity`])
//! - a C ABI ([`capi`]) with the header in `include/boxopt.h`
//!
//! Data flow:
//! - caller → adapter: scalar bounds are broadcast to per-dimension buffers
//! - adapter → minimizer: exactly one call, the evaluator and context are
//!   forwarded untouched
//! - minimizer → caller: the best point lands in the caller's output buffer
//!
//! The search itself is delegated through the [`Minimizer`] trait; the
//! default implementation is the Differential Evolution engine of
//! `boxopt_de`.

use std::sync::Once;

// Module declarations
pub mod adapter;
pub mod bounds;
pub mod capi;
pub mod error;
pub mod params;
pub mod vectorizable;

// Re-exports for easier use
pub use adapter::{DeMinimizer, Minimizer, Outcome, optimize, optimize_with, optimize_with_context};
pub use bounds::BoundBuffers;
pub use boxopt_de::Effort;
pub use error::{AdapterError, Status};
pub use params::{OptimizerParams, OptimizerParamsBuilder};
pub use vectorizable::{Vectorizable, optimize_entity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for the library
static INIT: Once = Once::new();

/// Install an `env_logger` reading its filter from `BOXOPT_LOG` (default
/// `warn`). Later calls do nothing, as does a call made after the host
/// process already installed a logger.
pub fn init_logging() {
    INIT.call_once(|| {
        let installed = env_logger::Builder::from_env(
            env_logger::Env::default().filter_or("BOXOPT_LOG", "warn"),
        )
        .try_init();
        if installed.is_ok() {
            log::info!("boxopt v{} logging ready", VERSION);
        }
    });
}
