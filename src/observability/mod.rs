//! Logging and crash reporting.
//!
//! ## Usage
//!
//! ```ignore
//! use rehab_estimator::observability::{init_tracing, install_panic_hook, set_step};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(verbosity, plain);
//!     // ...
//!     let _step = set_step(WizardStep::Scope);
//!     // A panic here reports step 4 in the crash report
//! }
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, reset_context, set_operation, set_project, set_step, ContextGuard,
    SessionContext,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::{init_tracing, level_for_verbosity};
