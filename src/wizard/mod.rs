//! The seven-step estimator wizard.
//!
//! [`EstimatorSession`] owns the in-progress project and every view derived
//! from it. Step payloads are validated before they are merged, and the
//! derived views are recomputed after every registry mutation.

pub mod draft;
pub mod payload;
pub mod session;
pub mod steps;
pub mod validation;

pub use draft::{DraftSnapshot, DRAFT_VERSION};
pub use payload::{
    ActionPlanPayload, AssessmentPayload, PrioritiesPayload, ScopePayload, StepPayload,
    StrategyPayload,
};
pub use session::{EstimatorSession, StepOutcome};
pub use steps::{StepStatus, WizardCursor, WizardStep};
pub use validation::{
    estimate_arv, is_valid_state_code, property_warnings, validate_project, PropertyDetails,
    PropertyWarning, WarningLevel,
};

use crate::errors::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("Step {0} does not exist (steps run from 1 to 7)")]
    OutOfRange(u8),

    #[error("Cannot jump to step {requested} before reaching it (current step is {current})")]
    StepLocked { requested: u8, current: u8 },

    #[error("Payload is for step '{payload}' but the wizard is on step {current}")]
    PayloadMismatch { payload: WizardStep, current: WizardStep },

    #[error("Step rejected: {0}")]
    Invalid(ValidationErrors),

    #[error("No scope item with id '{0}'")]
    UnknownItem(String),

    #[error("Unsupported draft version {found} (expected {expected})")]
    DraftVersion { found: u32, expected: u32 },
}

impl From<ValidationErrors> for WizardError {
    fn from(errors: ValidationErrors) -> Self {
        WizardError::Invalid(errors)
    }
}
