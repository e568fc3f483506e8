//! Error types for rehab estimator operations.
//!
//! Three families of failure exist:
//!
//! - **Validation**: a step payload or record was rejected before it touched
//!   the project. Field errors are accumulated so every problem is reported
//!   at once instead of failing on the first one.
//! - **Persistence**: the project/vendor store failed. These are recovered at
//!   the wizard session boundary and never corrupt in-memory state.
//! - **Configuration / I/O**: problems at the edges (config files, drafts).
//!
//! Calculators (estimate, priority matrix, action plan) never fail on empty
//! input and therefore have no error type of their own.
//!
//! # Example
//!
//! ```rust
//! use rehab_estimator::errors::{RehabError, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! errors.push("square_feet", "Square footage must be at least 100");
//! let err: RehabError = errors.into();
//! assert!(err.is_user_fixable());
//! assert_eq!(err.category(), "Validation");
//! ```

use crate::plan::DependencyError;
use crate::storage::StorageError;
use crate::wizard::WizardError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated validation failures for one payload or record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Merge another set of errors, prefixing their field names.
    pub fn extend_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        self.errors
            .extend(other.errors.into_iter().map(|e| FieldError {
                field: format!("{}.{}", prefix, e.field),
                message: e.message,
            }));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no validation errors"),
            1 => write!(f, "{}", self.errors[0]),
            n => {
                write!(f, "{} validation errors: ", n)?;
                for (i, e) in self.errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Crate-level error type.
#[derive(Debug, Error)]
pub enum RehabError {
    /// Payload or record rejected before being applied
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Illegal wizard transition
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// Project or vendor store failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Scope item dependency graph problems
    #[error(transparent)]
    Dependency(#[from] DependencyError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RehabError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path context.
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation",
            Self::Wizard(_) => "Wizard",
            Self::Storage(_) => "Storage",
            Self::Dependency(_) => "Dependency",
            Self::Config { .. } => "Config",
            Self::Io(_) => "I/O",
            Self::Json(_) => "JSON",
        }
    }

    /// Errors the user can correct by changing their input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Wizard(_)
                | Self::Dependency(_)
                | Self::Config { .. }
                | Self::Json(_)
        )
    }

    /// Errors that may succeed when the triggering action is retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_retryable(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }

    /// The field errors carried by a validation failure, if any.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Wizard(WizardError::Invalid(errors)) => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RehabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_accumulate() {
        let mut errors = ValidationErrors::new();
        errors.push("project_name", "Project name is required");
        errors.push("square_feet", "Square footage must be at least 100");
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("square_feet"));
        let msg = errors.to_string();
        assert!(msg.starts_with("2 validation errors"));
    }

    #[test]
    fn test_extend_prefixed() {
        let mut outer = ValidationErrors::new();
        outer.extend_prefixed("address", ValidationErrors::single("zip", "too short"));
        assert!(outer.has_field("address.zip"));
    }

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_recorded_errors_are_returned() {
        let errors = ValidationErrors::single("zip", "too short");
        let returned = errors.clone().into_result().unwrap_err();
        assert_eq!(returned, errors);
    }

    #[test]
    fn test_storage_errors_are_not_user_fixable() {
        let err: RehabError = StorageError::Transport("connection refused".into()).into();
        assert!(!err.is_user_fixable());
        assert!(err.is_retryable());
        assert_eq!(err.category(), "Storage");
    }
}
