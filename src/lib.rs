// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod estimate;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod plan;
pub mod priority;
pub mod storage;
pub mod wizard;

// Re-export commonly used types
pub use crate::core::{
    Address, Condition, InvestmentStrategy, PriorityTier, Project, ProjectStatus, PropertyType,
    RoomAssessment, ScopeItem, ScopeItemDraft, ScopeItemPatch, Vendor,
};

pub use crate::errors::{FieldError, RehabError, ValidationErrors};

pub use crate::estimate::{calculate_estimate, portfolio_stats, EstimateSummary, PortfolioStats};

pub use crate::priority::{urgency_score, CategoryClass, PriorityMatrix, Quadrant};

pub use crate::plan::{generate_action_plan, ActionPlan, ActionPlanPhase, DependencyGraph};

pub use crate::catalog::{smart_recommendations, Catalog};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::storage::{
    FileStore, MemoryStore, ProjectRecord, ProjectStore, RestStore, StorageError, VendorStore,
};

pub use crate::wizard::{
    EstimatorSession, StepOutcome, StepPayload, WizardCursor, WizardError, WizardStep,
};
