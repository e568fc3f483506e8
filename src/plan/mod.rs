//! Action plan generation and scope item dependency analysis.

pub mod action_plan;
pub mod dependencies;

pub use action_plan::{
    dependency_report, generate_action_plan, ActionPlan, ActionPlanPhase, PlanTask, TaskPriority,
    DEFAULT_CONTRACTOR, POSITIONAL_CRITICAL_PHASES,
};
pub use dependencies::{
    CriticalChain, DanglingDependency, DependencyError, DependencyGraph, DependencyReport,
};
