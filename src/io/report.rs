//! Full estimate report for one project: every derived view plus warnings.

use crate::config::ReviewThresholds;
use crate::core::{Project, ProjectStatus};
use crate::estimate::{review_project, EstimateSummary, ProjectReview};
use crate::formatting::format_currency;
use crate::plan::{dependency_report, ActionPlan, DependencyReport};
use crate::priority::{PriorityMatrix, PriorityMatrixItem};
use crate::storage::ProjectStore;
use crate::wizard::{property_warnings, EstimatorSession, PropertyWarning, WarningLevel};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub project_id: String,
    pub project_name: String,
    pub status: ProjectStatus,
    pub generated_at: DateTime<Utc>,
    pub summary: EstimateSummary,
    pub review: ProjectReview,
    pub warnings: Vec<PropertyWarning>,
    pub priority_matrix: Vec<PriorityMatrixItem>,
    pub recommendations: Vec<String>,
    pub action_plan: ActionPlan,
    pub dependencies: DependencyReport,
}

impl EstimateReport {
    pub fn build(project: &Project, thresholds: &ReviewThresholds) -> Self {
        let summary = EstimateSummary::for_project(project);
        let matrix = PriorityMatrix::build(&project.scope_items);
        let plan = ActionPlan::generate(&project.scope_items);
        Self::assemble(project, summary, &matrix, plan, thresholds)
    }

    /// Report over a session's already computed views.
    pub fn from_session<S: ProjectStore>(
        session: &EstimatorSession<S>,
        thresholds: &ReviewThresholds,
    ) -> Self {
        Self::assemble(
            session.project(),
            session.estimate_summary().clone(),
            session.priority_matrix(),
            session.action_plan().clone(),
            thresholds,
        )
    }

    fn assemble(
        project: &Project,
        summary: EstimateSummary,
        matrix: &PriorityMatrix,
        plan: ActionPlan,
        thresholds: &ReviewThresholds,
    ) -> Self {
        let review = review_project(project, &summary, &plan, thresholds);
        let dependencies = dependency_report(&project.scope_items);
        let warnings = collect_warnings(project, &summary, &plan, &dependencies);
        Self {
            project_id: project.id.clone(),
            project_name: project.display_name().to_string(),
            status: project.status,
            generated_at: Utc::now(),
            summary,
            review,
            warnings,
            priority_matrix: matrix.items().to_vec(),
            recommendations: matrix.recommendations(),
            action_plan: plan,
            dependencies,
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.level == WarningLevel::Warning)
    }
}

fn warn(message: String) -> PropertyWarning {
    PropertyWarning {
        level: WarningLevel::Warning,
        message,
    }
}

fn collect_warnings(
    project: &Project,
    summary: &EstimateSummary,
    plan: &ActionPlan,
    dependencies: &DependencyReport,
) -> Vec<PropertyWarning> {
    let mut warnings = match (project.purchase_price, project.square_feet) {
        (Some(price), Some(sqft)) => property_warnings(price, sqft, project.arv),
        _ => Vec::new(),
    };

    if summary.is_over_budget() {
        let overrun = project
            .max_budget
            .map(|budget| summary.total_cost - budget)
            .unwrap_or_default();
        warnings.push(warn(format!(
            "Budget exceeded: estimated cost is {} over the max budget ({:.1}% used).",
            format_currency(overrun),
            summary.budget_usage
        )));
    } else if project.effective_budget().is_none() && summary.total_cost > 0.0 {
        warnings.push(PropertyWarning {
            level: WarningLevel::Info,
            message: "No max budget set; budget usage is reported as 0%.".to_string(),
        });
    }

    for phase in plan.phases() {
        for message in &phase.warnings {
            warnings.push(warn(format!("{}: {}", phase.name, message)));
        }
    }
    for cycle in &dependencies.cycles {
        warnings.push(warn(format!("Dependency cycle: {}", cycle.join(" -> "))));
    }
    warnings
}
