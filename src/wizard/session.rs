//! Wizard session: the single owner of the in-progress project.

use super::payload::validate_assessments;
use super::{PropertyWarning, StepPayload, StepStatus, WizardCursor, WizardError, WizardStep};
use crate::catalog::smart_recommendations;
use crate::config::ReviewThresholds;
use crate::core::{
    overall_condition_score, Project, ProjectStatus, RoomAssessment, ScopeItem, ScopeItemDraft,
    ScopeItemPatch,
};
use crate::errors::RehabError;
use crate::estimate::{review_project, EstimateSummary, ProjectReview};
use crate::observability::{set_operation, set_project, set_step};
use crate::plan::{dependency_report, ActionPlan, DependencyReport};
use crate::priority::PriorityMatrix;
use crate::storage::{generate_id, ProjectRecord, ProjectStore, StorageError};
use std::collections::BTreeMap;

/// What happened after a step payload was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced {
        from: WizardStep,
        to: WizardStep,
        warnings: Vec<PropertyWarning>,
    },
    /// The final step saved the project.
    Completed { project_id: String },
}

/// Drives the wizard and keeps the derived views in step with the project.
///
/// Persistence failures are recorded in [`EstimatorSession::error`] and
/// leave the in-memory project as it was before the attempt.
pub struct EstimatorSession<S: ProjectStore> {
    store: S,
    project: Project,
    cursor: WizardCursor,
    summary: EstimateSummary,
    matrix: PriorityMatrix,
    plan: ActionPlan,
    thresholds: ReviewThresholds,
    error: Option<String>,
}

impl<S: ProjectStore> EstimatorSession<S> {
    pub fn new(store: S) -> Self {
        Self::with_project(store, Project::default(), WizardCursor::new())
    }

    /// Resume with an existing project and cursor position.
    pub fn with_project(store: S, project: Project, cursor: WizardCursor) -> Self {
        let mut session = Self {
            store,
            project,
            cursor,
            summary: EstimateSummary::default(),
            matrix: PriorityMatrix::default(),
            plan: ActionPlan::default(),
            thresholds: ReviewThresholds::default(),
            error: None,
        };
        session.recompute();
        session
    }

    pub fn with_thresholds(mut self, thresholds: ReviewThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn cursor(&self) -> &WizardCursor {
        &self.cursor
    }

    pub fn current_step(&self) -> WizardStep {
        self.cursor.current()
    }

    pub fn step_statuses(&self) -> Vec<(WizardStep, StepStatus)> {
        WizardStep::ALL
            .iter()
            .map(|step| (*step, self.cursor.status_of(*step)))
            .collect()
    }

    /// Message of the last failed persistence attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn estimate_summary(&self) -> &EstimateSummary {
        &self.summary
    }

    pub fn priority_matrix(&self) -> &PriorityMatrix {
        &self.matrix
    }

    pub fn action_plan(&self) -> &ActionPlan {
        &self.plan
    }

    pub fn review(&self) -> ProjectReview {
        review_project(&self.project, &self.summary, &self.plan, &self.thresholds)
    }

    pub fn dependency_report(&self) -> DependencyReport {
        dependency_report(&self.project.scope_items)
    }

    /// Validate `payload` against the current step, merge it and move on.
    ///
    /// On the final step the project is marked completed and saved; the
    /// cursor stays on the final step.
    pub fn advance_step(&mut self, payload: StepPayload) -> Result<StepOutcome, RehabError> {
        let from = self.cursor.current();
        let _step = set_step(from);

        if payload.step() != from {
            return Err(WizardError::PayloadMismatch {
                payload: payload.step(),
                current: from,
            }
            .into());
        }
        payload
            .validate(&self.project)
            .map_err(WizardError::Invalid)?;

        let warnings = match &payload {
            StepPayload::PropertyDetails(details) => details.warnings(),
            _ => Vec::new(),
        };

        if from.is_final() {
            return self.complete(payload);
        }

        payload.apply(&mut self.project);
        self.cursor.mark_completed(from);
        self.cursor.advance();
        self.recompute();

        let to = self.cursor.current();
        tracing::info!(from = from.number(), to = to.number(), "Advanced wizard step");
        Ok(StepOutcome::Advanced { from, to, warnings })
    }

    fn complete(&mut self, payload: StepPayload) -> Result<StepOutcome, RehabError> {
        let mut candidate = self.project.clone();
        payload.apply(&mut candidate);
        candidate.status = ProjectStatus::Completed;

        let mut cursor = self.cursor.clone();
        cursor.mark_completed(WizardStep::LAST);

        let saved = self.persist(candidate, &cursor)?;
        let project_id = saved.id.clone();
        self.project = saved;
        self.cursor = cursor;
        self.recompute();

        tracing::info!(project_id = %project_id, "Completed wizard");
        Ok(StepOutcome::Completed { project_id })
    }

    /// Save the project without finishing the wizard. Returns its id.
    pub fn save_draft(&mut self) -> Result<String, RehabError> {
        let cursor = self.cursor.clone();
        let saved = self.persist(self.project.clone(), &cursor)?;
        let id = saved.id.clone();
        self.project = saved;
        tracing::info!(project_id = %id, "Saved project draft");
        Ok(id)
    }

    /// Upsert `project`, returning it with the stored id and timestamps.
    /// The last error is replaced by the outcome of this attempt.
    fn persist(&mut self, project: Project, cursor: &WizardCursor) -> Result<Project, RehabError> {
        let _op = set_operation("save_project");
        let _project = set_project(project.id.clone());
        self.error = None;

        let record = ProjectRecord::from_project(&project, cursor.completed_steps());
        match self.store.upsert_project(record) {
            Ok(saved) => Ok(saved.into_project()),
            Err(e) => Err(self.record_failure(e)),
        }
    }

    fn record_failure(&mut self, error: StorageError) -> RehabError {
        tracing::warn!(error = %error, "Persistence failed");
        self.error = Some(error.to_string());
        error.into()
    }

    /// Replace the session's project with a stored one.
    pub fn load_project(&mut self, id: &str) -> Result<(), RehabError> {
        let _op = set_operation("load_project");
        let _project = set_project(id);
        self.error = None;

        let record = match self.store.get_project(id) {
            Ok(record) => record,
            Err(e) => return Err(self.record_failure(e)),
        };
        let (project, progress) = record.into_parts();
        let cursor = cursor_for_progress(&progress)?;

        self.project = project;
        self.cursor = cursor;
        self.recompute();
        tracing::info!(project_id = %id, step = self.cursor.current().number(), "Loaded project");
        Ok(())
    }

    /// Delete a stored project; the session resets when it was the one
    /// being edited.
    pub fn delete_project(&mut self, id: &str) -> Result<(), RehabError> {
        let _op = set_operation("delete_project");
        let _project = set_project(id);
        self.error = None;

        if let Err(e) = self.store.delete_project(id) {
            return Err(self.record_failure(e));
        }
        if self.project.id == id {
            self.reset_project();
        }
        tracing::info!(project_id = %id, "Deleted project");
        Ok(())
    }

    pub fn retreat_step(&mut self) -> WizardStep {
        if self.cursor.retreat() {
            tracing::debug!(step = self.cursor.current().number(), "Moved back one step");
        }
        self.cursor.current()
    }

    pub fn jump_to(&mut self, step: u8) -> Result<WizardStep, WizardError> {
        let target = self.cursor.jump_to(step)?;
        tracing::debug!(step, "Jumped to step");
        Ok(target)
    }

    /// Back to step 1 with an empty project.
    pub fn reset_project(&mut self) {
        self.project = Project::default();
        self.cursor.reset();
        self.error = None;
        self.recompute();
        tracing::info!("Reset wizard");
    }

    /// Append a new item and return its id.
    pub fn add_item(&mut self, draft: ScopeItemDraft) -> Result<String, WizardError> {
        draft.validate()?;
        let id = generate_id("item");
        let item = draft.into_item(id.clone(), self.project.id.clone());
        tracing::debug!(item_id = %id, name = %item.item_name, "Added scope item");
        self.project.scope_items.push(item);
        self.recompute();
        Ok(id)
    }

    /// Append the smart recommendations and return their ids.
    pub fn add_recommendations(&mut self) -> Vec<String> {
        let mut ids = Vec::new();
        for draft in smart_recommendations(&self.project) {
            let id = generate_id("item");
            self.project
                .scope_items
                .push(draft.into_item(id.clone(), self.project.id.clone()));
            ids.push(id);
        }
        self.recompute();
        ids
    }

    pub fn update_item(&mut self, id: &str, patch: &ScopeItemPatch) -> Result<(), WizardError> {
        let mut errors = patch.validate().err().unwrap_or_default();
        let self_dependency = patch
            .depends_on
            .as_ref()
            .is_some_and(|deps| deps.iter().any(|dep| dep == id));
        if self_dependency {
            errors.push("depends_on", "An item cannot depend on itself");
        }
        errors.into_result()?;
        let item = self
            .project
            .item_mut(id)
            .ok_or_else(|| WizardError::UnknownItem(id.to_string()))?;
        item.apply(patch);
        self.recompute();
        Ok(())
    }

    /// Remove an item. Other items keep any dependency on its id.
    pub fn remove_item(&mut self, id: &str) -> Result<ScopeItem, WizardError> {
        let index = self
            .project
            .scope_items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| WizardError::UnknownItem(id.to_string()))?;
        let removed = self.project.scope_items.remove(index);
        self.recompute();
        tracing::debug!(item_id = %id, "Removed scope item");
        Ok(removed)
    }

    /// Flip the included flag; returns the new value.
    pub fn toggle_included(&mut self, id: &str) -> Result<bool, WizardError> {
        let item = self
            .project
            .item_mut(id)
            .ok_or_else(|| WizardError::UnknownItem(id.to_string()))?;
        item.included = !item.included;
        let included = item.included;
        self.recompute();
        Ok(included)
    }

    /// Replace the assessment of one room.
    pub fn update_assessment(
        &mut self,
        room: &str,
        assessment: RoomAssessment,
    ) -> Result<(), WizardError> {
        let mut single = BTreeMap::new();
        single.insert(room.to_string(), assessment);
        validate_assessments(&single)?;

        self.project.assessments.append(&mut single);
        self.project.overall_score = Some(overall_condition_score(&self.project.assessments));
        Ok(())
    }

    fn recompute(&mut self) {
        self.summary = EstimateSummary::for_project(&self.project);
        self.matrix = PriorityMatrix::build(&self.project.scope_items);
        self.plan = ActionPlan::generate(&self.project.scope_items);
    }
}

/// Cursor position for stored progress: the step after the last completed
/// one, or the final step when everything is done.
fn cursor_for_progress(progress: &[u8]) -> Result<WizardCursor, WizardError> {
    let next = progress
        .iter()
        .max()
        .map_or(WizardStep::FIRST.number(), |last| {
            last.saturating_add(1).min(WizardStep::LAST.number())
        });
    WizardCursor::from_parts(next, progress)
}
