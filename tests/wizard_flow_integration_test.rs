//! End-to-end wizard runs against the in-memory and file backed stores.

mod common;

use common::{details_payload, property_details};
use pretty_assertions::assert_eq;
use rehab_estimator::core::{ComponentAction, ComponentAssessment, Condition, RoomAssessment};
use rehab_estimator::io::EstimateReport;
use rehab_estimator::storage::{FileStore, MemoryStore, ProjectStore};
use rehab_estimator::wizard::{
    ActionPlanPayload, AssessmentPayload, DraftSnapshot, PrioritiesPayload, ScopePayload,
    StrategyPayload,
};
use rehab_estimator::{
    EstimatorSession, InvestmentStrategy, PriorityTier, ProjectStatus, RehabError, ScopeItemDraft,
    StepOutcome, StepPayload, WizardError, WizardStep,
};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn kitchen_assessment() -> AssessmentPayload {
    let mut components = BTreeMap::new();
    components.insert(
        "cabinets".to_string(),
        ComponentAssessment {
            needs_work: true,
            action: Some(ComponentAction::Replace),
        },
    );
    let mut assessments = BTreeMap::new();
    assessments.insert(
        "kitchen".to_string(),
        RoomAssessment {
            condition: Condition::Poor,
            components,
            notes: "Original 1958 cabinets".into(),
        },
    );
    assessments.insert(
        "living".to_string(),
        RoomAssessment {
            condition: Condition::Good,
            ..Default::default()
        },
    );
    AssessmentPayload { assessments }
}

fn strategy(max_budget: f64) -> StepPayload {
    StepPayload::Strategy(StrategyPayload {
        investment_strategy: InvestmentStrategy::FixAndFlip,
        target_buyer: Some("first-time buyers".into()),
        hold_period_months: Some(6),
        max_budget,
    })
}

/// Runs steps 1 to 6 and returns the ids of the two scope items.
fn run_to_review<S: ProjectStore>(session: &mut EstimatorSession<S>) -> (String, String) {
    session.advance_step(details_payload()).unwrap();
    session
        .advance_step(StepPayload::Assessment(kitchen_assessment()))
        .unwrap();
    session.advance_step(strategy(30_000.0)).unwrap();
    session
        .advance_step(StepPayload::Scope(ScopePayload {
            add: vec![
                ScopeItemDraft::custom("Electrical Panel", "200A Panel", 1500.0, 1200.0, 2)
                    .with_priority(PriorityTier::Must),
                ScopeItemDraft::custom("Interior Paint", "Whole House Paint", 800.0, 2200.0, 4)
                    .with_roi(12.0),
            ],
            include_recommendations: false,
        }))
        .unwrap();

    let ids: Vec<String> = session
        .project()
        .scope_items
        .iter()
        .map(|i| i.id.clone())
        .collect();
    let (panel, paint) = (ids[0].clone(), ids[1].clone());

    let mut assignments = BTreeMap::new();
    assignments.insert(paint.clone(), PriorityTier::Could);
    session
        .advance_step(StepPayload::Priorities(PrioritiesPayload { assignments }))
        .unwrap();

    let mut phases = BTreeMap::new();
    phases.insert(panel.clone(), 1);
    phases.insert(paint.clone(), 2);
    let mut depends_on = BTreeMap::new();
    depends_on.insert(paint.clone(), vec![panel.clone()]);
    session
        .advance_step(StepPayload::ActionPlan(ActionPlanPayload { phases, depends_on }))
        .unwrap();

    assert_eq!(session.current_step(), WizardStep::FinalReview);
    (panel, paint)
}

#[test]
fn test_full_wizard_with_memory_store() {
    let mut session = EstimatorSession::new(MemoryStore::new());
    let (panel, paint) = run_to_review(&mut session);

    let project = session.project();
    assert_eq!(project.arv, Some(240_000.0));
    assert_eq!(project.overall_score, Some(60));
    assert_eq!(project.item(&paint).unwrap().priority, PriorityTier::Could);

    let summary = session.estimate_summary();
    assert_eq!(summary.total_cost, 5_700.0);
    assert_eq!(summary.contingency, 570.0);
    assert_eq!(summary.timeline, 4);
    assert_eq!(summary.budget_usage, 5_700.0 / 30_000.0 * 100.0);

    let plan = session.action_plan();
    assert_eq!(plan.phases().len(), 2);
    assert_eq!(plan.total_timeline(), 6);
    assert_eq!(plan.phases()[1].dependencies, vec!["phase-1".to_string()]);
    assert!(plan.phases().iter().all(|p| p.warnings.is_empty()));

    let chain = session.dependency_report().critical_chain.unwrap();
    assert_eq!(chain.items, vec![panel.clone(), paint.clone()]);
    assert_eq!(chain.total_days, 6);

    let outcome = session.advance_step(StepPayload::FinalReview).unwrap();
    let StepOutcome::Completed { project_id } = outcome else {
        panic!("expected the wizard to complete");
    };
    assert_eq!(session.current_step(), WizardStep::FinalReview);

    let stored = session.store().get_project(&project_id).unwrap();
    assert_eq!(stored.status, ProjectStatus::Completed);
    assert_eq!(stored.step_progress, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_file_store_round_trip_resumes_at_next_step() {
    let dir = TempDir::new().unwrap();

    let saved_id = {
        let mut session = EstimatorSession::new(FileStore::open(dir.path()).unwrap());
        session.advance_step(details_payload()).unwrap();
        session
            .advance_step(StepPayload::Assessment(kitchen_assessment()))
            .unwrap();
        session.save_draft().unwrap()
    };

    let mut resumed = EstimatorSession::new(FileStore::open(dir.path()).unwrap());
    resumed.load_project(&saved_id).unwrap();

    assert_eq!(resumed.current_step(), WizardStep::Strategy);
    assert_eq!(resumed.project().project_name, "Oak Street Flip");
    assert_eq!(resumed.project().assessments.len(), 2);
    assert_eq!(resumed.project().status, ProjectStatus::Draft);

    resumed.advance_step(strategy(25_000.0)).unwrap();
    assert_eq!(resumed.current_step(), WizardStep::Scope);

    let listed = resumed.store().list_projects().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved_id);
}

#[test]
fn test_completed_project_is_listed_by_file_store() {
    let dir = TempDir::new().unwrap();
    let mut session = EstimatorSession::new(FileStore::open(dir.path()).unwrap());
    run_to_review(&mut session);
    session.advance_step(StepPayload::FinalReview).unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    let records = store.list_projects().unwrap();
    assert_eq!(records.len(), 1);
    let project = records[0].clone().into_project();
    assert_eq!(project.status, ProjectStatus::Completed);
    assert_eq!(project.scope_items.len(), 2);
}

#[test]
fn test_jump_back_and_forward_is_limited() {
    let mut session = EstimatorSession::new(MemoryStore::new());
    session.advance_step(details_payload()).unwrap();
    session
        .advance_step(StepPayload::Assessment(Default::default()))
        .unwrap();

    assert_eq!(session.jump_to(1).unwrap(), WizardStep::PropertyDetails);
    assert!(matches!(
        session.jump_to(3),
        Err(WizardError::StepLocked { .. })
    ));
    assert!(matches!(session.jump_to(9), Err(WizardError::OutOfRange(9))));

    // Earlier steps can be resubmitted.
    let mut details = property_details();
    details.project_name = "Renamed".into();
    session
        .advance_step(StepPayload::PropertyDetails(details))
        .unwrap();
    assert_eq!(session.project().project_name, "Renamed");
    assert_eq!(session.current_step(), WizardStep::Assessment);
}

#[test]
fn test_rejected_payload_reports_fields() {
    let mut session = EstimatorSession::new(MemoryStore::new());
    session.advance_step(details_payload()).unwrap();
    session
        .advance_step(StepPayload::Assessment(Default::default()))
        .unwrap();

    let err = session.advance_step(strategy(0.0)).unwrap_err();
    assert!(matches!(err, RehabError::Wizard(WizardError::Invalid(_))));
    assert!(err.validation_errors().unwrap().has_field("max_budget"));
    assert_eq!(session.current_step(), WizardStep::Strategy);
    assert_eq!(session.project().max_budget, None);
}

#[test]
fn test_registry_edits_flow_into_report() {
    let mut session = EstimatorSession::new(MemoryStore::new());
    let (panel, paint) = run_to_review(&mut session);

    session.toggle_included(&panel).unwrap();
    assert_eq!(session.estimate_summary().total_cost, 3_000.0);

    let report = EstimateReport::from_session(&session, &Default::default());
    // The paint still depends on the now excluded panel.
    let phase = report
        .action_plan
        .phase_of_task(&paint)
        .expect("paint is scheduled");
    assert_eq!(phase.warnings.len(), 1);
    assert!(report.has_warnings());

    session.remove_item(&paint).unwrap();
    assert_eq!(session.project().scope_items.len(), 1);
    assert!(session.action_plan().is_empty());
}

#[test]
fn test_draft_snapshot_restores_session() {
    let dir = TempDir::new().unwrap();
    let draft_path = dir.path().join("draft.json");

    let mut session = EstimatorSession::new(MemoryStore::new());
    session.advance_step(details_payload()).unwrap();
    DraftSnapshot::of_session(&session).save(&draft_path).unwrap();

    let restored = DraftSnapshot::load(&draft_path)
        .unwrap()
        .into_session(MemoryStore::new())
        .unwrap();
    assert_eq!(restored.current_step(), WizardStep::Assessment);
    assert_eq!(restored.project(), session.project());
    assert!(restored.cursor().is_completed(WizardStep::PropertyDetails));
}
