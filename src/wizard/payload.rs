//! Step completion payloads.
//!
//! Each payload is validated against the current project before anything is
//! merged, so a rejected payload leaves the project untouched.

use super::validation::{estimate_arv, PropertyDetails};
use super::WizardStep;
use crate::catalog::smart_recommendations;
use crate::core::{
    components_for_room, is_known_room, overall_condition_score, InvestmentStrategy, PriorityTier,
    Project, RoomAssessment, ScopeItemDraft,
};
use crate::errors::ValidationErrors;
use crate::storage::generate_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_HOLD_PERIOD_MONTHS: u32 = 1;
pub const MAX_HOLD_PERIOD_MONTHS: u32 = 360;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepPayload {
    PropertyDetails(PropertyDetails),
    Assessment(AssessmentPayload),
    Strategy(StrategyPayload),
    Scope(ScopePayload),
    Priorities(PrioritiesPayload),
    ActionPlan(ActionPlanPayload),
    FinalReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentPayload {
    /// Replaces every existing assessment.
    #[serde(default)]
    pub assessments: BTreeMap<String, RoomAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPayload {
    pub investment_strategy: InvestmentStrategy,
    #[serde(default)]
    pub target_buyer: Option<String>,
    #[serde(default)]
    pub hold_period_months: Option<u32>,
    pub max_budget: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopePayload {
    /// New items appended to the registry.
    #[serde(default)]
    pub add: Vec<ScopeItemDraft>,
    /// Also append the placeholder smart recommendations.
    #[serde(default)]
    pub include_recommendations: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrioritiesPayload {
    /// Item id → new priority tier.
    #[serde(default)]
    pub assignments: BTreeMap<String, PriorityTier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanPayload {
    /// Item id → phase number.
    #[serde(default)]
    pub phases: BTreeMap<String, u32>,
    /// Item id → ids it depends on. Replaces the item's existing list.
    #[serde(default)]
    pub depends_on: BTreeMap<String, Vec<String>>,
}

impl StepPayload {
    pub fn step(&self) -> WizardStep {
        match self {
            StepPayload::PropertyDetails(_) => WizardStep::PropertyDetails,
            StepPayload::Assessment(_) => WizardStep::Assessment,
            StepPayload::Strategy(_) => WizardStep::Strategy,
            StepPayload::Scope(_) => WizardStep::Scope,
            StepPayload::Priorities(_) => WizardStep::Priorities,
            StepPayload::ActionPlan(_) => WizardStep::ActionPlan,
            StepPayload::FinalReview => WizardStep::FinalReview,
        }
    }

    pub fn validate(&self, project: &Project) -> Result<(), ValidationErrors> {
        match self {
            StepPayload::PropertyDetails(details) => details.validate(),
            StepPayload::Assessment(payload) => validate_assessments(&payload.assessments),
            StepPayload::Strategy(payload) => payload.validate(),
            StepPayload::Scope(payload) => {
                let mut errors = ValidationErrors::new();
                for (i, draft) in payload.add.iter().enumerate() {
                    if let Err(e) = draft.validate() {
                        errors.extend_prefixed(&format!("add[{}]", i), e);
                    }
                }
                errors.into_result()
            }
            StepPayload::Priorities(payload) => {
                let mut errors = ValidationErrors::new();
                for id in payload.assignments.keys() {
                    require_item(project, "assignments", id, &mut errors);
                }
                errors.into_result()
            }
            StepPayload::ActionPlan(payload) => payload.validate(project),
            StepPayload::FinalReview => Ok(()),
        }
    }

    /// Merge into `project`. Call only after [`StepPayload::validate`].
    pub fn apply(self, project: &mut Project) {
        match self {
            StepPayload::PropertyDetails(details) => {
                let arv = details
                    .arv
                    .unwrap_or_else(|| estimate_arv(details.square_feet, details.property_type));
                project.project_name = details.project_name;
                project.address = Some(details.address);
                project.square_feet = Some(details.square_feet);
                project.year_built = Some(details.year_built);
                project.property_type = Some(details.property_type);
                project.bedrooms = Some(details.bedrooms);
                project.bathrooms = Some(details.bathrooms);
                project.purchase_price = Some(details.purchase_price);
                project.arv = Some(arv);
            }
            StepPayload::Assessment(payload) => {
                project.overall_score = Some(overall_condition_score(&payload.assessments));
                project.assessments = payload.assessments;
            }
            StepPayload::Strategy(payload) => {
                project.investment_strategy = Some(payload.investment_strategy);
                project.target_buyer = payload.target_buyer;
                project.hold_period_months = payload.hold_period_months;
                project.max_budget = Some(payload.max_budget);
            }
            StepPayload::Scope(payload) => {
                let mut drafts = payload.add;
                if payload.include_recommendations {
                    drafts.extend(smart_recommendations(project));
                }
                let project_id = project.id.clone();
                project.scope_items.extend(
                    drafts
                        .into_iter()
                        .map(|draft| draft.into_item(generate_id("item"), project_id.clone())),
                );
            }
            StepPayload::Priorities(payload) => {
                for (id, tier) in payload.assignments {
                    if let Some(item) = project.item_mut(&id) {
                        item.priority = tier;
                    }
                }
            }
            StepPayload::ActionPlan(payload) => {
                for (id, phase) in payload.phases {
                    if let Some(item) = project.item_mut(&id) {
                        item.phase = phase;
                    }
                }
                for (id, deps) in payload.depends_on {
                    if let Some(item) = project.item_mut(&id) {
                        item.depends_on = deps;
                    }
                }
            }
            StepPayload::FinalReview => {}
        }
    }
}

fn require_item(project: &Project, field: &str, id: &str, errors: &mut ValidationErrors) {
    if project.item(id).is_none() {
        errors.push(
            format!("{}.{}", field, id),
            format!("Unknown scope item '{}'", id),
        );
    }
}

pub fn validate_assessments(
    assessments: &BTreeMap<String, RoomAssessment>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (room, assessment) in assessments {
        let field = format!("assessments.{}", room);
        if !is_known_room(room) {
            errors.push(&field, format!("Unknown room '{}'", room));
            continue;
        }
        let allowed = components_for_room(room);
        for component in assessment.components.keys() {
            if !allowed.contains(&component.as_str()) {
                errors.push(
                    format!("{}.components.{}", field, component),
                    format!("'{}' is not a component of this room", component),
                );
            }
        }
    }
    errors.into_result()
}

impl StrategyPayload {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(self.max_budget.is_finite() && self.max_budget > 0.0) {
            errors.push("max_budget", "Max budget must be greater than 0");
        }
        if let Some(months) = self.hold_period_months {
            if !(MIN_HOLD_PERIOD_MONTHS..=MAX_HOLD_PERIOD_MONTHS).contains(&months) {
                errors.push(
                    "hold_period_months",
                    format!(
                        "Hold period must be between {} and {} months",
                        MIN_HOLD_PERIOD_MONTHS, MAX_HOLD_PERIOD_MONTHS
                    ),
                );
            }
        }
        errors.into_result()
    }
}

impl ActionPlanPayload {
    fn validate(&self, project: &Project) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (id, phase) in &self.phases {
            require_item(project, "phases", id, &mut errors);
            if *phase == 0 {
                errors.push(format!("phases.{}", id), "Phase numbers start at 1");
            }
        }
        for (id, deps) in &self.depends_on {
            require_item(project, "depends_on", id, &mut errors);
            if deps.iter().any(|dep| dep == id) {
                errors.push(
                    format!("depends_on.{}", id),
                    "An item cannot depend on itself",
                );
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Condition, ScopeItemDraft};
    use indoc::indoc;

    fn project_with_item(id: &str) -> Project {
        Project {
            scope_items: vec![
                ScopeItemDraft::custom("Kitchen", "Cabinets", 100.0, 100.0, 2).into_item(id, "")
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_payload_json_is_tagged_by_step() {
        let payload: StepPayload = serde_json::from_str(indoc! {r#"
            {
              "step": "strategy",
              "investment_strategy": "fix_and_flip",
              "max_budget": 50000,
              "hold_period_months": 6
            }
        "#})
        .unwrap();
        assert_eq!(payload.step(), WizardStep::Strategy);
        assert!(payload.validate(&Project::default()).is_ok());

        let final_review: StepPayload = serde_json::from_str(r#"{"step":"final_review"}"#).unwrap();
        assert_eq!(final_review, StepPayload::FinalReview);
    }

    #[test]
    fn test_strategy_rules() {
        let payload = StrategyPayload {
            investment_strategy: InvestmentStrategy::Brrrr,
            target_buyer: None,
            hold_period_months: Some(361),
            max_budget: 0.0,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.has_field("max_budget"));
        assert!(errors.has_field("hold_period_months"));
    }

    #[test]
    fn test_assessment_sets_overall_score() {
        let mut assessments = BTreeMap::new();
        for (room, condition) in [("kitchen", Condition::Poor), ("living", Condition::Good)] {
            assessments.insert(
                room.to_string(),
                RoomAssessment {
                    condition,
                    ..Default::default()
                },
            );
        }
        let payload = StepPayload::Assessment(AssessmentPayload { assessments });
        let mut project = Project::default();
        payload.validate(&project).unwrap();
        payload.apply(&mut project);
        assert_eq!(project.overall_score, Some(60));
        assert_eq!(project.assessments.len(), 2);
    }

    #[test]
    fn test_unknown_rooms_and_components_rejected() {
        let mut assessments = BTreeMap::new();
        assessments.insert("attic".to_string(), RoomAssessment::default());
        let mut kitchen = RoomAssessment::default();
        kitchen
            .components
            .insert("tub_shower".to_string(), Default::default());
        assessments.insert("kitchen".to_string(), kitchen);

        let errors = validate_assessments(&assessments).unwrap_err();
        assert!(errors.has_field("assessments.attic"));
        assert!(errors.has_field("assessments.kitchen.components.tub_shower"));
    }

    #[test]
    fn test_priority_assignments_need_known_items() {
        let project = project_with_item("a");
        let mut assignments = BTreeMap::new();
        assignments.insert("a".to_string(), PriorityTier::Must);
        assignments.insert("ghost".to_string(), PriorityTier::Nice);
        let errors = StepPayload::Priorities(PrioritiesPayload { assignments })
            .validate(&project)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("assignments.ghost"));
    }

    #[test]
    fn test_action_plan_reassigns_phases() {
        let mut project = project_with_item("a");
        let mut phases = BTreeMap::new();
        phases.insert("a".to_string(), 3);
        let payload = StepPayload::ActionPlan(ActionPlanPayload {
            phases,
            ..Default::default()
        });
        payload.validate(&project).unwrap();
        payload.apply(&mut project);
        assert_eq!(project.scope_items[0].phase, 3);
    }

    #[test]
    fn test_action_plan_rejects_phase_zero_and_self_dependency() {
        let project = project_with_item("a");
        let mut payload = ActionPlanPayload::default();
        payload.phases.insert("a".to_string(), 0);
        payload
            .depends_on
            .insert("a".to_string(), vec!["a".to_string()]);
        let errors = StepPayload::ActionPlan(payload)
            .validate(&project)
            .unwrap_err();
        assert!(errors.has_field("phases.a"));
        assert!(errors.has_field("depends_on.a"));
    }

    #[test]
    fn test_scope_appends_recommendations() {
        let mut project = Project {
            bathrooms: Some(2.0),
            ..Default::default()
        };
        let payload = StepPayload::Scope(ScopePayload {
            add: vec![ScopeItemDraft::custom("Roof", "Shingles", 5000.0, 3000.0, 4)],
            include_recommendations: true,
        });
        payload.validate(&project).unwrap();
        payload.apply(&mut project);
        let names: Vec<_> = project.scope_items.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(names, vec!["Shingles", "Vanity Replacement"]);
        assert_ne!(project.scope_items[0].id, project.scope_items[1].id);
    }

    #[test]
    fn test_missing_arv_is_estimated() {
        let payload: StepPayload = serde_json::from_str(indoc! {r#"
            {
              "step": "property_details",
              "project_name": "Elm",
              "address": {"street": "1 Elm", "city": "Austin", "state": "TX", "zip": "78701"},
              "square_feet": 1000,
              "year_built": 1990,
              "property_type": "condo",
              "purchase_price": 90000
            }
        "#})
        .unwrap();
        let mut project = Project::default();
        payload.validate(&project).unwrap();
        payload.apply(&mut project);
        assert_eq!(project.arv, Some(120_000.0));
    }
}
