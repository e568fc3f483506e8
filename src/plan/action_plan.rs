/// Phased action plan generation
///
/// Included scope items are grouped by their author-assigned phase number.
/// Items inside a phase run in parallel, so a phase lasts as long as its
/// longest item; phases run back to back in ascending phase order.
use super::dependencies::DependencyGraph;
use crate::core::{PriorityTier, ScopeItem};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of leading phases flagged as critical path. This is a positional
/// heuristic, not a slack computation; see [`DependencyGraph::critical_chain`]
/// for the dependency-derived chain.
pub const POSITIONAL_CRITICAL_PHASES: usize = 2;
pub const DEFAULT_CONTRACTOR: &str = "General Contractor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Critical,
    High,
}

impl From<PriorityTier> for TaskPriority {
    fn from(tier: PriorityTier) -> Self {
        match tier {
            PriorityTier::Must => TaskPriority::Critical,
            _ => TaskPriority::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTask {
    pub id: String,
    pub name: String,
    pub contractor: String,
    pub duration: u32,
    pub cost: f64,
    pub dependencies: Vec<String>,
    pub priority: TaskPriority,
}

impl PlanTask {
    fn from_item(item: &ScopeItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.item_name.clone(),
            contractor: DEFAULT_CONTRACTOR.to_string(),
            duration: item.days_required,
            cost: item.total_cost,
            dependencies: item.depends_on.clone(),
            priority: item.priority.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanPhase {
    pub id: String,
    pub name: String,
    pub phase: u32,
    pub tasks: Vec<PlanTask>,
    pub start_day: u32,
    pub end_day: u32,
    pub cost: f64,
    /// Ids of earlier phases holding items this phase depends on.
    pub dependencies: Vec<String>,
    pub critical_path: bool,
    pub warnings: Vec<String>,
}

impl ActionPlanPhase {
    pub fn duration(&self) -> u32 {
        self.end_day.saturating_sub(self.start_day)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    phases: Vec<ActionPlanPhase>,
}

impl ActionPlan {
    pub fn generate(items: &[ScopeItem]) -> Self {
        generate_action_plan(items)
    }

    pub fn phases(&self) -> &[ActionPlanPhase] {
        &self.phases
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Day the last phase ends; 0 for an empty plan.
    pub fn total_timeline(&self) -> u32 {
        self.phases.last().map(|p| p.end_day).unwrap_or(0)
    }

    pub fn total_cost(&self) -> f64 {
        self.phases.iter().map(|p| p.cost).sum()
    }

    pub fn months(&self) -> u32 {
        self.total_timeline().div_ceil(30)
    }

    pub fn phase(&self, number: u32) -> Option<&ActionPlanPhase> {
        self.phases.iter().find(|p| p.phase == number)
    }

    pub fn phase_of_task(&self, task_id: &str) -> Option<&ActionPlanPhase> {
        self.phases
            .iter()
            .find(|p| p.tasks.iter().any(|t| t.id == task_id))
    }
}

pub fn generate_action_plan(items: &[ScopeItem]) -> ActionPlan {
    let mut by_phase: BTreeMap<u32, Vec<&ScopeItem>> = BTreeMap::new();
    for item in items.iter().filter(|item| item.included) {
        by_phase.entry(item.phase).or_default().push(item);
    }

    if by_phase.is_empty() {
        return ActionPlan::default();
    }

    let phase_of: HashMap<&str, u32> = by_phase
        .iter()
        .flat_map(|(phase, members)| members.iter().map(move |item| (item.id.as_str(), *phase)))
        .collect();
    let all_ids: HashMap<&str, &ScopeItem> =
        items.iter().map(|item| (item.id.as_str(), item)).collect();

    let mut phases = Vec::with_capacity(by_phase.len());
    let mut current_day = 0u32;

    for (index, (number, members)) in by_phase.iter().enumerate() {
        let cost: f64 = members.iter().map(|item| item.total_cost).sum();
        let duration = members
            .iter()
            .map(|item| item.days_required)
            .max()
            .unwrap_or(0);

        let start_day = current_day;
        let end_day = start_day.saturating_add(duration);
        current_day = end_day;

        let mut depends_on_phases = BTreeSet::new();
        let mut warnings = Vec::new();
        for item in members {
            for dep in &item.depends_on {
                match phase_of.get(dep.as_str()) {
                    Some(dep_phase) if dep_phase < number => {
                        depends_on_phases.insert(*dep_phase);
                    }
                    Some(dep_phase) if dep_phase == number => warnings.push(format!(
                        "'{}' depends on '{}' but both run in parallel in phase {}",
                        item.item_name,
                        item_name(&all_ids, dep),
                        number
                    )),
                    Some(dep_phase) => warnings.push(format!(
                        "'{}' depends on '{}' which is scheduled later, in phase {}",
                        item.item_name,
                        item_name(&all_ids, dep),
                        dep_phase
                    )),
                    None if all_ids.contains_key(dep.as_str()) => warnings.push(format!(
                        "'{}' depends on excluded item '{}'",
                        item.item_name,
                        item_name(&all_ids, dep)
                    )),
                    None => warnings.push(format!(
                        "'{}' depends on unknown item '{}' (ignored)",
                        item.item_name, dep
                    )),
                }
            }
        }

        phases.push(ActionPlanPhase {
            id: format!("phase-{}", number),
            name: format!("Phase {}", number),
            phase: *number,
            tasks: members.iter().map(|item| PlanTask::from_item(item)).collect(),
            start_day,
            end_day,
            cost,
            dependencies: depends_on_phases
                .into_iter()
                .map(|p| format!("phase-{}", p))
                .collect(),
            critical_path: index < POSITIONAL_CRITICAL_PHASES,
            warnings,
        });
    }

    tracing::debug!(
        phases = phases.len(),
        total_days = current_day,
        "Generated action plan"
    );

    ActionPlan { phases }
}

fn item_name<'a>(all: &HashMap<&str, &'a ScopeItem>, id: &'a str) -> &'a str {
    all.get(id).map(|item| item.item_name.as_str()).unwrap_or(id)
}

/// Dependency analysis over the same included items the plan uses.
pub fn dependency_report(items: &[ScopeItem]) -> super::DependencyReport {
    DependencyGraph::from_items(items).report()
}
