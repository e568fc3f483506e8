/// Estimate aggregation over the included scope items.
///
/// Every figure is a single pass over the included subset. The function is
/// pure: same items and budget in, same summary out. Empty input yields an
/// all-zero summary.
use crate::core::{Project, ScopeItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed reserve added on top of the total cost.
pub const CONTINGENCY_RATE: f64 = 0.10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub total_cost: f64,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub contingency: f64,
    /// Longest single item duration, in days.
    pub timeline: u32,
    pub roi_impact: f64,
    /// Total cost as a percentage of the max budget; 0 without a budget.
    pub budget_usage: f64,
    pub category_breakdown: BTreeMap<String, f64>,
}

impl EstimateSummary {
    pub fn for_project(project: &Project) -> Self {
        calculate_estimate(&project.scope_items, project.max_budget)
    }

    /// Budget exceeded: more than 100% of the budget is used.
    pub fn is_over_budget(&self) -> bool {
        self.budget_usage > 100.0
    }

    /// Budget left after the total cost; `None` without a usable budget.
    pub fn budget_remaining(&self, max_budget: Option<f64>) -> Option<f64> {
        usable_budget(max_budget).map(|budget| budget - self.total_cost)
    }

    /// Total including the contingency reserve.
    pub fn total_with_contingency(&self) -> f64 {
        self.total_cost + self.contingency
    }
}

fn usable_budget(max_budget: Option<f64>) -> Option<f64> {
    max_budget.filter(|b| b.is_finite() && *b != 0.0)
}

pub fn calculate_estimate(items: &[ScopeItem], max_budget: Option<f64>) -> EstimateSummary {
    let included: Vec<&ScopeItem> = items.iter().filter(|item| item.included).collect();

    let total_cost: f64 = included.iter().map(|item| item.total_cost).sum();
    let material_cost: f64 = included.iter().map(|item| item.material_cost).sum();
    let labor_cost: f64 = included.iter().map(|item| item.labor_cost).sum();
    let timeline = included
        .iter()
        .map(|item| item.days_required)
        .max()
        .unwrap_or(0);
    let roi_impact: f64 = included.iter().map(|item| item.roi_impact).sum();

    let budget_usage = usable_budget(max_budget)
        .map(|budget| total_cost / budget * 100.0)
        .filter(|usage| usage.is_finite())
        .unwrap_or(0.0);

    let category_breakdown = included.iter().fold(BTreeMap::new(), |mut acc, item| {
        *acc.entry(item.category.clone()).or_insert(0.0) += item.total_cost;
        acc
    });

    tracing::trace!(
        included = included.len(),
        total_cost,
        budget_usage,
        "Calculated estimate"
    );

    EstimateSummary {
        total_cost,
        material_cost,
        labor_cost,
        contingency: total_cost * CONTINGENCY_RATE,
        timeline,
        roi_impact,
        budget_usage,
        category_breakdown,
    }
}
