//! Final review: budget risk, ROI rating and plan totals.

use super::aggregator::EstimateSummary;
use crate::config::ReviewThresholds;
use crate::core::Project;
use crate::plan::ActionPlan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_budget_usage(budget_usage: f64, thresholds: &ReviewThresholds) -> Self {
        if budget_usage > thresholds.high_risk_budget_pct {
            RiskLevel::High
        } else if budget_usage > thresholds.medium_risk_budget_pct {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiLevel {
    Fair,
    Good,
    Excellent,
}

impl RoiLevel {
    pub fn from_roi(roi_impact: f64, thresholds: &ReviewThresholds) -> Self {
        if roi_impact > thresholds.excellent_roi_pct {
            RoiLevel::Excellent
        } else if roi_impact > thresholds.good_roi_pct {
            RoiLevel::Good
        } else {
            RoiLevel::Fair
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoiLevel::Fair => "Fair",
            RoiLevel::Good => "Good",
            RoiLevel::Excellent => "Excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReview {
    pub risk: RiskLevel,
    pub roi: RoiLevel,
    pub over_budget: bool,
    pub budget_remaining: Option<f64>,
    pub rooms_assessed: usize,
    pub scope_items: usize,
    pub included_items: usize,
    pub phases: usize,
    pub total_days: u32,
    pub months: u32,
}

/// Whole months needed to cover `days`, rounding up.
pub fn months_for_days(days: u32) -> u32 {
    days.div_ceil(30)
}

pub fn review_project(
    project: &Project,
    summary: &EstimateSummary,
    plan: &ActionPlan,
    thresholds: &ReviewThresholds,
) -> ProjectReview {
    let total_days = plan.total_timeline();
    ProjectReview {
        risk: RiskLevel::from_budget_usage(summary.budget_usage, thresholds),
        roi: RoiLevel::from_roi(summary.roi_impact, thresholds),
        over_budget: summary.is_over_budget(),
        budget_remaining: summary.budget_remaining(project.max_budget),
        rooms_assessed: project.assessments.len(),
        scope_items: project.scope_items.len(),
        included_items: project.included_items().count(),
        phases: plan.phases().len(),
        total_days,
        months: months_for_days(total_days),
    }
}
