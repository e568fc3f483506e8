//! Dashboard figures across every stored project.

use super::aggregator::calculate_estimate;
use crate::core::{Project, ProjectStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_projects: usize,
    pub draft_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    /// Sum of max budgets; projects without a budget count as 0.
    pub total_budget: f64,
    /// Sum of included scope item costs across projects.
    pub total_estimated_cost: f64,
}

pub fn portfolio_stats<'a>(projects: impl IntoIterator<Item = &'a Project>) -> PortfolioStats {
    projects
        .into_iter()
        .fold(PortfolioStats::default(), |mut stats, project| {
            stats.total_projects += 1;
            match project.status {
                ProjectStatus::Draft => stats.draft_projects += 1,
                ProjectStatus::Active => stats.active_projects += 1,
                ProjectStatus::Completed => stats.completed_projects += 1,
            }
            stats.total_budget += project.max_budget.filter(|b| b.is_finite()).unwrap_or(0.0);
            stats.total_estimated_cost +=
                calculate_estimate(&project.scope_items, project.max_budget).total_cost;
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScopeItemDraft;

    #[test]
    fn test_empty_portfolio() {
        assert_eq!(portfolio_stats(&[]), PortfolioStats::default());
    }

    #[test]
    fn test_counts_and_totals() {
        let mut excluded = ScopeItemDraft::custom("Roof", "Shingles", 500.0, 0.0, 1).into_item("b", "");
        excluded.included = false;
        let projects = vec![
            Project {
                status: ProjectStatus::Active,
                max_budget: Some(50_000.0),
                scope_items: vec![
                    ScopeItemDraft::custom("Kitchen", "Cabinets", 8000.0, 4000.0, 5)
                        .into_item("a", ""),
                    excluded,
                ],
                ..Default::default()
            },
            Project {
                status: ProjectStatus::Completed,
                ..Default::default()
            },
            Project::default(),
        ];

        let stats = portfolio_stats(&projects);
        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.active_projects, 1);
        assert_eq!(stats.completed_projects, 1);
        assert_eq!(stats.draft_projects, 1);
        assert_eq!(stats.total_budget, 50_000.0);
        assert_eq!(stats.total_estimated_cost, 12_000.0);
    }
}
