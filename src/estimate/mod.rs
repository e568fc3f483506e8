//! Estimate aggregation, final review ratings and portfolio totals.

pub mod aggregator;
pub mod portfolio;
pub mod review;

pub use aggregator::{calculate_estimate, EstimateSummary, CONTINGENCY_RATE};
pub use portfolio::{portfolio_stats, PortfolioStats};
pub use review::{months_for_days, review_project, ProjectReview, RiskLevel, RoiLevel};
