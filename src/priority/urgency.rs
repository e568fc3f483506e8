//! Urgency scoring for scope items.

use super::classification::CategoryClass;
use crate::core::{PriorityTier, ScopeItem};

/// Urgency every item starts from before adjustments.
pub const BASE_URGENCY: i32 = 50;
/// Bonus for items that wait on at least one other item.
pub const DEPENDENCY_BONUS: i32 = 10;
pub const MAX_URGENCY: u32 = 100;

/// Urgency score in `[0, 100]` from the declared tier, dependency count and
/// category class.
pub fn urgency_for(priority: PriorityTier, dependency_count: usize, class: CategoryClass) -> u32 {
    let mut urgency = BASE_URGENCY + priority.urgency_delta();

    if dependency_count > 0 {
        urgency += DEPENDENCY_BONUS;
    }

    urgency += class.urgency_bonus();

    urgency.clamp(0, MAX_URGENCY as i32) as u32
}

pub fn urgency_score(item: &ScopeItem) -> u32 {
    urgency_for(item.priority, item.depends_on.len(), item.category_class())
}
