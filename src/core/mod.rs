pub mod assessment;
pub mod project;
pub mod scope;
pub mod vendor;

pub use assessment::{
    components_for_room, is_known_room, overall_condition_score, ComponentAction,
    ComponentAssessment, Condition, RoomAssessment, RoomDefinition, ROOMS,
};
pub use project::{Address, InvestmentStrategy, Project, ProjectStatus, PropertyType};
pub use scope::{PriorityTier, ScopeItem, ScopeItemDraft, ScopeItemPatch, MAX_DAYS_REQUIRED};
pub use vendor::Vendor;
