//! Placeholder "smart" recommendations derived from property details.

use super::Catalog;
use crate::core::{Project, PropertyType, ScopeItemDraft};

/// Square footage above which single-family kitchens are worth redoing.
const KITCHEN_SQFT_THRESHOLD: u32 = 1500;
const BATHROOM_COUNT_THRESHOLD: f64 = 2.0;

/// Suggested scope items for `project`. Both rules are fixed samples; no
/// market data or assessment linkage is involved.
pub fn smart_recommendations(project: &Project) -> Vec<ScopeItemDraft> {
    let catalog = Catalog::standard();
    let mut recommendations = Vec::new();

    let large_single_family = project.property_type == Some(PropertyType::SingleFamily)
        && project
            .square_feet
            .is_some_and(|sqft| sqft > KITCHEN_SQFT_THRESHOLD);
    if large_single_family {
        if let Some(mut draft) = catalog.draft("Kitchen", "Cabinet Replacement") {
            draft.description = "Recommended for better resale value".to_string();
            draft.location = "Kitchen".to_string();
            recommendations.push(draft);
        }
    }

    if project
        .bathrooms
        .is_some_and(|baths| baths >= BATHROOM_COUNT_THRESHOLD)
    {
        if let Some(mut draft) = catalog.draft("Bathroom", "Vanity Replacement") {
            draft.description = "High ROI bathroom upgrade".to_string();
            draft.location = "Master Bathroom".to_string();
            recommendations.push(draft);
        }
    }

    tracing::debug!(count = recommendations.len(), "Generated smart recommendations");
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PriorityTier;

    #[test]
    fn test_large_single_family_gets_cabinets() {
        let project = Project {
            property_type: Some(PropertyType::SingleFamily),
            square_feet: Some(1800),
            bathrooms: Some(1.0),
            ..Default::default()
        };
        let recs = smart_recommendations(&project);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Cabinet Replacement");
        assert_eq!(recs[0].material_cost + recs[0].labor_cost, 12_000.0);
        assert_eq!(recs[0].days, 5);
        assert_eq!(recs[0].priority, PriorityTier::Should);
    }

    #[test]
    fn test_two_bathrooms_gets_vanity() {
        let project = Project {
            property_type: Some(PropertyType::Condo),
            square_feet: Some(3000),
            bathrooms: Some(2.0),
            ..Default::default()
        };
        let recs = smart_recommendations(&project);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Vanity Replacement");
        assert_eq!(recs[0].location, "Master Bathroom");
    }

    #[test]
    fn test_small_property_gets_nothing() {
        let project = Project {
            property_type: Some(PropertyType::SingleFamily),
            square_feet: Some(1500),
            ..Default::default()
        };
        assert!(smart_recommendations(&project).is_empty());
    }
}
