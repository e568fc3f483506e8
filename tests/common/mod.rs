// Shared fixtures for rehab-estimator integration tests
#![allow(dead_code)]

use rehab_estimator::core::{Address, PropertyType, ScopeItem, ScopeItemDraft};
use rehab_estimator::wizard::{PropertyDetails, StepPayload};
use rehab_estimator::PriorityTier;

pub fn address() -> Address {
    Address {
        street: "412 Oak Street".into(),
        city: "Columbus".into(),
        state: "OH".into(),
        zip: "43215".into(),
    }
}

pub fn property_details() -> PropertyDetails {
    PropertyDetails {
        project_name: "Oak Street Flip".into(),
        address: address(),
        square_feet: 1_600,
        year_built: 1958,
        property_type: PropertyType::SingleFamily,
        bedrooms: 3,
        bathrooms: 1.5,
        purchase_price: 180_000.0,
        arv: None,
    }
}

pub fn details_payload() -> StepPayload {
    StepPayload::PropertyDetails(property_details())
}

pub fn item(id: &str, category: &str, material: f64, labor: f64, days: u32) -> ScopeItem {
    ScopeItemDraft::custom(category, id, material, labor, days).into_item(id, "")
}

pub fn phased(mut item: ScopeItem, phase: u32, depends_on: &[&str]) -> ScopeItem {
    item.phase = phase;
    item.depends_on = depends_on.iter().map(|d| d.to_string()).collect();
    item
}

pub fn with_priority(mut item: ScopeItem, priority: PriorityTier) -> ScopeItem {
    item.priority = priority;
    item
}

/// Project JSON accepted by the `estimate` and `validate` commands.
pub const VALID_PROJECT_JSON: &str = r#"{
  "project_name": "Oak Street Flip",
  "address": { "street": "412 Oak Street", "city": "Columbus", "state": "OH", "zip": "43215" },
  "square_feet": 1600,
  "year_built": 1958,
  "property_type": "single_family",
  "bedrooms": 3,
  "bathrooms": 1.5,
  "purchase_price": 180000,
  "max_budget": 40000,
  "investment_strategy": "fix_and_flip",
  "hold_period_months": 6,
  "scope_items": [
    {
      "id": "panel",
      "category": "Electrical Panel Upgrade",
      "item_name": "200A Panel",
      "material_cost": 1500,
      "labor_cost": 1200,
      "total_cost": 2700,
      "priority": "must",
      "roi_impact": 4,
      "days_required": 2,
      "phase": 1
    },
    {
      "id": "paint",
      "category": "Interior Paint",
      "item_name": "Whole House Paint",
      "material_cost": 800,
      "labor_cost": 2200,
      "total_cost": 3000,
      "priority": "should",
      "roi_impact": 12,
      "days_required": 4,
      "depends_on": ["panel"],
      "phase": 2
    }
  ]
}"#;

/// Missing property details and a negative cost.
pub const INVALID_PROJECT_JSON: &str = r#"{
  "project_name": "Broken",
  "scope_items": [
    {
      "id": "x",
      "category": "Kitchen",
      "item_name": "Cabinets",
      "material_cost": -5,
      "labor_cost": 10,
      "total_cost": 5,
      "priority": "could"
    }
  ]
}"#;
