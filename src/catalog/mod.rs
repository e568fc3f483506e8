//! Fixed catalog of renovation items.
//!
//! All unit costs are placeholder constants. Each entry declares its
//! [`CategoryClass`] explicitly; the catalog is validated when it is built so
//! bad definitions fail up front instead of at classification time.

pub mod recommendations;

pub use recommendations::smart_recommendations;

use crate::core::ScopeItemDraft;
use crate::errors::ValidationErrors;
use crate::priority::CategoryClass;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub days: u32,
    pub roi_impact: f64,
    pub class: CategoryClass,
}

impl CatalogEntry {
    pub fn total_cost(&self) -> f64 {
        self.material_cost + self.labor_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogCategory {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    categories: Vec<CatalogCategory>,
}

fn entry(
    name: &str,
    material_cost: f64,
    labor_cost: f64,
    days: u32,
    roi_impact: f64,
    class: CategoryClass,
) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        material_cost,
        labor_cost,
        days,
        roi_impact,
        class,
    }
}

fn category(name: &str, entries: Vec<CatalogEntry>) -> CatalogCategory {
    CatalogCategory {
        name: name.to_string(),
        entries,
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Build a catalog, rejecting malformed definitions.
    pub fn new(categories: Vec<CatalogCategory>) -> Result<Self, ValidationErrors> {
        validate_categories(&categories).into_result()?;
        Ok(Self { categories })
    }

    /// The built-in catalog.
    pub fn standard() -> Self {
        use CategoryClass::*;
        Self {
            categories: vec![
                category(
                    "Kitchen",
                    vec![
                        entry("Cabinet Replacement", 8000.0, 4000.0, 5, 15.0, Cosmetic),
                        entry("Countertop Replacement", 3000.0, 1500.0, 2, 12.0, Cosmetic),
                        entry("Appliance Upgrade", 5000.0, 800.0, 1, 10.0, Optional),
                        entry("Backsplash Installation", 800.0, 600.0, 1, 8.0, Cosmetic),
                        entry("Lighting Upgrade", 400.0, 300.0, 1, 6.0, Systems),
                    ],
                ),
                category(
                    "Bathroom",
                    vec![
                        entry("Vanity Replacement", 1200.0, 800.0, 2, 12.0, Cosmetic),
                        entry("Tub/Shower Replacement", 2500.0, 1500.0, 3, 14.0, Systems),
                        entry("Tile Installation", 1500.0, 1200.0, 2, 10.0, Cosmetic),
                        entry("Plumbing Fixtures", 600.0, 400.0, 1, 8.0, Systems),
                        entry("Ventilation Fan", 200.0, 300.0, 1, 5.0, Systems),
                    ],
                ),
                category(
                    "Interior",
                    vec![
                        entry("Paint Interior", 800.0, 2000.0, 3, 8.0, Cosmetic),
                        entry("Flooring Replacement", 4000.0, 3000.0, 4, 12.0, Cosmetic),
                        entry("Trim/Baseboards", 600.0, 800.0, 2, 6.0, Cosmetic),
                        entry("Interior Doors", 1200.0, 1000.0, 2, 8.0, Cosmetic),
                        entry("Window Treatments", 800.0, 400.0, 1, 4.0, Optional),
                    ],
                ),
                category(
                    "Exterior",
                    vec![
                        entry("Paint Exterior", 1200.0, 3000.0, 4, 10.0, Cosmetic),
                        entry("Roof Repair/Replacement", 8000.0, 4000.0, 5, 15.0, Structural),
                        entry("Siding Repair", 2000.0, 1500.0, 3, 12.0, Structural),
                        entry("Gutters & Downspouts", 800.0, 600.0, 1, 6.0, Structural),
                        entry("Landscaping", 1500.0, 1000.0, 2, 8.0, Optional),
                    ],
                ),
                category(
                    "Systems",
                    vec![
                        entry("HVAC Replacement", 6000.0, 2000.0, 2, 12.0, Systems),
                        entry("Electrical Panel Upgrade", 1500.0, 1200.0, 1, 10.0, Systems),
                        entry("Plumbing Repairs", 1000.0, 800.0, 1, 8.0, Systems),
                        entry("Water Heater", 800.0, 400.0, 1, 6.0, Systems),
                        entry("Smoke Detectors", 200.0, 100.0, 1, 4.0, Safety),
                    ],
                ),
            ],
        }
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CatalogCategory> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn find(&self, category: &str, name: &str) -> Option<&CatalogEntry> {
        self.category(category)?
            .entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Draft for a catalog selection; `None` if the entry does not exist.
    pub fn draft(&self, category: &str, name: &str) -> Option<ScopeItemDraft> {
        let cat = self.category(category)?;
        let entry = self.find(category, name)?;
        Some(ScopeItemDraft {
            category: cat.name.clone(),
            classification: Some(entry.class),
            name: entry.name.clone(),
            description: String::new(),
            location: String::new(),
            material_cost: entry.material_cost,
            labor_cost: entry.labor_cost,
            days: entry.days,
            roi_impact: entry.roi_impact,
            priority: crate::core::PriorityTier::Should,
        })
    }
}

fn validate_categories(categories: &[CatalogCategory]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut seen_categories = HashSet::new();

    for (ci, cat) in categories.iter().enumerate() {
        let field = format!("categories[{}]", ci);
        if cat.name.trim().is_empty() {
            errors.push(format!("{}.name", field), "Category name is required");
        } else if !seen_categories.insert(cat.name.to_lowercase()) {
            errors.push(
                format!("{}.name", field),
                format!("Duplicate category '{}'", cat.name),
            );
        }

        let mut seen_entries = HashSet::new();
        for (ei, e) in cat.entries.iter().enumerate() {
            let field = format!("{}.entries[{}]", field, ei);
            if e.name.trim().is_empty() {
                errors.push(format!("{}.name", field), "Entry name is required");
            } else if !seen_entries.insert(e.name.to_lowercase()) {
                errors.push(
                    format!("{}.name", field),
                    format!("Duplicate entry '{}' in {}", e.name, cat.name),
                );
            }
            if !is_valid_cost(e.material_cost) {
                errors.push(
                    format!("{}.material_cost", field),
                    "Material cost must be a non-negative number",
                );
            }
            if !is_valid_cost(e.labor_cost) {
                errors.push(
                    format!("{}.labor_cost", field),
                    "Labor cost must be a non-negative number",
                );
            }
            if e.days == 0 {
                errors.push(format!("{}.days", field), "Days must be at least 1");
            }
            if !e.roi_impact.is_finite() {
                errors.push(format!("{}.roi_impact", field), "ROI impact must be a number");
            }
        }
    }
    errors
}

pub(crate) fn is_valid_cost(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
