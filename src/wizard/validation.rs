//! Property details checks, soft warnings and the ARV estimator.

use super::payload::{validate_assessments, StrategyPayload};
use crate::core::{Address, Project, PropertyType, MAX_DAYS_REQUIRED};
use crate::errors::ValidationErrors;
use crate::plan::DependencyGraph;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

pub const MIN_SQUARE_FEET: u32 = 100;
pub const MIN_YEAR_BUILT: u32 = 1800;
pub const MAX_ROOM_COUNT: f64 = 20.0;
pub const MIN_ZIP_LEN: usize = 5;
pub const BASE_PRICE_PER_SQFT: f64 = 150.0;
pub const LOW_PRICE_PER_SQFT: f64 = 50.0;
pub const HIGH_PRICE_PER_SQFT: f64 = 300.0;

/// Two-letter postal codes for the states, DC and the territories.
pub const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "PR", "GU", "VI", "AS", "MP",
];

pub fn is_valid_state_code(code: &str) -> bool {
    let code = code.trim();
    code.len() == 2 && US_STATE_CODES.iter().any(|s| s.eq_ignore_ascii_case(code))
}

/// Property details as entered on the first wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub project_name: String,
    pub address: Address,
    pub square_feet: u32,
    pub year_built: u32,
    pub property_type: PropertyType,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: f64,
    pub purchase_price: f64,
    /// Left empty to have the estimator fill it in.
    #[serde(default)]
    pub arv: Option<f64>,
}

fn current_year() -> u32 {
    u32::try_from(chrono::Utc::now().year()).unwrap_or(u32::MAX)
}

impl PropertyDetails {
    /// The details already merged into `project`; `None` until the required
    /// fields are all present.
    pub fn from_project(project: &Project) -> Option<Self> {
        Some(Self {
            project_name: project.project_name.clone(),
            address: project.address.clone()?,
            square_feet: project.square_feet?,
            year_built: project.year_built?,
            property_type: project.property_type?,
            bedrooms: project.bedrooms.unwrap_or_default(),
            bathrooms: project.bathrooms.unwrap_or_default(),
            purchase_price: project.purchase_price?,
            arv: project.arv,
        })
    }

    /// Every violated rule is reported, not just the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.project_name.trim().is_empty() {
            errors.push("project_name", "Project name is required");
        }
        errors.extend_prefixed("address", validate_address(&self.address));

        if self.square_feet < MIN_SQUARE_FEET {
            errors.push(
                "square_feet",
                format!("Square footage must be at least {}", MIN_SQUARE_FEET),
            );
        }
        let max_year = current_year();
        if !(MIN_YEAR_BUILT..=max_year).contains(&self.year_built) {
            errors.push(
                "year_built",
                format!(
                    "Year built must be between {} and {}",
                    MIN_YEAR_BUILT, max_year
                ),
            );
        }
        if f64::from(self.bedrooms) > MAX_ROOM_COUNT {
            errors.push("bedrooms", "Bedrooms must be between 0 and 20");
        }
        if !self.bathrooms.is_finite() || !(0.0..=MAX_ROOM_COUNT).contains(&self.bathrooms) {
            errors.push("bathrooms", "Bathrooms must be between 0 and 20");
        }
        if !is_non_negative(self.purchase_price) {
            errors.push("purchase_price", "Purchase price must be positive");
        }
        if let Some(arv) = self.arv {
            if !is_non_negative(arv) {
                errors.push("arv", "ARV must be positive");
            }
        }

        errors.into_result()
    }

    /// Non-blocking advice about the entered prices.
    pub fn warnings(&self) -> Vec<PropertyWarning> {
        property_warnings(self.purchase_price, self.square_feet, self.arv)
    }
}

fn validate_address(address: &Address) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if address.street.trim().is_empty() {
        errors.push("street", "Street address is required");
    }
    if address.city.trim().is_empty() {
        errors.push("city", "City is required");
    }
    if !is_valid_state_code(&address.state) {
        errors.push("state", "State must be a two-letter US state code");
    }
    if address.zip.trim().len() < MIN_ZIP_LEN {
        errors.push("zip", "Valid ZIP code is required");
    }
    errors
}

pub(crate) fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyWarning {
    pub level: WarningLevel,
    pub message: String,
}

/// Price sanity checks. At most one warning is returned: ARV below the
/// purchase price wins over the price per square foot checks.
pub fn property_warnings(
    purchase_price: f64,
    square_feet: u32,
    arv: Option<f64>,
) -> Vec<PropertyWarning> {
    if purchase_price <= 0.0 || square_feet == 0 {
        return Vec::new();
    }

    if arv.is_some_and(|arv| arv > 0.0 && arv < purchase_price) {
        return vec![PropertyWarning {
            level: WarningLevel::Warning,
            message: "ARV is lower than purchase price. Consider if this is a good investment opportunity."
                .to_string(),
        }];
    }

    let price_per_sqft = purchase_price / f64::from(square_feet);
    if price_per_sqft < LOW_PRICE_PER_SQFT {
        vec![PropertyWarning {
            level: WarningLevel::Info,
            message: "Low price per sq ft suggests potential for significant value-add opportunities."
                .to_string(),
        }]
    } else if price_per_sqft > HIGH_PRICE_PER_SQFT {
        vec![PropertyWarning {
            level: WarningLevel::Warning,
            message: "High price per sq ft - ensure your renovation scope justifies the premium."
                .to_string(),
        }]
    } else {
        Vec::new()
    }
}

/// Placeholder ARV: `sqft × 150 × type multiplier`, rounded.
pub fn estimate_arv(square_feet: u32, property_type: PropertyType) -> f64 {
    (f64::from(square_feet) * BASE_PRICE_PER_SQFT * property_type.arv_multiplier()).round()
}

/// Check a whole project record, e.g. one imported from a file.
///
/// Property details are required; strategy, assessments and scope items are
/// checked when present. Dependency cycles are errors, stale ids are not.
pub fn validate_project(project: &Project) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match PropertyDetails::from_project(project) {
        Some(details) => {
            if let Err(e) = details.validate() {
                errors.extend(e);
            }
        }
        None => errors.push(
            "property",
            "Address, square feet, year built, property type and purchase price are required",
        ),
    }

    if let Some(investment_strategy) = project.investment_strategy {
        let strategy = StrategyPayload {
            investment_strategy,
            target_buyer: project.target_buyer.clone(),
            hold_period_months: project.hold_period_months,
            max_budget: project.max_budget.unwrap_or_default(),
        };
        if let Err(e) = strategy.validate() {
            errors.extend(e);
        }
    }

    if let Err(e) = validate_assessments(&project.assessments) {
        errors.extend(e);
    }

    for (i, item) in project.scope_items.iter().enumerate() {
        let field = format!("scope_items[{}]", i);
        if item.item_name.trim().is_empty() {
            errors.push(format!("{}.item_name", field), "Item name is required");
        }
        for (name, value) in [
            ("material_cost", item.material_cost),
            ("labor_cost", item.labor_cost),
            ("total_cost", item.total_cost),
        ] {
            if !is_non_negative(value) {
                errors.push(
                    format!("{}.{}", field, name),
                    "Costs must be non-negative numbers",
                );
            }
        }
        if item.phase == 0 {
            errors.push(format!("{}.phase", field), "Phase numbers start at 1");
        }
        if !(1..=MAX_DAYS_REQUIRED).contains(&item.days_required) {
            errors.push(
                format!("{}.days_required", field),
                format!("Days required must be between 1 and {}", MAX_DAYS_REQUIRED),
            );
        }
    }

    for cycle in DependencyGraph::from_items(&project.scope_items).detect_cycles() {
        errors.push(
            "scope_items.depends_on",
            format!("Dependency cycle: {}", cycle.join(" -> ")),
        );
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PropertyDetails {
        PropertyDetails {
            project_name: "Elm Street Flip".into(),
            address: Address {
                street: "12 Elm St".into(),
                city: "Austin".into(),
                state: "TX".into(),
                zip: "78701".into(),
            },
            square_feet: 1600,
            year_built: 1978,
            property_type: PropertyType::SingleFamily,
            bedrooms: 3,
            bathrooms: 2.0,
            purchase_price: 200_000.0,
            arv: Some(300_000.0),
        }
    }

    #[test]
    fn test_valid_details_pass() {
        assert!(details().validate().is_ok());
        assert!(details().warnings().is_empty());
    }

    #[test]
    fn test_errors_accumulate() {
        let mut bad = details();
        bad.project_name = " ".into();
        bad.address.state = "XX".into();
        bad.address.zip = "123".into();
        bad.square_feet = 99;
        bad.year_built = 1700;
        bad.bathrooms = 21.0;
        bad.purchase_price = f64::NAN;

        let errors = bad.validate().unwrap_err();
        for field in [
            "project_name",
            "address.state",
            "address.zip",
            "square_feet",
            "year_built",
            "bathrooms",
            "purchase_price",
        ] {
            assert!(errors.has_field(field), "missing error for {}", field);
        }
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_state_codes_case_insensitive() {
        assert!(is_valid_state_code("tx"));
        assert!(is_valid_state_code(" DC "));
        assert!(!is_valid_state_code("Texas"));
    }

    #[test]
    fn test_arv_below_purchase_warning() {
        let warnings = property_warnings(200_000.0, 1600, Some(150_000.0));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarningLevel::Warning);
        assert!(warnings[0].message.contains("ARV is lower"));
    }

    #[test]
    fn test_price_per_sqft_warnings() {
        assert_eq!(
            property_warnings(60_000.0, 1600, None)[0].level,
            WarningLevel::Info
        );
        assert_eq!(
            property_warnings(600_000.0, 1600, None)[0].level,
            WarningLevel::Warning
        );
        assert!(property_warnings(0.0, 1600, None).is_empty());
    }

    #[test]
    fn test_validate_project_requires_details() {
        let errors = validate_project(&Project::default()).unwrap_err();
        assert!(errors.has_field("property"));
    }

    #[test]
    fn test_validate_project_reports_cycles() {
        use crate::core::ScopeItemDraft;

        let d = details();
        let mut a = ScopeItemDraft::custom("Roof", "A", 1.0, 1.0, 1).into_item("a", "");
        let mut b = ScopeItemDraft::custom("Roof", "B", 1.0, 1.0, 1).into_item("b", "");
        a.depends_on = vec!["b".into()];
        b.depends_on = vec!["a".into()];
        let project = Project {
            project_name: d.project_name,
            address: Some(d.address),
            square_feet: Some(d.square_feet),
            year_built: Some(d.year_built),
            property_type: Some(d.property_type),
            purchase_price: Some(d.purchase_price),
            scope_items: vec![a, b],
            ..Default::default()
        };
        let errors = validate_project(&project).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("scope_items.depends_on"));
    }

    #[test]
    fn test_validate_project_flags_item_durations() {
        use crate::core::ScopeItemDraft;

        let d = details();
        let mut zero = ScopeItemDraft::custom("Roof", "A", 1.0, 1.0, 1).into_item("a", "");
        zero.days_required = 0;
        let mut huge = ScopeItemDraft::custom("Roof", "B", 1.0, 1.0, 1).into_item("b", "");
        huge.days_required = MAX_DAYS_REQUIRED + 1;
        let at_cap = ScopeItemDraft::custom("Roof", "C", 1.0, 1.0, MAX_DAYS_REQUIRED)
            .into_item("c", "");
        let project = Project {
            project_name: d.project_name,
            address: Some(d.address),
            square_feet: Some(d.square_feet),
            year_built: Some(d.year_built),
            property_type: Some(d.property_type),
            purchase_price: Some(d.purchase_price),
            scope_items: vec![zero, huge, at_cap],
            ..Default::default()
        };
        let errors = validate_project(&project).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("scope_items[0].days_required"));
        assert!(errors.has_field("scope_items[1].days_required"));
    }

    #[test]
    fn test_estimate_arv() {
        assert_eq!(estimate_arv(1600, PropertyType::SingleFamily), 240_000.0);
        assert_eq!(estimate_arv(1000, PropertyType::Condo), 120_000.0);
        assert_eq!(estimate_arv(1000, PropertyType::Townhouse), 142_500.0);
        assert_eq!(estimate_arv(1234, PropertyType::MultiFamily), 166_590.0);
    }
}
