//! Scope items: the renovation line items a project is built from.

use crate::errors::ValidationErrors;
use crate::priority::CategoryClass;
use serde::{Deserialize, Serialize};

/// MoSCoW-style priority tier declared by the author of a scope item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Must,
    Should,
    Could,
    Nice,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 4] = [
        PriorityTier::Must,
        PriorityTier::Should,
        PriorityTier::Could,
        PriorityTier::Nice,
    ];

    /// Urgency adjustment applied on top of the base urgency of 50.
    pub fn urgency_delta(&self) -> i32 {
        match self {
            PriorityTier::Must => 30,
            PriorityTier::Should => 15,
            PriorityTier::Could => -10,
            PriorityTier::Nice => -25,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::Must => "Must Have",
            PriorityTier::Should => "Should Have",
            PriorityTier::Could => "Could Have",
            PriorityTier::Nice => "Nice to Have",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Must => "must",
            PriorityTier::Should => "should",
            PriorityTier::Could => "could",
            PriorityTier::Nice => "nice",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "must" => Some(Self::Must),
            "should" => Some(Self::Should),
            "could" => Some(Self::Could),
            "nice" => Some(Self::Nice),
            _ => None,
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single renovation task with cost, duration and priority attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeItem {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    /// Free-text category label ("Kitchen", "Electrical Panel Upgrade", ...).
    pub category: String,
    /// Explicit classification from the catalog. Free-text items leave this
    /// empty and are classified from `category` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<CategoryClass>,
    pub item_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit_of_measure: String,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
    pub priority: PriorityTier,
    #[serde(default)]
    pub roi_impact: f64,
    #[serde(default)]
    pub days_required: u32,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default = "default_phase")]
    pub phase: u32,
    #[serde(default = "default_included")]
    pub included: bool,
    #[serde(default)]
    pub completed: bool,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    "each".to_string()
}

fn default_phase() -> u32 {
    1
}

fn default_included() -> bool {
    true
}

impl ScopeItem {
    /// Classification used by the priority matrix: the explicit catalog
    /// class when present, otherwise the label-based fallback.
    pub fn category_class(&self) -> CategoryClass {
        self.classification
            .unwrap_or_else(|| CategoryClass::from_label(&self.category))
    }

    /// Apply a partial update. Cost consistency is not re-validated.
    pub fn apply(&mut self, patch: &ScopeItemPatch) {
        if let Some(ref category) = patch.category {
            self.category = category.clone();
        }
        if let Some(classification) = patch.classification {
            self.classification = Some(classification);
        }
        if let Some(ref name) = patch.item_name {
            self.item_name = name.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(ref location) = patch.location {
            self.location = location.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(material) = patch.material_cost {
            self.material_cost = material;
        }
        if let Some(labor) = patch.labor_cost {
            self.labor_cost = labor;
        }
        if let Some(total) = patch.total_cost {
            self.total_cost = total;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(roi) = patch.roi_impact {
            self.roi_impact = roi;
        }
        if let Some(days) = patch.days_required {
            self.days_required = days;
        }
        if let Some(ref deps) = patch.depends_on {
            self.depends_on = deps.clone();
        }
        if let Some(phase) = patch.phase {
            self.phase = phase;
        }
        if let Some(included) = patch.included {
            self.included = included;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Longest duration a single item may declare, in working days.
pub const MAX_DAYS_REQUIRED: u32 = 3650;

fn days_in_range(days: u32) -> bool {
    (1..=MAX_DAYS_REQUIRED).contains(&days)
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Partial update for a scope item; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeItemPatch {
    pub category: Option<String>,
    pub classification: Option<CategoryClass>,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub quantity: Option<f64>,
    pub material_cost: Option<f64>,
    pub labor_cost: Option<f64>,
    pub total_cost: Option<f64>,
    pub priority: Option<PriorityTier>,
    pub roi_impact: Option<f64>,
    pub days_required: Option<u32>,
    pub depends_on: Option<Vec<String>>,
    pub phase: Option<u32>,
    pub included: Option<bool>,
    pub completed: Option<bool>,
}

impl ScopeItemPatch {
    /// Check the fields that are present. Absent fields are never errors.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.item_name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            errors.push("item_name", "Item name cannot be blank");
        }
        if self.category.as_ref().is_some_and(|category| category.trim().is_empty()) {
            errors.push("category", "Category cannot be blank");
        }
        for (field, value) in [
            ("quantity", self.quantity),
            ("material_cost", self.material_cost),
            ("labor_cost", self.labor_cost),
            ("total_cost", self.total_cost),
        ] {
            if value.is_some_and(|v| !non_negative(v)) {
                errors.push(field, "Must be a non-negative number");
            }
        }
        if self.roi_impact.is_some_and(|roi| !roi.is_finite()) {
            errors.push("roi_impact", "ROI impact must be a number");
        }
        if self.days_required.is_some_and(|days| !days_in_range(days)) {
            errors.push(
                "days_required",
                format!("Days required must be between 1 and {}", MAX_DAYS_REQUIRED),
            );
        }
        if self.phase == Some(0) {
            errors.push("phase", "Phases are numbered from 1");
        }
        errors.into_result()
    }
}

/// New item as entered by the user (catalog pick or custom entry), before
/// an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeItemDraft {
    pub category: String,
    #[serde(default)]
    pub classification: Option<CategoryClass>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub material_cost: f64,
    pub labor_cost: f64,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub roi_impact: f64,
    #[serde(default = "default_priority")]
    pub priority: PriorityTier,
}

fn default_days() -> u32 {
    1
}

fn default_priority() -> PriorityTier {
    PriorityTier::Should
}

impl ScopeItemDraft {
    pub fn custom(
        category: impl Into<String>,
        name: impl Into<String>,
        material_cost: f64,
        labor_cost: f64,
        days: u32,
    ) -> Self {
        Self {
            category: category.into(),
            classification: None,
            name: name.into(),
            description: String::new(),
            location: String::new(),
            material_cost,
            labor_cost,
            days,
            roi_impact: 0.0,
            priority: PriorityTier::Should,
        }
    }

    pub fn with_priority(mut self, priority: PriorityTier) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_roi(mut self, roi_impact: f64) -> Self {
        self.roi_impact = roi_impact;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "Item name is required");
        }
        if self.category.trim().is_empty() {
            errors.push("category", "Category is required");
        }
        if !non_negative(self.material_cost) {
            errors.push("material_cost", "Material cost must be a non-negative number");
        }
        if !non_negative(self.labor_cost) {
            errors.push("labor_cost", "Labor cost must be a non-negative number");
        }
        if !days_in_range(self.days) {
            errors.push(
                "days",
                format!("Days required must be between 1 and {}", MAX_DAYS_REQUIRED),
            );
        }
        if !self.roi_impact.is_finite() {
            errors.push("roi_impact", "ROI impact must be a number");
        }
        errors.into_result()
    }

    /// Materialize the draft. Total cost is fixed to material + labor here.
    pub fn into_item(self, id: impl Into<String>, project_id: impl Into<String>) -> ScopeItem {
        ScopeItem {
            id: id.into(),
            project_id: project_id.into(),
            category: self.category,
            classification: self.classification,
            item_name: self.name,
            description: self.description,
            location: self.location,
            quantity: 1.0,
            unit_of_measure: default_unit(),
            material_cost: self.material_cost,
            labor_cost: self.labor_cost,
            total_cost: self.material_cost + self.labor_cost,
            priority: self.priority,
            roi_impact: self.roi_impact,
            days_required: self.days,
            depends_on: Vec::new(),
            phase: 1,
            included: true,
            completed: false,
        }
    }
}
