//! The in-progress rehab project record.
//!
//! A project starts empty when the wizard begins and is filled in step by
//! step, so every attribute collected by a wizard step is optional.

use super::assessment::RoomAssessment;
use super::scope::ScopeItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    MultiFamily,
    Condo,
    Townhouse,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "Single Family",
            PropertyType::MultiFamily => "Multi-Family",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
        }
    }

    /// Market multiplier applied by the ARV estimator.
    pub fn arv_multiplier(&self) -> f64 {
        match self {
            PropertyType::SingleFamily => 1.0,
            PropertyType::MultiFamily => 0.9,
            PropertyType::Condo => 0.8,
            PropertyType::Townhouse => 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStrategy {
    FixAndFlip,
    BuyAndHold,
    Brrrr,
    Wholetail,
}

impl InvestmentStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentStrategy::FixAndFlip => "fix and flip",
            InvestmentStrategy::BuyAndHold => "buy and hold",
            InvestmentStrategy::Brrrr => "brrrr",
            InvestmentStrategy::Wholetail => "wholetail",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub square_feet: Option<u32>,
    #[serde(default)]
    pub year_built: Option<u32>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub arv: Option<f64>,
    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub investment_strategy: Option<InvestmentStrategy>,
    #[serde(default)]
    pub target_buyer: Option<String>,
    #[serde(default)]
    pub hold_period_months: Option<u32>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub overall_score: Option<u32>,
    #[serde(default)]
    pub scope_items: Vec<ScopeItem>,
    #[serde(default)]
    pub assessments: BTreeMap<String, RoomAssessment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn included_items(&self) -> impl Iterator<Item = &ScopeItem> {
        self.scope_items.iter().filter(|item| item.included)
    }

    pub fn item(&self, id: &str) -> Option<&ScopeItem> {
        self.scope_items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut ScopeItem> {
        self.scope_items.iter_mut().find(|item| item.id == id)
    }

    /// Budget usable as a divisor: set and non-zero.
    pub fn effective_budget(&self) -> Option<f64> {
        self.max_budget.filter(|b| b.is_finite() && *b != 0.0)
    }

    /// ARV is expected to be at least the purchase price; this is a soft check.
    pub fn arv_below_purchase(&self) -> bool {
        matches!((self.arv, self.purchase_price), (Some(arv), Some(price)) if arv > 0.0 && arv < price)
    }

    pub fn display_name(&self) -> &str {
        if self.project_name.is_empty() {
            "Untitled project"
        } else {
            &self.project_name
        }
    }
}
