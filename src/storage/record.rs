//! Persisted shape of a project.
//!
//! Scalar attributes are flat snake_case columns, the address is split into
//! `address_*` columns and the nested collections travel as embedded JSON.

use super::{StoredRecord, PROJECTS_TABLE};
use crate::core::{
    Address, InvestmentStrategy, Project, ProjectStatus, PropertyType, RoomAssessment, ScopeItem,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_state: Option<String>,
    #[serde(default)]
    pub address_zip: Option<String>,
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
    /// Wizard steps completed when the record was saved.
    #[serde(default)]
    pub step_progress: Vec<u8>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    pub fn from_project(project: &Project, step_progress: Vec<u8>) -> Self {
        let address = project.address.as_ref();
        Self {
            id: project.id.clone(),
            project_name: project.project_name.clone(),
            address_street: address.map(|a| a.street.clone()),
            address_city: address.map(|a| a.city.clone()),
            address_state: address.map(|a| a.state.clone()),
            address_zip: address.map(|a| a.zip.clone()),
            square_feet: project.square_feet,
            year_built: project.year_built,
            property_type: project.property_type,
            bedrooms: project.bedrooms,
            bathrooms: project.bathrooms,
            purchase_price: project.purchase_price,
            arv: project.arv,
            max_budget: project.max_budget,
            investment_strategy: project.investment_strategy,
            target_buyer: project.target_buyer.clone(),
            hold_period_months: project.hold_period_months,
            status: project.status,
            overall_score: project.overall_score,
            scope_items: project.scope_items.clone(),
            assessments: project.assessments.clone(),
            step_progress,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }

    /// Split into the in-memory project and its saved wizard progress.
    pub fn into_parts(self) -> (Project, Vec<u8>) {
        let has_address = self.address_street.is_some()
            || self.address_city.is_some()
            || self.address_state.is_some()
            || self.address_zip.is_some();
        let address = has_address.then(|| Address {
            street: self.address_street.unwrap_or_default(),
            city: self.address_city.unwrap_or_default(),
            state: self.address_state.unwrap_or_default(),
            zip: self.address_zip.unwrap_or_default(),
        });

        let project = Project {
            id: self.id,
            project_name: self.project_name,
            address,
            square_feet: self.square_feet,
            year_built: self.year_built,
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            purchase_price: self.purchase_price,
            arv: self.arv,
            max_budget: self.max_budget,
            investment_strategy: self.investment_strategy,
            target_buyer: self.target_buyer,
            hold_period_months: self.hold_period_months,
            status: self.status,
            overall_score: self.overall_score,
            scope_items: self.scope_items,
            assessments: self.assessments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (project, self.step_progress)
    }

    pub fn into_project(self) -> Project {
        self.into_parts().0
    }
}

impl StoredRecord for ProjectRecord {
    const TABLE: &'static str = PROJECTS_TABLE;
    const ID_PREFIX: &'static str = "project";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }
}
