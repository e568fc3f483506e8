//! Vendor / contractor registry records.

use crate::errors::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(default)]
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vendor {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.company_name.trim().is_empty() {
            errors.push("company_name", "Company name is required");
        }
        if let Some(ref email) = self.email {
            if !email.trim().is_empty() && !email.contains('@') {
                errors.push("email", "Email address is not valid");
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_requires_company_name() {
        let err = Vendor::new("  ").validate().unwrap_err();
        assert!(err.has_field("company_name"));
    }

    #[test]
    fn test_vendor_email_must_contain_at() {
        let mut vendor = Vendor::new("Ace Roofing");
        vendor.email = Some("ace.example.com".into());
        assert!(vendor.validate().unwrap_err().has_field("email"));
        vendor.email = Some("ops@ace.example.com".into());
        assert!(vendor.validate().is_ok());
    }
}
