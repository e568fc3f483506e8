use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::io::output::OutputFormat;

/// Root configuration structure for the estimator
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RehabConfig {
    /// Where projects and vendors are persisted
    #[serde(default)]
    pub storage: Option<StorageConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Risk and ROI rating thresholds used by the final review
    #[serde(default)]
    pub review: Option<ReviewThresholds>,
}

impl RehabConfig {
    pub fn storage(&self) -> StorageConfig {
        self.storage.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    pub fn review(&self) -> ReviewThresholds {
        self.review.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the file backend
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the hosted database for the rest backend
    #[serde(default)]
    pub base_url: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: None,
            base_url: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorageConfig {
    /// Configured data directory, or the platform data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rehab-estimator")
        })
    }
}

fn default_api_key_env() -> String {
    "REHAB_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,

    /// Disable colors and decorations
    #[serde(default)]
    pub plain: bool,
}

/// Budget usage and ROI thresholds, in percent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewThresholds {
    #[serde(default = "default_high_risk")]
    pub high_risk_budget_pct: f64,

    #[serde(default = "default_medium_risk")]
    pub medium_risk_budget_pct: f64,

    #[serde(default = "default_excellent_roi")]
    pub excellent_roi_pct: f64,

    #[serde(default = "default_good_roi")]
    pub good_roi_pct: f64,
}

impl Default for ReviewThresholds {
    fn default() -> Self {
        Self {
            high_risk_budget_pct: default_high_risk(),
            medium_risk_budget_pct: default_medium_risk(),
            excellent_roi_pct: default_excellent_roi(),
            good_roi_pct: default_good_roi(),
        }
    }
}

impl ReviewThresholds {
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("high_risk_budget_pct", self.high_risk_budget_pct),
            ("medium_risk_budget_pct", self.medium_risk_budget_pct),
            ("excellent_roi_pct", self.excellent_roi_pct),
            ("good_roi_pct", self.good_roi_pct),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(format!("{} must be a non-negative number, got {}", name, value));
        }
        if self.medium_risk_budget_pct > self.high_risk_budget_pct {
            return Err(format!(
                "medium_risk_budget_pct ({}) must not exceed high_risk_budget_pct ({})",
                self.medium_risk_budget_pct, self.high_risk_budget_pct
            ));
        }
        if self.good_roi_pct > self.excellent_roi_pct {
            return Err(format!(
                "good_roi_pct ({}) must not exceed excellent_roi_pct ({})",
                self.good_roi_pct, self.excellent_roi_pct
            ));
        }
        Ok(())
    }
}

fn default_high_risk() -> f64 {
    90.0
}

fn default_medium_risk() -> f64 {
    75.0
}

fn default_excellent_roi() -> f64 {
    20.0
}

fn default_good_roi() -> f64 {
    15.0
}
