use std::fs;
use std::path::{Path, PathBuf};

use super::core::RehabConfig;
use crate::errors::RehabError;

pub const CONFIG_FILE_NAME: &str = ".rehab.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<RehabConfig, String> {
    let config = toml::from_str::<RehabConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(ref review) = config.review {
        review
            .validate()
            .map_err(|e| format!("Invalid [review] thresholds: {}", e))?;
    }

    if let Some(ref storage) = config.storage {
        if storage.timeout_secs == 0 {
            return Err("Invalid [storage] timeout_secs: must be at least 1".to_string());
        }
    }

    Ok(config)
}

/// Load a specific config file. Missing or invalid files are errors here.
pub fn load_config_from_path(path: &Path) -> Result<RehabConfig, RehabError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        RehabError::config_with_path(format!("Failed to read config file: {}", e), path)
    })?;
    parse_and_validate_config(&contents).map_err(|e| RehabError::config_with_path(e, path))
}

/// Try one candidate path; `None` when it does not exist.
fn try_load_config_from_path(config_path: &Path) -> Option<Result<RehabConfig, RehabError>> {
    if !config_path.is_file() {
        return None;
    }
    let result = load_config_from_path(config_path);
    if result.is_ok() {
        tracing::debug!("Loaded config from {}", config_path.display());
    }
    Some(result)
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest config file walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the nearest config, starting at `start`.
///
/// A config file that exists but fails to parse or validate is reported as
/// an error rather than silently replaced with defaults.
pub fn load_config_from(start: &Path) -> Result<RehabConfig, RehabError> {
    match directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
    {
        Some(result) => result,
        None => {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(RehabConfig::default())
        }
    }
}

pub fn load_config() -> Result<RehabConfig, RehabError> {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(RehabConfig::default())
        }
    }
}

/// Default config file written by `init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Rehab estimator configuration

[storage]
# memory | file | rest
backend = "file"
# data_dir = "/path/to/data"
# base_url = "https://your-project.example.co"
api_key_env = "REHAB_API_KEY"
timeout_secs = 30

[output]
# terminal | json | markdown
default_format = "terminal"
plain = false

[review]
high_risk_budget_pct = 90.0
medium_risk_budget_pct = 75.0
excellent_roi_pct = 20.0
good_roi_pct = 15.0
"#;
