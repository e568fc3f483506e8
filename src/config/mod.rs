// Core configuration types
mod core;
mod loader;

pub use core::{OutputConfig, RehabConfig, ReviewThresholds, StorageBackend, StorageConfig};

pub use loader::{
    directory_ancestors, find_config_file, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::output::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_parses() {
        let config = parse_and_validate_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.storage().backend, StorageBackend::File);
        assert_eq!(config.output().default_format, Some(OutputFormat::Terminal));
        assert_eq!(config.review(), ReviewThresholds::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        let storage = config.storage();
        assert_eq!(storage.backend, StorageBackend::Memory);
        assert_eq!(storage.api_key_env, "REHAB_API_KEY");
        assert_eq!(storage.timeout_secs, 30);
        assert!(!config.output().plain);
    }

    #[test]
    fn test_partial_review_section_fills_defaults() {
        let config = parse_and_validate_config("[review]\nhigh_risk_budget_pct = 95.0\n").unwrap();
        let review = config.review();
        assert_eq!(review.high_risk_budget_pct, 95.0);
        assert_eq!(review.medium_risk_budget_pct, 75.0);
    }

    #[test]
    fn test_out_of_order_thresholds_rejected() {
        let toml = "[review]\nhigh_risk_budget_pct = 70.0\nmedium_risk_budget_pct = 80.0\n";
        let err = parse_and_validate_config(toml).unwrap_err();
        assert!(err.contains("medium_risk_budget_pct"));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = parse_and_validate_config("invalid toml [[ content").unwrap_err();
        assert!(err.contains("Failed to parse"));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(parse_and_validate_config("[storage]\nbackend = \"sqlite\"\n").is_err());
    }

    #[test]
    fn test_load_walks_up_ancestors() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[output]\nplain = true\n",
        )
        .unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(&nested).unwrap();
        assert!(config.output().plain);
        assert_eq!(
            find_config_file(&nested),
            Some(temp.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "[review\n").unwrap();
        let err = load_config_from(temp.path()).unwrap_err();
        assert_eq!(err.category(), "Config");
    }

    #[test]
    fn test_directory_ancestors_depth_limit() {
        let start = std::path::PathBuf::from("/a/b/c/d");
        let dirs: Vec<_> = directory_ancestors(start, 2).collect();
        assert_eq!(dirs.len(), 2);
        assert_eq!(dirs[1], std::path::PathBuf::from("/a/b/c"));
    }
}
