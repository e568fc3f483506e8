//! CLI command implementations.
//!
//! Each submodule handles one command. Library errors are wrapped with
//! `anyhow` context here, at the edge.
//!
//! Available commands:
//! - **init**: write a default `.rehab.toml`
//! - **catalog**: list the renovation item catalog
//! - **estimate**: full report for a project file
//! - **recommend**: smart recommendations for a project file
//! - **validate**: check a project file
//! - **wizard**: drive the step-by-step wizard against a draft file
//! - **projects** / **vendors**: manage stored records

pub mod catalog;
pub mod estimate;
pub mod init;
pub mod projects;
pub mod recommend;
pub mod validate;
pub mod vendors;
pub mod wizard;

pub use catalog::show_catalog;
pub use estimate::{estimate_project, write_report};
pub use init::init_config;
pub use recommend::recommend;
pub use validate::validate_file;

use crate::config::{load_config, load_config_from_path, RehabConfig};
use crate::io::OutputFormat;
use crate::storage::{open_store, Store};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration shared by every command.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub config: RehabConfig,
}

impl AppContext {
    /// Load `path` when given, otherwise search for `.rehab.toml`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => load_config_from_path(path)?,
            None => load_config()?,
        };
        Ok(Self { config })
    }

    pub fn open_store(&self) -> Result<Box<dyn Store>> {
        let storage = self.config.storage();
        open_store(&storage).with_context(|| {
            format!("Failed to open {:?} project store", storage.backend)
        })
    }

    /// Explicit flag, then the configured default, then terminal.
    pub fn output_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested
            .or(self.config.output().default_format)
            .unwrap_or(OutputFormat::Terminal)
    }

    pub fn plain(&self) -> bool {
        self.config.output().plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;

    #[test]
    fn test_output_format_precedence() {
        let ctx = AppContext::default();
        assert_eq!(ctx.output_format(None), OutputFormat::Terminal);

        let ctx = AppContext {
            config: parse_and_validate_config("[output]\ndefault_format = \"json\"\n").unwrap(),
        };
        assert_eq!(ctx.output_format(None), OutputFormat::Json);
        assert_eq!(
            ctx.output_format(Some(OutputFormat::Markdown)),
            OutputFormat::Markdown
        );
    }
}
