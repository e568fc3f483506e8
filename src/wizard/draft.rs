//! Local draft file for an in-progress wizard.
//!
//! The draft carries the project and cursor so the command line can drive
//! the wizard one step per invocation.

use super::{EstimatorSession, WizardCursor, WizardError};
use crate::core::Project;
use crate::errors::RehabError;
use crate::storage::ProjectStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DRAFT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub version: u32,
    pub current_step: u8,
    #[serde(default)]
    pub completed_steps: Vec<u8>,
    pub project: Project,
    pub saved_at: DateTime<Utc>,
}

impl Default for DraftSnapshot {
    fn default() -> Self {
        Self::capture(&Project::default(), &WizardCursor::default())
    }
}

impl DraftSnapshot {
    pub fn capture(project: &Project, cursor: &WizardCursor) -> Self {
        Self {
            version: DRAFT_VERSION,
            current_step: cursor.current().number(),
            completed_steps: cursor.completed_steps(),
            project: project.clone(),
            saved_at: Utc::now(),
        }
    }

    pub fn of_session<S: ProjectStore>(session: &EstimatorSession<S>) -> Self {
        Self::capture(session.project(), session.cursor())
    }

    pub fn cursor(&self) -> Result<WizardCursor, WizardError> {
        WizardCursor::from_parts(self.current_step, &self.completed_steps)
    }

    /// Rebuild a session around `store`.
    pub fn into_session<S: ProjectStore>(self, store: S) -> Result<EstimatorSession<S>, WizardError> {
        let cursor = self.cursor()?;
        Ok(EstimatorSession::with_project(store, self.project, cursor))
    }

    pub fn load(path: &Path) -> Result<Self, RehabError> {
        let contents = fs::read_to_string(path)?;
        let snapshot: DraftSnapshot = serde_json::from_str(&contents)?;
        if snapshot.version != DRAFT_VERSION {
            return Err(WizardError::DraftVersion {
                found: snapshot.version,
                expected: DRAFT_VERSION,
            }
            .into());
        }
        Ok(snapshot)
    }

    /// Load `path`, or start a fresh draft when it does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self, RehabError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No draft at {}, starting fresh", path.display());
            Ok(Self::default())
        }
    }

    /// Write through a temporary file so a crash never leaves half a draft.
    pub fn save(&self, path: &Path) -> Result<(), RehabError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        tracing::debug!("Saved draft to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::wizard::WizardStep;
    use tempfile::TempDir;

    #[test]
    fn test_draft_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drafts/elm.json");

        let mut cursor = WizardCursor::new();
        cursor.mark_completed(WizardStep::PropertyDetails);
        cursor.advance();
        let project = Project {
            project_name: "Elm".into(),
            ..Default::default()
        };
        DraftSnapshot::capture(&project, &cursor).save(&path).unwrap();

        let loaded = DraftSnapshot::load(&path).unwrap();
        assert_eq!(loaded.current_step, 2);
        assert_eq!(loaded.completed_steps, vec![1]);

        let session = loaded.into_session(MemoryStore::new()).unwrap();
        assert_eq!(session.current_step(), WizardStep::Assessment);
        assert_eq!(session.project().project_name, "Elm");
    }

    #[test]
    fn test_missing_draft_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let snapshot = DraftSnapshot::load_or_default(&dir.path().join("none.json")).unwrap();
        assert_eq!(snapshot.current_step, 1);
        assert!(snapshot.completed_steps.is_empty());
    }

    #[test]
    fn test_unknown_version_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        let mut snapshot = DraftSnapshot::default();
        snapshot.version = 99;
        fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let err = DraftSnapshot::load(&path).unwrap_err();
        assert!(matches!(
            err,
            RehabError::Wizard(WizardError::DraftVersion { found: 99, .. })
        ));
    }
}
