//! Persistence boundary for projects and vendors.
//!
//! Two resources exist, `rehab_projects` and `vendors`, each with the same
//! CRUD shape. The wizard only talks to the [`ProjectStore`] and
//! [`VendorStore`] traits; backends are chosen from configuration:
//!
//! - [`MemoryStore`]: process-local, used by tests and as the default
//! - [`FileStore`]: one JSON document per record under a data directory
//! - [`RestStore`]: PostgREST-style hosted database over HTTP
//!
//! Writes are last-write-wins. Derived views are never stored.

pub mod file;
pub mod memory;
pub mod record;
pub mod rest;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::ProjectRecord;
pub use rest::RestStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::Vendor;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

pub const PROJECTS_TABLE: &str = "rehab_projects";
pub const VENDORS_TABLE: &str = "vendors";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No record '{id}' in {table}")]
    NotFound { table: &'static str, id: String },

    #[error("Invalid record id '{0}'")]
    InvalidId(String),

    #[error("Store unreachable: {0}")]
    Transport(String),

    #[error("Store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode stored record: {0}")]
    Decode(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage misconfigured: {0}")]
    Config(String),
}

impl StorageError {
    pub fn not_found(table: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            table,
            id: id.into(),
        }
    }

    /// Failures that may go away when the same call is repeated.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// A record kept in one of the two resources.
pub trait StoredRecord: Clone + Serialize + DeserializeOwned {
    const TABLE: &'static str;
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);

    /// Assign an id when missing and stamp timestamps ahead of a write.
    fn prepare_upsert(&mut self, now: DateTime<Utc>) {
        if self.id().is_empty() {
            self.set_id(generate_id(Self::ID_PREFIX));
        }
        let created = self.created_at().unwrap_or(now);
        self.set_timestamps(created, now);
    }
}

impl StoredRecord for Vendor {
    const TABLE: &'static str = VENDORS_TABLE;
    const ID_PREFIX: &'static str = "vendor";

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

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Time-ordered unique id, e.g. `project-20240105T101500123-7`.
pub fn generate_id(prefix: &str) -> String {
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, Utc::now().format("%Y%m%dT%H%M%S%3f"), seq)
}

/// Newest first by creation time, then by id for stability.
pub(crate) fn sort_newest_first<R: StoredRecord>(records: &mut [R]) {
    records.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

/// CRUD over the `rehab_projects` resource.
pub trait ProjectStore {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>, StorageError>;
    fn get_project(&self, id: &str) -> Result<ProjectRecord, StorageError>;
    /// Insert or replace. Assigns an id when empty and stamps timestamps;
    /// returns the record as stored.
    fn upsert_project(&mut self, record: ProjectRecord) -> Result<ProjectRecord, StorageError>;
    fn delete_project(&mut self, id: &str) -> Result<(), StorageError>;
}

/// CRUD over the `vendors` resource.
pub trait VendorStore {
    fn list_vendors(&self) -> Result<Vec<Vendor>, StorageError>;
    fn get_vendor(&self, id: &str) -> Result<Vendor, StorageError>;
    fn upsert_vendor(&mut self, vendor: Vendor) -> Result<Vendor, StorageError>;
    fn delete_vendor(&mut self, id: &str) -> Result<(), StorageError>;
}

impl<T: ProjectStore + ?Sized> ProjectStore for Box<T> {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>, StorageError> {
        (**self).list_projects()
    }

    fn get_project(&self, id: &str) -> Result<ProjectRecord, StorageError> {
        (**self).get_project(id)
    }

    fn upsert_project(&mut self, record: ProjectRecord) -> Result<ProjectRecord, StorageError> {
        (**self).upsert_project(record)
    }

    fn delete_project(&mut self, id: &str) -> Result<(), StorageError> {
        (**self).delete_project(id)
    }
}

impl<T: VendorStore + ?Sized> VendorStore for Box<T> {
    fn list_vendors(&self) -> Result<Vec<Vendor>, StorageError> {
        (**self).list_vendors()
    }

    fn get_vendor(&self, id: &str) -> Result<Vendor, StorageError> {
        (**self).get_vendor(id)
    }

    fn upsert_vendor(&mut self, vendor: Vendor) -> Result<Vendor, StorageError> {
        (**self).upsert_vendor(vendor)
    }

    fn delete_vendor(&mut self, id: &str) -> Result<(), StorageError> {
        (**self).delete_vendor(id)
    }
}

/// Both resources behind one handle.
pub trait Store: ProjectStore + VendorStore {}

impl<T: ProjectStore + VendorStore + ?Sized> Store for T {}

/// Open the backend selected by `config`.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn Store>, StorageError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory store");
            Ok(Box::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let dir = config.resolved_data_dir();
            tracing::debug!("Using file store at {}", dir.display());
            Ok(Box::new(FileStore::open(dir)?))
        }
        StorageBackend::Rest => {
            tracing::debug!("Using REST store");
            Ok(Box::new(RestStore::from_config(config)?))
        }
    }
}
