//! File backend: one pretty-printed JSON document per record.
//!
//! ```text
//! <data_dir>/rehab_projects/<id>.json
//! <data_dir>/vendors/<id>.json
//! ```

use super::{
    sort_newest_first, ProjectRecord, ProjectStore, StorageError, StoredRecord, VendorStore,
};
use crate::core::Vendor;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        for table in [ProjectRecord::TABLE, Vendor::TABLE] {
            fs::create_dir_all(root.join(table))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path<R: StoredRecord>(&self, id: &str) -> Result<PathBuf, StorageError> {
        validate_id(id)?;
        Ok(self.root.join(R::TABLE).join(format!("{}.json", id)))
    }

    fn list<R: StoredRecord>(&self) -> Result<Vec<R>, StorageError> {
        let dir = self.root.join(R::TABLE);
        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_record::<R>(&path) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping unreadable record {}: {}", path.display(), e),
            }
        }
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn get<R: StoredRecord>(&self, id: &str) -> Result<R, StorageError> {
        let path = self.record_path::<R>(id)?;
        if !path.is_file() {
            return Err(StorageError::not_found(R::TABLE, id));
        }
        read_record(&path)
    }

    fn upsert<R: StoredRecord>(&self, mut record: R) -> Result<R, StorageError> {
        record.prepare_upsert(Utc::now());
        let path = self.record_path::<R>(record.id())?;
        let json = serde_json::to_string_pretty(&record)?;

        // Write beside the target then rename so readers never see a torn file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(table = R::TABLE, id = record.id(), "Wrote record");
        Ok(record)
    }

    fn delete<R: StoredRecord>(&self, id: &str) -> Result<(), StorageError> {
        let path = self.record_path::<R>(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(R::TABLE, id))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn read_record<R: StoredRecord>(path: &Path) -> Result<R, StorageError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| StorageError::Decode(format!("{}: {}", path.display(), e)))
}

/// Ids become file names, so only a conservative character set is allowed.
fn validate_id(id: &str) -> Result<(), StorageError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidId(id.to_string()))
    }
}

impl ProjectStore for FileStore {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>, StorageError> {
        self.list()
    }

    fn get_project(&self, id: &str) -> Result<ProjectRecord, StorageError> {
        self.get(id)
    }

    fn upsert_project(&mut self, record: ProjectRecord) -> Result<ProjectRecord, StorageError> {
        self.upsert(record)
    }

    fn delete_project(&mut self, id: &str) -> Result<(), StorageError> {
        self.delete::<ProjectRecord>(id)
    }
}

impl VendorStore for FileStore {
    fn list_vendors(&self) -> Result<Vec<Vendor>, StorageError> {
        self.list()
    }

    fn get_vendor(&self, id: &str) -> Result<Vendor, StorageError> {
        self.get(id)
    }

    fn upsert_vendor(&mut self, vendor: Vendor) -> Result<Vendor, StorageError> {
        self.upsert(vendor)
    }

    fn delete_vendor(&mut self, id: &str) -> Result<(), StorageError> {
        self.delete::<Vendor>(id)
    }
}
