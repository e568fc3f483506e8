use super::{
    sort_newest_first, ProjectRecord, ProjectStore, StorageError, StoredRecord, VendorStore,
};
use crate::core::Vendor;
use chrono::Utc;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Table<R> {
    rows: HashMap<String, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<R: StoredRecord> Table<R> {
    fn list(&self) -> Vec<R> {
        let mut records: Vec<R> = self.rows.values().cloned().collect();
        sort_newest_first(&mut records);
        records
    }

    fn get(&self, id: &str) -> Result<R, StorageError> {
        self.rows
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(R::TABLE, id))
    }

    fn upsert(&mut self, mut record: R) -> Result<R, StorageError> {
        record.prepare_upsert(Utc::now());
        self.rows.insert(record.id().to_string(), record.clone());
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> Result<(), StorageError> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(R::TABLE, id))
    }
}

/// Process-local store. Contents are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: Table<ProjectRecord>,
    vendors: Table<Vendor>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>, StorageError> {
        Ok(self.projects.list())
    }

    fn get_project(&self, id: &str) -> Result<ProjectRecord, StorageError> {
        self.projects.get(id)
    }

    fn upsert_project(&mut self, record: ProjectRecord) -> Result<ProjectRecord, StorageError> {
        self.projects.upsert(record)
    }

    fn delete_project(&mut self, id: &str) -> Result<(), StorageError> {
        self.projects.delete(id)
    }
}

impl VendorStore for MemoryStore {
    fn list_vendors(&self) -> Result<Vec<Vendor>, StorageError> {
        Ok(self.vendors.list())
    }

    fn get_vendor(&self, id: &str) -> Result<Vendor, StorageError> {
        self.vendors.get(id)
    }

    fn upsert_vendor(&mut self, vendor: Vendor) -> Result<Vendor, StorageError> {
        self.vendors.upsert(vendor)
    }

    fn delete_vendor(&mut self, id: &str) -> Result<(), StorageError> {
        self.vendors.delete(id)
    }
}
