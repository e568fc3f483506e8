//! PostgREST-style hosted database backend.
//!
//! Tables are addressed as `{base_url}/rest/v1/{table}`; single rows are
//! selected with an `id=eq.{id}` filter. Every request carries the API key
//! both as `apikey` and as a bearer token.

use super::{ProjectRecord, ProjectStore, StorageError, StoredRecord, VendorStore};
use crate::config::StorageConfig;
use crate::core::Vendor;
use chrono::Utc;
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build from `[storage]`, reading the key from the configured env var.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| StorageError::Config("[storage] base_url is required".to_string()))?;
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            StorageError::Config(format!(
                "API key environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(base_url, api_key, Duration::from_secs(config.timeout_secs))
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let response = self
            .authorized(request)
            .send()
            .map_err(|e| StorageError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(StorageError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn decode_rows<R: StoredRecord>(response: Response) -> Result<Vec<R>, StorageError> {
        response
            .json::<Vec<R>>()
            .map_err(|e| StorageError::Decode(e.to_string()))
    }

    fn list<R: StoredRecord>(&self) -> Result<Vec<R>, StorageError> {
        let request = self
            .client
            .get(self.table_url(R::TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        Self::decode_rows(self.send(request)?)
    }

    fn get<R: StoredRecord>(&self, id: &str) -> Result<R, StorageError> {
        let request = self
            .client
            .get(self.table_url(R::TABLE))
            .query(&[("select", "*".to_string()), ("id", id_filter(id))]);
        Self::decode_rows(self.send(request)?)?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::not_found(R::TABLE, id))
    }

    fn upsert<R: StoredRecord>(&self, mut record: R) -> Result<R, StorageError> {
        record.prepare_upsert(Utc::now());
        let request = self
            .client
            .post(self.table_url(R::TABLE))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&record);
        tracing::debug!(table = R::TABLE, id = record.id(), "Upserting record");
        Ok(Self::decode_rows(self.send(request)?)?
            .into_iter()
            .next()
            .unwrap_or(record))
    }

    fn delete<R: StoredRecord>(&self, id: &str) -> Result<(), StorageError> {
        let request = self
            .client
            .delete(self.table_url(R::TABLE))
            .header("Prefer", "return=representation")
            .query(&[("id", id_filter(id))]);
        let deleted: Vec<R> = Self::decode_rows(self.send(request)?)?;
        if deleted.is_empty() {
            Err(StorageError::not_found(R::TABLE, id))
        } else {
            Ok(())
        }
    }
}

fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

impl ProjectStore for RestStore {
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

impl VendorStore for RestStore {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store =
            RestStore::new("https://db.example.co/", "key", Duration::from_secs(5)).unwrap();
        assert_eq!(
            store.table_url("rehab_projects"),
            "https://db.example.co/rest/v1/rehab_projects"
        );
        assert_eq!(id_filter("p-1"), "eq.p-1");
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let config = StorageConfig {
            backend: StorageBackend::Rest,
            ..Default::default()
        };
        assert!(matches!(
            RestStore::from_config(&config),
            Err(StorageError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = StorageConfig {
            backend: StorageBackend::Rest,
            base_url: Some("https://db.example.co".into()),
            api_key_env: "REHAB_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        let err = RestStore::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("REHAB_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let mut store =
            RestStore::new("http://127.0.0.1:9", "key", Duration::from_secs(2)).unwrap();
        let err = store.delete_project("p1").unwrap_err();
        assert!(matches!(err, StorageError::Transport(_)));
        assert!(err.is_retryable());
    }
}
