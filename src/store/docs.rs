use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::foundation::core::Category;
use crate::foundation::error::{PfpError, PfpResult};
use crate::store::http::build_client;

/// Public Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";

/// Analytics record written for every successful export.
///
/// Empty slots are recorded as empty strings. The creation timestamp is assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// Object path selected per category.
    pub selected: BTreeMap<Category, String>,
}

/// Append-only sink for download records.
pub trait DownloadLog: Send + Sync {
    /// Append one record; the store stamps it with its own clock.
    fn append(&self, record: &DownloadRecord) -> PfpResult<()>;
}

/// A record as held by [`InMemoryDownloadLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRecord {
    /// The appended record.
    pub record: DownloadRecord,
    /// Milliseconds since the Unix epoch at append time.
    pub created_at_ms: u64,
}

/// In-memory log for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryDownloadLog {
    records: Mutex<Vec<StoredRecord>>,
}

impl InMemoryDownloadLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the appended records in append order.
    pub fn records(&self) -> Vec<StoredRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl DownloadLog for InMemoryDownloadLog {
    fn append(&self, record: &DownloadRecord) -> PfpResult<()> {
        let created_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut records = self
            .records
            .lock()
            .map_err(|_| PfpError::validation("download log lock poisoned"))?;
        records.push(StoredRecord {
            record: record.clone(),
            created_at_ms,
        });
        Ok(())
    }
}

/// Firestore collection written through the REST `commit` endpoint.
///
/// `createdAt` is filled in server-side with a `REQUEST_TIME` transform.
pub struct FirestoreLog {
    client: reqwest::blocking::Client,
    endpoint: Url,
    project: String,
    collection: String,
    api_key: Option<String>,
}

impl FirestoreLog {
    /// Write into the `downloads` collection of `project`.
    pub fn new(
        project: impl Into<String>,
        api_key: Option<String>,
        timeout_ms: u64,
    ) -> PfpResult<Self> {
        let project = project.into();
        if project.is_empty() {
            return Err(PfpError::validation("firestore project must be non-empty"));
        }
        Ok(Self {
            client: build_client(timeout_ms)?,
            endpoint: Url::parse(DEFAULT_FIRESTORE_ENDPOINT)
                .map_err(|e| PfpError::validation(format!("invalid firestore endpoint: {e}")))?,
            project,
            collection: "downloads".to_owned(),
            api_key,
        })
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.project)
    }

    fn commit_url(&self) -> PfpResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| PfpError::validation("firestore endpoint cannot be a base url"))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                self.project.as_str(),
                "databases",
                "(default)",
                "documents:commit",
            ]);
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn commit_body(&self, record: &DownloadRecord, doc_id: &str) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = record
            .selected
            .iter()
            .map(|(category, path)| (category.to_string(), json!({ "stringValue": path })))
            .collect();
        let name = format!(
            "{}/documents/{}/{}",
            self.database_path(),
            self.collection,
            doc_id
        );

        json!({
            "writes": [{
                "update": {
                    "name": name,
                    "fields": {
                        "selected": { "mapValue": { "fields": fields } }
                    }
                },
                "updateTransforms": [{
                    "fieldPath": "createdAt",
                    "setToServerValue": "REQUEST_TIME"
                }]
            }]
        })
    }
}

impl DownloadLog for FirestoreLog {
    #[tracing::instrument(skip_all)]
    fn append(&self, record: &DownloadRecord) -> PfpResult<()> {
        let doc_id = uuid::Uuid::new_v4().simple().to_string();
        let body = self.commit_body(record, &doc_id);
        self.client
            .post(self.commit_url()?)
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .context("commit download record")?;
        tracing::debug!(doc_id = %doc_id, "download record committed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/docs.rs"]
mod tests;
