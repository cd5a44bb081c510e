//! Firestore REST backend
//!
//! One client is constructed per process and passed down explicitly; there is
//! no global SDK state. A batch commit is a single POST to the `documents:commit`
//! endpoint, which Firestore applies transactionally.

use super::auth::{ServiceAccountKey, TokenProvider};
use super::{value, CommitOutcome, DocumentStore, StoreError, WriteBatch, MAX_BATCH_WRITES};
use crate::config::FirestoreConfig;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Authenticated handle to one Firestore database
pub struct FirestoreClient {
    http: reqwest::blocking::Client,
    tokens: TokenProvider,
    /// `projects/{project}/databases/{db}/documents`, relative to the API root
    documents_root: String,
    commit_url: String,
}

impl std::fmt::Debug for FirestoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreClient")
            .field("documents_root", &self.documents_root)
            .field("commit_url", &self.commit_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default, rename = "commitTime")]
    commit_time: Option<String>,
}

impl FirestoreClient {
    /// Build an authenticated client from configuration.
    ///
    /// Reads the service account key eagerly so a missing credential aborts
    /// before any data is touched.
    pub fn connect(config: &FirestoreConfig) -> Result<Self, StoreError> {
        let key = ServiceAccountKey::load(&config.credentials)?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let tokens = TokenProvider::new(key, http.clone())?;

        let documents_root = format!(
            "projects/{}/databases/{}/documents",
            config.project_id, config.database
        );
        let commit_url = format!(
            "{}/projects/{}/databases/{}/documents:commit",
            config.endpoint.trim_end_matches('/'),
            config.project_id,
            config.database
        );

        info!(
            "Firestore client initialized for project '{}', database '{}'",
            config.project_id, config.database
        );

        Ok(Self {
            http,
            tokens,
            documents_root,
            commit_url,
        })
    }

    fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_root, collection, id)
    }
}

impl DocumentStore for FirestoreClient {
    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError> {
        let count = batch.len();
        if count > MAX_BATCH_WRITES {
            return Err(StoreError::BatchTooLarge { count });
        }

        let writes: Vec<Value> = batch
            .writes()
            .iter()
            .map(|w| {
                json!({
                    "update": {
                        "name": self.document_name(&w.collection, &w.id),
                        "fields": value::encode_fields(&w.fields),
                    }
                })
            })
            .collect();

        debug!("Committing {} writes to {}", count, self.commit_url);

        let token = self.tokens.token()?;
        let response = self
            .http
            .post(&self.commit_url)
            .bearer_auth(token)
            .json(&json!({ "writes": writes }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(StoreError::CommitRejected {
                status: status.to_string(),
                detail,
            });
        }

        let parsed: CommitResponse = response
            .json()
            .unwrap_or(CommitResponse { commit_time: None });

        Ok(CommitOutcome {
            write_count: count,
            commit_time: parsed.commit_time,
        })
    }
}
