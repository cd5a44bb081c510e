//! Document store boundary
//!
//! The store is write-only from this tool's perspective: documents are staged
//! into a [`WriteBatch`] and committed as one atomic unit through the
//! [`DocumentStore`] trait. [`firestore::FirestoreClient`] is the real
//! backend; [`memory::MemoryStore`] is the in-memory implementation used by
//! tests.

pub mod auth;
pub mod firestore;
pub mod memory;
pub mod value;

pub use firestore::FirestoreClient;
pub use memory::MemoryStore;

use rand::Rng;
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Opaque, store-compatible document identifier
pub type DocumentId = String;

/// Firestore rejects commits with more writes than this.
pub const MAX_BATCH_WRITES: usize = 500;

/// Errors raised at the store boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("service account key not found at {}", .0.display())]
    CredentialMissing(PathBuf),

    #[error("invalid service account key: {0}")]
    CredentialInvalid(String),

    #[error("token exchange failed: {0}")]
    Auth(String),

    #[error("batch of {count} writes exceeds the {MAX_BATCH_WRITES}-write commit limit")]
    BatchTooLarge { count: usize },

    #[error("commit rejected ({status}): {detail}")]
    CommitRejected { status: String, detail: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One staged create-operation
#[derive(Debug, Clone)]
pub struct DocumentWrite {
    pub collection: String,
    pub id: DocumentId,
    pub fields: Map<String, Value>,
}

/// In-memory accumulation of create-operations, committed as one atomic unit
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    writes: Vec<DocumentWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a document creation.
    pub fn create(
        &mut self,
        collection: impl Into<String>,
        id: impl Into<DocumentId>,
        fields: Map<String, Value>,
    ) {
        self.writes.push(DocumentWrite {
            collection: collection.into(),
            id: id.into(),
            fields,
        });
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[DocumentWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<DocumentWrite> {
        self.writes
    }
}

/// Result of a successful commit
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    /// Number of documents written
    pub write_count: usize,
    /// Server-reported commit timestamp, when available
    pub commit_time: Option<String>,
}

/// A write-only document store accepting atomic batches
pub trait DocumentStore {
    /// Commit a staged batch. All writes land together or none do.
    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError>;
}

/// Generate a 20-character alphanumeric document id, the same auto-id scheme
/// Firestore client SDKs use for `document()` without arguments.
pub fn generate_document_id() -> DocumentId {
    const ALPHABET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const ID_LEN: usize = 20;

    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
