//! In-memory document store
//!
//! Records committed documents instead of sending them anywhere. Used by the
//! integration tests; also handy for poking at a migration without a real
//! Firestore project.

use super::{CommitOutcome, DocumentStore, DocumentWrite, StoreError, WriteBatch, MAX_BATCH_WRITES};
use std::sync::{Mutex, MutexGuard};

/// A `DocumentStore` that keeps every committed document in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: Mutex<Vec<DocumentWrite>>,
    reject_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every commit with the given reason.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            committed: Mutex::new(Vec::new()),
            reject_with: Some(reason.into()),
        }
    }

    /// All committed documents, in commit order.
    pub fn documents(&self) -> Vec<DocumentWrite> {
        self.entries().clone()
    }

    /// Committed documents belonging to one collection.
    pub fn collection(&self, name: &str) -> Vec<DocumentWrite> {
        self.entries()
            .iter()
            .filter(|w| w.collection == name)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Commits append whole batches, so the data stays consistent even if a
    /// holder panicked; recover the guard instead of propagating poison.
    fn entries(&self) -> MutexGuard<'_, Vec<DocumentWrite>> {
        self.committed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError> {
        if let Some(reason) = &self.reject_with {
            return Err(StoreError::CommitRejected {
                status: "400 Bad Request".to_string(),
                detail: reason.clone(),
            });
        }

        let count = batch.len();
        if count > MAX_BATCH_WRITES {
            return Err(StoreError::BatchTooLarge { count });
        }

        // All-or-nothing: the batch lands in one append.
        self.entries().extend(batch.into_writes());

        Ok(CommitOutcome {
            write_count: count,
            commit_time: None,
        })
    }
}
