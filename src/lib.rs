//! Chronicle Migrate: one-shot Firestore migration for the chronicle content tree
//!
//! Reads a nested JSON document tree (eras → topics → events) from local
//! files, flattens it into three flat document collections with generated IDs
//! and parent references, and commits each locale's documents to Firestore as
//! a single atomic write batch.
//!
//! The migration is strictly sequential: one locale at a time, one batch per
//! locale. Re-running it creates a fresh, parallel set of documents — there
//! is no deduplication or incremental mode.

pub mod config;
pub mod error;
pub mod graph;
pub mod locale;
pub mod migrate;
pub mod source;
pub mod store;

pub use config::Config;
pub use error::MigrateError;
pub use locale::Locale;
