//! Error taxonomy for the migration pipeline
//!
//! Every failure inside one locale's migration attempt surfaces as a
//! [`MigrateError`]; the driver loop logs it and moves on to the next locale.
//! Module-local errors (see [`crate::store::StoreError`]) are mapped into
//! this taxonomy at the pipeline boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of raw characters attached to a `MalformedSource` error.
pub const EXCERPT_CHARS: usize = 500;

/// Errors that can abort a single locale's migration
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("service account key not found at {}", .path.display())]
    CredentialMissing { path: PathBuf },

    #[error("locale '{0}' is not in the configured locale set")]
    UnsupportedLocale(String),

    #[error("source file {} is missing, empty, or whitespace-only", .path.display())]
    EmptySource { path: PathBuf },

    #[error(
        "failed to parse {} as JSON at line {line}, column {column} (byte {offset}): {message}\n\
         --- start of file content (first {EXCERPT_CHARS} chars) ---\n{excerpt}\n\
         --- end of file content ---",
        .path.display()
    )]
    MalformedSource {
        path: PathBuf,
        line: usize,
        column: usize,
        offset: usize,
        message: String,
        excerpt: String,
    },

    #[error("{entity} at position {index} is missing or has an invalid '{field}' field")]
    MissingField {
        entity: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("commit of {staged} staged documents rejected by the store: {reason}")]
    CommitFailed { staged: usize, reason: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl MigrateError {
    /// Build a `MalformedSource` from a serde_json parse error, attaching a
    /// bounded excerpt of the raw text so the defect can be located without
    /// re-opening the file.
    pub fn malformed(path: impl Into<PathBuf>, raw: &str, err: &serde_json::Error) -> Self {
        let line = err.line();
        let column = err.column();
        MigrateError::MalformedSource {
            path: path.into(),
            line,
            column,
            offset: byte_offset(raw, line, column),
            message: err.to_string(),
            excerpt: excerpt(raw),
        }
    }
}

/// First `EXCERPT_CHARS` characters of the raw content, with a trailing
/// ellipsis when truncated.
pub fn excerpt(raw: &str) -> String {
    let mut out: String = raw.chars().take(EXCERPT_CHARS).collect();
    if raw.chars().nth(EXCERPT_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

/// Translate a 1-based line/column position (as reported by serde_json) into
/// a byte offset into `raw`. The column is 1-based and counted in bytes
/// within the line.
fn byte_offset(raw: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, l) in raw.split('\n').enumerate() {
        if i + 1 == line {
            return offset + column.saturating_sub(1).min(l.len());
        }
        offset += l.len() + 1;
    }
    offset.min(raw.len())
}
