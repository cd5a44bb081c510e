//! Source loader: reads and parses one locale's JSON tree
//!
//! The loader is deliberately shallow: it reads the whole file as text,
//! rejects absent or whitespace-only content, and parses the top level as an
//! ordered array of era objects. Nested topic/event payloads are passed
//! through untouched; structural extraction happens in [`crate::graph`].

use crate::config::SourceConfig;
use crate::error::MigrateError;
use crate::locale::Locale;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Load and parse the source file for a locale.
///
/// Returns the era objects in file order. Failure is fatal for this locale's
/// migration; no partial load is attempted.
pub fn load(config: &SourceConfig, locale: &Locale) -> Result<Vec<Value>, MigrateError> {
    let path = locale.source_path(config);
    let eras = load_path(&path)?;
    info!("Loaded and parsed {} eras from {}", eras.len(), path.display());
    Ok(eras)
}

/// Load and parse a source file by explicit path.
pub fn load_path(path: &Path) -> Result<Vec<Value>, MigrateError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        // A missing file carries no content; same remedy as an empty one.
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MigrateError::EmptySource {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(MigrateError::Unexpected(anyhow::Error::new(e).context(
                format!("failed to read source file {}", path.display()),
            )))
        }
    };

    if raw.trim().is_empty() {
        return Err(MigrateError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    serde_json::from_str::<Vec<Value>>(&raw)
        .map_err(|e| MigrateError::malformed(path, &raw, &e))
}
