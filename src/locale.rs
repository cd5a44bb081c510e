//! Locale resolution: source file paths and destination collection names
//!
//! A locale selects which source file is read and which collection set is
//! written. The default locale maps to the bare file name; every other
//! locale maps to a `_<code>` suffixed file (e.g. `rawHistoricalData_bn.json`).

use crate::config::SourceConfig;
use crate::error::MigrateError;
use std::fmt;
use std::path::PathBuf;

/// A validated locale code drawn from the configured set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    code: String,
}

impl Locale {
    /// Resolve a locale code against the configured locale set.
    ///
    /// Unconfigured codes are rejected with `UnsupportedLocale` rather than
    /// silently falling back to the default locale's file.
    pub fn resolve(code: &str, config: &SourceConfig) -> Result<Self, MigrateError> {
        if config.locales.iter().any(|l| l == code) {
            Ok(Locale {
                code: code.to_string(),
            })
        } else {
            Err(MigrateError::UnsupportedLocale(code.to_string()))
        }
    }

    /// All configured locales, in migration order.
    pub fn all(config: &SourceConfig) -> Vec<Self> {
        config
            .locales
            .iter()
            .map(|code| Locale { code: code.clone() })
            .collect()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Source file path for this locale. The default locale has no suffix.
    pub fn source_path(&self, config: &SourceConfig) -> PathBuf {
        let file = if self.code == config.default_locale {
            format!("{}.json", config.file_stem)
        } else {
            format!("{}_{}.json", config.file_stem, self.code)
        };
        config.dir.join(file)
    }

    /// Destination collection names for this locale.
    pub fn collections(&self) -> CollectionSet {
        CollectionSet {
            eras: format!("eras_{}", self.code),
            topics: format!("topics_{}", self.code),
            events: format!("events_{}", self.code),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// The three locale-scoped collection names documents are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSet {
    pub eras: String,
    pub topics: String,
    pub events: String,
}
