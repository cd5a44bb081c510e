//! Configuration for the migration tool

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source file configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// Firestore target configuration
    #[serde(default)]
    pub firestore: FirestoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            firestore: FirestoreConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration fields, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = self.source_errors();
        errors.extend(self.firestore_errors());
        Self::report(errors)
    }

    /// Validate only the source side. Sufficient for a dry run, which never
    /// touches Firestore.
    pub fn validate_source(&self) -> Result<()> {
        Self::report(self.source_errors())
    }

    fn source_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = Vec::new();
        if self.source.locales.is_empty() {
            errors.push("at least one locale must be configured".to_string());
        }
        if !self
            .source
            .locales
            .iter()
            .any(|l| l == &self.source.default_locale)
        {
            errors.push(format!(
                "default locale '{}' is not in the locale list",
                self.source.default_locale
            ));
        }
        if self.source.file_stem.is_empty() {
            errors.push("source file_stem must not be empty".to_string());
        }
        errors
    }

    fn firestore_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = Vec::new();
        if self.firestore.project_id.is_empty() {
            errors.push("firestore project_id must not be empty".to_string());
        }
        errors
    }

    fn report(errors: Vec<String>) -> Result<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Invalid configuration:\n  - {}", errors.join("\n  - "))
        }
    }
}

/// Where the source JSON tree lives and which locales exist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory containing the source files
    #[serde(default = "default_source_dir")]
    pub dir: PathBuf,
    /// File name stem; the locale suffix and `.json` extension are appended
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    /// Locale whose source file carries no suffix
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Locales to migrate, in order
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("public/data")
}

fn default_file_stem() -> String {
    "rawHistoricalData".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string(), "bn".to_string()]
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: default_source_dir(),
            file_stem: default_file_stem(),
            default_locale: default_locale(),
            locales: default_locales(),
        }
    }
}

/// Firestore connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// GCP project id
    #[serde(default)]
    pub project_id: String,
    /// Firestore database id
    #[serde(default = "default_database")]
    pub database: String,
    /// Path to the service account key file
    #[serde(default = "default_credentials")]
    pub credentials: PathBuf,
    /// REST endpoint base (overridable for the emulator)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_credentials() -> PathBuf {
    PathBuf::from("serviceAccountKey.json")
}

fn default_endpoint() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            credentials: default_credentials(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}
