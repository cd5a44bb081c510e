//! Per-locale migration pipeline and driver loop
//!
//! One locale moves through load → build → stage → commit, failing fast at
//! the first error. The driver loop runs each configured locale in order,
//! logs failures, and keeps going: no error crosses the per-locale boundary.

use crate::config::Config;
use crate::error::MigrateError;
use crate::graph::{self, DocumentGraph};
use crate::locale::{CollectionSet, Locale};
use crate::source;
use crate::store::{DocumentStore, StoreError, WriteBatch};
use serde_json::Value;
use std::time::Instant;
use tracing::{error, info};

/// Counts and timing for one locale's migration
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub locale: String,
    pub eras: usize,
    pub topics: usize,
    pub events: usize,
    /// Documents actually committed (zero for a dry run)
    pub documents_written: usize,
    pub elapsed_seconds: f64,
}

/// One locale's terminal state in a driver run
#[derive(Debug)]
pub struct LocaleOutcome {
    pub locale: String,
    pub result: Result<MigrationReport, MigrateError>,
}

/// Run the full pipeline for one locale against a store.
pub fn run_locale<S: DocumentStore>(
    store: &S,
    config: &Config,
    locale: &Locale,
) -> Result<MigrationReport, MigrateError> {
    let started = Instant::now();
    let collections = locale.collections();
    info!(
        "Starting migration for collections: {}, {}, {}",
        collections.eras, collections.topics, collections.events
    );

    let eras = source::load(&config.source, locale)?;
    let graph = graph::build(&eras)?;
    let batch = stage(&graph, &collections)?;
    let staged = batch.len();

    info!("Preparing to commit {} documents in a single batch", staged);
    let outcome = store
        .commit(batch)
        .map_err(|e| commit_error(staged, e))?;

    info!(
        "Migration for '{}' successful: wrote {} documents",
        locale, outcome.write_count
    );

    Ok(MigrationReport {
        locale: locale.code().to_string(),
        eras: graph.eras.len(),
        topics: graph.topics.len(),
        events: graph.events.len(),
        documents_written: outcome.write_count,
        elapsed_seconds: started.elapsed().as_secs_f64(),
    })
}

/// Load and build only: the dry-run path, touching no store.
pub fn plan_locale(config: &Config, locale: &Locale) -> Result<MigrationReport, MigrateError> {
    let started = Instant::now();
    let eras = source::load(&config.source, locale)?;
    let graph = graph::build(&eras)?;
    Ok(MigrationReport {
        locale: locale.code().to_string(),
        eras: graph.eras.len(),
        topics: graph.topics.len(),
        events: graph.events.len(),
        documents_written: 0,
        elapsed_seconds: started.elapsed().as_secs_f64(),
    })
}

/// Run every locale in order. Failures are logged and absorbed; the next
/// locale is always attempted.
pub fn run_all<S: DocumentStore>(
    store: &S,
    config: &Config,
    locales: &[Locale],
) -> Vec<LocaleOutcome> {
    locales
        .iter()
        .map(|locale| {
            let result = run_locale(store, config, locale);
            if let Err(e) = &result {
                error!("Migration for locale '{}' failed: {}", locale, e);
            }
            LocaleOutcome {
                locale: locale.code().to_string(),
                result,
            }
        })
        .collect()
}

/// Stage every record of a built graph into one write batch.
pub fn stage(graph: &DocumentGraph, collections: &CollectionSet) -> Result<WriteBatch, MigrateError> {
    let mut batch = WriteBatch::new();
    for era in &graph.eras {
        batch.create(&collections.eras, &era.id, to_fields(&era.doc)?);
    }
    for topic in &graph.topics {
        batch.create(&collections.topics, &topic.id, to_fields(&topic.doc)?);
    }
    for event in &graph.events {
        batch.create(&collections.events, &event.id, to_fields(&event.doc)?);
    }
    Ok(batch)
}

fn to_fields<T: serde::Serialize>(doc: &T) -> Result<serde_json::Map<String, Value>, MigrateError> {
    match serde_json::to_value(doc) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(MigrateError::Unexpected(anyhow::anyhow!(
            "document serialized to non-object JSON: {}",
            other
        ))),
        Err(e) => Err(MigrateError::Unexpected(e.into())),
    }
}

fn commit_error(staged: usize, err: StoreError) -> MigrateError {
    match err {
        StoreError::CredentialMissing(path) => MigrateError::CredentialMissing { path },
        other => MigrateError::CommitFailed {
            staged,
            reason: other.to_string(),
        },
    }
}
