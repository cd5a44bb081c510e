//! The `migrate` command: run the migration for one or all locales

use anyhow::{Context, Result};
use chronicle_migrate::locale::Locale;
use chronicle_migrate::migrate::{self, LocaleOutcome};
use chronicle_migrate::store::FirestoreClient;
use chronicle_migrate::Config;

pub fn run(config: Config, locale: Option<String>, dry_run: bool) -> Result<()> {
    // Validate the effective config here, not just at load time: a missing
    // config file falls back to defaults, which carry no project_id.
    if dry_run {
        config.validate_source()?;
    } else {
        config.validate()?;
    }

    let locales = match &locale {
        Some(code) => vec![Locale::resolve(code, &config.source)?],
        None => Locale::all(&config.source),
    };

    if dry_run {
        return plan(&config, &locales);
    }

    // One authenticated handle for the whole run, shared by every locale.
    // A missing credential aborts here, before any data is touched.
    let store = FirestoreClient::connect(&config.firestore)
        .context("failed to initialize the Firestore client")?;

    let outcomes = migrate::run_all(&store, &config, &locales);
    print_summary(&outcomes);

    // Per-locale failures were reported above; the process still exits
    // normally so remaining locales are never masked by an earlier one.
    Ok(())
}

fn plan(config: &Config, locales: &[Locale]) -> Result<()> {
    println!("Dry run: loading and building, committing nothing.");
    for locale in locales {
        match migrate::plan_locale(config, locale) {
            Ok(report) => println!(
                "  {}: would write {} documents ({} eras, {} topics, {} events)",
                report.locale,
                report.eras + report.topics + report.events,
                report.eras,
                report.topics,
                report.events
            ),
            Err(e) => println!("  {}: FAILED - {}", locale, e),
        }
    }
    Ok(())
}

fn print_summary(outcomes: &[LocaleOutcome]) {
    println!("--- Migration summary ---");
    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => println!(
                "  {}: wrote {} documents ({} eras, {} topics, {} events) in {:.2}s",
                report.locale,
                report.documents_written,
                report.eras,
                report.topics,
                report.events,
                report.elapsed_seconds
            ),
            Err(e) => println!("  {}: FAILED - {}", outcome.locale, e),
        }
    }
}
