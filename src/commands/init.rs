//! The `init` command: write a default configuration file

use anyhow::Result;
use chronicle_migrate::Config;
use std::path::PathBuf;

pub fn run(path: PathBuf) -> Result<()> {
    if path.exists() {
        anyhow::bail!("config file already exists: {}", path.display());
    }
    Config::default().save(&path)?;
    println!("Wrote default configuration to {}", path.display());
    println!("Set firestore.project_id before running a migration.");
    Ok(())
}
