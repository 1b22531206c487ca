// src/scrape.rs
// =============================================================================
// One `run` invocation from start to finish:
// 1. Parse the report selection
// 2. Load credentials and organizations
// 3. Connect to the API (only now, after everything above checked out)
// 4. Create the run directory and generate the reports
//
// Problems in steps 1 and 2 are the user's to fix and come back as
// Outcome::Rejected. Anything failing later is a runtime error.
// =============================================================================

use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

use crate::cli::RunArgs;
use crate::config::{ConfigError, Settings};
use crate::export::OutputDir;
use crate::github::GithubApi;
use crate::reports::{self, RunContext, SelectionError};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug)]
pub enum Outcome {
    /// All reports were written into this directory.
    Finished(PathBuf),
    /// Nothing was requested: the selection or the configuration is wrong.
    Rejected(SetupError),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Finished(_) => 0,
            Outcome::Rejected(_) => 1,
        }
    }
}

/// Runs the selected reports. `connect` builds the API client from the
/// validated settings and is never called when setup is rejected.
pub async fn scrape<A, F>(args: &RunArgs, connect: F) -> Result<Outcome>
where
    A: GithubApi,
    F: FnOnce(&Settings) -> Result<A>,
{
    let kinds = match reports::parse_selection(&args.reports) {
        Ok(kinds) => kinds,
        Err(e) => return Ok(Outcome::Rejected(e.into())),
    };
    let settings = match Settings::load(args) {
        Ok(settings) => settings,
        Err(e) => return Ok(Outcome::Rejected(e.into())),
    };

    println!("👤 User name: {}", settings.credentials.user);
    println!("🏢 Will scrape data from the following organizations: {}", settings.orgs.join(", "));
    println!(
        "📋 Reports: {}",
        kinds.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(", ")
    );

    let api = connect(&settings)?;
    let output = OutputDir::create(&args.output_dir)?;
    println!("📁 Writing files to {}", output.path().display());

    let ctx = RunContext::new(&api, settings.orgs);
    reports::run_reports(&ctx, &kinds, &output).await?;

    Ok(Outcome::Finished(output.path().to_path_buf()))
}
