// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - run:  scrape the selected reports for the configured organizations
// - list: print the available reports and their numbers
//
// Credentials may come from flags, from the environment (GITHUB_USER,
// GITHUB_TOKEN) or from config.json. See config.rs for the precedence.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::github::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "github-org-scraper",
    version,
    about = "Export GitHub organizations' repositories, members and social graphs",
    long_about = "github-org-scraper walks the GitHub REST API for a list of organizations and writes \
                  CSV tables (repositories, contributors, members, stars) and GEXF networks \
                  (contributors, followers, memberships) into a timestamped directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log every API request to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape the selected reports
    ///
    /// Example: github-org-scraper run --reports 1,2,6
    Run(RunArgs),

    /// List the available reports
    List,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Reports to generate: comma separated numbers or names, or "all"
    ///
    /// Run `github-org-scraper list` to see them.
    #[arg(long, short, default_value = "all")]
    pub reports: String,

    /// JSON file with "user_name" and "api_token"
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// GitHub user name (overrides config file)
    #[arg(long, env = "GITHUB_USER")]
    pub user: Option<String>,

    /// GitHub API token (overrides config file)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// CSV file listing organizations in a `github_org_name` column
    #[arg(long, default_value = "organizations.csv")]
    pub orgs_file: PathBuf,

    /// Organization to scrape, repeatable. Replaces the organizations file
    #[arg(long = "org", value_name = "ORG")]
    pub org: Vec<String>,

    /// Directory that receives one timestamped subdirectory per run
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
}
