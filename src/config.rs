// src/config.rs
// =============================================================================
// Loads everything the scraper needs before it touches the network:
// - the GitHub user name + API token
// - the ordered list of organizations to scrape
//
// Sources, highest priority first:
//   credentials:   --user / --token (or GITHUB_USER / GITHUB_TOKEN)
//                  then config.json  {"user_name": "...", "api_token": "..."}
//   organizations: --org (repeatable)
//                  then organizations.csv with a `github_org_name` column
//
// Any problem here is a ConfigError. main() reports it and exits with code 1
// before a single request is made.
// =============================================================================

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::RunArgs;
use crate::github::Credentials;

/// Column of the organizations CSV that holds the org names.
pub const ORG_COLUMN: &str = "github_org_name";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing GitHub user name or API token (set them in {}, pass --user/--token, or export GITHUB_USER/GITHUB_TOKEN)", .0.display())]
    MissingCredentials(PathBuf),

    #[error("failed to read organization list {}: {source}", .path.display())]
    Organizations {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no 'github_org_name' column", .path.display())]
    MissingOrgColumn { path: PathBuf },

    #[error("no organizations to scrape; add one name per row to {} or pass --org", .0.display())]
    NoOrganizations(PathBuf),
}

// Shape of config.json. Both fields are optional so that a file providing
// only one of them can be completed from the command line.
#[derive(Debug, Default, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    api_token: Option<String>,
}

// Everything a run needs, fully validated
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub orgs: Vec<String>,
    pub api_url: String,
}

impl Settings {
    pub fn load(cli: &RunArgs) -> Result<Self, ConfigError> {
        let credentials = load_credentials(&cli.config, cli.user.as_deref(), cli.token.as_deref())?;

        let orgs = if cli.org.is_empty() {
            load_organizations(&cli.orgs_file)?
        } else {
            clean_names(cli.org.iter().cloned())
        };
        if orgs.is_empty() {
            return Err(ConfigError::NoOrganizations(cli.orgs_file.clone()));
        }

        Ok(Self {
            credentials,
            orgs,
            api_url: cli.api_url.clone(),
        })
    }
}

// Merges command-line credentials over the config file.
// The file is only read when the command line doesn't provide both values.
pub fn load_credentials(
    path: &Path,
    user: Option<&str>,
    token: Option<&str>,
) -> Result<Credentials, ConfigError> {
    let file = match (user, token) {
        (Some(_), Some(_)) => CredentialsFile::default(),
        _ if path.exists() => read_credentials_file(path)?,
        _ => CredentialsFile::default(),
    };

    let user = user.map(str::to_string).or(file.user_name).unwrap_or_default();
    let token = token.map(str::to_string).or(file.api_token).unwrap_or_default();

    if user.trim().is_empty() || token.trim().is_empty() {
        return Err(ConfigError::MissingCredentials(path.to_path_buf()));
    }

    Ok(Credentials {
        user: user.trim().to_string(),
        token: token.trim().to_string(),
    })
}

fn read_credentials_file(path: &Path) -> Result<CredentialsFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// Reads the organizations CSV. Order is preserved; blank rows are skipped.
pub fn load_organizations(path: &Path) -> Result<Vec<String>, ConfigError> {
    let csv_error = |source: csv::Error| ConfigError::Organizations {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;

    let column = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|h| h.trim() == ORG_COLUMN)
        .ok_or_else(|| ConfigError::MissingOrgColumn {
            path: path.to_path_buf(),
        })?;

    let mut names = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        if let Some(name) = row.get(column) {
            names.push(name.to_string());
        }
    }

    Ok(clean_names(names.into_iter()))
}

// Trims names, drops blanks and repeated names (first one wins)
fn clean_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        let name = name.trim().to_string();
        if !name.is_empty() && !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}
