// src/reports/context.rs
// =============================================================================
// State shared by every report of one run.
//
// - The API client
// - The organizations to scrape, in the order they were configured
// - The members of each organization. Five of the seven reports need this
//   mapping, so it is fetched on first use and then reused by every later
//   report of the run. Runs that only select org-level reports never pay for
//   the extra calls.
// =============================================================================

use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::github::{endpoints, ApiError, GithubApi};

/// Organization name → member logins, in configuration order.
pub type MembersByOrg = IndexMap<String, Vec<String>>;

pub struct RunContext<'a> {
    api: &'a dyn GithubApi,
    orgs: Vec<String>,
    members: OnceCell<MembersByOrg>,
}

impl<'a> RunContext<'a> {
    pub fn new(api: &'a dyn GithubApi, orgs: Vec<String>) -> Self {
        Self {
            api,
            orgs,
            members: OnceCell::new(),
        }
    }

    pub fn api(&self) -> &dyn GithubApi {
        self.api
    }

    pub fn orgs(&self) -> &[String] {
        &self.orgs
    }

    /// Members of every organization, loaded on the first call.
    pub async fn members(&self) -> Result<&MembersByOrg, ApiError> {
        self.members
            .get_or_try_init(|| load_members(self.api, &self.orgs))
            .await
    }

    /// Members of one organization. Unknown organizations have none.
    pub async fn members_of(&self, org: &str) -> Result<&[String], ApiError> {
        let members = self.members().await?;
        Ok(members.get(org).map(Vec::as_slice).unwrap_or(&[]))
    }
}

async fn load_members(api: &dyn GithubApi, orgs: &[String]) -> Result<MembersByOrg, ApiError> {
    println!("\n👥 Collecting members of specified organizations...");

    let mut members = MembersByOrg::new();
    for org in orgs {
        let logins = api
            .fetch_all(&endpoints::org_members(org))
            .await?
            .iter()
            .filter_map(|member| login_of(member).map(str::to_string))
            .collect::<Vec<_>>();

        println!("   {} member(s) in {}", logins.len(), org);
        members.insert(org.clone(), logins);
    }

    Ok(members)
}

/// The `login` field of a user or organization object.
pub fn login_of(value: &Value) -> Option<&str> {
    value.get("login").and_then(Value::as_str)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What is tokio::sync::OnceCell?
//    - A cell that is written at most once
//    - get_or_try_init runs the async loader only if the cell is still empty;
//      on error the cell stays empty and the error goes to the caller
//
// 2. Why borrow the API (&'a dyn GithubApi) instead of owning it?
//    - main() owns the GithubClient for the whole run, tests own a FakeApi
//    - The context just needs to read through it
// -----------------------------------------------------------------------------
