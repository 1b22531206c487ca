// src/reports/repositories.rs
// =============================================================================
// Repository listings:
// - OrgRepositories:     every repository owned by each organization
// - MemberRepositories:  every repository owned by each member
// - StarredRepositories: every repository each member has starred
//
// The two member-scoped reports share one loop: for each organization, for
// each of its members, page through one user endpoint and tag every item
// with the organization and the member.
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;

use super::{Report, ReportOutput, RunContext};
use crate::export::{Record, Table};
use crate::github::endpoints;

const ORG_REPO_COLUMNS: &[&str] = &[
    "organization",
    "name",
    "full_name",
    "stargazers_count",
    "language",
    "created_at",
    "updated_at",
    "homepage",
    "fork",
    "description",
];

const MEMBER_REPO_COLUMNS: &[&str] = &[
    "organization",
    "user",
    "full_name",
    "fork",
    "stargazers_count",
    "forks_count",
    "language",
    "description",
];

const STARRED_COLUMNS: &[&str] = &[
    "organization",
    "user",
    "full_name",
    "html_url",
    "language",
    "description",
];

pub struct OrgRepositories;

#[async_trait]
impl Report for OrgRepositories {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput> {
        let mut records = Vec::new();

        for org in ctx.orgs() {
            println!("\n🔍 Scraping repositories of {}", org);
            let repos = ctx.api().fetch_all(&endpoints::org_repos(org)).await?;
            println!("   {} repositories found", repos.len());

            records.extend(
                repos
                    .into_iter()
                    .map(|repo| Record::new(repo).with("organization", org.as_str())),
            );
        }

        Ok(ReportOutput::table(Table::new(
            "org_repositories.csv",
            ORG_REPO_COLUMNS,
            records,
        )))
    }
}

pub struct MemberRepositories;

#[async_trait]
impl Report for MemberRepositories {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput> {
        let records = collect_per_member(ctx, endpoints::user_repos, "repositories").await?;

        Ok(ReportOutput::table(Table::new(
            "members_repositories.csv",
            MEMBER_REPO_COLUMNS,
            records,
        )))
    }
}

pub struct StarredRepositories;

#[async_trait]
impl Report for StarredRepositories {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput> {
        let records = collect_per_member(ctx, endpoints::user_starred, "starred repositories").await?;

        Ok(ReportOutput::table(Table::new(
            "starred_repositories.csv",
            STARRED_COLUMNS,
            records,
        )))
    }
}

// Pages through `endpoint(member)` for every member of every organization.
// A member of two organizations is fetched once per organization.
async fn collect_per_member(
    ctx: &RunContext<'_>,
    endpoint: fn(&str) -> String,
    what: &str,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for org in ctx.orgs() {
        println!("\n🔍 Scraping {}...", org);

        for member in ctx.members_of(org).await? {
            println!("   Getting {} of {}", what, member);
            let items = ctx.api().fetch_all(&endpoint(member)).await?;

            records.extend(items.into_iter().map(|item| {
                Record::new(item)
                    .with("organization", org.as_str())
                    .with("user", member.as_str())
            }));
        }
    }

    Ok(records)
}
