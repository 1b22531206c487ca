// src/reports/members.rs
// =============================================================================
// Profile information for every member of every organization.
//
// The profile endpoint (/users/{login}) returns a single object, not a list,
// so this is the one report that uses `fetch_one` instead of the paginator.
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;

use super::{Report, ReportOutput, RunContext};
use crate::export::{Record, Table};
use crate::github::endpoints;

const MEMBER_INFO_COLUMNS: &[&str] = &[
    "organization",
    "login",
    "name",
    "url",
    "type",
    "company",
    "blog",
    "location",
];

pub struct MemberInfo;

#[async_trait]
impl Report for MemberInfo {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput> {
        let mut records = Vec::new();

        for org in ctx.orgs() {
            println!("\n🔍 Scraping {}...", org);

            for member in ctx.members_of(org).await? {
                println!("   Getting user information for {}", member);
                let profile = ctx.api().fetch_one(&endpoints::user_profile(member)).await?;
                records.push(Record::new(profile).with("organization", org.as_str()));
            }
        }

        Ok(ReportOutput::table(Table::new(
            "members_info.csv",
            MEMBER_INFO_COLUMNS,
            records,
        )))
    }
}
