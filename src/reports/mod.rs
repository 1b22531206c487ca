// src/reports/mod.rs
// =============================================================================
// The seven reports and the driver that runs them.
//
//   1. org-repos      repositories of each organization            (CSV)
//   2. contributors   contributors of those repositories           (CSV + GEXF)
//   3. member-repos   repositories owned by each member            (CSV)
//   4. member-info    profile of each member                       (CSV)
//   5. starred        repositories starred by each member          (CSV)
//   6. followers      full and narrow follower networks            (2 x GEXF)
//   7. memberships    organizations each member belongs to         (GEXF)
//
// Every report implements `Report`: it reads from the API through the shared
// `RunContext` and returns tables and graphs. The driver writes them out.
// Reports run one after another, in the order they were selected.
// =============================================================================

mod context;
mod contributors;
mod followers;
mod members;
mod memberships;
mod repositories;

#[cfg(test)]
pub(crate) mod fake;

pub use context::{login_of, RunContext};

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::export::{OutputDir, Table};
use crate::graph::Network;

/// What a report produces.
#[derive(Debug, Default)]
pub struct ReportOutput {
    pub tables: Vec<Table>,
    /// (file name, network)
    pub graphs: Vec<(String, Network)>,
}

impl ReportOutput {
    pub fn table(table: Table) -> Self {
        Self {
            tables: vec![table],
            graphs: Vec::new(),
        }
    }
}

#[async_trait]
pub trait Report: Send + Sync {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    OrgRepositories,
    Contributors,
    MemberRepositories,
    MemberInfo,
    StarredRepositories,
    FollowerNetwork,
    MembershipNetwork,
}

impl ReportKind {
    /// All reports, in menu order.
    pub const ALL: [ReportKind; 7] = [
        ReportKind::OrgRepositories,
        ReportKind::Contributors,
        ReportKind::MemberRepositories,
        ReportKind::MemberInfo,
        ReportKind::StarredRepositories,
        ReportKind::FollowerNetwork,
        ReportKind::MembershipNetwork,
    ];

    /// Menu number, 1 to 7.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0) + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::OrgRepositories => "org-repos",
            ReportKind::Contributors => "contributors",
            ReportKind::MemberRepositories => "member-repos",
            ReportKind::MemberInfo => "member-info",
            ReportKind::StarredRepositories => "starred",
            ReportKind::FollowerNetwork => "followers",
            ReportKind::MembershipNetwork => "memberships",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReportKind::OrgRepositories => "Scrape the organizations' repositories (CSV)",
            ReportKind::Contributors => {
                "Scrape contributors of the organizations' repositories (CSV and GEXF)"
            }
            ReportKind::MemberRepositories => {
                "Scrape all repositories owned by the members of the organizations (CSV)"
            }
            ReportKind::MemberInfo => {
                "Scrape information about each member of the organizations (CSV)"
            }
            ReportKind::StarredRepositories => {
                "Scrape all repositories starred by the members of the organizations (CSV)"
            }
            ReportKind::FollowerNetwork => {
                "Generate full and narrow follower networks of the members (two GEXF files)"
            }
            ReportKind::MembershipNetwork => {
                "Scrape all organizational memberships of the members (GEXF)"
            }
        }
    }

    /// Whether the report iterates over organization members.
    pub fn needs_members(self) -> bool {
        !matches!(self, ReportKind::OrgRepositories | ReportKind::Contributors)
    }

    /// The generator behind this kind.
    pub fn generator(self) -> &'static dyn Report {
        match self {
            ReportKind::OrgRepositories => &repositories::OrgRepositories,
            ReportKind::Contributors => &contributors::Contributors,
            ReportKind::MemberRepositories => &repositories::MemberRepositories,
            ReportKind::MemberInfo => &members::MemberInfo,
            ReportKind::StarredRepositories => &repositories::StarredRepositories,
            ReportKind::FollowerNetwork => &followers::FollowerNetwork,
            ReportKind::MembershipNetwork => &memberships::MembershipNetwork,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.name())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("unknown report '{0}' (use 1-7, a report name, or 'all')")]
    Unknown(String),

    #[error("no report selected")]
    Empty,
}

impl FromStr for ReportKind {
    type Err = SelectionError;

    // Accepts the menu number or the report name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|kind| s == kind.number().to_string() || s == kind.name())
            .ok_or(SelectionError::Unknown(s))
    }
}

/// Parses "all" or a comma separated list such as "1,3,followers".
/// Repeated entries run once, at their first position.
pub fn parse_selection(input: &str) -> Result<Vec<ReportKind>, SelectionError> {
    if input.trim().eq_ignore_ascii_case("all") {
        return Ok(ReportKind::ALL.to_vec());
    }

    let mut kinds = Vec::new();
    for part in input.split(',').filter(|p| !p.trim().is_empty()) {
        let kind: ReportKind = part.parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    if kinds.is_empty() {
        return Err(SelectionError::Empty);
    }
    Ok(kinds)
}

// Runs each selected report and writes what it produced
pub async fn run_reports(ctx: &RunContext<'_>, kinds: &[ReportKind], output: &OutputDir) -> Result<()> {
    for &kind in kinds {
        println!("\n📋 {}", kind.description());

        let result = kind
            .generator()
            .run(ctx)
            .await
            .with_context(|| format!("Report '{}' failed", kind.name()))?;

        for table in &result.tables {
            let path = output.write_table(table)?;
            println!("💾 CSV file saved as {} ({} rows)", path.display(), table.records.len());
        }

        for (file_name, network) in &result.graphs {
            let path = output.write_graph(file_name, network)?;
            println!(
                "💾 Saved graph file: {} ({} nodes, {} edges)",
                path.display(),
                network.node_count(),
                network.edge_count()
            );
        }
    }

    Ok(())
}
