// src/reports/memberships.rs
// =============================================================================
// Membership network: which organizations each member belongs to.
//
// Nodes are users (node_type=user) and organizations
// (node_type=organization). Every edge points member -> organization. Only
// public memberships are visible through /users/{login}/orgs.
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;

use super::{login_of, Report, ReportOutput, RunContext};
use crate::github::endpoints;
use crate::graph::Network;

pub struct MembershipNetwork;

#[async_trait]
impl Report for MembershipNetwork {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput> {
        let mut network = Network::new();

        for org in ctx.orgs() {
            for member in ctx.members_of(org).await? {
                println!("   Getting membership of {}", member);
                network.add_node(member, &[("node_type", "user")]);

                let memberships = ctx.api().fetch_all(&endpoints::user_orgs(member)).await?;
                for organization in memberships.iter().filter_map(login_of) {
                    network.add_node(organization, &[("node_type", "organization")]);
                    network.add_edge(member, organization, &[("node_type", "organization")]);
                }
            }
        }

        Ok(ReportOutput {
            tables: Vec::new(),
            graphs: vec![("membership_network.gexf".to_string(), network)],
        })
    }
}
