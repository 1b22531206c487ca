// src/reports/followers.rs
// =============================================================================
// Follower networks of the organizations' members.
//
// Two graphs come out of one pass:
// - full:   every follower -> member and member -> followee edge we see
// - narrow: only the edges whose two ends are both members of the
//           organization being processed at that moment
//
// The narrow filter is applied per organization while we walk its members.
// If alice (acme) follows bob (globex), that edge is only narrow if bob is
// also a member of acme.
//
// Every member starts out as a node in both graphs, tagged with its
// organization, so members nobody follows still show up.
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::{login_of, Report, ReportOutput, RunContext};
use crate::github::endpoints;
use crate::graph::GraphBuilder;

pub const FULL: &str = "full";
pub const NARROW: &str = "narrow";

pub struct FollowerNetwork;

#[async_trait]
impl Report for FollowerNetwork {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput> {
        let members = ctx.members().await?;
        let mut graphs = GraphBuilder::with_tags(&[FULL, NARROW]);

        for (org, logins) in members {
            for member in logins {
                graphs.add_node(FULL, member, &[("organization", org.as_str())]);
                graphs.add_node(NARROW, member, &[("organization", org.as_str())]);
            }
        }

        for org in ctx.orgs() {
            println!("\n🔍 Scraping {}...", org);
            let org_members = ctx.members_of(org).await?;

            for member in org_members {
                println!("   Getting follower network of {}", member);
                let followers = ctx.api().fetch_all(&endpoints::user_followers(member)).await?;
                let following = ctx.api().fetch_all(&endpoints::user_following(member)).await?;

                record_follows(&mut graphs, org, member, &followers, &following, org_members);
            }
        }

        let graphs = graphs
            .into_graphs()
            .into_iter()
            .map(|(tag, network)| (format!("{}-follower-network.gexf", tag), network))
            .collect();

        Ok(ReportOutput {
            tables: Vec::new(),
            graphs,
        })
    }
}

// Adds one member's follow relationships to both graphs.
//
//   followers: users following `member`  -> edges follower -> member
//   following: users `member` follows    -> edges member -> followee
fn record_follows(
    graphs: &mut GraphBuilder,
    org: &str,
    member: &str,
    followers: &[Value],
    following: &[Value],
    org_members: &[String],
) {
    let attrs = [("organization", org)];
    let is_member = |login: &str| org_members.iter().any(|m| m == login);

    for follower in followers.iter().filter_map(login_of) {
        graphs.add_edge(FULL, follower, member, &attrs);
        if is_member(follower) {
            graphs.add_edge(NARROW, follower, member, &attrs);
        }
    }

    for followee in following.iter().filter_map(login_of) {
        graphs.add_edge(FULL, member, followee, &attrs);
        if is_member(followee) {
            graphs.add_edge(NARROW, member, followee, &attrs);
        }
    }
}
