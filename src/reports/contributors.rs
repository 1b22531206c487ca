// src/reports/contributors.rs
// =============================================================================
// Contributors of every organization repository, as a table and a network.
//
// Network shape (contributor_network.gexf):
// - one node per repository, tagged with its organization
// - one edge contributor -> repository per contribution, tagged likewise
//
// Repository nodes use the full name ("acme/rocket") so that two
// organizations with a repository of the same name stay separate.
//
// Empty repositories answer the contributors endpoint with 204 and no body.
// That shows up as a decode error; we note it and move on to the next
// repository. Any other error ends the report.
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::{login_of, Report, ReportOutput, RunContext};
use crate::export::{Record, Table};
use crate::github::{endpoints, ApiError};
use crate::graph::Network;

const CONTRIBUTOR_COLUMNS: &[&str] = &[
    "organization",
    "repository",
    "login",
    "contributions",
    "html_url",
    "url",
];

pub struct Contributors;

#[async_trait]
impl Report for Contributors {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<ReportOutput> {
        let mut records = Vec::new();
        let mut network = Network::new();

        for org in ctx.orgs() {
            println!("\n🔍 Scraping contributors of {}", org);
            let repos = ctx.api().fetch_all(&endpoints::org_repos(org)).await?;

            for repo in &repos {
                let Some(name) = repo.get("name").and_then(Value::as_str) else {
                    tracing::warn!(%org, "repository without a name, skipping");
                    continue;
                };
                let node_id = repo
                    .get("full_name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{}/{}", org, name));

                println!("   Getting contributors of {}", name);
                network.add_node(&node_id, &[("organization", org.as_str())]);

                let contributors = match ctx
                    .api()
                    .fetch_all(&endpoints::repo_contributors(org, name))
                    .await
                {
                    Ok(contributors) => contributors,
                    Err(ApiError::Decode { url, source }) => {
                        println!("   Repository '{}' appears to be empty.", name);
                        tracing::warn!(%url, error = %source, "no contributor list, skipping repository");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                for contributor in contributors {
                    if let Some(login) = login_of(&contributor) {
                        network.add_edge(login, &node_id, &[("organization", org.as_str())]);
                    }
                    records.push(
                        Record::new(contributor)
                            .with("organization", org.as_str())
                            .with("repository", name),
                    );
                }
            }
        }

        Ok(ReportOutput {
            tables: vec![Table::new("contributor_list.csv", CONTRIBUTOR_COLUMNS, records)],
            graphs: vec![("contributor_network.gexf".to_string(), network)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fake::FakeApi;
    use serde_json::json;

    fn acme_repos() -> FakeApi {
        FakeApi::new().with_collection(
            "orgs/acme/repos",
            json!([
                { "name": "rocket", "full_name": "acme/rocket" },
                { "name": "empty", "full_name": "acme/empty" },
                { "name": "anvil", "full_name": "acme/anvil" }
            ]),
        )
    }

    #[tokio::test]
    async fn test_contributor_table_and_network() {
        let api = acme_repos()
            .with_collection(
                "repos/acme/rocket/contributors",
                json!([
                    { "login": "alice", "contributions": 40, "html_url": "https://github.com/alice" },
                    { "login": "bob", "contributions": 2 }
                ]),
            )
            .with_undecodable("repos/acme/empty/contributors")
            .with_collection(
                "repos/acme/anvil/contributors",
                json!([{ "login": "alice", "contributions": 7 }]),
            );
        let ctx = RunContext::new(&api, vec!["acme".to_string()]);

        let output = Contributors.run(&ctx).await.unwrap();

        let rows: Vec<_> = output.tables[0].rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec!["acme", "rocket", "alice", "40", "https://github.com/alice", ""]
        );
        assert_eq!(rows[2][..4], ["acme", "anvil", "alice", "7"]);

        let (file_name, network) = &output.graphs[0];
        assert_eq!(file_name, "contributor_network.gexf");
        assert!(network.contains_edge("alice", "acme/rocket"));
        assert!(network.contains_edge("bob", "acme/rocket"));
        assert!(network.contains_edge("alice", "acme/anvil"));
        assert_eq!(network.edge_count(), 3);
        // the empty repository is still a node
        assert_eq!(network.node_attributes("acme/empty").unwrap()["organization"], "acme");
        // repos (3) + contributors (2)
        assert_eq!(network.node_count(), 5);
    }

    #[tokio::test]
    async fn test_other_errors_stop_the_report() {
        struct Failing;

        #[async_trait]
        impl crate::github::GithubApi for Failing {
            async fn fetch_all(&self, path: &str) -> Result<Vec<Value>, ApiError> {
                if path == "orgs/acme/repos" {
                    return Ok(vec![json!({ "name": "rocket" })]);
                }
                Err(ApiError::Status {
                    url: path.to_string(),
                    status: reqwest::StatusCode::FORBIDDEN,
                    message: "too large".to_string(),
                })
            }

            async fn fetch_one(&self, _path: &str) -> Result<Value, ApiError> {
                unreachable!()
            }
        }

        let api = Failing;
        let ctx = RunContext::new(&api, vec!["acme".to_string()]);

        assert!(Contributors.run(&ctx).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_full_name_falls_back() {
        let api = FakeApi::new()
            .with_collection("orgs/acme/repos", json!([{ "name": "rocket" }]))
            .with_collection("repos/acme/rocket/contributors", json!([{ "login": "alice" }]));
        let ctx = RunContext::new(&api, vec!["acme".to_string()]);

        let output = Contributors.run(&ctx).await.unwrap();
        assert!(output.graphs[0].1.contains_edge("alice", "acme/rocket"));
    }
}
