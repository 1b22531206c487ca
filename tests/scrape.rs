// tests/scrape.rs
// End-to-end runs against a local mock of the GitHub API.

use github_org_scraper::export::OutputDir;
use github_org_scraper::github::{Credentials, GithubClient};
use github_org_scraper::reports::{parse_selection, run_reports, RunContext};
use serde_json::{json, Value};
use std::fs;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Serves `items` as page 1 of `route` and an empty page 2
async fn mount_collection(server: &MockServer, route: &str, items: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", "1"))
        .and(basic_auth("octocat", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> GithubClient {
    GithubClient::new(
        &server.uri(),
        Credentials {
            user: "octocat".to_string(),
            token: "s3cret".to_string(),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn starred_repositories_end_to_end() {
    let server = MockServer::start().await;
    mount_collection(&server, "/orgs/acme/members", json!([{ "login": "alice" }, { "login": "bob" }])).await;
    mount_collection(
        &server,
        "/users/alice/starred",
        json!([{ "full_name": "R1", "html_url": "https://github.com/R1", "stargazers_count": 9 }]),
    )
    .await;
    mount_collection(
        &server,
        "/users/bob/starred",
        json!([{ "full_name": "R1" }, { "full_name": "R2", "language": "Rust" }]),
    )
    .await;

    let api = client(&server);
    let ctx = RunContext::new(&api, vec!["acme".to_string()]);
    let dir = tempfile::tempdir().unwrap();
    let output = OutputDir::create_at(dir.path().to_path_buf()).unwrap();

    run_reports(&ctx, &parse_selection("starred").unwrap(), &output)
        .await
        .unwrap();

    let csv = fs::read_to_string(dir.path().join("starred_repositories.csv")).unwrap();
    assert_eq!(
        csv,
        "organization,user,full_name,html_url,language,description\n\
         acme,alice,R1,https://github.com/R1,,\n\
         acme,bob,R1,,,\n\
         acme,bob,R2,,Rust,\n"
    );
}

#[tokio::test]
async fn follower_and_membership_networks_share_member_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/members"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "login": "alice" }, { "login": "bob" }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/members"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    mount_collection(&server, "/users/alice/followers", json!([{ "login": "bob" }])).await;
    mount_collection(&server, "/users/alice/following", json!([{ "login": "linus" }])).await;
    mount_collection(&server, "/users/bob/followers", json!([])).await;
    mount_collection(&server, "/users/bob/following", json!([{ "login": "alice" }])).await;
    mount_collection(&server, "/users/alice/orgs", json!([{ "login": "acme" }])).await;
    mount_collection(&server, "/users/bob/orgs", json!([{ "login": "acme" }, { "login": "globex" }])).await;

    let api = client(&server);
    let ctx = RunContext::new(&api, vec!["acme".to_string()]);
    let dir = tempfile::tempdir().unwrap();
    let output = OutputDir::create_at(dir.path().to_path_buf()).unwrap();

    run_reports(&ctx, &parse_selection("6,7").unwrap(), &output)
        .await
        .unwrap();

    let full = fs::read_to_string(dir.path().join("full-follower-network.gexf")).unwrap();
    assert!(full.contains(r#"source="bob" target="alice""#));
    assert!(full.contains(r#"source="alice" target="linus""#));

    let narrow = fs::read_to_string(dir.path().join("narrow-follower-network.gexf")).unwrap();
    assert!(narrow.contains(r#"source="bob" target="alice""#));
    assert!(!narrow.contains("linus"));

    let memberships = fs::read_to_string(dir.path().join("membership_network.gexf")).unwrap();
    assert!(memberships.contains(r#"source="bob" target="globex""#));
}

#[tokio::test]
async fn failed_request_stops_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = RunContext::new(&api, vec!["acme".to_string()]);
    let dir = tempfile::tempdir().unwrap();
    let output = OutputDir::create_at(dir.path().to_path_buf()).unwrap();

    let err = run_reports(&ctx, &parse_selection("1").unwrap(), &output)
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("Bad credentials"));
    assert!(!dir.path().join("org_repositories.csv").exists());
}
