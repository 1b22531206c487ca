// src/lib.rs
// =============================================================================
// Library side of github-org-scraper. The binary in main.rs is a thin shell
// around these modules; integration tests in tests/ use them directly.
//
// Modules:
// - cli:     command-line arguments (clap)
// - config:  credentials and organization list
// - github:  authenticated client + paginator for the GitHub REST API
// - graph:   directed networks and GEXF output
// - export:  enriched records, tables, per-run output directory
// - reports: the seven reports and the driver that runs them
// - scrape:  one `run` invocation, setup checks first
// =============================================================================

pub mod cli;
pub mod config;
pub mod export;
pub mod github;
pub mod graph;
pub mod reports;
pub mod scrape;
