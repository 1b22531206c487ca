// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - An authenticated client (basic auth with user name + API token)
// - A paginator that walks `?per_page=100&page=N` until an empty page
// - Path templates for every endpoint the reports need
//
// The rest of the app only sees the `GithubApi` trait, so report generators
// can be tested against an in-memory fake instead of the network.
// =============================================================================

pub mod endpoints;
mod fetch;

pub use fetch::{ApiError, Credentials, GithubApi, GithubClient, DEFAULT_API_URL, PER_PAGE};
