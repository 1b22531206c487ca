// src/github/endpoints.rs
// =============================================================================
// Path templates for the GitHub endpoints we call.
//
// Paths are relative to the API base URL (no leading host), so the same
// strings work against api.github.com, GitHub Enterprise or a mock server.
// =============================================================================

/// Members of an organization (paginated).
pub fn org_members(org: &str) -> String {
    format!("orgs/{}/members", org)
}

/// Repositories owned by an organization (paginated).
pub fn org_repos(org: &str) -> String {
    format!("orgs/{}/repos", org)
}

/// Contributors of a repository (paginated).
///
/// Answers `204 No Content` for an empty repository.
pub fn repo_contributors(owner: &str, repo: &str) -> String {
    format!("repos/{}/{}/contributors", owner, repo)
}

/// Repositories owned by a user (paginated).
pub fn user_repos(login: &str) -> String {
    format!("users/{}/repos", login)
}

/// A single user profile. Not a collection, use `fetch_one`.
pub fn user_profile(login: &str) -> String {
    format!("users/{}", login)
}

/// Repositories starred by a user (paginated).
pub fn user_starred(login: &str) -> String {
    format!("users/{}/starred", login)
}

/// Users following `login` (paginated).
pub fn user_followers(login: &str) -> String {
    format!("users/{}/followers", login)
}

/// Users that `login` follows (paginated).
pub fn user_following(login: &str) -> String {
    format!("users/{}/following", login)
}

/// Public organization memberships of a user (paginated).
pub fn user_orgs(login: &str) -> String {
    format!("users/{}/orgs", login)
}
