pub mod cli;
pub mod client;
pub mod commands;
pub mod fetcher;
pub mod output;
pub mod repo;

pub use client::{GithubApiError, GithubClient, IssueStateFilter, RestGithubClient};
pub use fetcher::Fetcher;
pub use repo::RepoId;

/// Environment variable the CLI reads the credential from.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
