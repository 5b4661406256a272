use std::path::PathBuf;

use clap::{Parser, Subcommand};
use common::config::GithubConfig;
use gh_http::GithubToken;

use crate::client::IssueStateFilter;
use crate::repo::RepoId;
use crate::GITHUB_TOKEN_ENV;

#[derive(Parser, Debug)]
#[command(
    name = "repo-miner",
    version,
    about = "Fetch GitHub commits/issues and flatten them into CSV"
)]
pub struct Cli {
    /// Personal access token. Required for commits, optional for issues.
    #[arg(long, global = true, env = GITHUB_TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// `--token` or `GITHUB_TOKEN` first, then `github.token` from config.
    /// Blank values count as absent at either level.
    pub fn resolve_token(&self, github: &GithubConfig) -> Option<GithubToken> {
        self.token
            .clone()
            .and_then(GithubToken::new)
            .or_else(|| github.token.clone().and_then(GithubToken::new))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch commits and save them to CSV
    FetchCommits {
        /// Repository in owner/repo format
        #[arg(long)]
        repo: RepoId,

        /// Max number of commits to fetch
        #[arg(long = "max")]
        max_commits: Option<usize>,

        /// Path to output commits CSV
        #[arg(long)]
        out: PathBuf,
    },

    /// Fetch issues (pull requests excluded) and save them to CSV
    FetchIssues {
        /// Repository in owner/repo format
        #[arg(long)]
        repo: RepoId,

        /// Filter issues by state
        #[arg(long, value_enum, default_value_t = IssueStateFilter::All)]
        state: IssueStateFilter,

        /// Max number of listing entries to scan, pull requests included
        #[arg(long = "max")]
        max_issues: Option<usize>,

        /// Path to output issues CSV
        #[arg(long)]
        out: PathBuf,
    },
}
