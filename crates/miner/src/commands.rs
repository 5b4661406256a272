use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::TryStreamExt;
use gh_http::GithubToken;
use normalizer::{CommitRecord, IssueRecord};
use tracing::info;

use crate::cli::Command;
use crate::client::IssueStateFilter;
use crate::fetcher::Fetcher;
use crate::output::write_csv;
use crate::repo::RepoId;

/// What a finished command reports on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub kind: &'static str,
    pub count: usize,
    pub path: PathBuf,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved {} {} to {}",
            self.count,
            self.kind,
            self.path.display()
        )
    }
}

pub async fn run(
    command: Command,
    fetcher: &Fetcher,
    token: Option<&GithubToken>,
) -> Result<Summary> {
    match command {
        Command::FetchCommits {
            repo,
            max_commits,
            out,
        } => fetch_commits_to_csv(fetcher, &repo, token, max_commits, &out).await,
        Command::FetchIssues {
            repo,
            state,
            max_issues,
            out,
        } => fetch_issues_to_csv(fetcher, &repo, state, token, max_issues, &out).await,
    }
}

/// Collects every record before touching `out`, so a failed fetch leaves no
/// file behind.
pub async fn fetch_commits_to_csv(
    fetcher: &Fetcher,
    repo: &RepoId,
    token: Option<&GithubToken>,
    limit: Option<usize>,
    out: &Path,
) -> Result<Summary> {
    let records: Vec<CommitRecord> = fetcher
        .fetch_commits(repo, token, limit)?
        .try_collect()
        .await
        .with_context(|| format!("fetching commits for {repo}"))?;
    let count = write_csv(out, &records)
        .with_context(|| format!("writing {}", out.display()))?;
    info!(repo = %repo, count, "commits saved");
    Ok(Summary {
        kind: "commits",
        count,
        path: out.to_path_buf(),
    })
}

pub async fn fetch_issues_to_csv(
    fetcher: &Fetcher,
    repo: &RepoId,
    state: IssueStateFilter,
    token: Option<&GithubToken>,
    limit: Option<usize>,
    out: &Path,
) -> Result<Summary> {
    let records: Vec<IssueRecord> = fetcher
        .fetch_issues(repo, state, token, limit)
        .try_collect()
        .await
        .with_context(|| format!("fetching issues for {repo}"))?;
    let count = write_csv(out, &records)
        .with_context(|| format!("writing {}", out.display()))?;
    info!(repo = %repo, count, "issues saved");
    Ok(Summary {
        kind: "issues",
        count,
        path: out.to_path_buf(),
    })
}
