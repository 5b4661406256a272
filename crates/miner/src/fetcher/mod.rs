use std::sync::Arc;

use anyhow::Result;
use common::AppError;
use futures::future;
use futures::stream::{Stream, StreamExt, TryStreamExt};
use gh_http::GithubToken;
use normalizer::{
    is_pull_request, normalize_commit, normalize_issue, CommitPayload, CommitRecord, IssuePayload,
    IssueRecord,
};
use serde_json::Value;
use tracing::{debug, info, trace};

use crate::client::{GithubClient, IssueStateFilter};
use crate::repo::RepoId;
use crate::GITHUB_TOKEN_ENV;

pub mod pager;

pub use pager::paginate;

/// Turns paginated listings into normalized records.
///
/// Every call starts again from page 1; the returned streams are lazy and
/// request a page only when the previous one has been consumed.
pub struct Fetcher {
    client: Arc<dyn GithubClient>,
    per_page: u32,
}

impl Fetcher {
    pub fn new(client: Arc<dyn GithubClient>, per_page: u32) -> Self {
        Self {
            client,
            per_page: per_page.max(1),
        }
    }

    /// Commits in upstream order (newest first), at most `limit` of them.
    ///
    /// Fails with [`AppError::MissingCredential`] before any request when
    /// `token` is `None`.
    pub fn fetch_commits<'a>(
        &'a self,
        repo: &'a RepoId,
        token: Option<&'a GithubToken>,
        limit: Option<usize>,
    ) -> Result<impl Stream<Item = Result<CommitRecord>> + 'a> {
        let token = token.ok_or(AppError::MissingCredential(GITHUB_TOKEN_ENV))?;
        info!(repo = %repo, limit = ?limit, "fetching commits");

        let per_page = self.per_page;
        let raw = paginate(per_page, move |page| {
            self.client.list_commits(repo, Some(token), page, per_page)
        });
        Ok(raw
            .take(limit.unwrap_or(usize::MAX))
            .map(|item| item.and_then(decode_commit)))
    }

    /// Issues matching `state`, pull requests excluded.
    ///
    /// `limit` bounds the raw listing, pull requests included, so a bounded
    /// run can yield fewer than `limit` issues. Without a token the requests
    /// go out unauthenticated.
    pub fn fetch_issues<'a>(
        &'a self,
        repo: &'a RepoId,
        state: IssueStateFilter,
        token: Option<&'a GithubToken>,
        limit: Option<usize>,
    ) -> impl Stream<Item = Result<IssueRecord>> + 'a {
        if token.is_none() {
            debug!("no credential configured; listing issues unauthenticated");
        }
        info!(repo = %repo, state = state.as_str(), limit = ?limit, "fetching issues");

        let per_page = self.per_page;
        let raw = paginate(per_page, move |page| {
            self.client.list_issues(repo, state, token, page, per_page)
        });
        raw.take(limit.unwrap_or(usize::MAX))
            .try_filter_map(|value| future::ready(decode_issue(value)))
    }
}

fn decode_commit(value: Value) -> Result<CommitRecord> {
    let payload: CommitPayload =
        serde_json::from_value(value).map_err(|err| AppError::decode("commit", err))?;
    Ok(normalize_commit(payload))
}

fn decode_issue(value: Value) -> Result<Option<IssueRecord>> {
    let payload: IssuePayload =
        serde_json::from_value(value).map_err(|err| AppError::decode("issue", err))?;
    if is_pull_request(&payload) {
        trace!(number = payload.number, "skipping pull request");
        return Ok(None);
    }
    Ok(Some(normalize_issue(payload)))
}
