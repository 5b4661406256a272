//! Upstream REST shapes. Only the fields the records need are modelled;
//! anything GitHub may omit or send as `null` is an `Option`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::IssueState;

/// One element of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    #[serde(default)]
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    pub author: Option<GitIdentity>,
    #[serde(default)]
    pub message: String,
}

/// The git-level identity recorded in the commit object, not the linked
/// GitHub account.
#[derive(Debug, Clone, Deserialize)]
pub struct GitIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// One element of `GET /repos/{owner}/{repo}/issues`. Pull requests share
/// this endpoint and are marked by a `pull_request` member.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub id: i64,
    pub number: i64,
    pub pull_request: Option<serde_json::Value>,
    pub state: IssueState,
    #[serde(default)]
    pub title: String,
    pub user: Option<UserRef>,
    #[serde(default)]
    pub comments: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub login: String,
}
