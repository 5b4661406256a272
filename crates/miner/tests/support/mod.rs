#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use gh_http::GithubToken;
use repo_miner::{GithubClient, IssueStateFilter, RepoId};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: &'static str,
    pub page: u32,
    pub per_page: u32,
    pub authenticated: bool,
    pub state: Option<IssueStateFilter>,
}

/// Serves fixed listings page by page and records every request.
#[derive(Default)]
pub struct StubClient {
    commits: Vec<Value>,
    issues: Vec<Value>,
    fail_on_page: Option<u32>,
    calls: Mutex<Vec<Call>>,
}

impl StubClient {
    pub fn with_commits(commits: Vec<Value>) -> Self {
        Self {
            commits,
            ..Self::default()
        }
    }

    pub fn with_issues(issues: Vec<Value>) -> Self {
        Self {
            issues,
            ..Self::default()
        }
    }

    pub fn failing_on_page(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn serve(&self, items: &[Value], call: Call) -> Result<Vec<Value>> {
        let page = call.page;
        let per_page = call.per_page as usize;
        self.calls.lock().unwrap().push(call);
        if self.fail_on_page == Some(page) {
            return Err(anyhow!("upstream unavailable"));
        }
        let start = (page as usize - 1) * per_page;
        Ok(items.iter().skip(start).take(per_page).cloned().collect())
    }
}

#[async_trait]
impl GithubClient for StubClient {
    async fn list_commits(
        &self,
        _repo: &RepoId,
        auth: Option<&GithubToken>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let call = Call {
            endpoint: "commits",
            page,
            per_page,
            authenticated: auth.is_some(),
            state: None,
        };
        self.serve(&self.commits, call)
    }

    async fn list_issues(
        &self,
        _repo: &RepoId,
        state: IssueStateFilter,
        auth: Option<&GithubToken>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let call = Call {
            endpoint: "issues",
            page,
            per_page,
            authenticated: auth.is_some(),
            state: Some(state),
        };
        self.serve(&self.issues, call)
    }
}

pub fn repo() -> RepoId {
    "octocat/hello-world".parse().unwrap()
}

pub fn token() -> GithubToken {
    GithubToken::new("ghp_test").unwrap()
}

pub fn commit(sha: &str, message: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "author": {
                "name": "Mona Lisa",
                "email": "mona@example.com",
                "date": "2024-02-01T10:00:00Z"
            },
            "message": message
        },
        "author": { "login": "mona" }
    })
}

pub fn anonymous_commit(sha: &str, message: &str) -> Value {
    json!({
        "sha": sha,
        "commit": { "author": null, "message": message },
        "author": null
    })
}

pub fn issue(number: i64, created_at: &str, closed_at: Option<&str>) -> Value {
    json!({
        "id": 1000 + number,
        "number": number,
        "title": format!("Issue {number}"),
        "user": { "login": "octocat", "id": 1 },
        "state": if closed_at.is_some() { "closed" } else { "open" },
        "comments": number,
        "created_at": created_at,
        "closed_at": closed_at
    })
}

pub fn pull_request(number: i64) -> Value {
    let mut value = issue(number, "2024-01-01T00:00:00Z", None);
    value["pull_request"] = json!({
        "url": format!("https://api.github.com/repos/octocat/hello-world/pulls/{number}")
    });
    value
}
