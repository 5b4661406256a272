use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::config::GithubConfig;
use common::AppError;
use gh_http::{parse_rate_limit, GithubToken, HttpExec};
use http::{header, Request, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::repo::RepoId;

#[derive(Debug, Error)]
pub enum GithubApiError {
    #[error("github api error: {status} for {endpoint}")]
    Http {
        status: StatusCode,
        endpoint: String,
    },
    #[error("github rate limit exhausted for {endpoint} ({status}); resets at {reset}")]
    RateLimited {
        status: StatusCode,
        endpoint: String,
        reset: DateTime<Utc>,
    },
}

impl GithubApiError {
    pub fn status(status: StatusCode, endpoint: impl Into<String>) -> Self {
        Self::Http {
            status,
            endpoint: endpoint.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match *self {
            GithubApiError::Http { status, .. } | GithubApiError::RateLimited { status, .. } => {
                status
            }
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            GithubApiError::Http { endpoint, .. }
            | GithubApiError::RateLimited { endpoint, .. } => endpoint.as_str(),
        }
    }
}

/// The `state` filter accepted by the issues endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum IssueStateFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl IssueStateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStateFilter::All => "all",
            IssueStateFilter::Open => "open",
            IssueStateFilter::Closed => "closed",
        }
    }
}

/// One page of a repository listing, as raw JSON. `auth` is attached to the
/// request when present; callers decide whether it is required.
#[async_trait]
pub trait GithubClient: Send + Sync {
    async fn list_commits(
        &self,
        repo: &RepoId,
        auth: Option<&GithubToken>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>>;

    async fn list_issues(
        &self,
        repo: &RepoId,
        state: IssueStateFilter,
        auth: Option<&GithubToken>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>>;
}

pub struct RestGithubClient {
    exec: Arc<dyn HttpExec>,
    base: Url,
    user_agent: String,
}

impl RestGithubClient {
    pub fn new(exec: Arc<dyn HttpExec>, config: &GithubConfig) -> Result<Self> {
        let mut base = Url::parse(&config.api_base_url)
            .with_context(|| format!("invalid github.api_base_url {:?}", config.api_base_url))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            exec,
            base,
            user_agent: config.user_agent.clone(),
        })
    }

    async fn get_json(&self, url: Url, auth: Option<&GithubToken>) -> Result<Value> {
        let endpoint = url.path().trim_start_matches('/').to_string();
        debug!(
            endpoint = %endpoint,
            url = %url,
            authenticated = auth.is_some(),
            "Dispatching GitHub request"
        );
        let response = self.execute(url, auth).await?;
        let status = response.status();
        let rate = parse_rate_limit(response.headers());
        if let Some(rate) = &rate {
            debug!(
                limit = rate.limit,
                remaining = rate.remaining,
                reset = %rate.reset,
                "rate limit"
            );
        }

        if status.is_success() {
            let body = response.into_body();
            let value: Value = serde_json::from_slice(&body)
                .map_err(|err| AppError::decode("response body", err))?;
            Ok(value)
        } else if matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) {
            match rate.filter(|rate| rate.is_exhausted()) {
                Some(rate) => Err(GithubApiError::RateLimited {
                    status,
                    endpoint,
                    reset: rate.reset,
                }
                .into()),
                None => Err(GithubApiError::status(status, endpoint).into()),
            }
        } else {
            Err(GithubApiError::status(status, endpoint).into())
        }
    }

    async fn get_json_array(&self, url: Url, auth: Option<&GithubToken>) -> Result<Vec<Value>> {
        let value = self.get_json(url, auth).await?;
        match value {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            _ => Err(anyhow!("expected array response")),
        }
    }

    #[instrument(skip(self, auth), fields(url = %url))]
    async fn execute(
        &self,
        url: Url,
        auth: Option<&GithubToken>,
    ) -> Result<http::Response<Vec<u8>>> {
        let uri: http::Uri = url.as_str().parse()?;
        let mut builder = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::USER_AGENT, self.user_agent.clone())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = auth {
            builder = builder.header(header::AUTHORIZATION, token.authorization()?);
        }
        let request = builder.body(Vec::new())?;

        let response = self.exec.execute(request).await.map_err(AppError::http)?;
        Ok(response)
    }

    fn join(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    fn with_query(url: &mut Url, params: &[(&str, String)]) {
        let mut query_pairs = url.query_pairs_mut();
        for (key, val) in params {
            query_pairs.append_pair(key, val);
        }
    }
}

#[async_trait]
impl GithubClient for RestGithubClient {
    async fn list_commits(
        &self,
        repo: &RepoId,
        auth: Option<&GithubToken>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let path = format!("repos/{}/{}/commits", repo.owner(), repo.name());
        let mut url = self.join(&path)?;
        let params = [
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        Self::with_query(&mut url, &params);
        self.get_json_array(url, auth).await
    }

    async fn list_issues(
        &self,
        repo: &RepoId,
        state: IssueStateFilter,
        auth: Option<&GithubToken>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let path = format!("repos/{}/{}/issues", repo.owner(), repo.name());
        let mut url = self.join(&path)?;
        let params = [
            ("state", state.as_str().to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        Self::with_query(&mut url, &params);
        self.get_json_array(url, auth).await
    }
}
