//! Blocking HTTP client for the GitLab REST API (v4).

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::GitLabApi;
use crate::error::{ApiResult, GitLabError};
use crate::models::{Group, Pipeline, Project, User};
use crate::query::{GroupQuery, Params, PipelineQuery, ProjectQuery};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("tanuki/", env!("CARGO_PKG_VERSION"));

/// Client bound to one instance and one personal access token.
pub struct GitLabClient {
    http: Client,
    api_base: Url,
    token: String,
}

impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("api_base", &self.api_base.as_str())
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

impl GitLabClient {
    /// Create a client for `base_url` (e.g. `https://gitlab.com`).
    pub fn new(base_url: &str, token: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Create with a custom request timeout.
    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> ApiResult<Self> {
        let api_base = api_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_base,
            token: token.to_string(),
        })
    }

    /// Root of the v4 API, always ending in `/`.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.api_base
            .join(path)
            .map_err(|e| GitLabError::InvalidUrl {
                url: format!("{}{}", self.api_base, path),
                reason: e.to_string(),
            })
    }

    fn get<T: DeserializeOwned>(&self, path: &str, params: &Params) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, ?params, "GitLab request");

        let mut request = self.http.get(url).query(params);
        if !self.token.is_empty() {
            request = request.header("PRIVATE-TOKEN", self.token.as_str());
        }

        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>()?);
        }

        let retry_after = header_as_u64(&response, "retry-after");
        let body = response.json::<serde_json::Value>().ok();
        let err = GitLabError::from_status(status.as_u16(), retry_after, body.as_ref());
        tracing::debug!(%status, error = %err, "GitLab request rejected");
        Err(err)
    }
}

impl GitLabApi for GitLabClient {
    fn current_user(&self) -> ApiResult<User> {
        self.get("user", &Params::new())
    }

    fn projects(&self, query: &ProjectQuery) -> ApiResult<Vec<Project>> {
        self.get("projects", &query.to_params())
    }

    fn groups(&self, query: &GroupQuery) -> ApiResult<Vec<Group>> {
        self.get("groups", &query.to_params())
    }

    fn pipelines(&self, project_id: u64, query: &PipelineQuery) -> ApiResult<Vec<Pipeline>> {
        let path = format!("projects/{}/pipelines", project_id);
        self.get(&path, &query.to_params())
    }
}

/// Parse a header value as a u64, returning None if missing or unparseable.
fn header_as_u64(response: &Response, name: &str) -> Option<u64> {
    response.headers().get(name)?.to_str().ok()?.parse().ok()
}

/// Turn an instance URL into the v4 API root.
///
/// Instances served from a sub-path (`https://example.com/gitlab`) keep the
/// path; a trailing slash on the input is optional.
fn api_base_url(base_url: &str) -> ApiResult<Url> {
    let invalid = |reason: String| GitLabError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    url.join("api/v4/").map_err(|e| invalid(e.to_string()))
}
