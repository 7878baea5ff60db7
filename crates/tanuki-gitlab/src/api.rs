//! The API surface the launcher consumes.
//!
//! `GitLabApi` is the seam between routing and HTTP. The launcher only ever
//! holds an `Arc<dyn GitLabApi>`, which lets tests swap in mocks and lets a
//! `Connector` decide how a client is built from preferences.

use std::sync::Arc;

use crate::client::GitLabClient;
use crate::error::ApiResult;
use crate::models::{Group, Pipeline, Project, User};
use crate::query::{GroupQuery, PipelineQuery, ProjectQuery};

/// List/search operations against a GitLab instance.
#[cfg_attr(test, mockall::automock)]
pub trait GitLabApi: Send + Sync {
    /// Resolve the user the token belongs to.
    fn current_user(&self) -> ApiResult<User>;

    /// Search projects. Returns a single page.
    fn projects(&self, query: &ProjectQuery) -> ApiResult<Vec<Project>>;

    /// Search groups. Returns a single page.
    fn groups(&self, query: &GroupQuery) -> ApiResult<Vec<Group>>;

    /// List pipelines of one project. Returns a single page.
    fn pipelines(&self, project_id: u64, query: &PipelineQuery) -> ApiResult<Vec<Pipeline>>;
}

/// Builds API clients from an instance URL and token.
pub trait Connector: Send + Sync {
    fn connect(&self, url: &str, token: &str) -> ApiResult<Arc<dyn GitLabApi>>;
}

impl<F> Connector for F
where
    F: Fn(&str, &str) -> ApiResult<Arc<dyn GitLabApi>> + Send + Sync,
{
    fn connect(&self, url: &str, token: &str) -> ApiResult<Arc<dyn GitLabApi>> {
        self(url, token)
    }
}

/// Connector producing real HTTP clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, url: &str, token: &str) -> ApiResult<Arc<dyn GitLabApi>> {
        let client = GitLabClient::new(url, token)?;
        Ok(Arc::new(client))
    }
}
