//! GitLab REST client for the Tanuki launcher.
//!
//! This crate provides:
//! - The `GitLabApi` trait the launcher routes queries through
//! - A blocking `reqwest` implementation talking to `/api/v4`
//! - Query builders for the project, group and pipeline list endpoints
//! - Response models and error classification

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod query;

pub use api::{Connector, GitLabApi, HttpConnector};
pub use client::GitLabClient;
pub use error::{ApiResult, GitLabError};
pub use models::{Group, Pipeline, Project, User};
pub use query::{GroupQuery, OrderBy, PipelineQuery, PipelineStatus, ProjectQuery, Sort, Visibility};
