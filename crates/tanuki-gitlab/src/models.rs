//! GitLab entities, trimmed to the fields the launcher displays.
//!
//! Unknown fields in API responses are ignored, so these stay valid across
//! GitLab versions as long as the listed fields keep their names.

use serde::{Deserialize, Serialize};

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
}

/// A project, as returned by `GET /projects` with `simple=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub web_url: String,
}

/// A group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub web_url: String,
}

/// A pipeline of a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: u64,
    /// Trigger of the pipeline: `push`, `schedule`, `merge_request_event`, ...
    #[serde(default)]
    pub source: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Only set when the CI config names its pipelines.
    #[serde(default)]
    pub name: Option<String>,
    pub status: String,
    pub web_url: String,
}
