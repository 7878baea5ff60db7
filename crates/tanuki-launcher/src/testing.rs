//! Test doubles shared by the launcher's unit tests.

use std::sync::Arc;

use mockall::mock;
use tanuki_core::Preferences;
use tanuki_gitlab::{
    ApiResult, GitLabApi, Group, GroupQuery, Pipeline, PipelineQuery, Project, ProjectQuery, User,
};

use crate::session::Session;

mock! {
    pub Api {}

    impl GitLabApi for Api {
        fn current_user(&self) -> ApiResult<User>;
        fn projects(&self, query: &ProjectQuery) -> ApiResult<Vec<Project>>;
        fn groups(&self, query: &GroupQuery) -> ApiResult<Vec<Group>>;
        fn pipelines(&self, project_id: u64, query: &PipelineQuery) -> ApiResult<Vec<Pipeline>>;
    }
}

pub fn user() -> User {
    User {
        id: 1,
        username: "tanuki".to_string(),
        name: "Tanuki".to_string(),
    }
}

pub fn project(id: u64, name: &str, description: Option<&str>) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        web_url: format!("https://gitlab.example.com/group/{}", name),
    }
}

pub fn group(id: u64, name: &str, description: Option<&str>) -> Group {
    Group {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        web_url: format!("https://gitlab.example.com/groups/{}", name),
    }
}

pub fn pipeline(id: u64, source: &str, git_ref: &str) -> Pipeline {
    Pipeline {
        id,
        source: source.to_string(),
        git_ref: git_ref.to_string(),
        name: None,
        status: "running".to_string(),
        web_url: format!("https://gitlab.example.com/group/app/-/pipelines/{}", id),
    }
}

pub fn preferences() -> Preferences {
    Preferences {
        keyword: "gl".to_string(),
        url: "https://gitlab.example.com".to_string(),
        access_token: "glpat-test".to_string(),
    }
}

/// A session over `api` with no cached user.
pub fn session(api: MockApi) -> Session {
    Session::new(Arc::new(api), "https://gitlab.example.com", None)
}
