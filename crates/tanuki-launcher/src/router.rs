//! Query Router
//!
//! Turns a query into a result list:
//!
//! ```text
//! query ──► Command::parse ──► lookup (0-1 API calls) ──► render ──► items
//!                                    │
//!                                    └─ error ──► single error item
//! ```
//!
//! The router is a plain function of (query, session, preferences). It never
//! returns an error: remote failures become a dismissable item here and go
//! no further.

use tanuki_core::{Item, Preferences};
use tanuki_gitlab::{ApiResult, GitLabError, GroupQuery, PipelineQuery, ProjectQuery};

use crate::command::Command;
use crate::events::EnterPayload;
use crate::render;
use crate::session::Session;

/// Results requested per lookup. Only the first page is ever shown.
pub const PAGE_SIZE: u32 = 10;

/// Which projects a project search covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectSearchMode {
    /// Projects the user is a member of, by name.
    #[default]
    Member,
    /// Public projects, most recently active first.
    Public,
    /// Starred projects, most recently active first.
    Starred,
}

impl ProjectSearchMode {
    pub fn query(self, search: &str) -> ProjectQuery {
        let query = match self {
            ProjectSearchMode::Member => ProjectQuery::member(search),
            ProjectSearchMode::Public => ProjectQuery::public(search),
            ProjectSearchMode::Starred => ProjectQuery::starred(search),
        };
        query.with_page(1, PAGE_SIZE)
    }
}

/// Route a keyword query to its lookup and render the outcome.
pub fn route(query: &str, session: &Session, preferences: &Preferences) -> Vec<Item> {
    let command = Command::parse(query);
    let name = command.name();
    tracing::debug!(command = name, "Routing query");

    run(command, session, preferences).unwrap_or_else(|e| failure(name, &e))
}

/// Handle a selected custom action.
pub fn enter(payload: &EnterPayload, session: &Session) -> Vec<Item> {
    match payload {
        EnterPayload::ProjectPipelines {
            project_id,
            project_name,
        } => {
            tracing::debug!(project_id, project = %project_name, "Listing running pipelines");
            running_pipelines(session, *project_id).unwrap_or_else(|e| failure("pipelines", &e))
        }
    }
}

fn run(command: Command, session: &Session, preferences: &Preferences) -> ApiResult<Vec<Item>> {
    match command {
        Command::Menu => Ok(render::main_menu(&preferences.keyword)),
        Command::Overview(filter) => overview(session, preferences, &filter),
        Command::Projects(search) | Command::Search(search) => {
            search_projects(session, &search, ProjectSearchMode::Member)
        }
        Command::Pipelines(search) => search_pipeline_projects(session, &search),
        Command::MergeRequests(_) => {
            tracing::warn!("Merge request listing is not supported");
            Ok(vec![render::unsupported("Merge requests")])
        }
        Command::Groups(search) => search_groups(session, &search),
    }
}

/// Overview menu. Requires an authenticated session.
pub fn overview(session: &Session, preferences: &Preferences, filter: &str) -> ApiResult<Vec<Item>> {
    session.ensure_authenticated()?;
    Ok(render::overview_menu(preferences, filter))
}

pub fn search_projects(
    session: &Session,
    search: &str,
    mode: ProjectSearchMode,
) -> ApiResult<Vec<Item>> {
    let projects = session.api()?.projects(&mode.query(search))?;
    Ok(render::projects(&projects, PAGE_SIZE as usize))
}

/// Member projects whose items drill down into pipelines.
pub fn search_pipeline_projects(session: &Session, search: &str) -> ApiResult<Vec<Item>> {
    let query = ProjectSearchMode::Member.query(search);
    let projects = session.api()?.projects(&query)?;
    Ok(render::pipeline_projects(&projects, PAGE_SIZE as usize))
}

pub fn search_groups(session: &Session, search: &str) -> ApiResult<Vec<Item>> {
    let query = GroupQuery::active(search).with_page(1, PAGE_SIZE);
    let groups = session.api()?.groups(&query)?;
    Ok(render::groups(&groups, PAGE_SIZE as usize))
}

pub fn running_pipelines(session: &Session, project_id: u64) -> ApiResult<Vec<Item>> {
    let pipelines = session
        .api()?
        .pipelines(project_id, &PipelineQuery::running())?;
    Ok(render::pipelines(&pipelines))
}

fn failure(command: &str, error: &GitLabError) -> Vec<Item> {
    tracing::error!(command, error = %error, "GitLab lookup failed");
    vec![render::error_item(error)]
}
