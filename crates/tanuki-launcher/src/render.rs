//! Result-list construction.
//!
//! Every function here is pure: entities in, items out. Nullable descriptions
//! become empty strings at this boundary and nowhere earlier.

use tanuki_core::{Action, Item, Preferences};
use tanuki_gitlab::{GitLabError, Group, Pipeline, Project};

use crate::events::EnterPayload;

pub const NO_PROJECTS: &str = "No projects found matching your search criteria";
pub const NO_GROUPS: &str = "No groups found matching your search criteria";
pub const NO_PIPELINES: &str = "No pipelines found";
pub const ERROR_TITLE: &str = "An error occurred when connecting to GitLab";

/// Top-level menu shown when nothing follows the keyword.
pub fn main_menu(keyword: &str) -> Vec<Item> {
    vec![
        Item::new("Overview", Action::set_query(format!("{} overview", keyword))),
        Item::new(
            "Pipelines",
            Action::set_query(format!("{} pipelines ", keyword)),
        )
        .with_description("List running pipelines"),
        Item::new("Merge Requests", Action::set_query(format!("{} mr", keyword)))
            .with_description("List opened merge request"),
    ]
}

/// Links to common pages of the instance, filtered by title.
pub fn overview_menu(preferences: &Preferences, filter: &str) -> Vec<Item> {
    let base = preferences.base_url();
    let items = vec![
        Item::new("Gitlab", Action::open_url(base)).with_description("Open gitlab"),
        Item::new(
            "My Groups",
            Action::set_query(format!("{} groups ", preferences.keyword)),
        )
        .with_description("List the groups you belong")
        .with_alt_enter(Action::copy(format!("{}/dashboard/groups", base))),
        Item::new(
            "My Access Tokens",
            Action::open_url(format!("{}/-/user_settings/personal_access_tokens", base)),
        )
        .with_description("Open \"Access Tokens\" page"),
    ];

    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.title.to_lowercase().contains(&filter))
        .collect()
}

/// Projects that open in the browser.
pub fn projects(projects: &[Project], limit: usize) -> Vec<Item> {
    if projects.is_empty() {
        return vec![placeholder(NO_PROJECTS)];
    }

    projects
        .iter()
        .take(limit)
        .map(|project| {
            Item::new(&project.name, Action::open_url(&project.web_url))
                .with_description(description(&project.description))
                .with_alt_enter(Action::copy(&project.web_url))
        })
        .collect()
}

/// Projects that drill down into their running pipelines.
pub fn pipeline_projects(projects: &[Project], limit: usize) -> Vec<Item> {
    if projects.is_empty() {
        return vec![placeholder(NO_PROJECTS)];
    }

    projects
        .iter()
        .take(limit)
        .map(|project| {
            let payload = EnterPayload::ProjectPipelines {
                project_id: project.id,
                project_name: project.name.clone(),
            };
            Item::new(&project.name, payload.into_action())
                .with_description(description(&project.description))
        })
        .collect()
}

pub fn groups(groups: &[Group], limit: usize) -> Vec<Item> {
    if groups.is_empty() {
        return vec![placeholder(NO_GROUPS)];
    }

    groups
        .iter()
        .take(limit)
        .map(|group| {
            Item::new(&group.name, Action::open_url(&group.web_url))
                .with_description(description(&group.description))
                .with_alt_enter(Action::copy(&group.web_url))
        })
        .collect()
}

/// Pipelines titled `source/ref`.
pub fn pipelines(pipelines: &[Pipeline]) -> Vec<Item> {
    if pipelines.is_empty() {
        return vec![placeholder(NO_PIPELINES)];
    }

    pipelines
        .iter()
        .map(|pipeline| {
            Item::new(
                format!("{}/{}", pipeline.source, pipeline.git_ref),
                Action::open_url(&pipeline.web_url),
            )
            .with_description(description(&pipeline.name))
            .with_alt_enter(Action::copy(&pipeline.web_url))
        })
        .collect()
}

/// A failed lookup.
pub fn error_item(error: &GitLabError) -> Item {
    placeholder(ERROR_TITLE).with_description(error.to_string())
}

/// A command that exists but has no implementation.
pub fn unsupported(feature: &str) -> Item {
    placeholder(format!("{} are not supported yet", feature))
        .with_description("Open GitLab in the browser to browse them")
}

/// An item that only closes the window.
pub fn placeholder(title: impl Into<String>) -> Item {
    Item::new(title, Action::HideWindow)
}

fn description(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
