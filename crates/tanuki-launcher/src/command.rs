//! Query parsing.
//!
//! A query is matched against a fixed, ordered list of command prefixes. The
//! first prefix that matches (ignoring ASCII case) wins and everything after
//! it becomes the remainder, leading whitespace included. Queries that match
//! no prefix search member projects with the full text.

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing typed after the keyword.
    Menu,
    /// `overview<filter>`
    Overview(String),
    /// `projects<search>`
    Projects(String),
    /// `pipelines<search>`
    Pipelines(String),
    /// `mr<filter>`
    MergeRequests(String),
    /// `groups<search>`
    Groups(String),
    /// Anything else: a member-project search with the whole query.
    Search(String),
}

type Constructor = fn(String) -> Command;

/// Prefixes in priority order.
const COMMANDS: &[(&str, Constructor)] = &[
    ("overview", Command::Overview),
    ("projects", Command::Projects),
    ("pipelines", Command::Pipelines),
    ("mr", Command::MergeRequests),
    ("groups", Command::Groups),
];

impl Command {
    pub fn parse(query: &str) -> Self {
        if query.trim().is_empty() {
            return Command::Menu;
        }

        for (prefix, constructor) in COMMANDS {
            if let Some(remainder) = strip_prefix_ignore_case(query, prefix) {
                return constructor(remainder.to_string());
            }
        }

        Command::Search(query.to_string())
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Menu => "menu",
            Command::Overview(_) => "overview",
            Command::Projects(_) => "projects",
            Command::Pipelines(_) => "pipelines",
            Command::MergeRequests(_) => "mr",
            Command::Groups(_) => "groups",
            Command::Search(_) => "search",
        }
    }
}

fn strip_prefix_ignore_case<'a>(query: &'a str, prefix: &str) -> Option<&'a str> {
    let head = query.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&query[prefix.len()..])
    } else {
        None
    }
}
