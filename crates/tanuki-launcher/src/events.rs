//! Events delivered by the host.

use serde::{Deserialize, Serialize};
use tanuki_core::{Action, Preferences};

/// All events the host can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// The user typed after the keyword.
    KeywordQuery {
        #[serde(default)]
        argument: Option<String>,
    },

    /// The user selected an item bound to a custom action.
    ItemEnter { data: serde_json::Value },

    /// Full preference set, sent once on startup.
    PreferencesLoaded { preferences: Preferences },

    /// A single preference changed.
    PreferencesChanged { id: String, new_value: String },
}

/// Discriminant of [`HostEvent`], used as the dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeywordQuery,
    ItemEnter,
    PreferencesLoaded,
    PreferencesChanged,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::KeywordQuery { .. } => EventKind::KeywordQuery,
            HostEvent::ItemEnter { .. } => EventKind::ItemEnter,
            HostEvent::PreferencesLoaded { .. } => EventKind::PreferencesLoaded,
            HostEvent::PreferencesChanged { .. } => EventKind::PreferencesChanged,
        }
    }
}

/// Data carried by custom item actions and handed back on item-enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnterPayload {
    /// Show the running pipelines of a project.
    ProjectPipelines { project_id: u64, project_name: String },
}

impl EnterPayload {
    /// Wrap the payload in a custom action that keeps the host window open.
    pub fn into_action(self) -> Action {
        let data = match serde_json::to_value(&self) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize enter payload");
                serde_json::Value::Null
            }
        };
        Action::Custom {
            data,
            keep_app_open: true,
        }
    }
}
