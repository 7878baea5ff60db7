//! The extension: preferences, session and the event dispatch table.
//!
//! Handlers are registered per [`EventKind`] when the extension is built and
//! run synchronously by [`Extension::dispatch`]. Keyword and item-enter
//! handlers read a snapshot of the session; the two preference handlers are
//! the only writers and replace the session as a whole.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tanuki_core::{Action, PreferenceId, Preferences};
use tanuki_gitlab::Connector;

use crate::events::{EnterPayload, EventKind, HostEvent};
use crate::router;
use crate::session::Session;

/// Handles one event, optionally answering with an action for the host.
pub type EventHandler = fn(&Extension, HostEvent) -> Option<Action>;

pub struct Extension {
    /// Builds API clients whenever the session is (re)created.
    connector: Box<dyn Connector>,

    preferences: RwLock<Preferences>,

    session: RwLock<Arc<Session>>,

    handlers: HashMap<EventKind, EventHandler>,
}

impl Extension {
    /// Create an extension with the default handlers.
    ///
    /// The session stays unconfigured until preferences are loaded.
    pub fn new(connector: Box<dyn Connector>, preferences: Preferences) -> Self {
        tracing::info!("Initializing GitLab extension");
        let session = Session::unconfigured(&preferences.url);

        let mut extension = Self {
            connector,
            preferences: RwLock::new(preferences),
            session: RwLock::new(Arc::new(session)),
            handlers: HashMap::new(),
        };

        extension.subscribe(EventKind::KeywordQuery, on_keyword_query);
        extension.subscribe(EventKind::ItemEnter, on_item_enter);
        extension.subscribe(EventKind::PreferencesLoaded, on_preferences_loaded);
        extension.subscribe(EventKind::PreferencesChanged, on_preferences_changed);
        extension
    }

    /// Register `handler` for `kind`, replacing any previous one.
    pub fn subscribe(&mut self, kind: EventKind, handler: EventHandler) {
        if self.handlers.insert(kind, handler).is_some() {
            tracing::debug!(?kind, "Replaced event handler");
        }
    }

    /// Run the handler registered for the event's kind.
    pub fn dispatch(&self, event: HostEvent) -> Option<Action> {
        let kind = event.kind();
        match self.handlers.get(&kind) {
            Some(handler) => handler(self, event),
            None => {
                tracing::debug!(?kind, "No handler for event");
                None
            }
        }
    }

    /// The current session. Callers keep a consistent snapshot even if the
    /// session is replaced while they use it.
    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&*self.session.read())
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences.read().clone()
    }

    fn replace_session(&self, session: Session) {
        *self.session.write() = Arc::new(session);
    }
}

fn on_keyword_query(extension: &Extension, event: HostEvent) -> Option<Action> {
    let HostEvent::KeywordQuery { argument } = event else {
        return None;
    };

    let query = argument.unwrap_or_default();
    let session = extension.session();
    let preferences = extension.preferences();
    Some(Action::render(router::route(&query, &session, &preferences)))
}

fn on_item_enter(extension: &Extension, event: HostEvent) -> Option<Action> {
    let HostEvent::ItemEnter { data } = event else {
        return None;
    };

    let payload: EnterPayload = match serde_json::from_value(data) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring item-enter with unknown payload");
            return None;
        }
    };

    let session = extension.session();
    Some(Action::render(router::enter(&payload, &session)))
}

fn on_preferences_loaded(extension: &Extension, event: HostEvent) -> Option<Action> {
    let HostEvent::PreferencesLoaded { preferences } = event else {
        return None;
    };

    tracing::info!(?preferences, "Preferences loaded");
    let session = Session::authenticate(extension.connector.as_ref(), &preferences);
    *extension.preferences.write() = preferences;
    extension.replace_session(session);
    None
}

fn on_preferences_changed(extension: &Extension, event: HostEvent) -> Option<Action> {
    let HostEvent::PreferencesChanged { id, new_value } = event else {
        return None;
    };

    let id: PreferenceId = match id.parse() {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring preference change");
            return None;
        }
    };

    let preferences = {
        let mut preferences = extension.preferences.write();
        preferences.set(id, new_value);
        preferences.clone()
    };
    tracing::info!(preference = id.as_str(), "Preference changed");

    if id.affects_session() {
        let old = extension.session();
        let session = Session::reconfigure(&old, extension.connector.as_ref(), &preferences);
        extension.replace_session(session);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use crate::testing::{self, MockApi};
    use parking_lot::Mutex;
    use tanuki_core::Item;
    use tanuki_gitlab::{ApiResult, GitLabApi, GitLabError};

    type Calls = Arc<Mutex<Vec<(String, String)>>>;

    /// Connector whose clients accept only `glpat-test` and list one project.
    fn recording_connector() -> (Box<dyn Connector>, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);
        let connector = move |url: &str, token: &str| -> ApiResult<Arc<dyn GitLabApi>> {
            recorded.lock().push((url.to_string(), token.to_string()));
            let valid = token == "glpat-test";
            let mut api = MockApi::new();
            api.expect_current_user().returning(move || {
                if valid {
                    Ok(testing::user())
                } else {
                    Err(GitLabError::Unauthorized("401 Unauthorized".to_string()))
                }
            });
            api.expect_projects()
                .returning(|_| Ok(vec![testing::project(42, "app", None)]));
            api.expect_pipelines()
                .returning(|_, _| Ok(vec![testing::pipeline(1, "push", "main")]));
            Ok(Arc::new(api))
        };
        (Box::new(connector), calls)
    }

    fn loaded_extension() -> (Extension, Calls) {
        let (connector, calls) = recording_connector();
        let extension = Extension::new(connector, Preferences::default());
        extension.dispatch(HostEvent::PreferencesLoaded {
            preferences: testing::preferences(),
        });
        (extension, calls)
    }

    fn rendered(action: Option<Action>) -> Vec<Item> {
        match action {
            Some(Action::RenderResultList { items }) => items,
            other => panic!("Expected RenderResultList, got {:?}", other),
        }
    }

    #[test]
    fn test_query_before_preferences_is_error_item() {
        let (connector, calls) = recording_connector();
        let extension = Extension::new(connector, Preferences::default());

        let items = rendered(extension.dispatch(HostEvent::KeywordQuery {
            argument: Some("projects".to_string()),
        }));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, render::ERROR_TITLE);
        assert!(calls.lock().is_empty());
    }

    #[test]
    fn test_missing_argument_renders_menu() {
        let (extension, _) = loaded_extension();
        let items = rendered(extension.dispatch(HostEvent::KeywordQuery { argument: None }));
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].on_enter, Action::set_query("gl overview"));
    }

    #[test]
    fn test_preferences_loaded_authenticates() {
        let (extension, calls) = loaded_extension();
        assert!(extension.session().is_authenticated());
        assert_eq!(extension.preferences().url, "https://gitlab.example.com");
        assert_eq!(
            *calls.lock(),
            vec![(
                "https://gitlab.example.com".to_string(),
                "glpat-test".to_string()
            )]
        );
    }

    #[test]
    fn test_pipeline_drill_down_round_trip() {
        let (extension, _) = loaded_extension();

        let items = rendered(extension.dispatch(HostEvent::KeywordQuery {
            argument: Some("pipelines app".to_string()),
        }));
        let Action::Custom { data, .. } = items[0].on_enter.clone() else {
            panic!("Expected drill-down action");
        };

        let pipelines = rendered(extension.dispatch(HostEvent::ItemEnter { data }));
        assert_eq!(pipelines.len(), 1);
        assert_eq!(pipelines[0].title, "push/main");
    }

    #[test]
    fn test_unknown_item_payload_ignored() {
        let (extension, _) = loaded_extension();
        let action = extension.dispatch(HostEvent::ItemEnter {
            data: serde_json::json!({ "type": "something_else" }),
        });
        assert!(action.is_none());
    }

    #[test]
    fn test_token_change_rebuilds_session() {
        let (extension, calls) = loaded_extension();
        let before = extension.session();

        extension.dispatch(HostEvent::PreferencesChanged {
            id: "access_token".to_string(),
            new_value: "glpat-revoked".to_string(),
        });

        let after = extension.session();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(!after.is_authenticated());
        assert_eq!(calls.lock().len(), 2);
        assert_eq!(extension.preferences().access_token, "glpat-revoked");
    }

    #[test]
    fn test_url_change_rebuilds_and_reauthenticates() {
        let (extension, calls) = loaded_extension();

        extension.dispatch(HostEvent::PreferencesChanged {
            id: "url".to_string(),
            new_value: "https://gitlab.other.com".to_string(),
        });

        let session = extension.session();
        assert_eq!(session.base_url(), "https://gitlab.other.com");
        assert!(session.is_authenticated());
        assert_eq!(
            calls.lock().last().cloned(),
            Some((
                "https://gitlab.other.com".to_string(),
                "glpat-test".to_string()
            ))
        );
    }

    #[test]
    fn test_keyword_change_keeps_session() {
        let (extension, calls) = loaded_extension();
        let before = extension.session();

        extension.dispatch(HostEvent::PreferencesChanged {
            id: "kw".to_string(),
            new_value: "lab".to_string(),
        });

        assert!(Arc::ptr_eq(&before, &extension.session()));
        assert_eq!(calls.lock().len(), 1);

        let items = rendered(extension.dispatch(HostEvent::KeywordQuery {
            argument: Some(String::new()),
        }));
        assert_eq!(items[2].on_enter, Action::set_query("lab mr"));
    }

    #[test]
    fn test_unknown_preference_ignored() {
        let (extension, calls) = loaded_extension();
        let before = extension.preferences();

        let action = extension.dispatch(HostEvent::PreferencesChanged {
            id: "theme".to_string(),
            new_value: "dark".to_string(),
        });

        assert!(action.is_none());
        assert_eq!(extension.preferences(), before);
        assert_eq!(calls.lock().len(), 1);
    }

    #[test]
    fn test_subscribe_replaces_handler() {
        fn hide(_: &Extension, _: HostEvent) -> Option<Action> {
            Some(Action::HideWindow)
        }

        let (connector, _) = recording_connector();
        let mut extension = Extension::new(connector, Preferences::default());
        extension.subscribe(EventKind::KeywordQuery, hide);

        let action = extension.dispatch(HostEvent::KeywordQuery { argument: None });
        assert_eq!(action, Some(Action::HideWindow));
    }
}
