//! GitLab session state.
//!
//! A session pairs an API client with the identity resolved from its token.
//! Sessions are never patched in place: a preference change builds a new one
//! through [`Session::reconfigure`] and the extension swaps it in whole.

use std::sync::Arc;

use parking_lot::Mutex;
use tanuki_core::Preferences;
use tanuki_gitlab::{ApiResult, Connector, GitLabApi, GitLabError, User};

/// An authenticated (or anonymous) connection to one GitLab instance.
pub struct Session {
    /// None when no client could be built for the preferences.
    api: Option<Arc<dyn GitLabApi>>,

    /// Instance URL the client was built for.
    base_url: String,

    /// Identity resolved from the token, filled lazily if the first attempt failed.
    current_user: Mutex<Option<User>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("configured", &self.api.is_some())
            .field("current_user", &*self.current_user.lock())
            .finish()
    }
}

impl Session {
    /// Create a session around an existing client.
    pub fn new(
        api: Arc<dyn GitLabApi>,
        base_url: impl Into<String>,
        current_user: Option<User>,
    ) -> Self {
        Self {
            api: Some(api),
            base_url: base_url.into(),
            current_user: Mutex::new(current_user),
        }
    }

    /// A session without a client. Every lookup fails with `NotConfigured`.
    pub fn unconfigured(base_url: impl Into<String>) -> Self {
        Self {
            api: None,
            base_url: base_url.into(),
            current_user: Mutex::new(None),
        }
    }

    /// Build a client for the preferences and resolve the current user.
    ///
    /// Authentication failures are logged and leave the session anonymous;
    /// the client stays usable for calls that don't need an identity.
    pub fn authenticate(connector: &dyn Connector, preferences: &Preferences) -> Self {
        let api = match connector.connect(&preferences.url, &preferences.access_token) {
            Ok(api) => api,
            Err(e) => {
                tracing::error!(url = %preferences.url, error = %e, "Failed to create GitLab client");
                return Self::unconfigured(&preferences.url);
            }
        };

        let current_user = match api.current_user() {
            Ok(user) => {
                tracing::info!(username = %user.username, url = %preferences.url, "Authenticated with GitLab");
                Some(user)
            }
            Err(e) => {
                tracing::error!(url = %preferences.url, error = %e, "GitLab authentication failed");
                None
            }
        };

        Self::new(api, &preferences.url, current_user)
    }

    /// Replace `old` with a fresh session for the new preferences.
    ///
    /// Both URL and token changes go through here, so the client and the
    /// cached identity always belong to the same instance and token.
    pub fn reconfigure(old: &Session, connector: &dyn Connector, preferences: &Preferences) -> Self {
        tracing::info!(from = %old.base_url, to = %preferences.url, "Rebuilding GitLab session");
        Self::authenticate(connector, preferences)
    }

    /// The API client.
    pub fn api(&self) -> ApiResult<&dyn GitLabApi> {
        self.api.as_deref().ok_or(GitLabError::NotConfigured)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The cached user, if authentication succeeded.
    pub fn current_user(&self) -> Option<User> {
        self.current_user.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.lock().is_some()
    }

    /// Return the cached user, authenticating first if there is none.
    ///
    /// A successful lookup is cached for the lifetime of the session.
    pub fn ensure_authenticated(&self) -> ApiResult<User> {
        let mut cached = self.current_user.lock();
        if let Some(user) = cached.as_ref() {
            return Ok(user.clone());
        }

        let user = self.api()?.current_user()?;
        tracing::info!(username = %user.username, "Authenticated with GitLab");
        *cached = Some(user.clone());
        Ok(user)
    }
}
