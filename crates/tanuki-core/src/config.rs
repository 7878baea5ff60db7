//! Preferences.
//!
//! The host owns the preference values and sends them on startup and on every
//! change. Before that happens (or when running outside a host) the extension
//! starts from `~/.config/tanuki/config.toml`, with environment variables
//! taking precedence over the file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

const DEFAULT_KEYWORD: &str = "gl";
const DEFAULT_URL: &str = "https://gitlab.com";

/// Environment variable overriding the GitLab URL.
pub const ENV_URL: &str = "GITLAB_URL";
/// Environment variable overriding the access token.
pub const ENV_TOKEN: &str = "GITLAB_TOKEN";
/// Environment variable overriding the invocation keyword.
pub const ENV_KEYWORD: &str = "TANUKI_KEYWORD";

/// User preferences, keyed the way the host names them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Keyword that invokes the extension in the host.
    #[serde(rename = "kw", default = "default_keyword")]
    pub keyword: String,

    /// Base URL of the GitLab instance.
    #[serde(default = "default_url")]
    pub url: String,

    /// Personal access token.
    #[serde(default)]
    pub access_token: String,
}

fn default_keyword() -> String {
    DEFAULT_KEYWORD.to_string()
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            url: default_url(),
            access_token: String::new(),
        }
    }
}

impl fmt::Debug for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.access_token.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("Preferences")
            .field("keyword", &self.keyword)
            .field("url", &self.url)
            .field("access_token", &token)
            .finish()
    }
}

impl Preferences {
    /// Load startup preferences from the config file (if any) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let prefs = match config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading preferences from {:?}", path);
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };

        Ok(prefs.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Parse a TOML preferences file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from an environment-like lookup. Empty values are ignored.
    pub fn with_env_overrides<F>(mut self, reader: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| reader(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = read(ENV_URL) {
            self.url = url;
        }
        if let Some(token) = read(ENV_TOKEN) {
            self.access_token = token;
        }
        if let Some(keyword) = read(ENV_KEYWORD) {
            self.keyword = keyword;
        }
        self
    }

    /// Set a single preference by id.
    pub fn set(&mut self, id: PreferenceId, value: impl Into<String>) {
        let value = value.into();
        match id {
            PreferenceId::Keyword => self.keyword = value,
            PreferenceId::Url => self.url = value,
            PreferenceId::AccessToken => self.access_token = value,
        }
    }

    /// The instance URL without a trailing slash, for building page links.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Identifier of a single preference, as sent in change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceId {
    Keyword,
    Url,
    AccessToken,
}

impl PreferenceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceId::Keyword => "kw",
            PreferenceId::Url => "url",
            PreferenceId::AccessToken => "access_token",
        }
    }

    /// Whether changing this preference requires a new GitLab session.
    pub fn affects_session(&self) -> bool {
        matches!(self, PreferenceId::Url | PreferenceId::AccessToken)
    }
}

impl FromStr for PreferenceId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kw" => Ok(PreferenceId::Keyword),
            "url" => Ok(PreferenceId::Url),
            "access_token" => Ok(PreferenceId::AccessToken),
            other => Err(ConfigError::UnknownPreference(other.to_string())),
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tanuki"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}
