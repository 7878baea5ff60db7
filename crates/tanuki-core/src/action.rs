//! Actions performed by the host.

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// An action handed to the host, either bound to an item or returned from an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Replace the result list.
    RenderResultList { items: Vec<Item> },

    /// Open a URL in the default browser.
    OpenUrl { url: String },

    /// Copy text to the clipboard.
    CopyToClipboard { text: String },

    /// Replace the text in the host's search input.
    SetUserQuery { query: String },

    /// Close the launcher window.
    HideWindow,

    /// Send `data` back to the extension as an item-enter event.
    Custom {
        data: serde_json::Value,
        #[serde(default)]
        keep_app_open: bool,
    },
}

impl Action {
    /// Render the given items.
    pub fn render(items: Vec<Item>) -> Self {
        Self::RenderResultList { items }
    }

    pub fn open_url(url: impl Into<String>) -> Self {
        Self::OpenUrl { url: url.into() }
    }

    pub fn copy(text: impl Into<String>) -> Self {
        Self::CopyToClipboard { text: text.into() }
    }

    pub fn set_query(query: impl Into<String>) -> Self {
        Self::SetUserQuery {
            query: query.into(),
        }
    }

    /// Check if this action only closes the window.
    pub fn is_dismiss(&self) -> bool {
        matches!(self, Self::HideWindow)
    }
}
