//! Result items.

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Icon shipped with the extension.
pub const DEFAULT_ICON: &str = "images/icon.png";

/// A single row in the host's result list.
///
/// Every item has a primary action run on enter, and may carry a second one
/// run on alt-enter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Icon path, relative to the extension directory.
    pub icon: String,

    /// Primary display text.
    pub title: String,

    /// Secondary display text. Empty when the source had none.
    #[serde(default)]
    pub description: String,

    /// Whether the host may highlight query matches in the title.
    #[serde(default)]
    pub highlightable: bool,

    /// Action run when the item is selected.
    pub on_enter: Action,

    /// Action run when the item is selected with alt held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_alt_enter: Option<Action>,
}

impl Item {
    /// Create a new item with the default icon and no description.
    pub fn new(title: impl Into<String>, on_enter: Action) -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            title: title.into(),
            description: String::new(),
            highlightable: false,
            on_enter,
            on_alt_enter: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_alt_enter(mut self, action: Action) -> Self {
        self.on_alt_enter = Some(action);
        self
    }

    /// True if the only thing this item can do is close the window.
    pub fn is_dismiss_only(&self) -> bool {
        self.on_enter.is_dismiss() && self.on_alt_enter.is_none()
    }
}
