//! Core types for the Tanuki launcher extension.
//!
//! This crate contains the data structures shared by the GitLab client and
//! the launcher frontend:
//! - Result items shown in the host's list
//! - Actions the host performs on our behalf
//! - Preferences and their loading
//! - Error types

mod action;
mod config;
mod error;
mod item;

pub use action::Action;
pub use config::{
    config_dir, config_path, PreferenceId, Preferences, ENV_KEYWORD, ENV_TOKEN, ENV_URL,
};
pub use error::ConfigError;
pub use item::{Item, DEFAULT_ICON};
