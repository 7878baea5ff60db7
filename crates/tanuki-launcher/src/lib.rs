//! Tanuki - GitLab search for keyword launchers.
//!
//! The host sends one JSON event per line on stdin and reads rendered result
//! lists back on stdout. Events flow:
//!
//! 1. [`host::run`] decodes a [`HostEvent`]
//! 2. [`Extension::dispatch`] picks the handler for its kind
//! 3. Query handlers go through [`router`], which parses the [`Command`],
//!    calls GitLab through the [`Session`] and renders items
//! 4. Preference handlers rebuild the session when URL or token change

pub mod command;
pub mod events;
pub mod extension;
pub mod host;
pub mod render;
pub mod router;
pub mod session;

#[cfg(test)]
mod testing;

pub use command::Command;
pub use events::{EnterPayload, EventKind, HostEvent};
pub use extension::{EventHandler, Extension};
pub use host::HostError;
pub use router::{ProjectSearchMode, PAGE_SIZE};
pub use session::Session;
