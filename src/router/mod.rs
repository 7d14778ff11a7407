//! Navigation sink abstraction and the in-memory router.
//!
//! The coordinator commits through [`NavigationSink`] and watches
//! [`NavigationSink::on_navigate`] to notice navigations it did not make.

mod location;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

pub use location::Location;
pub use memory::MemoryRouter;

/// Errors a navigation sink can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Invalid navigation target '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("No history entry to go {direction}")]
    NoHistory { direction: &'static str },
}

impl NavigationError {
    /// Short message for display next to the link.
    pub fn user_message(&self) -> &'static str {
        match self {
            NavigationError::InvalidPath { .. } => "Page address is invalid",
            NavigationError::NoHistory { .. } => "Nothing to go back to",
        }
    }
}

/// How a location change was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAction {
    Push,
    Replace,
    /// History traversal (back/forward).
    Pop,
}

/// Delivered to listeners after the location changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub action: NavigationAction,
    pub location: Location,
}

/// Handle returned by [`NavigationSink::on_navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

pub type NavigationListener = Arc<dyn Fn(&NavigationEvent) + Send + Sync>;

/// The router side of the protocol.
///
/// Implementations must invoke listeners synchronously from within the
/// call that changed the location, and must not hold internal locks while
/// doing so.
pub trait NavigationSink: Send + Sync + 'static {
    fn push(&self, target: &str) -> Result<(), NavigationError>;

    fn replace(&self, target: &str) -> Result<(), NavigationError>;

    fn current_location(&self) -> Location;

    fn on_navigate(&self, listener: NavigationListener) -> ListenerId;

    fn unsubscribe(&self, id: ListenerId);
}
