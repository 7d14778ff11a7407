//! Async transition ordering.

mod coordinator;
mod sequence;

use thiserror::Error;

use crate::loader::LoadError;
use crate::router::NavigationError;

pub use coordinator::{
    NavigationIntent, NavigationMode, Transition, TransitionCoordinator, TransitionOutcome,
};
pub use sequence::{SequenceCounter, StaleReason, TransitionToken};

/// Errors surfaced to the view. Stale transitions are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Failed to load data for '{target}': {source}")]
    Fetch {
        target: String,
        #[source]
        source: LoadError,
    },

    #[error("Navigation to '{target}' rejected: {source}")]
    NavigationRejected {
        target: String,
        #[source]
        source: NavigationError,
    },
}

impl TransitionError {
    /// Short message for display next to the link.
    pub fn user_message(&self) -> &'static str {
        match self {
            TransitionError::Fetch { source, .. } => source.user_message(),
            TransitionError::NavigationRejected { source, .. } => source.user_message(),
        }
    }
}
