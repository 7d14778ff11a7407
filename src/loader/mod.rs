//! Simulated data loading with optional at-most-once memoization.

mod data;
mod memo;

use thiserror::Error;

pub use data::{DataLoader, DataSource, FetchMode, LoadResult, SimulatedSource};
pub use memo::MemoCache;

/// Errors produced by a [`DataSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Data source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("I/O error while loading data: {message}")]
    Io { message: String },
}

impl LoadError {
    /// Short message for display next to the link.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Unavailable { .. } => "Data is unavailable right now",
            LoadError::Io { .. } => "Failed to load data",
        }
    }
}
