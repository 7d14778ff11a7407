//! State of a preloading link.

use crate::ui::mvi::UiState;

/// Suffix shown on a link while its transition is pending.
pub const LOADING_SUFFIX: &str = " [loading...]";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LinkState {
    #[default]
    Idle,
    /// One or more transitions started from this link are still loading.
    Loading { pending: u32 },
    /// The last transition from this link failed. Transitions started
    /// earlier may still be loading.
    Failed { message: String, pending: u32 },
}

impl UiState for LinkState {}

impl LinkState {
    pub fn is_loading(&self) -> bool {
        match self {
            Self::Idle => false,
            Self::Loading { .. } => true,
            Self::Failed { pending, .. } => *pending > 0,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Link text with the loading or error affordance appended.
    pub fn decorate(&self, label: &str) -> String {
        match self {
            Self::Idle => label.to_string(),
            Self::Loading { .. } => format!("{}{}", label, LOADING_SUFFIX),
            Self::Failed { message, pending: 0 } => format!("{} [{}]", label, message),
            Self::Failed { message, .. } => format!("{} [{}]{}", label, message, LOADING_SUFFIX),
        }
    }
}
