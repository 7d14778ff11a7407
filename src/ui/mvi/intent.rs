//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents are user actions (link clicks) or events coming back from the
/// transition coordinator (a transition settled or failed).
pub trait Intent: Send + 'static {}
