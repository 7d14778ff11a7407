//! Base trait for UI state in MVI architecture.

/// Marker trait for UI state objects.
///
/// States are cloned to produce new states, carry everything needed to
/// render, and compare with `PartialEq` so unchanged frames can be skipped.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
