//! Data preloading coordinated with client-side navigation.
//!
//! A click starts a [`transition`], the [`loader`] fetches the route's data,
//! and the coordinator commits the navigation to the [`router`] only if no
//! later click or outside navigation superseded it.

pub mod config;
pub mod loader;
pub mod logging;
pub mod router;
pub mod transition;
pub mod ui;
