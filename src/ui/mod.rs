//! View layer: link state, route rendering, and the demo app.

pub mod app;
pub mod frame;
pub mod link;
pub mod mvi;
pub mod route;

pub use app::{App, LinkId, TransitionHandle};
pub use frame::{Frame, LinkLine};
pub use route::{DataSlots, LoadRequest, Rendered, Route, RouteView, View};
