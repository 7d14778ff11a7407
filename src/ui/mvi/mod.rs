//! Model-View-Intent (MVI) primitives for the view layer.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────── click / settle ──────┘
//! ```
//!
//! - **State**: what a widget shows (e.g. a link's loading affordance)
//! - **Intent**: a click, or a transition settling
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
