mod intent;
mod reducer;
mod state;

pub use intent::LinkIntent;
pub use reducer::LinkReducer;
pub use state::{LinkState, LOADING_SUFFIX};
