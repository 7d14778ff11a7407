//! Route table and side-effect free route rendering.
//!
//! Rendering never fetches. When a data route is shown with an empty slot,
//! the result carries a [`LoadRequest`] that the caller executes.

use serde::Serialize;

use crate::loader::{FetchMode, LoadResult};
use crate::router::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    DataOnce,
    DataRefresh,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::DataOnce, Route::DataRefresh];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::DataOnce => "/data_once",
            Route::DataRefresh => "/data_refresh",
        }
    }

    /// Exact path match; query and fragment are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// How this route loads its data, if it has any.
    pub fn fetch_mode(self) -> Option<FetchMode> {
        match self {
            Route::Home => None,
            Route::DataOnce => Some(FetchMode::Once),
            Route::DataRefresh => Some(FetchMode::Fresh),
        }
    }
}

/// Data loaded for the data routes. Empty until a fetch populates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSlots {
    once: Option<LoadResult>,
    refresh: Option<LoadResult>,
}

impl DataSlots {
    pub fn get(&self, route: Route) -> Option<&LoadResult> {
        match route {
            Route::Home => None,
            Route::DataOnce => self.once.as_ref(),
            Route::DataRefresh => self.refresh.as_ref(),
        }
    }

    /// Store `result` for `route`. Home has no slot.
    pub fn set(&mut self, route: Route, result: LoadResult) {
        match route {
            Route::Home => {}
            Route::DataOnce => self.once = Some(result),
            Route::DataRefresh => self.refresh = Some(result),
        }
    }
}

/// What the content area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Home,
    Loading,
    Data(LoadResult),
    NotFound { path: String },
}

/// Fetch-and-populate request emitted by rendering. Never navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub route: Route,
    pub mode: FetchMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub view: View,
    pub effect: Option<LoadRequest>,
}

pub struct RouteView;

impl RouteView {
    pub fn render(location: &Location, slots: &DataSlots) -> Rendered {
        let Some(route) = Route::from_path(&location.path) else {
            return Rendered {
                view: View::NotFound {
                    path: location.path.clone(),
                },
                effect: None,
            };
        };

        let Some(mode) = route.fetch_mode() else {
            return Rendered {
                view: View::Home,
                effect: None,
            };
        };

        match slots.get(route) {
            Some(result) => Rendered {
                view: View::Data(result.clone()),
                effect: None,
            },
            None => Rendered {
                view: View::Loading,
                effect: Some(LoadRequest { route, mode }),
            },
        }
    }
}
