//! The demo view layer: three links over one router.
//!
//! "Home" is a plain link and navigates immediately, which the coordinator
//! sees as an external navigation. "Fetch Once" and "Refetch Every Time"
//! preload their data through the coordinator before navigating.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::config::LoaderConfig;
use crate::loader::{DataLoader, FetchMode, LoadError, LoadResult};
use crate::router::{MemoryRouter, NavigationError, NavigationSink};
use crate::transition::{
    NavigationIntent, TransitionCoordinator, TransitionError, TransitionOutcome,
};
use crate::ui::frame::{Frame, LinkLine};
use crate::ui::link::{LinkIntent, LinkReducer, LinkState};
use crate::ui::mvi::Reducer;
use crate::ui::route::{DataSlots, LoadRequest, Route, RouteView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkId {
    Home,
    FetchOnce,
    RefetchEveryTime,
}

impl LinkId {
    pub const ALL: [LinkId; 3] = [LinkId::Home, LinkId::FetchOnce, LinkId::RefetchEveryTime];

    pub fn label(self) -> &'static str {
        match self {
            LinkId::Home => "Home",
            LinkId::FetchOnce => "Fetch Once",
            LinkId::RefetchEveryTime => "Refetch Every Time",
        }
    }

    pub fn route(self) -> Route {
        match self {
            LinkId::Home => Route::Home,
            LinkId::FetchOnce => Route::DataOnce,
            LinkId::RefetchEveryTime => Route::DataRefresh,
        }
    }
}

pub type TransitionHandle = JoinHandle<Result<TransitionOutcome<LoadResult>, TransitionError>>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($slot:expr, $reducer:ty, $intent:expr) => {
        *$slot = <$reducer>::reduce(std::mem::take($slot), $intent);
    };
}

#[derive(Clone)]
pub struct App {
    inner: Arc<AppInner>,
}

struct AppInner {
    loader: DataLoader,
    router: Arc<MemoryRouter>,
    coordinator: TransitionCoordinator<MemoryRouter>,
    slots: Mutex<DataSlots>,
    links: Mutex<HashMap<LinkId, LinkState>>,
}

impl App {
    pub fn new(loader: DataLoader, router: Arc<MemoryRouter>) -> Self {
        let coordinator = TransitionCoordinator::new(Arc::clone(&router));
        Self {
            inner: Arc::new(AppInner {
                loader,
                router,
                coordinator,
                slots: Mutex::new(DataSlots::default()),
                links: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(DataLoader::from_config(config), Arc::new(MemoryRouter::new()))
    }

    pub fn router(&self) -> &MemoryRouter {
        &self.inner.router
    }

    pub fn coordinator(&self) -> &TransitionCoordinator<MemoryRouter> {
        &self.inner.coordinator
    }

    pub fn loader(&self) -> &DataLoader {
        &self.inner.loader
    }

    /// Handle a click on `link`.
    ///
    /// Plain links navigate before returning and yield `None`. Preloading
    /// links start a transition now and finish it on a spawned task, so this
    /// must be called from within a tokio runtime.
    pub fn click(&self, link: LinkId) -> Option<TransitionHandle> {
        let route = link.route();
        match route.fetch_mode() {
            None => {
                self.follow(link);
                None
            }
            Some(mode) => Some(self.preload_and_navigate(link, route, mode)),
        }
    }

    pub fn back(&self) -> Result<(), NavigationError> {
        self.inner.router.back()
    }

    pub fn forward(&self) -> Result<(), NavigationError> {
        self.inner.router.forward()
    }

    pub fn link_state(&self, link: LinkId) -> LinkState {
        self.inner
            .links
            .lock()
            .get(&link)
            .cloned()
            .unwrap_or_default()
    }

    pub fn data(&self, route: Route) -> Option<LoadResult> {
        self.inner.slots.lock().get(route).cloned()
    }

    /// Render the current frame and the load the route needs, if any.
    pub fn render(&self) -> (Frame, Option<LoadRequest>) {
        let location = self.inner.router.current_location();
        let rendered = RouteView::render(&location, &self.inner.slots.lock());

        let links = {
            let states = self.inner.links.lock();
            LinkId::ALL
                .iter()
                .map(|link| {
                    let state = states.get(link).cloned().unwrap_or_default();
                    LinkLine {
                        link: *link,
                        text: state.decorate(link.label()),
                        loading: state.is_loading(),
                    }
                })
                .collect()
        };

        let frame = Frame {
            location,
            links,
            view: rendered.view,
        };
        (frame, rendered.effect)
    }

    /// Fetch data for a route and store it, without navigating.
    pub async fn load(&self, request: LoadRequest) -> Result<LoadResult, LoadError> {
        self.load_into_slot(request.route, request.mode).await
    }

    /// Render, run the render's load request if there is one, and render
    /// again.
    pub async fn settle(&self) -> Result<Frame, LoadError> {
        let (frame, effect) = self.render();
        let Some(request) = effect else {
            return Ok(frame);
        };
        tracing::debug!(route = ?request.route, mode = ?request.mode, "Route data missing, loading on render");
        self.load(request).await?;
        Ok(self.render().0)
    }

    fn follow(&self, link: LinkId) {
        let path = link.route().path();
        match self.inner.router.push(path) {
            Ok(()) => tracing::info!(link = ?link, path, "Followed plain link"),
            Err(err) => {
                tracing::warn!(link = ?link, error = %err, "Plain link navigation failed");
                self.dispatch_link(
                    link,
                    LinkIntent::Failed {
                        message: err.user_message().to_string(),
                    },
                );
            }
        }
    }

    fn preload_and_navigate(&self, link: LinkId, route: Route, mode: FetchMode) -> TransitionHandle {
        let transition = self
            .inner
            .coordinator
            .start(NavigationIntent::push(route.path()));
        self.dispatch_link(link, LinkIntent::Clicked);

        let app = self.clone();
        tokio::spawn(async move {
            let result = transition
                .resolve(|| app.load_into_slot(route, mode))
                .await;
            match &result {
                Ok(_) => app.dispatch_link(link, LinkIntent::Settled),
                Err(err) => app.dispatch_link(
                    link,
                    LinkIntent::Failed {
                        message: err.user_message().to_string(),
                    },
                ),
            }
            result
        })
    }

    async fn load_into_slot(&self, route: Route, mode: FetchMode) -> Result<LoadResult, LoadError> {
        let result = self.inner.loader.fetch(mode).await?;
        self.inner.slots.lock().set(route, result.clone());
        Ok(result)
    }

    fn dispatch_link(&self, link: LinkId, intent: LinkIntent) {
        let mut links = self.inner.links.lock();
        let slot = links.entry(link).or_default();
        dispatch_mvi!(slot, LinkReducer, intent);
    }
}
