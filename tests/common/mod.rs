//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use navpreload::config::LoaderConfig;
use navpreload::loader::{DataLoader, DataSource, FetchMode, LoadError, SimulatedSource};
use navpreload::router::MemoryRouter;
use navpreload::ui::App;

pub const LATENCY: Duration = Duration::from_millis(1000);

/// Loader over the default simulated source with one-second latency.
pub fn simulated_loader() -> DataLoader {
    DataLoader::from_config(&LoaderConfig::default())
}

/// App over a fresh router and the default simulated loader.
pub fn demo_app() -> App {
    App::new(simulated_loader(), Arc::new(MemoryRouter::new()))
}

/// Source that fails while `failing` is set, and counts calls.
pub struct FlakySource {
    inner: SimulatedSource,
    pub failing: AtomicBool,
    pub calls: AtomicUsize,
}

impl FlakySource {
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            inner: SimulatedSource::new(2, vec!["Constant Data Item".to_string()]),
            failing: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }
}

impl DataSource for FlakySource {
    fn produce(&self, mode: FetchMode) -> Result<Vec<String>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(LoadError::Io {
                message: "connection reset by peer".to_string(),
            });
        }
        self.inner.produce(mode)
    }
}

/// Source that is never reachable.
pub struct UnavailableSource;

impl DataSource for UnavailableSource {
    fn produce(&self, _mode: FetchMode) -> Result<Vec<String>, LoadError> {
        Err(LoadError::Unavailable {
            reason: "maintenance window".to_string(),
        })
    }
}

/// App whose loader reads from `source`.
pub fn app_with_source(source: Arc<dyn DataSource>) -> App {
    App::new(
        DataLoader::new(source, LATENCY),
        Arc::new(MemoryRouter::new()),
    )
}
