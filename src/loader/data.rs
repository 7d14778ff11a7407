//! Data loader over a pluggable source, with simulated latency.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::memo::MemoCache;
use super::LoadError;
use crate::config::LoaderConfig;

const ONCE_KEY: &str = "once";

/// Whether a fetch may reuse an earlier result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Always run the source.
    Fresh,
    /// Run the source at most once; later calls share the result.
    Once,
}

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadResult {
    pub retrieved_at: SystemTime,
    pub items: Vec<String>,
}

/// Produces the payload of a fetch. Called after the simulated latency.
pub trait DataSource: Send + Sync {
    fn produce(&self, mode: FetchMode) -> Result<Vec<String>, LoadError>;
}

/// Emulates changing data: every fresh fetch yields new numbered items.
pub struct SimulatedSource {
    next_item: AtomicU64,
    items_per_fetch: usize,
    once_items: Vec<String>,
}

impl SimulatedSource {
    pub fn new(items_per_fetch: usize, once_items: Vec<String>) -> Self {
        Self {
            next_item: AtomicU64::new(0),
            items_per_fetch,
            once_items,
        }
    }
}

impl DataSource for SimulatedSource {
    fn produce(&self, mode: FetchMode) -> Result<Vec<String>, LoadError> {
        match mode {
            FetchMode::Once => Ok(self.once_items.clone()),
            FetchMode::Fresh => Ok((0..self.items_per_fetch)
                .map(|_| {
                    let n = self.next_item.fetch_add(1, Ordering::Relaxed) + 1;
                    format!("Data Item {}", n)
                })
                .collect()),
        }
    }
}

/// Async loader with optional at-most-once semantics.
pub struct DataLoader {
    source: Arc<dyn DataSource>,
    memo: MemoCache<&'static str, LoadResult>,
    latency: Duration,
    fetches: AtomicU64,
}

impl DataLoader {
    pub fn new(source: Arc<dyn DataSource>, latency: Duration) -> Self {
        Self {
            source,
            memo: MemoCache::new(),
            latency,
            fetches: AtomicU64::new(0),
        }
    }

    /// Loader over [`SimulatedSource`] configured from `config`.
    pub fn from_config(config: &LoaderConfig) -> Self {
        let source = SimulatedSource::new(config.items_per_fetch, config.once_items.clone());
        Self::new(Arc::new(source), config.latency())
    }

    pub async fn fetch(&self, mode: FetchMode) -> Result<LoadResult, LoadError> {
        match mode {
            FetchMode::Fresh => self.run(mode).await,
            FetchMode::Once => {
                self.memo
                    .get_or_create(ONCE_KEY, || self.run(FetchMode::Once))
                    .await
            }
        }
    }

    /// Memoized "once" result, if it has already resolved.
    pub fn cached_once(&self) -> Option<LoadResult> {
        self.memo.get(&ONCE_KEY)
    }

    /// How many times the underlying source has been started.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    async fn run(&self, mode: FetchMode) -> Result<LoadResult, LoadError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(mode = ?mode, fetch = n, "Fetching data");

        tokio::time::sleep(self.latency).await;

        let items = self.source.produce(mode).inspect_err(|err| {
            tracing::warn!(mode = ?mode, error = %err, "Fetch failed");
        })?;
        tracing::debug!(mode = ?mode, items = items.len(), "Fetch resolved");
        Ok(LoadResult {
            retrieved_at: SystemTime::now(),
            items,
        })
    }
}
