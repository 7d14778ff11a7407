//! At-most-once async result cache.
//!
//! Each key owns a `OnceCell`. The first caller runs the factory; callers
//! arriving while it is pending wait on the same cell and receive the same
//! value. Successful values are kept for the lifetime of the cache. A failed
//! factory leaves the cell empty, so the next caller runs it again.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

pub struct MemoCache<K, V> {
    cells: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Return the value for `key`, running `factory` only if no value exists
    /// and no other caller is already producing one.
    pub async fn get_or_create<F, Fut, E>(&self, key: K, factory: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self
            .cells
            .lock()
            .entry(key)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();
        cell.get_or_try_init(factory).await.cloned()
    }

    /// Resolved value for `key`, if any. Never waits.
    pub fn get(&self, key: &K) -> Option<V> {
        let cell = self.cells.lock().get(key).cloned()?;
        cell.get().cloned()
    }

    pub fn is_resolved(&self, key: &K) -> bool {
        self.cells
            .lock()
            .get(key)
            .is_some_and(|cell| cell.initialized())
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn factory_runs_once_for_sequential_calls() {
        let cache: MemoCache<&str, u32> = MemoCache::new();
        let runs = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_create("k", || async {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(&"k"), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_run() {
        let cache: Arc<MemoCache<&str, u32>> = Arc::new(MemoCache::new());
        let runs = Arc::new(AtomicUsize::new(0));

        let call = |cache: Arc<MemoCache<&'static str, u32>>, runs: Arc<AtomicUsize>| async move {
            cache
                .get_or_create("k", || async move {
                    runs.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    Ok::<_, ()>(42)
                })
                .await
        };

        let (a, b) = tokio::join!(
            call(cache.clone(), runs.clone()),
            call(cache.clone(), runs.clone())
        );

        assert_eq!(a, Ok(42));
        assert_eq!(b, Ok(42));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_leaves_cell_empty() {
        let cache: MemoCache<&str, u32> = MemoCache::new();

        let failed = cache.get_or_create("k", || async { Err::<u32, _>("boom") }).await;
        assert_eq!(failed, Err("boom"));
        assert!(!cache.is_resolved(&"k"));

        let ok = cache.get_or_create("k", || async { Ok::<_, &str>(1) }).await;
        assert_eq!(ok, Ok(1));
        assert!(cache.is_resolved(&"k"));
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let cache: MemoCache<&str, u32> = MemoCache::new();
        cache.get_or_create("a", || async { Ok::<_, ()>(1) }).await.unwrap();
        cache.get_or_create("b", || async { Ok::<_, ()>(2) }).await.unwrap();
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), None);
    }
}
