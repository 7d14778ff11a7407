mod common;

use std::sync::atomic::Ordering;

use common::{simulated_loader, FlakySource, LATENCY};
use navpreload::loader::{DataLoader, FetchMode, LoadError};

#[tokio::test(start_paused = true)]
async fn concurrent_once_fetches_share_one_run() {
    let loader = simulated_loader();

    let (a, b) = tokio::join!(loader.fetch(FetchMode::Once), loader.fetch(FetchMode::Once));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(loader.fetch_count(), 1);
    assert_eq!(a, b);
    assert_eq!(a.retrieved_at, b.retrieved_at);
    assert_eq!(a.items, vec!["Constant Data Item"]);
}

#[tokio::test(start_paused = true)]
async fn fresh_fetches_produce_new_items() {
    let loader = simulated_loader();

    let first = loader.fetch(FetchMode::Fresh).await.unwrap();
    let second = loader.fetch(FetchMode::Fresh).await.unwrap();

    assert_eq!(first.items, vec!["Data Item 1", "Data Item 2"]);
    assert_eq!(second.items, vec!["Data Item 3", "Data Item 4"]);
    assert!(second.retrieved_at >= first.retrieved_at);
    assert_eq!(loader.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn resolved_once_data_is_not_refetched() {
    let loader = simulated_loader();

    let first = loader.fetch(FetchMode::Once).await.unwrap();
    let started = tokio::time::Instant::now();
    let again = loader.fetch(FetchMode::Once).await.unwrap();

    assert_eq!(first, again);
    assert_eq!(loader.fetch_count(), 1);
    assert!(started.elapsed() < LATENCY);
}

#[tokio::test(start_paused = true)]
async fn once_and_fresh_are_independent() {
    let loader = simulated_loader();

    loader.fetch(FetchMode::Once).await.unwrap();
    let fresh = loader.fetch(FetchMode::Fresh).await.unwrap();
    loader.fetch(FetchMode::Once).await.unwrap();

    assert_eq!(fresh.items, vec!["Data Item 1", "Data Item 2"]);
    assert_eq!(loader.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_once_fetch_can_be_retried() {
    let source = FlakySource::failing();
    let loader = DataLoader::new(source.clone(), LATENCY);

    let err = loader.fetch(FetchMode::Once).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(loader.cached_once().is_none());

    source.recover();
    let ok = loader.fetch(FetchMode::Once).await.unwrap();
    loader.fetch(FetchMode::Once).await.unwrap();

    assert_eq!(ok.items, vec!["Constant Data Item"]);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}
