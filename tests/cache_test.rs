use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use serde_json::{Value, json};

use nowbridge::{management::AnalysisCache, types::ApiError};

// Helper building a fetch closure that counts its invocations.
fn counted(
    calls: &Arc<AtomicUsize>,
    payload: Value,
) -> impl FnOnce() -> std::future::Ready<Result<Value, ApiError>> {
    let calls = Arc::clone(calls);
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        std::future::ready(Ok(payload))
    }
}

#[tokio::test]
async fn test_no_active_track_never_fetches() {
    let cache = AnalysisCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let result = cache
        .get_or_fetch(None, counted(&calls, json!({"unused": true})))
        .await;

    assert!(matches!(result, Err(ApiError::NoActiveTrack)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cached_within_ttl_refetched_after() {
    let cache = AnalysisCache::with_ttl(Duration::from_secs(300));
    let calls = Arc::new(AtomicUsize::new(0));

    let first = cache
        .get_or_fetch(Some("t1"), counted(&calls, json!({"tempo": 120})))
        .await
        .unwrap();
    assert_eq!(first, json!({"tempo": 120}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // 4 minutes later the entry is still fresh; the fetch must not run.
    tokio::time::advance(Duration::from_secs(240)).await;
    let cached = cache
        .get_or_fetch(Some("t1"), counted(&calls, json!({"tempo": 999})))
        .await
        .unwrap();
    assert_eq!(cached, json!({"tempo": 120}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // 6 minutes after the initial fetch the TTL has lapsed.
    tokio::time::advance(Duration::from_secs(120)).await;
    let refreshed = cache
        .get_or_fetch(Some("t1"), counted(&calls, json!({"tempo": 121})))
        .await
        .unwrap();
    assert_eq!(refreshed, json!({"tempo": 121}));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_track_change_overwrites_slot() {
    let cache = AnalysisCache::with_ttl(Duration::from_secs(300));
    let calls = Arc::new(AtomicUsize::new(0));

    cache
        .get_or_fetch(Some("t1"), counted(&calls, json!({"track": "t1"})))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A different track is a miss and takes over the slot.
    let other = cache
        .get_or_fetch(Some("t2"), counted(&calls, json!({"track": "t2"})))
        .await
        .unwrap();
    assert_eq!(other, json!({"track": "t2"}));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // The slot now belongs to t2, so t1 is a miss again.
    cache
        .get_or_fetch(Some("t1"), counted(&calls, json!({"track": "t1"})))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_slot() {
    let cache = AnalysisCache::with_ttl(Duration::from_secs(300));
    let calls = Arc::new(AtomicUsize::new(0));

    cache
        .get_or_fetch(Some("t1"), counted(&calls, json!({"track": "t1"})))
        .await
        .unwrap();

    // The failing fetch for t2 must propagate and must not clobber t1.
    let failed = cache
        .get_or_fetch(Some("t2"), || {
            std::future::ready(Err(ApiError::UpstreamTimeout))
        })
        .await;
    assert!(matches!(failed, Err(ApiError::UpstreamTimeout)));

    let cached = cache
        .get_or_fetch(Some("t1"), counted(&calls, json!({"track": "other"})))
        .await
        .unwrap();
    assert_eq!(cached, json!({"track": "t1"}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
