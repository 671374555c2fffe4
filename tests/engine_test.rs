use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use aswa::{
    config::DiscoveryConfig,
    deezer::CatalogGateway,
    discovery::{DiscoveryEngine, EngineState, RetryPolicy},
    error::{LookupError, UpstreamError},
    types::{ExternalId, RawTrack, Track},
};

fn create_record(id: i64) -> RawTrack {
    RawTrack {
        id: Some(ExternalId::Int(id)),
        title: Some(format!("Track {}", id)),
        ..RawTrack::default()
    }
}

fn create_test_config() -> DiscoveryConfig {
    DiscoveryConfig {
        preload_count: 3,
        seen_capacity: 100,
        refill_threshold: 1,
        refill_batch: 2,
        search_limit: 10,
        max_offset: 0,
        retry: RetryPolicy {
            max_attempts: 2,
            strategies_per_attempt: 2,
            request_timeout: Duration::from_millis(200),
            backoff: Duration::ZERO,
        },
    }
}

/// Answers every request with HTTP 500.
struct FailingGateway;

#[async_trait]
impl CatalogGateway for FailingGateway {
    async fn search(&self, _: &str, _: u32, _: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        Err(UpstreamError::Http { status: 500 })
    }

    async fn track_by_id(&self, _: &str) -> Result<RawTrack, LookupError> {
        Err(UpstreamError::Http { status: 500 }.into())
    }
}

/// Always returns the same records.
struct FixedGateway {
    records: Vec<RawTrack>,
}

#[async_trait]
impl CatalogGateway for FixedGateway {
    async fn search(&self, _: &str, _: u32, _: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        Ok(self.records.clone())
    }

    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError> {
        self.records
            .iter()
            .find(|r| r.id.as_ref().is_some_and(|rid| rid.to_string() == id))
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }
}

/// Returns three never-before-seen records per search.
#[derive(Default)]
struct CountingGateway {
    next_id: AtomicI64,
}

#[async_trait]
impl CatalogGateway for CountingGateway {
    async fn search(&self, _: &str, _: u32, _: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        let first = self.next_id.fetch_add(3, Ordering::SeqCst);
        Ok((first..first + 3).map(create_record).collect())
    }

    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError> {
        Err(LookupError::NotFound(id.to_string()))
    }
}

/// Never answers within any reasonable timeout.
struct SlowGateway;

#[async_trait]
impl CatalogGateway for SlowGateway {
    async fn search(&self, _: &str, _: u32, _: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![create_record(1)])
    }

    async fn track_by_id(&self, _: &str) -> Result<RawTrack, LookupError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(create_record(1))
    }
}

/// Fails its first `failures` searches, then returns fresh records.
struct FlakyGateway {
    failures: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl CatalogGateway for FlakyGateway {
    async fn search(&self, _: &str, _: u32, _: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(UpstreamError::Timeout);
        }
        Ok(vec![create_record(call as i64)])
    }

    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError> {
        Err(LookupError::NotFound(id.to_string()))
    }
}

/// Fails until switched on.
struct ToggleGateway {
    healthy: Arc<AtomicBool>,
    inner: CountingGateway,
}

#[async_trait]
impl CatalogGateway for ToggleGateway {
    async fn search(&self, q: &str, limit: u32, offset: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        if !self.healthy.load(Ordering::SeqCst) {
            return Err(UpstreamError::Http { status: 503 });
        }
        self.inner.search(q, limit, offset).await
    }

    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError> {
        self.inner.track_by_id(id).await
    }
}

/// Only has records in the first result window and remembers every
/// search it was asked for.
#[derive(Default)]
struct GenreGateway {
    searches: Mutex<Vec<(String, u32, u32)>>,
    ranked: Mutex<Vec<(String, u32)>>,
}

impl GenreGateway {
    fn searches(&self) -> Vec<(String, u32, u32)> {
        self.searches.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CatalogGateway for GenreGateway {
    async fn search(&self, q: &str, limit: u32, offset: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        if let Ok(mut searches) = self.searches.lock() {
            searches.push((q.to_string(), limit, offset));
        }
        if q == "genre:'nothing'" || offset > 0 {
            return Err(UpstreamError::EmptyResult);
        }
        Ok(vec![create_record(1), create_record(2)])
    }

    async fn search_ranked(&self, q: &str, limit: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        if let Ok(mut ranked) = self.ranked.lock() {
            ranked.push((q.to_string(), limit));
        }
        if q == "nothing" {
            return Err(UpstreamError::EmptyResult);
        }
        Ok(vec![create_record(40), create_record(41)])
    }

    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError> {
        Err(LookupError::NotFound(id.to_string()))
    }
}

/// Lets a test keep its own handle on a gateway the engine owns.
struct ArcGateway<G>(Arc<G>);

#[async_trait]
impl<G: CatalogGateway> CatalogGateway for ArcGateway<G> {
    async fn search(&self, q: &str, limit: u32, offset: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        self.0.search(q, limit, offset).await
    }

    async fn search_ranked(&self, q: &str, limit: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        self.0.search_ranked(q, limit).await
    }

    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError> {
        self.0.track_by_id(id).await
    }
}

fn ids(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.external_id().to_string()).collect()
}

#[tokio::test]
async fn test_preload_with_failing_upstream_returns_fallback() {
    let mut engine = DiscoveryEngine::new(FailingGateway, create_test_config());

    let tracks = engine.preload(5).await;

    assert_eq!(tracks, vec![Track::fallback()]);
    assert!(engine.is_degraded());
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.state(), EngineState::Ready);
}

#[tokio::test]
async fn test_preload_zero_is_noop() {
    let mut engine = DiscoveryEngine::new(FailingGateway, create_test_config());

    assert!(engine.preload(0).await.is_empty());
    assert!(engine.history().is_empty());
    assert_eq!(engine.state(), EngineState::Uninitialized);
}

#[tokio::test]
async fn test_preload_accepts_repeats_from_single_record() {
    let gateway = FixedGateway {
        records: vec![create_record(7)],
    };
    let mut engine = DiscoveryEngine::new(gateway, create_test_config());

    let tracks = engine.preload(3).await;

    assert_eq!(tracks.len(), 3);
    assert!(tracks.iter().all(|t| !t.is_fallback()));
    assert!(ids(&tracks).iter().all(|id| id == "7"));
    assert_eq!(engine.seen().len(), 1);
}

#[tokio::test]
async fn test_preload_returns_distinct_tracks() {
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), create_test_config());

    let mut tracks = ids(&engine.preload(4).await);
    tracks.sort();
    tracks.dedup();

    assert_eq!(tracks.len(), 4);
    assert_eq!(engine.seen().len(), 4);
}

#[tokio::test]
async fn test_operations_never_fail_on_broken_upstream() {
    let mut engine = DiscoveryEngine::new(FailingGateway, create_test_config());

    assert!(engine.random().await.is_fallback());
    assert!(engine.next().await.is_fallback());
    assert!(engine.next().await.is_fallback());
    assert!(engine.previous().await.is_fallback());
    assert!(engine.is_degraded());
}

#[tokio::test]
async fn test_next_moves_cursor_monotonically() {
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), create_test_config());
    engine.preload(3).await;
    assert_eq!(engine.current_index(), -1);

    for expected in 0..8 {
        let track = engine.next().await;
        assert!(!track.is_fallback());
        assert_eq!(engine.current_index(), expected);
        assert_eq!(engine.current(), track);
    }
    assert!(!engine.is_degraded());
}

#[tokio::test]
async fn test_next_without_preload_fetches() {
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), create_test_config());

    let track = engine.next().await;

    assert!(!track.is_fallback());
    assert_eq!(engine.current_index(), 0);
}

#[tokio::test]
async fn test_previous_before_next_returns_fallback() {
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), create_test_config());
    engine.preload(3).await;

    assert!(engine.previous().await.is_fallback());
    assert_eq!(engine.current_index(), -1);
}

#[tokio::test]
async fn test_previous_walks_back_and_clamps() {
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), create_test_config());
    engine.preload(3).await;

    let first = engine.next().await;
    let second = engine.next().await;
    engine.next().await;

    assert_eq!(engine.previous().await, second);
    assert_eq!(engine.previous().await, first);
    assert_eq!(engine.previous().await, first);
    assert_eq!(engine.current_index(), 0);
}

#[tokio::test]
async fn test_random_leaves_history_alone() {
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), create_test_config());
    engine.preload(3).await;
    engine.next().await;
    let history_len = engine.history().len();

    let track = engine.random().await;

    assert!(!track.is_fallback());
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.history().len(), history_len);
    assert!(!engine.seen().is_new(track.external_id()));
}

#[tokio::test]
async fn test_retries_through_failed_strategies() {
    let gateway = FlakyGateway {
        failures: 3,
        calls: AtomicUsize::new(0),
    };
    let mut engine = DiscoveryEngine::new(gateway, create_test_config());

    assert!(!engine.random().await.is_fallback());
    assert!(!engine.is_degraded());
}

#[tokio::test]
async fn test_slow_upstream_times_out_to_fallback() {
    let mut cfg = create_test_config();
    cfg.retry.request_timeout = Duration::from_millis(20);
    let mut engine = DiscoveryEngine::new(SlowGateway, cfg);

    let started = tokio::time::Instant::now();
    let track = engine.random().await;

    assert!(track.is_fallback());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_fallback_seed_replaced_once_upstream_recovers() {
    let healthy = Arc::new(AtomicBool::new(false));
    let gateway = ToggleGateway {
        healthy: Arc::clone(&healthy),
        inner: CountingGateway::default(),
    };
    let mut engine = DiscoveryEngine::new(gateway, create_test_config());

    assert_eq!(engine.preload(3).await, vec![Track::fallback()]);
    healthy.store(true, Ordering::SeqCst);

    let track = engine.next().await;

    assert!(!track.is_fallback());
    assert!(engine.history().tracks().iter().all(|t| !t.is_fallback()));
    assert!(!engine.is_degraded());
}

#[tokio::test]
async fn test_cached_batch_preloads_when_empty() {
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), create_test_config());

    let tracks = engine.cached_batch().await;
    assert_eq!(tracks.len(), engine.preload_count());

    // a second call serves the same history without fetching
    assert_eq!(engine.cached_batch().await, tracks);
}

#[tokio::test]
async fn test_track_by_id_lookup() {
    let gateway = FixedGateway {
        records: vec![create_record(7)],
    };
    let engine = DiscoveryEngine::new(gateway, create_test_config());

    let track = engine.track_by_id("7").await.expect("track 7 exists");
    assert_eq!(track.external_id(), &ExternalId::Int(7));

    let missing = engine.track_by_id("8").await;
    assert_eq!(missing, Err(LookupError::NotFound("8".to_string())));
}

#[tokio::test]
async fn test_track_by_id_upstream_failures() {
    let engine = DiscoveryEngine::new(FailingGateway, create_test_config());
    assert_eq!(
        engine.track_by_id("1").await,
        Err(LookupError::Upstream(UpstreamError::Http { status: 500 }))
    );

    let mut cfg = create_test_config();
    cfg.retry.request_timeout = Duration::from_millis(20);
    let engine = DiscoveryEngine::new(SlowGateway, cfg);
    assert_eq!(
        engine.track_by_id("1").await,
        Err(LookupError::Upstream(UpstreamError::Timeout))
    );
}

#[tokio::test]
async fn test_seen_set_reset_keeps_engine_serving() {
    let mut cfg = create_test_config();
    cfg.seen_capacity = 2;
    let mut engine = DiscoveryEngine::new(CountingGateway::default(), cfg);

    for _ in 0..6 {
        assert!(!engine.next().await.is_fallback());
    }

    assert!(engine.seen().resets() > 0);
    assert!(engine.seen().len() <= 2);
}

#[tokio::test]
async fn test_next_returns_stale_track_when_refetch_fails() {
    let healthy = Arc::new(AtomicBool::new(true));
    let gateway = ToggleGateway {
        healthy: Arc::clone(&healthy),
        inner: CountingGateway::default(),
    };
    let mut engine = DiscoveryEngine::new(gateway, create_test_config());
    engine.preload(3).await;
    engine.next().await;

    healthy.store(false, Ordering::SeqCst);
    while engine.history().remaining() > 0 {
        engine.next().await;
    }
    let last = engine.current();
    let index = engine.current_index();
    assert!(!last.is_fallback());

    let track = engine.next().await;

    assert_eq!(track, last);
    assert_eq!(engine.current_index(), index);
    assert!(engine.is_degraded());
}

#[tokio::test]
async fn test_track_for_genre_retries_first_window() {
    let mut cfg = create_test_config();
    cfg.max_offset = 200;
    let mut engine = DiscoveryEngine::new(GenreGateway::default(), cfg);

    let track = engine.track_for_genre("techno").await.expect("a techno track");

    assert!(!track.is_fallback());
    assert!(!engine.seen().is_new(track.external_id()));
    assert_eq!(engine.current_index(), -1);
    assert!(engine.history().is_empty());
}

#[tokio::test]
async fn test_track_for_genre_query_and_limit() {
    let gateway = Arc::new(GenreGateway::default());
    let mut engine = DiscoveryEngine::new(ArcGateway(Arc::clone(&gateway)), create_test_config());

    engine.track_for_genre("  deep house ").await.expect("a track");

    let searches = gateway.searches();
    assert_eq!(searches, vec![("genre:'deep house'".to_string(), 10, 0)]);
}

#[tokio::test]
async fn test_track_for_genre_not_found_and_failures() {
    let mut engine = DiscoveryEngine::new(GenreGateway::default(), create_test_config());
    assert_eq!(
        engine.track_for_genre("nothing").await,
        Err(LookupError::NotFound("nothing".to_string()))
    );
    assert_eq!(
        engine.track_for_genre("   ").await,
        Err(LookupError::NotFound(String::new()))
    );

    let mut engine = DiscoveryEngine::new(FailingGateway, create_test_config());
    assert_eq!(
        engine.track_for_genre("techno").await,
        Err(LookupError::Upstream(UpstreamError::Http { status: 500 }))
    );
}

#[tokio::test]
async fn test_search_top_returns_first_ranked_record() {
    let gateway = Arc::new(GenreGateway::default());
    let engine = DiscoveryEngine::new(ArcGateway(Arc::clone(&gateway)), create_test_config());

    let track = engine.search_top(" one more time ").await.expect("a match");

    assert_eq!(track.external_id(), &ExternalId::Int(40));
    let ranked = gateway.ranked.lock().map(|r| r.clone()).unwrap_or_default();
    assert_eq!(ranked, vec![("one more time".to_string(), 1)]);
    assert!(engine.seen().is_empty());
}

#[tokio::test]
async fn test_search_top_not_found_and_failures() {
    let engine = DiscoveryEngine::new(GenreGateway::default(), create_test_config());
    assert_eq!(
        engine.search_top("nothing").await,
        Err(LookupError::NotFound("nothing".to_string()))
    );
    assert_eq!(engine.search_top("").await, Err(LookupError::NotFound(String::new())));

    // the default ranked search falls back to a plain search
    let engine = DiscoveryEngine::new(FailingGateway, create_test_config());
    assert_eq!(
        engine.search_top("anything").await,
        Err(LookupError::Upstream(UpstreamError::Http { status: 500 }))
    );

    let mut cfg = create_test_config();
    cfg.retry.request_timeout = Duration::from_millis(20);
    let engine = DiscoveryEngine::new(SlowGateway, cfg);
    assert_eq!(
        engine.search_top("anything").await,
        Err(LookupError::Upstream(UpstreamError::Timeout))
    );
}

#[tokio::test]
async fn test_lookup_handle_outlives_engine() {
    let gateway = FixedGateway {
        records: vec![create_record(7)],
    };
    let lookup = DiscoveryEngine::new(gateway, create_test_config()).lookup();

    let track = lookup.track_by_id("7").await.expect("track 7 exists");
    assert_eq!(track.external_id(), &ExternalId::Int(7));
}
