use std::sync::Arc;

use rand::Rng;
use tokio::{
    task::JoinSet,
    time::{sleep, timeout},
};

use crate::{
    config::DiscoveryConfig,
    deezer::{self, CatalogGateway, normalize},
    discovery::{
        DeduplicationFilter, QueryStrategySelector, RetryPolicy, SearchQuery, TrackHistory,
        TrackLookup,
    },
    error::{LookupError, UpstreamError},
    types::{RawTrack, Track},
};

/// Lifecycle label of a [`DiscoveryEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing has been preloaded yet.
    Uninitialized,
    /// Idle between calls.
    Ready,
    /// Serving a navigation call.
    Serving,
    /// Fetching a batch into the history.
    Refilling,
}

/// Serves an endless, de-duplicated and navigable stream of random tracks
/// on top of a [`CatalogGateway`].
///
/// Navigation calls never fail: every upstream failure is logged and
/// retried with another strategy, and only when the whole retry budget is
/// spent does the engine hand out a stale track or [`Track::fallback`].
///
/// The engine expects one caller at a time. Share it behind a
/// `tokio::sync::Mutex` when several tasks need it.
pub struct DiscoveryEngine<G> {
    gateway: Arc<G>,
    selector: QueryStrategySelector,
    seen: DeduplicationFilter,
    history: TrackHistory,
    policy: RetryPolicy,
    preload_count: usize,
    refill_threshold: usize,
    refill_batch: usize,
    state: EngineState,
    degraded: bool,
}

impl<G: CatalogGateway + 'static> DiscoveryEngine<G> {
    /// Creates an engine over `gateway`. Nothing is fetched until the first
    /// call.
    ///
    /// # Example
    ///
    /// ```
    /// let cfg = config::discovery_config();
    /// let client = DeezerClient::new(config::deezer_api_url(), cfg.retry.request_timeout)?;
    /// let mut engine = DiscoveryEngine::new(client, cfg);
    /// ```
    pub fn new(gateway: G, config: DiscoveryConfig) -> Self {
        Self {
            gateway: Arc::new(gateway),
            selector: QueryStrategySelector::new(config.search_limit, config.max_offset),
            seen: DeduplicationFilter::new(config.seen_capacity),
            history: TrackHistory::new(),
            policy: config.retry,
            preload_count: config.preload_count,
            refill_threshold: config.refill_threshold,
            refill_batch: config.refill_batch,
            state: EngineState::Uninitialized,
            degraded: false,
        }
    }

    /// Fetches `count` tracks concurrently and appends them to the history.
    ///
    /// Every track is fetched by its own strategy plan; the picks are
    /// de-duplicated against everything served so far.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of tracks to fetch, `0` does nothing
    ///
    /// # Returns
    ///
    /// The tracks obtained, possibly fewer than `count`. When none could be
    /// fetched the result is the fallback track alone, and an empty history
    /// is seeded with it.
    ///
    /// # Example
    ///
    /// ```
    /// let tracks = engine.preload(10).await;
    /// if tracks.iter().all(Track::is_fallback) {
    ///     log::warn!("upstream unavailable");
    /// }
    /// ```
    pub async fn preload(&mut self, count: usize) -> Vec<Track> {
        if count == 0 {
            return Vec::new();
        }

        self.state = EngineState::Refilling;
        let tracks = self.fetch_batch(count).await;

        let result = if tracks.is_empty() {
            log::warn!(
                "Preload of {} tracks yielded nothing, serving the fallback track",
                count
            );
            self.degraded = true;
            if self.history.is_empty() {
                self.history.append(Track::fallback());
            }
            vec![Track::fallback()]
        } else {
            log::info!("Preloaded {} of {} tracks", tracks.len(), count);
            self.degraded = false;
            self.store(tracks.clone());
            tracks
        };

        self.state = EngineState::Ready;
        result
    }

    /// Advances to the next track, fetching more when the cursor gets close
    /// to the end of the history.
    ///
    /// # Returns
    ///
    /// Always a track, in order of preference:
    /// - the next entry of the history, after an opportunistic refill
    /// - one freshly fetched track, appended and advanced to
    /// - the current (stale) track when fetching failed
    /// - [`Track::fallback`] when there is no current track either
    ///
    /// The last two cases set [`is_degraded`](Self::is_degraded).
    pub async fn next(&mut self) -> Track {
        self.state = EngineState::Serving;

        if self.history.remaining() <= self.refill_threshold {
            self.refill().await;
        }

        let advanced = self.history.advance().cloned();
        let track = match advanced {
            Some(track) => {
                self.degraded = track.is_fallback();
                track
            }
            None => match self.fetch_one().await {
                Some(track) => {
                    self.store(vec![track.clone()]);
                    self.history.advance();
                    self.degraded = false;
                    track
                }
                None => {
                    log::warn!("No new track could be fetched, repeating the current one");
                    self.degraded = true;
                    self.history.current().cloned().unwrap_or_else(Track::fallback)
                }
            },
        };

        self.state = EngineState::Ready;
        track
    }

    /// Moves back one track. Never fetches and stays on the first track once
    /// there; before the first `next` it returns the fallback track.
    pub async fn previous(&mut self) -> Track {
        match self.history.retreat() {
            Some(track) => track.clone(),
            None => {
                log::debug!("No previous track available");
                Track::fallback()
            }
        }
    }

    /// One standalone random track. Updates the seen set but leaves the
    /// history and cursor alone.
    pub async fn random(&mut self) -> Track {
        self.state = EngineState::Serving;
        let track = match self.fetch_one().await {
            Some(track) => {
                self.degraded = false;
                track
            }
            None => {
                log::warn!("Random fetch failed, serving the fallback track");
                self.degraded = true;
                Track::fallback()
            }
        };
        self.state = EngineState::Ready;
        track
    }

    /// The whole history, preloading first only when it is empty.
    pub async fn cached_batch(&mut self) -> Vec<Track> {
        if self.history.is_empty() {
            self.preload(self.preload_count).await;
        }
        self.history.tracks().to_vec()
    }

    /// A handle for direct lookups that shares this engine's gateway and
    /// request timeout. Take it out of a locked engine and release the
    /// lock before awaiting on it.
    pub fn lookup(&self) -> TrackLookup<G> {
        TrackLookup::new(Arc::clone(&self.gateway), self.policy.request_timeout)
    }

    /// Direct lookup by upstream id. The only navigation-independent call
    /// that reports an error, since a missing id cannot be retried with
    /// another query. See [`TrackLookup::track_by_id`].
    pub async fn track_by_id(&self, id: &str) -> Result<Track, LookupError> {
        self.lookup().track_by_id(id).await
    }

    /// The most relevant track for a free-text query. See
    /// [`TrackLookup::search_top`].
    pub async fn search_top(&self, query: &str) -> Result<Track, LookupError> {
        self.lookup().search_top(query).await
    }

    /// One random track of the given genre.
    ///
    /// Searches `genre:'<genre>'` at a random offset and picks a record the
    /// same way navigation does, preferring unseen ones. When the random
    /// window comes back empty the search is repeated from the first
    /// record. The history and cursor are left alone.
    ///
    /// # Arguments
    ///
    /// * `genre` - Deezer genre name, e.g. `techno`
    ///
    /// # Returns
    ///
    /// - `Ok(Track)` - A track of that genre
    /// - `Err(LookupError::NotFound)` - Blank genre or no track matched
    /// - `Err(LookupError::Upstream)` - The last upstream failure
    ///
    /// # Example
    ///
    /// ```
    /// let track = engine.track_for_genre("deep house").await?;
    /// println!("{} - {}", track.artist(), track.title());
    /// ```
    pub async fn track_for_genre(&mut self, genre: &str) -> Result<Track, LookupError> {
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(LookupError::NotFound(genre.to_string()));
        }

        let query = format!("genre:'{}'", genre);
        let limit = self.selector.limit();
        let random_offset = {
            let mut rng = rand::rng();
            rng.random_range(0..=self.selector.max_offset())
        };
        let mut offsets = vec![random_offset];
        if random_offset != 0 {
            offsets.push(0);
        }

        let mut last_error = None;
        for offset in offsets {
            let request = self.gateway.search(&query, limit, offset);
            let result = match timeout(self.policy.request_timeout, request).await {
                Ok(result) => result,
                Err(_) => Err(UpstreamError::Timeout),
            };

            match result {
                Ok(records) => {
                    let picked = {
                        let mut rng = rand::rng();
                        self.seen.choose(records, &mut rng)
                    };
                    if let Some(raw) = picked {
                        return Ok(normalize(raw));
                    }
                }
                Err(UpstreamError::EmptyResult) => {
                    log::debug!("Genre {:?} has nothing at offset {}", genre, offset);
                }
                Err(err) => {
                    log::warn!("Genre {:?} search at offset {} failed: {}", genre, offset, err);
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) => Err(err.into()),
            None => Err(LookupError::NotFound(genre.to_string())),
        }
    }

    /// Cursor position in the history, `-1` before the first `next`.
    pub fn current_index(&self) -> isize {
        self.history.cursor()
    }

    pub fn current(&self) -> Track {
        self.history.current().cloned().unwrap_or_else(Track::fallback)
    }

    pub fn history(&self) -> &TrackHistory {
        &self.history
    }

    pub fn seen(&self) -> &DeduplicationFilter {
        &self.seen
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the last serving call had to fall back to a stale or
    /// placeholder track.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn preload_count(&self) -> usize {
        self.preload_count
    }

    async fn refill(&mut self) {
        let previous = self.state;
        self.state = EngineState::Refilling;

        let tracks = self.fetch_batch(self.refill_batch).await;
        if tracks.is_empty() {
            log::warn!("Refill fetched no tracks");
        } else {
            log::info!("Refilled history with {} tracks", tracks.len());
            self.store(tracks);
        }

        self.state = previous;
    }

    /// Appends fetched tracks. A fallback track that was seeded but never
    /// served is dropped first so it does not shadow real tracks.
    fn store(&mut self, tracks: Vec<Track>) {
        let only_unserved_fallback = self.history.cursor() < 0
            && self.history.len() == 1
            && self.history.tracks()[0].is_fallback();
        if only_unserved_fallback {
            self.history = TrackHistory::new();
        }
        self.history.extend(tracks);
    }

    /// Runs the full strategy pipeline once and picks one track.
    async fn fetch_one(&mut self) -> Option<Track> {
        let plan = {
            let mut rng = rand::rng();
            self.selector.plan(&self.policy, &mut rng)
        };

        let candidates = gather_candidates(self.gateway.as_ref(), &plan, &self.policy).await?;

        let mut rng = rand::rng();
        self.seen.choose(candidates, &mut rng).map(normalize)
    }

    /// Runs `count` strategy pipelines concurrently. Candidates are
    /// de-duplicated in completion order once the requests come back.
    async fn fetch_batch(&mut self, count: usize) -> Vec<Track> {
        let mut tasks = JoinSet::new();
        for _ in 0..count {
            let plan = {
                let mut rng = rand::rng();
                self.selector.plan(&self.policy, &mut rng)
            };
            let gateway = Arc::clone(&self.gateway);
            let policy = self.policy.clone();
            tasks.spawn(async move { gather_candidates(gateway.as_ref(), &plan, &policy).await });
        }

        let mut tracks = Vec::with_capacity(count);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(candidates)) => {
                    let picked = {
                        let mut rng = rand::rng();
                        self.seen.choose(candidates, &mut rng)
                    };
                    if let Some(raw) = picked {
                        tracks.push(normalize(raw));
                    }
                }
                Ok(None) => {}
                Err(e) => log::warn!("Track fetch task failed: {}", e),
            }
        }

        tracks
    }
}

/// Walks a query plan until one request returns usable records. Every
/// failure, timeouts included, just moves on to the next query.
async fn gather_candidates<G: CatalogGateway + ?Sized>(
    gateway: &G,
    plan: &[SearchQuery],
    policy: &RetryPolicy,
) -> Option<Vec<RawTrack>> {
    for (attempt, query) in plan.iter().enumerate() {
        if attempt > 0 && !policy.backoff.is_zero() {
            sleep(policy.backoff).await;
        }

        log::debug!(
            "Searching [{}] {:?} limit={} offset={}",
            query.strategy,
            query.query,
            query.limit,
            query.offset
        );

        let request = gateway.search(&query.query, query.limit, query.offset);
        let result = match timeout(policy.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        };

        match result {
            Ok(records) => {
                let usable: Vec<RawTrack> = records
                    .into_iter()
                    .filter(deezer::has_usable_id)
                    .collect();
                if !usable.is_empty() {
                    log::debug!("[{}] query returned {} records", query.strategy, usable.len());
                    return Some(usable);
                }
                log::warn!(
                    "[{}] query {:?} returned no usable records",
                    query.strategy,
                    query.query
                );
            }
            Err(err) => log::warn!(
                "[{}] query {:?} failed: {}",
                query.strategy,
                query.query,
                err
            ),
        }
    }

    log::warn!("All {} search attempts failed", plan.len());
    None
}
