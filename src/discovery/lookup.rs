use std::{sync::Arc, time::Duration};

use tokio::time::timeout;

use crate::{
    deezer::{self, CatalogGateway, normalize},
    error::{LookupError, UpstreamError},
    types::Track,
};

/// Direct lookups that need nothing but the gateway.
///
/// The handle shares the engine's gateway and carries its own request
/// timeout, so it can be taken out of an engine guarded by a mutex and
/// awaited after the lock is released.
pub struct TrackLookup<G> {
    gateway: Arc<G>,
    timeout: Duration,
}

impl<G> Clone for TrackLookup<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            timeout: self.timeout,
        }
    }
}

impl<G: CatalogGateway> TrackLookup<G> {
    pub(crate) fn new(gateway: Arc<G>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    /// Fetches one track by its upstream id.
    ///
    /// # Arguments
    ///
    /// * `id` - Deezer track id, digits only
    ///
    /// # Returns
    ///
    /// - `Ok(Track)` - The normalized track
    /// - `Err(LookupError::NotFound)` - Unknown or invalid id
    /// - `Err(LookupError::Upstream)` - Any other failure, including the timeout
    ///
    /// # Example
    ///
    /// ```
    /// let lookup = engine.lookup();
    /// match lookup.track_by_id("3135556").await {
    ///     Ok(track) => println!("{}", track.title()),
    ///     Err(LookupError::NotFound(id)) => println!("no track {}", id),
    ///     Err(e) => return Err(e.into()),
    /// }
    /// ```
    pub async fn track_by_id(&self, id: &str) -> Result<Track, LookupError> {
        match timeout(self.timeout, self.gateway.track_by_id(id)).await {
            Ok(result) => result.map(normalize),
            Err(_) => Err(LookupError::Upstream(UpstreamError::Timeout)),
        }
    }

    /// Returns the most relevant track for a free-text query.
    ///
    /// Issues a single ranked search asking for one record. Nothing is
    /// marked as seen and no history is touched.
    ///
    /// # Arguments
    ///
    /// * `query` - Free text such as `daft punk one more time`
    ///
    /// # Returns
    ///
    /// - `Ok(Track)` - The top match
    /// - `Err(LookupError::NotFound)` - Blank query or nothing matched
    /// - `Err(LookupError::Upstream)` - Timeout, HTTP, API or payload failure
    pub async fn search_top(&self, query: &str) -> Result<Track, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::NotFound(query.to_string()));
        }

        let result = match timeout(self.timeout, self.gateway.search_ranked(query, 1)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        };

        match result {
            Ok(records) => records
                .into_iter()
                .find(deezer::has_usable_id)
                .map(normalize)
                .ok_or_else(|| LookupError::NotFound(query.to_string())),
            Err(UpstreamError::EmptyResult) => Err(LookupError::NotFound(query.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}
