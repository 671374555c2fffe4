//! # Deezer Integration Module
//!
//! This module is the gateway between the discovery engine and the Deezer
//! catalog API. It issues search and lookup requests, turns every kind of
//! upstream misbehaviour into an [`UpstreamError`], and normalizes raw
//! records into the crate's [`Track`](crate::types::Track) shape.
//!
//! ## Architecture
//!
//! ```text
//! Discovery Engine
//!          ↓
//! CatalogGateway (trait)
//!     ├── DeezerClient (reqwest, JSON)
//!     └── test stubs
//!          ↓
//! Deezer API  (GET /search/track, GET /track/{id})
//! ```
//!
//! The gateway is stateless. Retrying, strategy selection and
//! de-duplication all live in [`crate::discovery`].
//!
//! ## Error Handling
//!
//! - Non-2xx statuses become [`UpstreamError::Http`]; a `Retry-After` hint
//!   on 429 responses is logged but not slept on, the attempt simply fails.
//! - Deezer sometimes answers `200 OK` with an `error` object (quota
//!   exceeded, no data). Those become [`UpstreamError::Api`].
//! - Bodies that are not JSON, or lack a `data` array, become
//!   [`UpstreamError::MalformedPayload`].
//! - A well-formed but empty result set becomes [`UpstreamError::EmptyResult`].
//! - Individual records without an id are dropped; records missing any other
//!   field are kept and filled with defaults by [`normalize`].

mod client;
mod normalize;

pub use client::DeezerClient;
pub use client::MAX_SEARCH_LIMIT;
pub use normalize::normalize;

use async_trait::async_trait;

use crate::{
    error::{LookupError, UpstreamError},
    types::RawTrack,
};

/// True when the record carries a non-empty upstream id. Records without
/// one are never turned into tracks.
pub fn has_usable_id(record: &RawTrack) -> bool {
    record.id.as_ref().is_some_and(|id| !id.is_empty())
}

/// True when `id` can be sent as a Deezer track id: a non-empty run of
/// ASCII digits. Anything else could rewrite the request path.
pub fn is_valid_track_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Read-only access to an upstream track catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Runs one search over the track catalog.
    ///
    /// # Arguments
    ///
    /// * `query` - Search expression, e.g. `genre:'techno'` or a bare `ab`
    /// * `limit` - Records requested, clamped to the upstream maximum of 100
    /// * `offset` - Index of the first record, moves the result window for variety
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<RawTrack>)` - At least one record, every one carrying an id
    /// - `Err(UpstreamError)` - Timeout, HTTP or API error, malformed body, or
    ///   [`UpstreamError::EmptyResult`] when nothing matched
    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<RawTrack>, UpstreamError>;

    /// Runs a search ordered by relevance and returns the best `limit`
    /// records. Catalogs without a ranking order fall back to a plain
    /// search from the first record.
    async fn search_ranked(&self, query: &str, limit: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        self.search(query, limit, 0).await
    }

    /// Fetches a single record by its upstream id.
    ///
    /// # Returns
    ///
    /// - `Ok(RawTrack)` - The record, with a usable id
    /// - `Err(LookupError::NotFound)` - The id is unknown or not a valid id
    /// - `Err(LookupError::Upstream)` - Any other upstream failure
    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError>;
}
