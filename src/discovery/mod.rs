//! # Discovery Module
//!
//! The stateful part of the crate: it decides what to search for, filters
//! out tracks that were already served, keeps the navigable history and
//! composes all of it in [`DiscoveryEngine`].
//!
//! ```text
//! QueryStrategySelector → CatalogGateway → DeduplicationFilter → TrackHistory
//!                                                                    ↕
//!                                                                 caller
//! ```
//!
//! - [`QueryStrategySelector`] - five query heuristics (artist, genre,
//!   letters, year, combined) and the per-fetch query plan
//! - [`RetryPolicy`] - attempt budget, per-request timeout and backoff
//! - [`DeduplicationFilter`] - bounded set of served ids, cleared on overflow
//! - [`TrackHistory`] - served tracks plus the navigation cursor
//! - [`TrackLookup`] - lookup by id and ranked free-text search, usable
//!   without holding the engine
//! - [`DiscoveryEngine`] - next/previous/random/batch/genre operations with
//!   refill and fallback

mod engine;
pub mod genres;
mod history;
mod lookup;
mod retry;
mod seen;
mod strategy;

pub use engine::DiscoveryEngine;
pub use engine::EngineState;
pub use history::TrackHistory;
pub use lookup::TrackLookup;
pub use retry::RetryPolicy;
pub use seen::DeduplicationFilter;
pub use strategy::QueryStrategySelector;
pub use strategy::SearchQuery;
pub use strategy::Strategy;
pub use strategy::{random_artist, random_genre, random_letters};
