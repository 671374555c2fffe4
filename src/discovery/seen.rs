use std::collections::HashSet;

use rand::{Rng, seq::IndexedRandom};

use crate::{
    deezer,
    types::{ExternalId, RawTrack},
};

/// Bounded set of upstream ids already served.
///
/// Once the set grows past `capacity` it is cleared in one go instead of
/// evicting single entries, so repeats become possible again after a reset.
#[derive(Debug, Clone)]
pub struct DeduplicationFilter {
    seen: HashSet<ExternalId>,
    capacity: usize,
    resets: u64,
}

impl DeduplicationFilter {
    pub fn new(capacity: usize) -> Self {
        Self {
            seen: HashSet::new(),
            capacity: capacity.max(1),
            resets: 0,
        }
    }

    pub fn is_new(&self, id: &ExternalId) -> bool {
        !self.seen.contains(id)
    }

    /// Records `id` as served, then enforces the capacity.
    pub fn mark_seen(&mut self, id: ExternalId) {
        self.seen.insert(id.clone());
        if self.maybe_reset() {
            // keep the id that triggered the reset so it is not repeated right away
            self.seen.insert(id);
        }
    }

    /// Clears the set when it holds more than `capacity` ids. Returns whether
    /// a reset happened.
    pub fn maybe_reset(&mut self) -> bool {
        if self.seen.len() <= self.capacity {
            return false;
        }

        log::warn!(
            "Seen-track set exceeded {} entries, clearing it",
            self.capacity
        );
        self.seen.clear();
        self.resets += 1;
        true
    }

    /// Picks one record from a batch: a random unseen one when possible,
    /// otherwise a random repeat. The pick is marked as seen. Records without
    /// a usable id are never picked.
    pub fn choose<R: Rng + ?Sized>(
        &mut self,
        candidates: Vec<RawTrack>,
        rng: &mut R,
    ) -> Option<RawTrack> {
        let usable: Vec<RawTrack> = candidates
            .into_iter()
            .filter(deezer::has_usable_id)
            .collect();

        let fresh: Vec<&RawTrack> = usable
            .iter()
            .filter(|c| c.id.as_ref().is_some_and(|id| self.is_new(id)))
            .collect();

        let picked = match fresh.choose(rng) {
            Some(record) => (*record).clone(),
            None => {
                let record = usable.choose(rng)?.clone();
                log::debug!("No unseen candidates in batch, accepting a repeat");
                record
            }
        };

        if let Some(id) = &picked.id {
            self.mark_seen(id.clone());
        }
        Some(picked)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of full resets since creation.
    pub fn resets(&self) -> u64 {
        self.resets
    }
}
