use skytrips_core::{KvStore, RecentSearch, SearchRequest};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

pub const RECENT_SEARCHES_KEY: &str = "recent_searches";

/// Bounded, de-duplicated, most-recent-first list of accepted searches.
///
/// Corrupt persisted JSON is treated as "no data"; the list must never fail
/// initialization.
pub struct RecentSearches<S: KvStore> {
    store: Arc<S>,
    cap: usize,
}

impl<S: KvStore> RecentSearches<S> {
    pub fn new(store: Arc<S>, cap: usize) -> Self {
        Self { store, cap }
    }

    /// Read the persisted list, collapsing exact duplicates by identity
    /// tuple (externally written entries may contain them).
    pub fn load(&self) -> Vec<RecentSearch> {
        let raw = match self.store.get(RECENT_SEARCHES_KEY) {
            Some(raw) => raw,
            None => return Vec::new(),
        };

        let parsed: Vec<RecentSearch> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("discarding corrupt recent searches: {}", err);
                return Vec::new();
            }
        };

        dedup_in_order(parsed)
    }

    /// Prepend an accepted request, de-duplicate, truncate to the cap, save.
    pub fn record(&self, request: &SearchRequest) {
        let entry = RecentSearch::from_request(request);

        let mut entries = self.load();
        entries.retain(|existing| existing.dedup_key() != entry.dedup_key());
        entries.insert(0, entry);
        entries.truncate(self.cap);

        match serde_json::to_string(&entries) {
            Ok(json) => self.store.set(RECENT_SEARCHES_KEY, &json),
            Err(err) => warn!("failed to serialize recent searches: {}", err),
        }
    }

    pub fn clear(&self) {
        self.store.remove(RECENT_SEARCHES_KEY);
    }
}

fn dedup_in_order(entries: Vec<RecentSearch>) -> Vec<RecentSearch> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = {
            let (origin, destination, trip, start, end, passengers, cabin) = entry.dedup_key();
            (
                origin.to_string(),
                destination.to_string(),
                trip,
                start,
                end,
                passengers,
                cabin,
            )
        };
        if seen.insert(key) {
            result.push(entry);
        }
    }
    result
}
