// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::hash::Hash;

use crate::invalidate::{DomainEvent, InvalidationSubscriber};

/// A keyed query cache with epoch-guarded writes.
///
/// Entries are keyed by the full query (range plus flags), never a single
/// slot, so a late response for one key can never overwrite another key's
/// view. Mutations go through `invalidate` only — reconcilers never edit
/// cached entries in place.
#[derive(Debug)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, V>,
    epoch: u64,
    interests: &'static [DomainEvent],
}

impl<K: Eq + Hash, V> QueryCache<K, V> {
    /// Creates a cache that invalidates itself on the given domain events.
    #[must_use]
    pub fn subscribed_to(interests: &'static [DomainEvent]) -> Self {
        Self {
            entries: HashMap::new(),
            epoch: 0,
            interests,
        }
    }

    /// The current invalidation epoch. Capture it when a fetch starts and
    /// pass it back to [`store`](Self::store) when the fetch resolves.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Looks up the cached value for a query.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Stores a fetched value, unless the cache was invalidated after the
    /// fetch started. Returns whether the value landed.
    pub fn store(&mut self, key: K, started_epoch: u64, value: V) -> bool {
        if started_epoch < self.epoch {
            tracing::debug!(started_epoch, epoch = self.epoch, "discarding stale fetch result");
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Drops all entries and advances the epoch, so in-flight fetches started
    /// before this point cannot land.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
        self.entries.clear();
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> InvalidationSubscriber for QueryCache<K, V> {
    fn on_domain_event(&mut self, event: DomainEvent) {
        if self.interests.contains(&event) {
            self.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> QueryCache<&'static str, u32> {
        QueryCache::subscribed_to(&[DomainEvent::EventsChanged])
    }

    #[test]
    fn distinct_keys_do_not_share_a_slot() {
        let mut c = cache();
        let epoch = c.epoch();
        assert!(c.store("week-a", epoch, 1));
        assert!(c.store("week-b", epoch, 2));
        assert_eq!(c.get(&"week-a"), Some(&1));
        assert_eq!(c.get(&"week-b"), Some(&2));
    }

    #[test]
    fn fetch_started_before_invalidation_does_not_land() {
        let mut c = cache();
        let stale_epoch = c.epoch();
        c.invalidate();
        assert!(!c.store("week-a", stale_epoch, 1));
        assert!(c.get(&"week-a").is_none());
    }

    #[test]
    fn only_subscribed_events_invalidate() {
        let mut c = cache();
        let epoch = c.epoch();
        c.store("week-a", epoch, 1);

        c.on_domain_event(DomainEvent::TasksChanged);
        assert_eq!(c.get(&"week-a"), Some(&1));

        c.on_domain_event(DomainEvent::EventsChanged);
        assert!(c.get(&"week-a").is_none());
    }
}
