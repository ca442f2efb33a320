// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Domain events and cache invalidation routing.
//!
//! Cross-entity coupling is expressed as a published event rather than a
//! hardwired call: completing a task through an event action emits
//! [`DomainEvent::TaskCompletedViaEvent`], and each cache decides for itself
//! whether to react.

use tempo_api::{CalendarEvent, ListEventsQuery, ListTasksQuery, Task};

use crate::cache::QueryCache;

/// A client-side domain event driving cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainEvent {
    /// An event was created, rescheduled, or deleted.
    EventsChanged,
    /// A task was created, updated, or deleted.
    TasksChanged,
    /// A task was completed through an event's detail action. Mutates two
    /// remote aggregates the client cannot assume are transactionally linked,
    /// so both stores must refetch.
    TaskCompletedViaEvent,
    /// The bearer token was rejected; the session must be re-established.
    SessionExpired,
}

/// Something that reacts to published domain events.
pub trait InvalidationSubscriber {
    /// Handles one published event.
    fn on_domain_event(&mut self, event: DomainEvent);
}

/// The visible-range event cache.
pub type EventCache = QueryCache<ListEventsQuery, Vec<CalendarEvent>>;

/// The filtered task-list cache.
pub type TaskCache = QueryCache<ListTasksQuery, Vec<Task>>;

/// The shared mutable resource of the client: both query caches, with a
/// publish fan-out to their subscriptions.
#[derive(Debug)]
pub struct Caches {
    /// Events keyed by visible range.
    pub events: EventCache,
    /// Tasks keyed by list filter.
    pub tasks: TaskCache,
}

impl Caches {
    /// Creates both caches with their invalidation subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: QueryCache::subscribed_to(&[
                DomainEvent::EventsChanged,
                DomainEvent::TaskCompletedViaEvent,
            ]),
            tasks: QueryCache::subscribed_to(&[
                DomainEvent::TasksChanged,
                DomainEvent::TaskCompletedViaEvent,
            ]),
        }
    }

    /// Publishes an event to every subscriber.
    pub fn publish(&mut self, event: DomainEvent) {
        tracing::debug!(?event, "publishing domain event");
        self.events.on_domain_event(event);
        self.tasks.on_domain_event(event);
    }
}

impl Default for Caches {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_completion_invalidates_both_stores() {
        let mut caches = Caches::new();
        let events_epoch = caches.events.epoch();
        let tasks_epoch = caches.tasks.epoch();

        caches.publish(DomainEvent::TaskCompletedViaEvent);

        assert!(caches.events.epoch() > events_epoch);
        assert!(caches.tasks.epoch() > tasks_epoch);
    }

    #[test]
    fn event_mutations_leave_the_task_cache_alone() {
        let mut caches = Caches::new();
        let tasks_epoch = caches.tasks.epoch();

        caches.publish(DomainEvent::EventsChanged);

        assert_eq!(caches.tasks.epoch(), tasks_epoch);
        assert!(caches.events.epoch() > 0);
    }
}
