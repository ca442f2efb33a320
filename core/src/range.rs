// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use tempo_api::ListEventsQuery;

/// The start/end timestamps currently shown in the calendar view, used as the
/// fetch window. End is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    /// Window start (inclusive).
    pub from: DateTime<Utc>,
    /// Window end (exclusive).
    pub to: DateTime<Utc>,
}

/// Tracks the visible date range and derives event-fetch parameters.
///
/// A pure derivation of user navigation: recomputed whenever the displayed
/// window changes, with no retry policy of its own. Fetching is gated — no
/// query exists until a window is known.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    range: Option<VisibleRange>,
    include_task: bool,
    include_reminders: bool,
}

impl ViewState {
    /// Creates a view with no window yet; the calendar page always embeds the
    /// linked task and reminders.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            range: None,
            include_task: true,
            include_reminders: true,
        }
    }

    /// Replaces the visible window after navigation.
    pub fn set_window(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) {
        tracing::debug!(%from, %to, "visible window changed");
        self.range = Some(VisibleRange { from, to });
    }

    /// The current visible range, if any window has been shown yet.
    #[must_use]
    pub const fn visible_range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// Derives the event query for the current window. `None` while no window
    /// is known, which gates the fetch.
    #[must_use]
    pub fn query(&self) -> Option<ListEventsQuery> {
        self.range.map(|range| ListEventsQuery {
            from: range.from,
            to: range.to,
            include_task: self.include_task,
            include_reminders: self.include_reminders,
        })
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn no_query_until_window_known() {
        let view = ViewState::new();
        assert!(view.query().is_none());
    }

    #[test]
    fn navigation_recomputes_the_query() {
        let mut view = ViewState::new();
        view.set_window(utc("2024-01-01T00:00:00Z"), utc("2024-01-08T00:00:00Z"));
        let week_a = view.query().unwrap();

        view.set_window(utc("2024-01-08T00:00:00Z"), utc("2024-01-15T00:00:00Z"));
        let week_b = view.query().unwrap();

        assert_ne!(week_a, week_b);
        assert_eq!(week_b.from, utc("2024-01-08T00:00:00Z"));
        assert!(week_a.include_task && week_a.include_reminders);
    }
}
