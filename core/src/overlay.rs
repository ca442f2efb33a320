// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The optimistic overlay: pending visual state layered over cached truth.
//!
//! A host calendar widget owns this state implicitly; without one it becomes
//! an explicit map from event identity to a pending override, plus the
//! short-lived provisional placements a drop creates. Overrides are cleared
//! on confirm or revert, and the projection falls back to the cached entry —
//! which still holds the pre-drag times, so a revert is exact.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tempo_api::CalendarEvent;
use uuid::Uuid;

/// Identity of a provisional placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementId(String);

impl PlacementId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A locally-synthesized event shown between a drop and the create call
/// resolving. Never persisted directly; discarded on success and failure
/// alike.
#[derive(Debug, Clone)]
pub struct ProvisionalPlacement {
    /// Placement identity.
    pub id: PlacementId,
    /// Title copied from the drag payload.
    pub title: String,
    /// The dragged task's identity.
    pub task_id: String,
    /// Drop start.
    pub start_at: DateTime<Utc>,
    /// Drop end, sized by the duration hint.
    pub end_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct PendingMove {
    start_at: DateTime<Utc>,
    end_at: Option<DateTime<Utc>>,
}

/// What the calendar would draw for one slot: cached truth with any pending
/// override applied, or a provisional placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEvent {
    /// Event id, or the placement id for provisional entries.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Rendered start.
    pub start_at: DateTime<Utc>,
    /// Rendered end.
    pub end_at: DateTime<Utc>,
    /// Whether this entry is a provisional placement awaiting confirmation.
    pub provisional: bool,
    /// Linked task id, for the detail dialog.
    pub linked_task_id: Option<String>,
}

/// Pending visual state keyed by event identity.
#[derive(Debug, Default)]
pub struct Overlay {
    provisional: Vec<ProvisionalPlacement>,
    moves: HashMap<String, PendingMove>,
}

impl Overlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the transient placement the drop gesture creates.
    pub fn insert_provisional(
        &mut self,
        title: &str,
        task_id: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> PlacementId {
        let id = PlacementId::generate();
        self.provisional.push(ProvisionalPlacement {
            id: id.clone(),
            title: title.to_string(),
            task_id: task_id.to_string(),
            start_at,
            end_at,
        });
        id
    }

    /// Removes a provisional placement. Must happen before the persist call
    /// starts, else the transient node and the eventual real node could both
    /// render momentarily.
    pub fn remove_provisional(&mut self, id: &PlacementId) -> Option<ProvisionalPlacement> {
        let idx = self.provisional.iter().position(|p| &p.id == id)?;
        Some(self.provisional.remove(idx))
    }

    /// Whether any provisional placement is currently visible.
    #[must_use]
    pub fn has_provisional(&self) -> bool {
        !self.provisional.is_empty()
    }

    /// Applies a speculative new time to an event, ahead of the PATCH.
    pub fn begin_move(
        &mut self,
        event_id: &str,
        start_at: DateTime<Utc>,
        end_at: Option<DateTime<Utc>>,
    ) {
        self.moves
            .insert(event_id.to_string(), PendingMove { start_at, end_at });
    }

    /// Clears the override after the server confirmed the move; the refetch
    /// will render the authoritative times, which already match.
    pub fn confirm_move(&mut self, event_id: &str) {
        self.moves.remove(event_id);
    }

    /// Reverts the override after a rejected move. The projection falls back
    /// to the cached entry, restoring the exact pre-drag start/end.
    pub fn revert_move(&mut self, event_id: &str) {
        self.moves.remove(event_id);
    }

    /// Projects the overlay onto a cached event list, producing the rendered
    /// view: overrides applied, provisional placements appended.
    #[must_use]
    pub fn project(&self, events: &[CalendarEvent]) -> Vec<RenderedEvent> {
        let mut rendered: Vec<RenderedEvent> = events
            .iter()
            .map(|e| {
                let pending = self.moves.get(&e.id);
                RenderedEvent {
                    id: e.id.clone(),
                    title: e.title.clone(),
                    start_at: pending.map_or(e.start_at, |m| m.start_at),
                    end_at: pending.map_or(e.end_at, |m| m.end_at.unwrap_or(e.end_at)),
                    provisional: false,
                    linked_task_id: e.linked_task_id.clone(),
                }
            })
            .collect();

        rendered.extend(self.provisional.iter().map(|p| RenderedEvent {
            id: p.id.as_str().to_string(),
            title: p.title.clone(),
            start_at: p.start_at,
            end_at: p.end_at,
            provisional: true,
            linked_task_id: Some(p.task_id.clone()),
        }));

        rendered
    }
}
