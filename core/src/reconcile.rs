// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Reconcilers: user-initiated calendar changes against the remote store.
//!
//! Each entry point applies (or inherits) optimistic visual state, makes a
//! single persist attempt, and on failure compensates locally and surfaces a
//! generic notification. No retries, no propagated errors.

use chrono::{DateTime, Duration, Utc};

use tempo_api::{CalendarEvent, CreateTimeblock, EventPatch};

use crate::drag::{DragPayload, parse_hhmm};
use crate::invalidate::DomainEvent;
use crate::overlay::PlacementId;
use crate::planner::Planner;

/// A drop of an external task onto the calendar, as delivered by the drag
/// layer.
#[derive(Debug, Clone)]
pub struct TaskDrop {
    /// The transient placement the drop gesture created, if any.
    pub placement: Option<PlacementId>,
    /// The dragged task's identity, if the payload carried one.
    pub task_id: Option<String>,
    /// The resolved drop start, if any.
    pub start_at: Option<DateTime<Utc>>,
    /// The drop end, sized by the duration hint.
    pub end_at: Option<DateTime<Utc>>,
}

/// Result of a drop reconciliation.
#[derive(Debug)]
pub enum DropOutcome {
    /// The timeblock was persisted; the cache has been invalidated.
    Placed(CalendarEvent),
    /// Malformed drop: no task identity or no start time. No network call
    /// was made and nothing changed visibly.
    Ignored,
    /// The backend refused; the placement is gone and nothing was added.
    Failed,
}

/// Result of a move or resize reconciliation.
#[derive(Debug)]
pub enum MoveOutcome {
    /// The new time was persisted; the cache has been invalidated.
    Confirmed(CalendarEvent),
    /// The backend refused; the event was reverted to its pre-drag time.
    Reverted,
}

/// Result of the mark-linked-task-done bridge.
#[derive(Debug)]
pub enum CompleteOutcome {
    /// The task was completed; both caches have been invalidated.
    Completed(CalendarEvent),
    /// The backend refused; nothing changed.
    Failed,
}

impl Planner {
    /// Simulates the drop gesture: registers the transient placement the
    /// host layer would auto-create, sized by the payload's duration hint,
    /// and returns the drop event to hand to
    /// [`receive_drop`](Self::receive_drop).
    pub fn begin_drop(&mut self, payload: &DragPayload, start_at: DateTime<Utc>) -> TaskDrop {
        let minutes = parse_hhmm(&payload.duration).unwrap_or(60);
        let end_at = start_at + Duration::minutes(i64::from(minutes));
        let placement =
            self.overlay
                .insert_provisional(&payload.title, &payload.task_id, start_at, end_at);
        TaskDrop {
            placement: Some(placement),
            task_id: Some(payload.task_id.clone()),
            start_at: Some(start_at),
            end_at: Some(end_at),
        }
    }

    /// Drop → timeblock reconciliation.
    ///
    /// The transient placement is removed synchronously before the persist
    /// call begins; it is never server-confirmed and must never render
    /// alongside the real event. A drop without a task identity or start
    /// time is a no-op, not an error state.
    pub async fn receive_drop(&mut self, drop: TaskDrop) -> DropOutcome {
        if let Some(placement) = &drop.placement {
            self.overlay.remove_provisional(placement);
        }

        let (Some(task_id), Some(start_at)) = (drop.task_id, drop.start_at) else {
            tracing::debug!("ignoring malformed drop");
            return DropOutcome::Ignored;
        };

        let payload = CreateTimeblock {
            task_id,
            start_at,
            end_at: drop.end_at,
            duration_minutes: None,
            reminder_minutes: None,
        };
        match self.api.create_timeblock(&payload).await {
            Ok(event) => {
                self.caches.publish(DomainEvent::EventsChanged);
                DropOutcome::Placed(event)
            }
            Err(err) => {
                self.report(err);
                DropOutcome::Failed
            }
        }
    }

    /// Drag-move reconciliation for an existing event.
    ///
    /// The new time is applied to the overlay up front, mirroring the live
    /// drag feedback; a rejection reverts it to the exact pre-drag position.
    /// All rejection kinds are treated uniformly.
    pub async fn move_event(
        &mut self,
        event_id: &str,
        start_at: DateTime<Utc>,
        end_at: Option<DateTime<Utc>>,
    ) -> MoveOutcome {
        self.overlay.begin_move(event_id, start_at, end_at);

        let patch = EventPatch::reschedule(start_at, end_at);
        match self.api.update_event(event_id, &patch).await {
            Ok(event) => {
                self.overlay.confirm_move(event_id);
                self.caches.publish(DomainEvent::EventsChanged);
                MoveOutcome::Confirmed(event)
            }
            Err(err) => {
                // mandatory compensation: without it the view silently
                // diverges from the server's truth
                self.overlay.revert_move(event_id);
                self.report(err);
                MoveOutcome::Reverted
            }
        }
    }

    /// Resize reconciliation; same protocol as a move, kept separate to
    /// mirror the two gestures.
    pub async fn resize_event(
        &mut self,
        event_id: &str,
        start_at: DateTime<Utc>,
        end_at: Option<DateTime<Utc>>,
    ) -> MoveOutcome {
        self.move_event(event_id, start_at, end_at).await
    }

    /// Marks the task linked to an event as done, via the dedicated
    /// endpoint. Completing a task through this path mutates two remote
    /// aggregates, so success invalidates the event and task caches both.
    pub async fn mark_linked_task_done(&mut self, event_id: &str) -> CompleteOutcome {
        match self.api.mark_linked_task_done(event_id).await {
            Ok(done) => {
                self.caches.publish(DomainEvent::TaskCompletedViaEvent);
                CompleteOutcome::Completed(done.event)
            }
            Err(err) => {
                self.report(err);
                CompleteOutcome::Failed
            }
        }
    }
}
