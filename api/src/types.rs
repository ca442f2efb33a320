// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Wire types for the backend entities and request payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::{iso, iso_opt};

/// A calendar event.
///
/// `end_at` is exclusive. The `end_at >= start_at` invariant is not enforced
/// client-side; the server is the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start timestamp.
    #[serde(with = "iso")]
    pub start_at: DateTime<Utc>,
    /// End timestamp (exclusive).
    #[serde(with = "iso")]
    pub end_at: DateTime<Utc>,
    /// Whether the event spans whole days.
    #[serde(default)]
    pub all_day: bool,
    /// Weak reference to the task this event timeblocks, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_task_id: Option<String>,
    /// Denormalized snapshot of the linked task, present when the event list
    /// was fetched with `includeTask`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_task: Option<Task>,
    /// Reminders, present when fetched with `includeReminders`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<Reminder>>,
}

/// A reminder attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Unique identifier.
    pub id: String,
    /// Minutes before the event start at which to remind.
    pub minutes_before: u32,
}

/// A task, read-mostly from the calendar client's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Due timestamp, if any.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Estimated effort in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<u32>,
    /// Whether the task is pinned.
    #[serde(default)]
    pub pinned: bool,
    /// Weak reference to the owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Completion timestamp, set when status becomes done.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(with = "iso")]
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    #[serde(with = "iso")]
    pub updated_at: DateTime<Utc>,
    /// Weak references to tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// In progress.
    Doing,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Whether the status is terminal. Terminal tasks are not draggable onto
    /// the calendar.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

const STATUS_TODO: &str = "TODO";
const STATUS_DOING: &str = "DOING";
const STATUS_DONE: &str = "DONE";

impl AsRef<str> for TaskStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Todo => STATUS_TODO,
            Self::Doing => STATUS_DOING,
            Self::Done => STATUS_DONE,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            STATUS_TODO => Ok(Self::Todo),
            STATUS_DOING => Ok(Self::Doing),
            STATUS_DONE => Ok(Self::Done),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl AsRef<str> for TaskPriority {
    fn as_ref(&self) -> &str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(format!("unknown task priority: {other}")),
        }
    }
}

/// A project grouping tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// When the project was archived, if it is.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(with = "iso")]
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    #[serde(with = "iso")]
    pub updated_at: DateTime<Utc>,
}

/// A label attachable to tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Creation timestamp.
    #[serde(with = "iso")]
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    #[serde(with = "iso")]
    pub updated_at: DateTime<Utc>,
}

/// The authenticated user and their planning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    /// Unique identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// IANA timezone name.
    pub timezone: String,
    /// Start of the working window, minutes from midnight.
    pub working_start_min: u32,
    /// End of the working window, minutes from midnight.
    pub working_end_min: u32,
    /// Default duration for new events, in minutes.
    pub default_event_duration_min: u32,
    /// Default reminder lead time, in minutes.
    pub default_reminder_min: u32,
    /// Creation timestamp.
    #[serde(with = "iso")]
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    #[serde(with = "iso")]
    pub updated_at: DateTime<Utc>,
}

/// Local/UTC bounds of a server-computed review window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRange {
    /// Window start in the user's local time, ISO without zone.
    pub start_local: String,
    /// Window end in the user's local time, ISO without zone.
    pub end_local: String,
    /// Window start in UTC.
    #[serde(with = "iso")]
    pub start_utc: DateTime<Utc>,
    /// Window end in UTC.
    #[serde(with = "iso")]
    pub end_utc: DateTime<Utc>,
}

/// Payload of `GET /today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayPayload {
    /// The day being reviewed.
    pub date: NaiveDate,
    /// IANA timezone the grouping was computed in.
    pub timezone: String,
    /// The day's bounds.
    pub range: LocalRange,
    /// Planning settings snapshot used by the grouping.
    pub user_settings: TodaySettings,
    /// Events scheduled today.
    pub events: Vec<CalendarEvent>,
    /// Task groups for the day.
    pub tasks: TodayTasks,
}

/// Settings snapshot embedded in the today payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySettings {
    /// Start of the working window, minutes from midnight.
    pub working_start_min: u32,
    /// End of the working window, minutes from midnight.
    pub working_end_min: u32,
    /// Default duration for new events, in minutes.
    pub default_event_duration_min: u32,
    /// Default reminder lead time, in minutes.
    pub default_reminder_min: u32,
}

/// Server-grouped task lists for the daily review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayTasks {
    /// Pinned tasks.
    pub pinned: Vec<Task>,
    /// Tasks due today.
    pub due_today: Vec<Task>,
    /// Tasks with a timeblock today.
    pub scheduled_today: Vec<Task>,
    /// Tasks past their due date.
    pub overdue: Vec<Task>,
}

/// Payload of `GET /stats/weekly`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStatsPayload {
    /// First day of the reviewed week.
    pub week_start: NaiveDate,
    /// IANA timezone the aggregation was computed in.
    pub timezone: String,
    /// The week's bounds.
    pub range: LocalRange,
    /// Aggregated counters.
    pub stats: WeeklyStats,
    /// Task lists backing the counters.
    pub lists: WeeklyLists,
}

/// Aggregated weekly counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// Tasks completed during the week.
    pub tasks_completed_count: u32,
    /// Tasks created during the week.
    pub tasks_created_count: u32,
    /// Events during the week.
    pub events_count: u32,
    /// Total scheduled minutes.
    pub total_scheduled_minutes: u32,
    /// Total scheduled hours.
    pub total_scheduled_hours: f64,
}

/// Task lists backing the weekly counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyLists {
    /// Tasks due this week.
    pub due_this_week: Vec<Task>,
    /// Tasks with a timeblock this week.
    pub scheduled_this_week: Vec<Task>,
    /// Unfinished tasks worth carrying over.
    pub unfinished_candidates: Vec<Task>,
}

/// Query parameters of `GET /events`.
///
/// Doubles as the cache key for the visible-range event query, so two
/// distinct windows never share a cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    /// Window start (inclusive).
    #[serde(with = "iso")]
    pub from: DateTime<Utc>,
    /// Window end (exclusive).
    #[serde(with = "iso")]
    pub to: DateTime<Utc>,
    /// Whether to embed the linked task snapshot.
    pub include_task: bool,
    /// Whether to embed reminders.
    pub include_reminders: bool,
}

/// Query parameters of `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Filter by status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Filter by project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Due-date window start.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub due_from: Option<DateTime<Utc>>,
    /// Due-date window end.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub due_to: Option<DateTime<Utc>>,
}

impl ListTasksQuery {
    /// Query filtered to a single status.
    #[must_use]
    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Body of `POST /events`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start timestamp.
    #[serde(with = "iso")]
    pub start_at: DateTime<Utc>,
    /// End timestamp (exclusive).
    #[serde(with = "iso")]
    pub end_at: DateTime<Utc>,
    /// Whether the event spans whole days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    /// Reminder lead times in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<Vec<u32>>,
}

/// Body of `PATCH /events/:id`; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New start timestamp.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    /// New end timestamp.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    /// New all-day flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    /// New linked task; `Some(None)` unlinks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_task_id: Option<Option<String>>,
    /// Replacement reminder lead times.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<Vec<u32>>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_at.is_none()
            && self.end_at.is_none()
            && self.all_day.is_none()
            && self.linked_task_id.is_none()
            && self.reminder_minutes.is_none()
    }

    /// Patch carrying only new start/end times, as produced by a drag-move or
    /// resize.
    #[must_use]
    pub fn reschedule(start_at: DateTime<Utc>, end_at: Option<DateTime<Utc>>) -> Self {
        Self {
            start_at: Some(start_at),
            end_at,
            ..Self::default()
        }
    }
}

/// Body of `POST /events/timeblocks`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeblock {
    /// The task being scheduled.
    pub task_id: String,
    /// Start timestamp resolved from the drop position.
    #[serde(with = "iso")]
    pub start_at: DateTime<Utc>,
    /// End timestamp, when the drop carried a duration hint.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    /// Alternative to `end_at`: let the server size the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Reminder lead times in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<Vec<u32>>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Initial priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Owning project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Due timestamp.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Estimated effort in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<u32>,
    /// Whether the task is pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// Body of `PATCH /tasks/:id`; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// New owning project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// New due timestamp.
    #[serde(default, with = "iso_opt", skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// New effort estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<u32>,
    /// New pinned flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// Body of `PATCH /users/me/settings`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    /// New IANA timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// New working-window start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_start_min: Option<u32>,
    /// New working-window end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_end_min: Option<u32>,
    /// New default event duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_event_duration_min: Option<u32>,
    /// New default reminder lead time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_reminder_min: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_patch_skips_unset_fields() {
        let start = DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let patch = EventPatch::reschedule(start, None);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "startAt": "2024-01-01T10:00:00.000Z" })
        );
    }

    #[test]
    fn event_patch_clears_description_with_null() {
        let patch = EventPatch {
            description: Some(None),
            ..EventPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "description": null }));
    }

    #[test]
    fn task_status_round_trips_screaming_case() {
        assert_eq!(serde_json::to_string(&TaskStatus::Doing).unwrap(), "\"DOING\"");
        let status: TaskStatus = serde_json::from_str("\"DONE\"").unwrap();
        assert!(status.is_terminal());
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
    }
}
