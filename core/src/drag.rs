// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The drag source adapter: tasks exposed as draggable calendar payloads.

use std::collections::BTreeSet;
use std::fmt;

use tempo_api::Task;

/// Formats a duration hint as a clock-style `HH:MM` span, the shape the host
/// calendar uses to size the ghost event while dragging.
#[must_use]
pub fn duration_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses an `HH:MM` span back into minutes.
#[must_use]
pub fn parse_hhmm(span: &str) -> Option<u32> {
    let (h, m) = span.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    (m < 60).then(|| h * 60 + m)
}

/// The payload synthesized for one draggable task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    /// Display title.
    pub title: String,
    /// Duration hint as an `HH:MM` span.
    pub duration: String,
    /// The task's identity, carried as an opaque extension attribute.
    pub task_id: String,
}

/// Errors from the drag source registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    /// A previous adapter is still registered; it must be released before a
    /// replacement is built, else duplicate drag handlers would accumulate on
    /// the same container.
    AdapterStillActive,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdapterStillActive => {
                write!(f, "previous drag adapter has not been released")
            }
        }
    }
}

impl std::error::Error for DragError {}

/// Registry scoping the lifetime of drag adapters to their container.
///
/// At most one adapter may be live at a time: one adapter per distinct
/// item-set version, acquired after the previous one is released.
#[derive(Debug, Default)]
pub struct DragSources {
    active: Option<u64>,
    next_version: u64,
}

impl DragSources {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an adapter over the current task collection.
    ///
    /// Tasks with a terminal status are not draggable and are skipped; pinned
    /// tasks sort first. Every payload carries the shared default duration
    /// hint.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AdapterStillActive`] if the previous adapter was
    /// not released.
    pub fn acquire(
        &mut self,
        tasks: &[Task],
        default_duration_min: u32,
    ) -> Result<DragAdapter, DragError> {
        if self.active.is_some() {
            return Err(DragError::AdapterStillActive);
        }

        let mut draggable: Vec<&Task> = tasks
            .iter()
            .filter(|t| !t.status.is_terminal())
            .collect();
        draggable.sort_by_key(|t| !t.pinned);

        let duration = duration_hhmm(default_duration_min);
        let identity: BTreeSet<String> = draggable.iter().map(|t| t.id.clone()).collect();
        let payloads = draggable
            .into_iter()
            .map(|t| DragPayload {
                title: t.title.clone(),
                duration: duration.clone(),
                task_id: t.id.clone(),
            })
            .collect();

        let version = self.next_version;
        self.next_version += 1;
        self.active = Some(version);
        tracing::debug!(version, items = identity.len(), "drag adapter registered");

        Ok(DragAdapter {
            version,
            identity,
            payloads,
        })
    }

    /// Releases an adapter, allowing a successor to be acquired.
    pub fn release(&mut self, adapter: DragAdapter) {
        if self.active == Some(adapter.version) {
            tracing::debug!(version = adapter.version, "drag adapter released");
            self.active = None;
        }
    }
}

/// A registered drag source over one version of the task collection.
#[derive(Debug)]
pub struct DragAdapter {
    version: u64,
    identity: BTreeSet<String>,
    payloads: Vec<DragPayload>,
}

impl DragAdapter {
    /// The synthesized payloads, pinned tasks first.
    #[must_use]
    pub fn payloads(&self) -> &[DragPayload] {
        &self.payloads
    }

    /// The payload for one task, if it is draggable.
    #[must_use]
    pub fn payload_for(&self, task_id: &str) -> Option<&DragPayload> {
        self.payloads.iter().find(|p| p.task_id == task_id)
    }

    /// Whether this adapter still matches the collection's identity. A task
    /// added or removed changes identity; edits to an existing task do not.
    #[must_use]
    pub fn same_identity(&self, tasks: &[Task]) -> bool {
        let current: BTreeSet<&str> = tasks
            .iter()
            .filter(|t| !t.status.is_terminal())
            .map(|t| t.id.as_str())
            .collect();
        self.identity.len() == current.len()
            && self.identity.iter().all(|id| current.contains(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempo_api::{TaskPriority, TaskStatus};

    use super::*;

    fn task(id: &str, status: TaskStatus, pinned: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: None,
            status,
            priority: TaskPriority::Medium,
            due_at: None,
            estimate_minutes: None,
            pinned,
            project_id: None,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tag_ids: None,
        }
    }

    #[test]
    fn formats_clock_style_durations() {
        assert_eq!(duration_hhmm(60), "01:00");
        assert_eq!(duration_hhmm(90), "01:30");
        assert_eq!(duration_hhmm(45), "00:45");
        assert_eq!(duration_hhmm(600), "10:00");
    }

    #[test]
    fn parses_clock_style_durations() {
        assert_eq!(parse_hhmm("01:00"), Some(60));
        assert_eq!(parse_hhmm("00:45"), Some(45));
        assert_eq!(parse_hhmm("10:30"), Some(630));
        assert_eq!(parse_hhmm("1:75"), None);
        assert_eq!(parse_hhmm("abc"), None);
    }

    #[test]
    fn terminal_tasks_are_not_draggable() {
        let tasks = vec![
            task("a", TaskStatus::Todo, false),
            task("b", TaskStatus::Done, false),
            task("c", TaskStatus::Doing, false),
        ];
        let mut sources = DragSources::new();
        let adapter = sources.acquire(&tasks, 60).unwrap();

        assert_eq!(adapter.payloads().len(), 2);
        assert!(adapter.payload_for("b").is_none());
        assert_eq!(adapter.payload_for("a").unwrap().duration, "01:00");
    }

    #[test]
    fn pinned_tasks_sort_first() {
        let tasks = vec![
            task("a", TaskStatus::Todo, false),
            task("b", TaskStatus::Todo, true),
        ];
        let mut sources = DragSources::new();
        let adapter = sources.acquire(&tasks, 30).unwrap();
        assert_eq!(adapter.payloads()[0].task_id, "b");
    }

    #[test]
    fn second_acquire_requires_release() {
        let tasks = vec![task("a", TaskStatus::Todo, false)];
        let mut sources = DragSources::new();
        let adapter = sources.acquire(&tasks, 60).unwrap();

        assert_eq!(
            sources.acquire(&tasks, 60).unwrap_err(),
            DragError::AdapterStillActive
        );

        sources.release(adapter);
        assert!(sources.acquire(&tasks, 60).is_ok());
    }

    #[test]
    fn identity_tracks_membership_not_edits() {
        let mut tasks = vec![task("a", TaskStatus::Todo, false)];
        let mut sources = DragSources::new();
        let adapter = sources.acquire(&tasks, 60).unwrap();

        tasks[0].title = "renamed".to_string();
        assert!(adapter.same_identity(&tasks));

        tasks.push(task("b", TaskStatus::Doing, false));
        assert!(!adapter.same_identity(&tasks));
    }
}
