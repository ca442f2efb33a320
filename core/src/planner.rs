// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, NaiveDate, Utc};
use tempo_api::{
    ApiClient, ApiConfig, ApiError, CalendarEvent, CreateEvent, EventPatch, ListEventsQuery,
    ListTasksQuery, Me, Project, Tag, Task, TaskDraft, TaskPatch, TaskStatus, TodayPayload,
    UpdateSettings, WeeklyStatsPayload,
};

use crate::drag::{DragAdapter, DragError, DragPayload, DragSources};
use crate::invalidate::{Caches, DomainEvent};
use crate::notify::Notifier;
use crate::overlay::{Overlay, RenderedEvent};
use crate::range::{ViewState, VisibleRange};

/// Fallback when the user's settings have not been loaded yet.
const FALLBACK_EVENT_DURATION_MIN: u32 = 60;

/// A ticket for an in-flight event fetch: the key it will land under and the
/// cache epoch at which it started.
#[derive(Debug, Clone)]
pub struct EventsFetch {
    pub(crate) query: ListEventsQuery,
    pub(crate) epoch: u64,
}

impl EventsFetch {
    /// The query this fetch will resolve.
    #[must_use]
    pub const fn query(&self) -> &ListEventsQuery {
        &self.query
    }
}

/// The calendar client engine.
///
/// Owns the visible-range view state, both query caches, the optimistic
/// overlay, and the drag source registry; reconciles user-initiated changes
/// with the remote store. Single-threaded and cooperative: every method takes
/// `&mut self` and suspends only at network boundaries.
///
/// Per-entity operations are not serialized: two racing PATCHes on the same
/// event resolve last-response-wins. In-flight persists are never cancelled;
/// navigating away only stops new fetches against the old range.
#[derive(Debug)]
pub struct Planner {
    pub(crate) api: ApiClient,
    pub(crate) view: ViewState,
    pub(crate) caches: Caches,
    pub(crate) overlay: Overlay,
    drag_sources: DragSources,
    drag: Option<DragAdapter>,
    pub(crate) notifier: Box<dyn Notifier>,
    settings: Option<Me>,
    session_expired: bool,
}

impl Planner {
    /// Creates a planner talking to the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: ApiConfig, notifier: Box<dyn Notifier>) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(config)?,
            view: ViewState::new(),
            caches: Caches::new(),
            overlay: Overlay::new(),
            drag_sources: DragSources::new(),
            drag: None,
            notifier,
            settings: None,
            session_expired: false,
        })
    }

    // --- view state ---

    /// Records a navigation to a new visible window.
    pub fn set_visible_window(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) {
        self.view.set_window(from, to);
    }

    /// The current visible range, if any.
    #[must_use]
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.view.visible_range()
    }

    // --- event fetching ---

    /// Starts an event fetch for the current window. `None` while no window
    /// is known.
    #[must_use]
    pub fn begin_events_fetch(&self) -> Option<EventsFetch> {
        let query = self.view.query()?;
        Some(EventsFetch {
            query,
            epoch: self.caches.events.epoch(),
        })
    }

    /// Lands a resolved fetch under its own key. A late response never
    /// touches any other window's entry, and one that started before an
    /// invalidation is discarded. Returns whether the result landed.
    pub fn complete_events_fetch(
        &mut self,
        fetch: EventsFetch,
        events: Vec<CalendarEvent>,
    ) -> bool {
        self.caches.events.store(fetch.query, fetch.epoch, events)
    }

    /// Fetches and caches events for the current window. Returns whether a
    /// fresh result landed.
    pub async fn refresh_events(&mut self) -> bool {
        let Some(fetch) = self.begin_events_fetch() else {
            return false;
        };
        match self.api.list_events(&fetch.query).await {
            Ok(events) => self.complete_events_fetch(fetch, events),
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    /// The rendered view for the current window: cached truth with the
    /// optimistic overlay projected on top. Empty while nothing is cached.
    #[must_use]
    pub fn visible_events(&self) -> Vec<RenderedEvent> {
        let cached = self
            .view
            .query()
            .and_then(|q| self.caches.events.get(&q).map(Vec::as_slice))
            .unwrap_or(&[]);
        self.overlay.project(cached)
    }

    /// Looks up an event in the current window's cache, for the detail
    /// dialog. The embedded `linked_task` snapshot backs the
    /// mark-task-done bridge.
    #[must_use]
    pub fn event_detail(&self, event_id: &str) -> Option<&CalendarEvent> {
        let query = self.view.query()?;
        self.caches
            .events
            .get(&query)?
            .iter()
            .find(|e| e.id == event_id)
    }

    // --- tasks ---

    /// Fetches and caches tasks for a filter. Returns whether a fresh result
    /// landed.
    pub async fn refresh_tasks(&mut self, query: ListTasksQuery) -> bool {
        let epoch = self.caches.tasks.epoch();
        match self.api.list_tasks(&query).await {
            Ok(tasks) => self.caches.tasks.store(query, epoch, tasks),
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    /// The cached task list for a filter, if fetched.
    #[must_use]
    pub fn tasks(&self, query: &ListTasksQuery) -> Option<&[Task]> {
        self.caches.tasks.get(query).map(Vec::as_slice)
    }

    /// Creates a task and invalidates the task cache.
    pub async fn create_task(&mut self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let task = self.observe(self.api.create_task(draft).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(task)
    }

    /// Updates a task and invalidates the task cache.
    pub async fn update_task(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        let task = self.observe(self.api.update_task(id, patch).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(task)
    }

    /// Deletes a task and invalidates the task cache.
    pub async fn delete_task(&mut self, id: &str) -> Result<(), ApiError> {
        self.observe(self.api.delete_task(id).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(())
    }

    /// Replaces a task's tag set. Cached task rows embed their tags, so the
    /// task cache is invalidated.
    pub async fn set_task_tags(
        &mut self,
        task_id: &str,
        tag_ids: &[String],
    ) -> Result<(), ApiError> {
        self.observe(self.api.set_task_tags(task_id, tag_ids).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(())
    }

    // --- projects & tags ---

    /// Lists projects.
    pub async fn list_projects(&mut self, include_archived: bool) -> Result<Vec<Project>, ApiError> {
        self.observe(self.api.list_projects(include_archived).await)
    }

    /// Creates a project.
    pub async fn create_project(
        &mut self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Project, ApiError> {
        self.observe(self.api.create_project(name, color).await)
    }

    /// Renames or recolors a project. Cached task rows embed their project,
    /// so the task cache is invalidated.
    pub async fn update_project(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<Option<&str>>,
    ) -> Result<Project, ApiError> {
        let project = self.observe(self.api.update_project(id, name, color).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(project)
    }

    /// Archives or restores a project and invalidates the task cache.
    pub async fn set_project_archived(
        &mut self,
        id: &str,
        archived: bool,
    ) -> Result<Project, ApiError> {
        let project = self.observe(self.api.set_project_archived(id, archived).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(project)
    }

    /// Deletes a project and invalidates the task cache.
    pub async fn delete_project(&mut self, id: &str) -> Result<(), ApiError> {
        self.observe(self.api.delete_project(id).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(())
    }

    /// Lists tags.
    pub async fn list_tags(&mut self) -> Result<Vec<Tag>, ApiError> {
        self.observe(self.api.list_tags().await)
    }

    /// Creates a tag.
    pub async fn create_tag(&mut self, name: &str, color: Option<&str>) -> Result<Tag, ApiError> {
        self.observe(self.api.create_tag(name, color).await)
    }

    /// Renames or recolors a tag and invalidates the task cache.
    pub async fn update_tag(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<Option<&str>>,
    ) -> Result<Tag, ApiError> {
        let tag = self.observe(self.api.update_tag(id, name, color).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(tag)
    }

    /// Deletes a tag and invalidates the task cache.
    pub async fn delete_tag(&mut self, id: &str) -> Result<(), ApiError> {
        self.observe(self.api.delete_tag(id).await)?;
        self.caches.publish(DomainEvent::TasksChanged);
        Ok(())
    }

    // --- event CRUD (dialog paths) ---

    /// Creates an event from the create dialog and invalidates the event
    /// cache.
    pub async fn create_event(&mut self, payload: &CreateEvent) -> Result<CalendarEvent, ApiError> {
        let event = self.observe(self.api.create_event(payload).await)?;
        self.caches.publish(DomainEvent::EventsChanged);
        Ok(event)
    }

    /// Applies an explicit edit to an event and invalidates the event cache.
    pub async fn update_event(
        &mut self,
        id: &str,
        patch: &EventPatch,
    ) -> Result<CalendarEvent, ApiError> {
        let event = self.observe(self.api.update_event(id, patch).await)?;
        self.caches.publish(DomainEvent::EventsChanged);
        Ok(event)
    }

    /// Deletes an event and invalidates the event cache.
    pub async fn delete_event(&mut self, id: &str) -> Result<(), ApiError> {
        self.observe(self.api.delete_event(id).await)?;
        self.caches.publish(DomainEvent::EventsChanged);
        Ok(())
    }

    // --- drag sources ---

    /// Rebuilds the drag adapter if the draggable task collection changed
    /// identity since the current adapter was registered. The previous
    /// adapter is released before its replacement is acquired.
    pub fn sync_drag_sources(&mut self) -> Result<(), DragError> {
        let mut draggable: Vec<Task> = Vec::new();
        for status in [TaskStatus::Todo, TaskStatus::Doing] {
            if let Some(tasks) = self.caches.tasks.get(&ListTasksQuery::with_status(status)) {
                draggable.extend(tasks.iter().cloned());
            }
        }

        if let Some(adapter) = &self.drag
            && adapter.same_identity(&draggable)
        {
            return Ok(());
        }

        if let Some(adapter) = self.drag.take() {
            self.drag_sources.release(adapter);
        }
        let adapter = self
            .drag_sources
            .acquire(&draggable, self.default_event_duration_min())?;
        self.drag = Some(adapter);
        Ok(())
    }

    /// The current drag payloads, pinned tasks first. Empty until
    /// [`sync_drag_sources`](Self::sync_drag_sources) has run.
    #[must_use]
    pub fn drag_payloads(&self) -> &[DragPayload] {
        self.drag.as_ref().map_or(&[], DragAdapter::payloads)
    }

    /// The drag payload for one task, if draggable.
    #[must_use]
    pub fn drag_payload(&self, task_id: &str) -> Option<&DragPayload> {
        self.drag.as_ref()?.payload_for(task_id)
    }

    // --- settings & review ---

    /// Loads the authenticated user's planning settings.
    pub async fn load_settings(&mut self) -> Result<(), ApiError> {
        let me = self.observe(self.api.me().await)?;
        self.settings = Some(me);
        Ok(())
    }

    /// The loaded settings, if any.
    #[must_use]
    pub const fn settings(&self) -> Option<&Me> {
        self.settings.as_ref()
    }

    /// The default duration hint for new timeblocks, in minutes.
    #[must_use]
    pub fn default_event_duration_min(&self) -> u32 {
        self.settings
            .as_ref()
            .map_or(FALLBACK_EVENT_DURATION_MIN, |me| {
                me.default_event_duration_min
            })
    }

    /// Updates planning settings and refreshes the local snapshot.
    pub async fn update_settings(&mut self, payload: &UpdateSettings) -> Result<(), ApiError> {
        let me = self.observe(self.api.update_settings(payload).await)?;
        self.settings = Some(me);
        Ok(())
    }

    /// Fetches the grouped daily snapshot.
    pub async fn today(&mut self, date: Option<NaiveDate>) -> Result<TodayPayload, ApiError> {
        self.observe(self.api.today(date).await)
    }

    /// Fetches aggregated weekly stats.
    pub async fn weekly_stats(
        &mut self,
        week_start: NaiveDate,
    ) -> Result<WeeklyStatsPayload, ApiError> {
        self.observe(self.api.weekly_stats(week_start).await)
    }

    /// Whether a 401 has been observed; the session must be re-established.
    #[must_use]
    pub const fn session_expired(&self) -> bool {
        self.session_expired
    }

    // --- error plumbing ---

    /// Passes a result through, latching session expiry on the way. Other
    /// errors propagate to the caller untouched, matching the inline-surface
    /// behavior of form paths.
    pub(crate) fn observe<T>(&mut self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result
            && err.is_session_expired()
        {
            self.latch_session_expiry();
        }
        result
    }

    /// Consumes an error from a reconciler path: latch session expiry and
    /// surface a generic notification. Reconcilers compensate locally and
    /// never propagate.
    pub(crate) fn report(&mut self, err: ApiError) {
        tracing::debug!(%err, "mutation failed");
        if err.is_session_expired() {
            self.latch_session_expiry();
        } else {
            self.notifier.notify(&err.to_string());
        }
    }

    fn latch_session_expiry(&mut self) {
        self.session_expired = true;
        self.caches.publish(DomainEvent::SessionExpired);
        self.notifier
            .notify("Session expired, please log in again");
    }
}
