// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! High-level client for the backend REST surface.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::envelope::{Ack, Envelope, LinkedTaskDone};
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::{
    CalendarEvent, CreateEvent, CreateTimeblock, EventPatch, ListEventsQuery, ListTasksQuery, Me,
    Project, Tag, Task, TaskDraft, TaskPatch, TodayPayload, UpdateSettings, WeeklyStatsPayload,
};

/// Client for the Tempo backend.
///
/// Remote state is authoritative: this client never treats a response it has
/// already seen as truth beyond the current render pass, and no call is ever
/// retried. Transient failures require the user to act again.
///
/// # Example
///
/// ```ignore
/// use tempo_api::{ApiClient, ApiConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ApiConfig {
///     base_url: "https://api.tempo.example".to_string(),
///     token: Some("secret".to_string()),
///     ..Default::default()
/// })?;
/// let me = client.me().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Arc<HttpClient>,
}

impl ApiClient {
    /// Creates a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    // --- events ---

    /// Lists events in a visible range.
    pub async fn list_events(
        &self,
        query: &ListEventsQuery,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        tracing::debug!(from = %query.from, to = %query.to, "listing events");
        let req = self.http.build_request(Method::GET, "/events").query(query);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Creates an event from the create dialog.
    pub async fn create_event(&self, payload: &CreateEvent) -> Result<CalendarEvent, ApiError> {
        let req = self.http.build_request(Method::POST, "/events").json(payload);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Applies a partial update to an event.
    pub async fn update_event(
        &self,
        id: &str,
        patch: &EventPatch,
    ) -> Result<CalendarEvent, ApiError> {
        let req = self
            .http
            .build_request(Method::PATCH, &format!("/events/{id}"))
            .json(patch);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Deletes an event.
    pub async fn delete_event(&self, id: &str) -> Result<Ack, ApiError> {
        let req = self
            .http
            .build_request(Method::DELETE, &format!("/events/{id}"));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Creates a timeblock: an event scheduling an existing task onto a time
    /// range, carrying a back-reference to that task.
    pub async fn create_timeblock(
        &self,
        payload: &CreateTimeblock,
    ) -> Result<CalendarEvent, ApiError> {
        tracing::debug!(task_id = %payload.task_id, start_at = %payload.start_at, "creating timeblock");
        let req = self
            .http
            .build_request(Method::POST, "/events/timeblocks")
            .json(payload);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Marks the task linked to an event as done, via the dedicated endpoint
    /// rather than a generic task update.
    pub async fn mark_linked_task_done(&self, event_id: &str) -> Result<LinkedTaskDone, ApiError> {
        let req = self
            .http
            .build_request(Method::PATCH, &format!("/events/{event_id}/linked-task/done"));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    // --- tasks ---

    /// Lists tasks matching a filter.
    pub async fn list_tasks(&self, query: &ListTasksQuery) -> Result<Vec<Task>, ApiError> {
        let req = self.http.build_request(Method::GET, "/tasks").query(query);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Creates a task.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let req = self.http.build_request(Method::POST, "/tasks").json(draft);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Applies a partial update to a task.
    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        let req = self
            .http
            .build_request(Method::PATCH, &format!("/tasks/{id}"))
            .json(patch);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, id: &str) -> Result<Ack, ApiError> {
        let req = self
            .http
            .build_request(Method::DELETE, &format!("/tasks/{id}"));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Replaces the set of tags on a task.
    pub async fn set_task_tags(&self, task_id: &str, tag_ids: &[String]) -> Result<Ack, ApiError> {
        let req = self
            .http
            .build_request(Method::PATCH, &format!("/tasks/{task_id}/tags"))
            .json(&serde_json::json!({ "tagIds": tag_ids }));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    // --- projects ---

    /// Lists projects.
    pub async fn list_projects(&self, include_archived: bool) -> Result<Vec<Project>, ApiError> {
        let req = self
            .http
            .build_request(Method::GET, "/projects")
            .query(&[("includeArchived", include_archived)]);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Creates a project.
    pub async fn create_project(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Project, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, "/projects")
            .json(&serde_json::json!({ "name": name, "color": color }));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Renames or recolors a project.
    pub async fn update_project(
        &self,
        id: &str,
        name: Option<&str>,
        color: Option<Option<&str>>,
    ) -> Result<Project, ApiError> {
        let mut body = serde_json::Map::new();
        if let Some(name) = name {
            body.insert("name".to_string(), name.into());
        }
        if let Some(color) = color {
            body.insert("color".to_string(), color.into());
        }
        let req = self
            .http
            .build_request(Method::PATCH, &format!("/projects/{id}"))
            .json(&body);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Archives or restores a project.
    pub async fn set_project_archived(
        &self,
        id: &str,
        archived: bool,
    ) -> Result<Project, ApiError> {
        let req = self
            .http
            .build_request(Method::PATCH, &format!("/projects/{id}/archive"))
            .json(&serde_json::json!({ "archived": archived }));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Deletes a project.
    pub async fn delete_project(&self, id: &str) -> Result<Ack, ApiError> {
        let req = self
            .http
            .build_request(Method::DELETE, &format!("/projects/{id}"));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    // --- tags ---

    /// Lists tags.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let req = self.http.build_request(Method::GET, "/tags");
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Creates a tag.
    pub async fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, "/tags")
            .json(&serde_json::json!({ "name": name, "color": color }));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Renames or recolors a tag.
    pub async fn update_tag(
        &self,
        id: &str,
        name: Option<&str>,
        color: Option<Option<&str>>,
    ) -> Result<Tag, ApiError> {
        let mut body = serde_json::Map::new();
        if let Some(name) = name {
            body.insert("name".to_string(), name.into());
        }
        if let Some(color) = color {
            body.insert("color".to_string(), color.into());
        }
        let req = self
            .http
            .build_request(Method::PATCH, &format!("/tags/{id}"))
            .json(&body);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Deletes a tag.
    pub async fn delete_tag(&self, id: &str) -> Result<Ack, ApiError> {
        let req = self
            .http
            .build_request(Method::DELETE, &format!("/tags/{id}"));
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    // --- review & settings ---

    /// Fetches the grouped daily snapshot.
    pub async fn today(&self, date: Option<NaiveDate>) -> Result<TodayPayload, ApiError> {
        let mut req = self.http.build_request(Method::GET, "/today");
        if let Some(date) = date {
            req = req.query(&[("date", date.to_string())]);
        }
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Fetches aggregated stats for the week starting at `week_start`.
    pub async fn weekly_stats(&self, week_start: NaiveDate) -> Result<WeeklyStatsPayload, ApiError> {
        let req = self
            .http
            .build_request(Method::GET, "/stats/weekly")
            .query(&[("weekStart", week_start.to_string())]);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Fetches the authenticated user and their planning settings.
    pub async fn me(&self) -> Result<Me, ApiError> {
        let req = self.http.build_request(Method::GET, "/users/me");
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Updates planning settings.
    pub async fn update_settings(&self, payload: &UpdateSettings) -> Result<Me, ApiError> {
        let req = self
            .http
            .build_request(Method::PATCH, "/users/me/settings")
            .json(payload);
        let resp = self.http.execute(req).await?;
        Self::unwrap(resp).await
    }

    /// Decodes an enveloped response body and unwraps its `data`.
    async fn unwrap<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let env: Envelope<T> = resp
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        env.into_data()
    }
}
