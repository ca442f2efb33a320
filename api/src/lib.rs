// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Typed async client for the Tempo REST backend (events, timeblocks, tasks,
//! projects, tags, review snapshots, user settings).
//!
//! Every response is enveloped as `{success, statusCode, message, data}`; the
//! client unwraps `data` uniformly and maps failures onto [`ApiError`].

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod client;
mod config;
mod datetime;
mod envelope;
mod error;
mod http;
mod types;

pub use crate::client::ApiClient;
pub use crate::config::ApiConfig;
pub use crate::datetime::{iso, iso_opt};
pub use crate::envelope::{Ack, Envelope, LinkedTaskDone, Message};
pub use crate::error::ApiError;
pub use crate::types::{
    CalendarEvent, CreateEvent, CreateTimeblock, EventPatch, ListEventsQuery, ListTasksQuery,
    LocalRange, Me, Project, Reminder, Tag, Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus,
    TodayPayload, TodaySettings, TodayTasks, UpdateSettings, WeeklyLists, WeeklyStats,
    WeeklyStatsPayload,
};
