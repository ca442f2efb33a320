// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Client-side engine for the Tempo calendar: visible-range view state,
//! range-keyed query caches, the drag source adapter, and the optimistic
//! reconcilers that keep the rendered calendar honest against the backend.
//!
//! The model is single-threaded and cooperative: the [`Planner`] façade takes
//! `&mut self` everywhere and suspends only at network boundaries. Remote
//! state is authoritative; caches are write-through-invalidate only.

mod cache;
mod drag;
mod invalidate;
mod notify;
mod overlay;
mod planner;
mod range;
mod reconcile;

pub use crate::cache::QueryCache;
pub use crate::drag::{DragAdapter, DragError, DragPayload, DragSources, duration_hhmm, parse_hhmm};
pub use crate::invalidate::{Caches, DomainEvent, EventCache, InvalidationSubscriber, TaskCache};
pub use crate::notify::{BufferedNotifier, Notifier, NullNotifier};
pub use crate::overlay::{Overlay, PlacementId, ProvisionalPlacement, RenderedEvent};
pub use crate::planner::{EventsFetch, Planner};
pub use crate::range::{ViewState, VisibleRange};
pub use crate::reconcile::{CompleteOutcome, DropOutcome, MoveOutcome, TaskDrop};
