// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use colored::Colorize;
use serde_json::json;

use tempo_api::Task;
use tempo_core::RenderedEvent;

use crate::util::{ArgOutputFormat, format_local};

pub fn format_events(events: &[RenderedEvent], format: ArgOutputFormat) -> String {
    match format {
        ArgOutputFormat::Json => {
            let values: Vec<_> = events
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id,
                        "title": e.title,
                        "startAt": e.start_at.to_rfc3339(),
                        "endAt": e.end_at.to_rfc3339(),
                        "provisional": e.provisional,
                        "linkedTaskId": e.linked_task_id,
                    })
                })
                .collect();
            serde_json::to_string_pretty(&values).unwrap_or_default()
        }
        ArgOutputFormat::Table => {
            if events.is_empty() {
                return "No events found".italic().to_string();
            }
            events
                .iter()
                .map(|e| {
                    let span = format!(
                        "{} - {}",
                        format_local(e.start_at),
                        e.end_at.with_timezone(&chrono::Local).format("%H:%M")
                    );
                    let line = format!("{span}  {}", e.title.bold());
                    if e.provisional {
                        format!("{line} {}", "(pending)".dimmed())
                    } else {
                        line
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub fn format_tasks(tasks: &[Task], format: ArgOutputFormat) -> String {
    match format {
        ArgOutputFormat::Json => {
            serde_json::to_string_pretty(tasks).unwrap_or_default()
        }
        ArgOutputFormat::Table => {
            if tasks.is_empty() {
                return "No tasks found".italic().to_string();
            }
            tasks
                .iter()
                .map(|t| {
                    let mut line = format!(
                        "{:8} {:6} {} {}",
                        t.status.as_ref().cyan(),
                        t.priority.as_ref().dimmed(),
                        t.id,
                        t.title.bold()
                    );
                    if let Some(due) = t.due_at {
                        line.push_str(&format!(" (due {})", format_local(due)));
                    }
                    if t.pinned {
                        line.push_str(&format!(" {}", "pinned".yellow()));
                    }
                    line
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}
