// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::Duration;
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use tempo_api::CreateEvent;
use tempo_core::{CompleteOutcome, MoveOutcome, Planner};

use crate::util::{format_local, parse_datetime};

/// Add a new event.
#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub description: Option<String>,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(arg!(<title> "Event title"))
            .arg(arg!(<start> "Start time"))
            .arg(arg!([end] "End time; defaults to start plus the default duration"))
            .arg(arg!(-d --description [TEXT] "Event description"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: matches.get_one::<String>("title").cloned().unwrap_or_default(),
            start: matches.get_one::<String>("start").cloned().unwrap_or_default(),
            end: matches.get_one::<String>("end").cloned(),
            description: matches.get_one::<String>("description").cloned(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let start_at = parse_datetime(&self.start)?;
        let end_at = match &self.end {
            Some(end) => parse_datetime(end)?,
            None => {
                if planner.settings().is_none() {
                    planner.load_settings().await.ok();
                }
                start_at + Duration::minutes(i64::from(planner.default_event_duration_min()))
            }
        };

        let event = planner
            .create_event(&CreateEvent {
                title: self.title,
                description: self.description,
                start_at,
                end_at,
                all_day: None,
                reminder_minutes: None,
            })
            .await?;

        println!(
            "Created event {} at {}",
            event.id.bold(),
            format_local(event.start_at)
        );
        Ok(())
    }
}

/// Move or resize an existing event.
#[derive(Debug, Clone)]
pub struct CmdEventMove {
    pub id: String,
    pub start: String,
    pub end: Option<String>,
}

impl CmdEventMove {
    pub const NAME: &str = "move";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Move an event to a new time")
            .arg(arg!(<id> "Event id"))
            .arg(arg!(<start> "New start time"))
            .arg(arg!([end] "New end time; omitted keeps the current end"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: matches.get_one::<String>("id").cloned().unwrap_or_default(),
            start: matches.get_one::<String>("start").cloned().unwrap_or_default(),
            end: matches.get_one::<String>("end").cloned(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving event...");
        let start_at = parse_datetime(&self.start)?;
        let end_at = self.end.as_deref().map(parse_datetime).transpose()?;

        match planner.move_event(&self.id, start_at, end_at).await {
            MoveOutcome::Confirmed(event) => {
                println!(
                    "Moved event {} to {}",
                    event.id.bold(),
                    format_local(event.start_at)
                );
            }
            MoveOutcome::Reverted => {
                println!("{}", "Move rejected, event left unchanged".italic());
            }
        }
        Ok(())
    }
}

/// Delete an event.
#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(arg!(<id> "Event id"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: matches.get_one::<String>("id").cloned().unwrap_or_default(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        planner.delete_event(&self.id).await?;
        println!("Deleted event {}", self.id.bold());
        Ok(())
    }
}

/// Complete the task linked to an event.
#[derive(Debug, Clone)]
pub struct CmdEventDone {
    pub id: String,
}

impl CmdEventDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark the task linked to an event as done")
            .arg(arg!(<id> "Event id"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: matches.get_one::<String>("id").cloned().unwrap_or_default(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "completing linked task...");
        match planner.mark_linked_task_done(&self.id).await {
            CompleteOutcome::Completed(event) => {
                println!("Completed task linked to {}", event.title.bold());
            }
            CompleteOutcome::Failed => {
                println!("{}", "Could not complete the linked task".italic());
            }
        }
        Ok(())
    }
}
