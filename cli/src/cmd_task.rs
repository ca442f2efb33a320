// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use tempo_api::{ListTasksQuery, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use tempo_core::{DropOutcome, Planner, duration_hhmm};

use crate::formatter::format_tasks;
use crate::util::{ArgOutputFormat, format_local, parse_datetime};

/// List tasks.
#[derive(Debug, Clone)]
pub struct CmdTaskList {
    pub status: Option<TaskStatus>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List tasks")
            .arg(
                arg!(-s --status [STATUS] "Filter by status")
                    .value_parser(value_parser!(TaskStatus)),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            status: matches.get_one("status").copied(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing tasks...");
        let query = ListTasksQuery {
            status: self.status,
            ..ListTasksQuery::default()
        };
        planner.refresh_tasks(query.clone()).await;

        let tasks = planner.tasks(&query).unwrap_or(&[]);
        println!("{}", format_tasks(tasks, self.output_format));
        Ok(())
    }
}

/// Add a new task.
#[derive(Debug, Clone)]
pub struct CmdTaskNew {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub priority: Option<TaskPriority>,
    pub pinned: bool,
}

impl CmdTaskNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new task")
            .arg(arg!(<title> "Task title"))
            .arg(arg!(-d --description [TEXT] "Task description"))
            .arg(arg!(--due [WHEN] "Due time"))
            .arg(
                arg!(-p --priority [PRIORITY] "Priority")
                    .value_parser(value_parser!(TaskPriority)),
            )
            .arg(arg!(--pin "Pin the task"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: matches.get_one::<String>("title").cloned().unwrap_or_default(),
            description: matches.get_one::<String>("description").cloned(),
            due: matches.get_one::<String>("due").cloned(),
            priority: matches.get_one("priority").copied(),
            pinned: matches.get_flag("pin"),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new task...");
        let due_at = self.due.as_deref().map(parse_datetime).transpose()?;

        let task = planner
            .create_task(&TaskDraft {
                title: self.title,
                description: self.description,
                status: None,
                priority: self.priority,
                project_id: None,
                due_at,
                estimate_minutes: None,
                pinned: self.pinned.then_some(true),
            })
            .await?;

        println!("Created task {} {}", task.id.bold(), task.title);
        Ok(())
    }
}

/// Mark a task as done.
#[derive(Debug, Clone)]
pub struct CmdTaskDone {
    pub ids: Vec<String>,
}

impl CmdTaskDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark tasks as done")
            .arg(arg!(<id> ... "Task ids"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: matches
                .get_many::<String>("id")
                .unwrap_or_default()
                .cloned()
                .collect(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "completing tasks...");
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        };
        for id in &self.ids {
            let task = planner.update_task(id, &patch).await?;
            println!("Done: {} {}", task.id.bold(), task.title);
        }
        Ok(())
    }
}

/// Delete a task.
#[derive(Debug, Clone)]
pub struct CmdTaskDelete {
    pub id: String,
}

impl CmdTaskDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a task")
            .arg(arg!(<id> "Task id"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: matches.get_one::<String>("id").cloned().unwrap_or_default(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting task...");
        planner.delete_task(&self.id).await?;
        println!("Deleted task {}", self.id.bold());
        Ok(())
    }
}

/// Schedule a task as a calendar timeblock.
#[derive(Debug, Clone)]
pub struct CmdTaskPlan {
    pub id: String,
    pub start: String,
    pub duration: Option<u32>,
}

impl CmdTaskPlan {
    pub const NAME: &str = "plan";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Schedule a task on the calendar")
            .arg(arg!(<id> "Task id"))
            .arg(arg!(<start> "Start time"))
            .arg(
                arg!(--duration [MINUTES] "Timeblock length in minutes")
                    .value_parser(value_parser!(u32)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: matches.get_one::<String>("id").cloned().unwrap_or_default(),
            start: matches.get_one::<String>("start").cloned().unwrap_or_default(),
            duration: matches.get_one("duration").copied(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "planning task...");
        let start_at = parse_datetime(&self.start)?;

        for status in [TaskStatus::Todo, TaskStatus::Doing] {
            planner
                .refresh_tasks(ListTasksQuery::with_status(status))
                .await;
        }
        planner.sync_drag_sources()?;

        let mut payload = planner
            .drag_payload(&self.id)
            .ok_or_else(|| format!("Task {} is not schedulable", self.id))?
            .clone();
        if let Some(minutes) = self.duration {
            payload.duration = duration_hhmm(minutes);
        }

        let drop = planner.begin_drop(&payload, start_at);
        match planner.receive_drop(drop).await {
            DropOutcome::Placed(event) => {
                println!(
                    "Planned {} at {}",
                    payload.title.bold(),
                    format_local(event.start_at)
                );
            }
            DropOutcome::Ignored => {
                println!("{}", "Nothing to plan".italic());
            }
            DropOutcome::Failed => {
                println!("{}", "Scheduling rejected, calendar left unchanged".italic());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_task_list_with_status() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdTaskList::command());

        let matches = cmd
            .try_get_matches_from(["test", "list", "--status", "todo"])
            .unwrap();
        let parsed = CmdTaskList::from(matches.subcommand_matches("list").unwrap());
        assert_eq!(parsed.status, Some(TaskStatus::Todo));
    }

    #[test]
    fn parses_task_new() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdTaskNew::command());

        let matches = cmd
            .try_get_matches_from([
                "test", "new", "Write report", "--priority", "high", "--pin",
            ])
            .unwrap();
        let parsed = CmdTaskNew::from(matches.subcommand_matches("new").unwrap());

        assert_eq!(parsed.title, "Write report");
        assert_eq!(parsed.priority, Some(TaskPriority::High));
        assert!(parsed.pinned);
    }

    #[test]
    fn parses_task_done_multiple_ids() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdTaskDone::command());

        let matches = cmd
            .try_get_matches_from(["test", "done", "t1", "t2"])
            .unwrap();
        let parsed = CmdTaskDone::from(matches.subcommand_matches("done").unwrap());
        assert_eq!(parsed.ids, vec!["t1".to_string(), "t2".to_string()]);
    }

    #[test]
    fn parses_task_plan() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdTaskPlan::command());

        let matches = cmd
            .try_get_matches_from(["test", "plan", "t1", "2024-01-01 09:00", "--duration", "90"])
            .unwrap();
        let parsed = CmdTaskPlan::from(matches.subcommand_matches("plan").unwrap());

        assert_eq!(parsed.id, "t1");
        assert_eq!(parsed.duration, Some(90));
    }
}
