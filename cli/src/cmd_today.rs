// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use tempo_core::{Planner, RenderedEvent};

use crate::formatter::{format_events, format_tasks};
use crate::util::{ArgOutputFormat, parse_date};

/// The daily review: today's events and grouped tasks.
#[derive(Debug, Clone)]
pub struct CmdToday {
    pub date: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdToday {
    pub const NAME: &str = "today";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the daily review")
            .arg(arg!([date] "The day to review, YYYY-MM-DD; defaults to today"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one::<String>("date").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating daily review...");
        let date = self.date.as_deref().map(parse_date).transpose()?;
        let payload = planner.today(date).await?;

        if self.output_format == ArgOutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        println!("{} {}", "Today".bold(), payload.date);

        println!("\n{}", "Events".bold());
        let rendered: Vec<RenderedEvent> = payload
            .events
            .iter()
            .map(|e| RenderedEvent {
                id: e.id.clone(),
                title: e.title.clone(),
                start_at: e.start_at,
                end_at: e.end_at,
                provisional: false,
                linked_task_id: e.linked_task_id.clone(),
            })
            .collect();
        println!("{}", format_events(&rendered, self.output_format));

        for (label, tasks) in [
            ("Pinned", &payload.tasks.pinned),
            ("Due today", &payload.tasks.due_today),
            ("Scheduled today", &payload.tasks.scheduled_today),
            ("Overdue", &payload.tasks.overdue),
        ] {
            if !tasks.is_empty() {
                println!("\n{}", label.bold());
                println!("{}", format_tasks(tasks, self.output_format));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_today_with_date() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdToday::command());

        let matches = cmd
            .try_get_matches_from(["test", "today", "2024-01-05"])
            .unwrap();
        let parsed = CmdToday::from(matches.subcommand_matches("today").unwrap());
        assert_eq!(parsed.date, Some("2024-01-05".to_string()));
    }
}
