// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Datelike, Days, Local};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use tempo_core::Planner;

use crate::formatter::format_tasks;
use crate::util::{ArgOutputFormat, parse_date};

/// The weekly review: counters and supporting task lists.
#[derive(Debug, Clone)]
pub struct CmdStats {
    pub week: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdStats {
    pub const NAME: &str = "stats";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the weekly review")
            .arg(arg!([week] "First day of the week, YYYY-MM-DD; defaults to this week"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            week: matches.get_one::<String>("week").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating weekly review...");
        let week_start = match &self.week {
            Some(d) => parse_date(d)?,
            None => {
                let today = Local::now().date_naive();
                today - Days::new(u64::from(today.weekday().num_days_from_monday()))
            }
        };

        let payload = planner.weekly_stats(week_start).await?;

        if self.output_format == ArgOutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        println!("{} {}", "Week of".bold(), payload.week_start);
        println!("  Tasks completed: {}", payload.stats.tasks_completed_count);
        println!("  Tasks created:   {}", payload.stats.tasks_created_count);
        println!("  Events:          {}", payload.stats.events_count);
        println!(
            "  Scheduled:       {:.1}h ({} min)",
            payload.stats.total_scheduled_hours, payload.stats.total_scheduled_minutes
        );

        for (label, tasks) in [
            ("Due this week", &payload.lists.due_this_week),
            ("Scheduled this week", &payload.lists.scheduled_this_week),
            ("Unfinished candidates", &payload.lists.unfinished_candidates),
        ] {
            if !tasks.is_empty() {
                println!("\n{}", label.bold());
                println!("{}", format_tasks(tasks, self.output_format));
            }
        }
        Ok(())
    }
}
