// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::Local;
use clap::{ArgMatches, Command, arg};

use tempo_core::Planner;

use crate::formatter::format_events;
use crate::util::{ArgOutputFormat, parse_date, week_window};

/// Show the calendar for one week.
#[derive(Debug, Clone)]
pub struct CmdWeek {
    pub date: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdWeek {
    pub const NAME: &str = "week";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("w")
            .about("Show the calendar for a week")
            .arg(arg!([date] "A date inside the week, YYYY-MM-DD; defaults to today"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one::<String>("date").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing week...");
        let date = match &self.date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        };

        let (from, to) = week_window(date)?;
        planner.set_visible_window(from, to);
        planner.refresh_events().await;

        println!("{}", format_events(&planner.visible_events(), self.output_format));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_week_with_date() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdWeek::command());

        let matches = cmd
            .try_get_matches_from(["test", "week", "2024-01-03", "--output-format", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("week").unwrap();
        let parsed = CmdWeek::from(sub_matches);

        assert_eq!(parsed.date, Some("2024-01-03".to_string()));
        assert_eq!(parsed.output_format, ArgOutputFormat::Json);
    }

    #[test]
    fn week_date_defaults_to_today() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdWeek::command());

        let matches = cmd.try_get_matches_from(["test", "week"]).unwrap();
        let sub_matches = matches.subcommand_matches("week").unwrap();
        let parsed = CmdWeek::from(sub_matches);
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.output_format, ArgOutputFormat::Table);
    }
}
