// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use tempo_api::UpdateSettings;
use tempo_core::Planner;

/// Show the authenticated user's planning settings.
#[derive(Debug, Clone, Copy)]
pub struct CmdSettingsShow;

impl CmdSettingsShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show planning settings")
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!("showing settings...");
        planner.load_settings().await?;
        let me = planner.settings().ok_or("Settings not available")?;

        println!("{} {}", "Account".bold(), me.email);
        println!("  Timezone:        {}", me.timezone);
        println!(
            "  Working window:  {} - {} (minutes from midnight)",
            me.working_start_min, me.working_end_min
        );
        println!("  Event duration:  {} min", me.default_event_duration_min);
        println!("  Reminder lead:   {} min", me.default_reminder_min);
        Ok(())
    }
}

/// Update planning settings.
#[derive(Debug, Clone)]
pub struct CmdSettingsSet {
    pub timezone: Option<String>,
    pub working_start: Option<u32>,
    pub working_end: Option<u32>,
    pub event_duration: Option<u32>,
    pub reminder: Option<u32>,
}

impl CmdSettingsSet {
    pub const NAME: &str = "set";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Update planning settings")
            .arg(arg!(--timezone [TZ] "IANA timezone name"))
            .arg(
                arg!(--"working-start" [MIN] "Working window start, minutes from midnight")
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                arg!(--"working-end" [MIN] "Working window end, minutes from midnight")
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                arg!(--"event-duration" [MIN] "Default event duration in minutes")
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                arg!(--reminder [MIN] "Default reminder lead time in minutes")
                    .value_parser(value_parser!(u32)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            timezone: matches.get_one::<String>("timezone").cloned(),
            working_start: matches.get_one("working-start").copied(),
            working_end: matches.get_one("working-end").copied(),
            event_duration: matches.get_one("event-duration").copied(),
            reminder: matches.get_one("reminder").copied(),
        }
    }

    pub async fn run(self, planner: &mut Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "updating settings...");
        let payload = UpdateSettings {
            timezone: self.timezone,
            working_start_min: self.working_start,
            working_end_min: self.working_end,
            default_event_duration_min: self.event_duration,
            default_reminder_min: self.reminder,
        };

        planner.update_settings(&payload).await?;
        println!("{}", "Settings updated".bold());
        Ok(())
    }
}
