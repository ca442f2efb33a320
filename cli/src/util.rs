// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::offset::LocalResult;
use chrono::{
    DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday,
};
use clap::{Arg, ArgMatches, arg, value_parser};
use colored::Colorize;

use tempo_core::Notifier;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Notifier that surfaces planner warnings on stderr.
#[derive(Debug, Clone, Copy)]
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{} {message}", "Warning:".yellow());
    }
}

/// Parses a timestamp from the command line.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM` in local time, or `HH:MM` meaning
/// today in local time.
pub fn parse_datetime(dt: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(dt) {
        Ok(dt.with_timezone(&Utc))
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(dt, "%Y-%m-%d %H:%M") {
        local_to_utc(dt)
    } else if let Ok(time) = NaiveTime::parse_from_str(dt, "%H:%M") {
        local_to_utc(NaiveDateTime::new(Local::now().date_naive(), time))
    } else {
        Err("Invalid date format. Expected RFC 3339, YYYY-MM-DD HH:MM or HH:MM".to_string())
    }
}

pub fn parse_date(d: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(d, "%Y-%m-%d")
        .map_err(|_| "Invalid date format. Expected YYYY-MM-DD".to_string())
}

/// The UTC bounds of the local calendar week containing `date`, Monday to
/// the following Monday.
pub fn week_window(date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), String> {
    let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
    let next_monday = monday + Days::new(7);
    let from = local_to_utc(monday.and_hms_opt(0, 0, 0).ok_or("Invalid week start")?)?;
    let to = local_to_utc(next_monday.and_hms_opt(0, 0, 0).ok_or("Invalid week end")?)?;
    Ok((from, to))
}

pub fn format_local(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn local_to_utc(dt: NaiveDateTime) -> Result<DateTime<Utc>, String> {
    match Local.from_local_datetime(&dt) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(dt1, _) => {
            tracing::warn!(?dt, "ambiguous local time, picking earliest");
            Ok(dt1.with_timezone(&Utc))
        }
        LocalResult::None => Err(format!("Invalid local time: {dt}")),
    }
}
