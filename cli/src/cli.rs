// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};

use tempo_core::Planner;

use crate::cmd_event::{CmdEventDelete, CmdEventDone, CmdEventMove, CmdEventNew};
use crate::cmd_settings::{CmdSettingsSet, CmdSettingsShow};
use crate::cmd_stats::CmdStats;
use crate::cmd_task::{CmdTaskDelete, CmdTaskDone, CmdTaskList, CmdTaskNew, CmdTaskPlan};
use crate::cmd_today::CmdToday;
use crate::cmd_week::CmdWeek;
use crate::config::parse_config;
use crate::util::{ArgOutputFormat, TermNotifier};

/// Run the Tempo command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new("tempo")
            .about("Personal productivity client: tasks, calendar timeblocks, daily review")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to the daily review
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/tempo/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/tempo/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdWeek::command())
            .subcommand(CmdToday::command())
            .subcommand(CmdStats::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage calendar events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventMove::command())
                    .subcommand(CmdEventDelete::command())
                    .subcommand(CmdEventDone::command()),
            )
            .subcommand(
                Command::new("task")
                    .alias("t")
                    .about("Manage your task list")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTaskList::command())
                    .subcommand(CmdTaskNew::command())
                    .subcommand(CmdTaskDone::command())
                    .subcommand(CmdTaskDelete::command())
                    .subcommand(CmdTaskPlan::command()),
            )
            .subcommand(
                Command::new("settings")
                    .about("Show or update planning settings")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdSettingsShow::command())
                    .subcommand(CmdSettingsSet::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdWeek::NAME, matches)) => Week(CmdWeek::from(matches)),
            Some((CmdToday::NAME, matches)) => Today(CmdToday::from(matches)),
            Some((CmdStats::NAME, matches)) => Stats(CmdStats::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventMove::NAME, matches)) => EventMove(CmdEventMove::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => EventDelete(CmdEventDelete::from(matches)),
                Some((CmdEventDone::NAME, matches)) => EventDone(CmdEventDone::from(matches)),
                _ => unreachable!(),
            },
            Some(("task", matches)) => match matches.subcommand() {
                Some((CmdTaskList::NAME, matches)) => TaskList(CmdTaskList::from(matches)),
                Some((CmdTaskNew::NAME, matches)) => TaskNew(CmdTaskNew::from(matches)),
                Some((CmdTaskDone::NAME, matches)) => TaskDone(CmdTaskDone::from(matches)),
                Some((CmdTaskDelete::NAME, matches)) => TaskDelete(CmdTaskDelete::from(matches)),
                Some((CmdTaskPlan::NAME, matches)) => TaskPlan(CmdTaskPlan::from(matches)),
                _ => unreachable!(),
            },
            Some(("settings", matches)) => match matches.subcommand() {
                Some((CmdSettingsShow::NAME, _)) => SettingsShow(CmdSettingsShow),
                Some((CmdSettingsSet::NAME, matches)) => SettingsSet(CmdSettingsSet::from(matches)),
                _ => unreachable!(),
            },
            None => Today(CmdToday {
                date: None,
                output_format: ArgOutputFormat::Table,
            }),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the calendar for a week
    Week(CmdWeek),

    /// Show the daily review
    Today(CmdToday),

    /// Show the weekly review
    Stats(CmdStats),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Move an event to a new time
    EventMove(CmdEventMove),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// Mark the task linked to an event as done
    EventDone(CmdEventDone),

    /// List tasks
    TaskList(CmdTaskList),

    /// Add a new task
    TaskNew(CmdTaskNew),

    /// Mark tasks as done
    TaskDone(CmdTaskDone),

    /// Delete a task
    TaskDelete(CmdTaskDelete),

    /// Schedule a task on the calendar
    TaskPlan(CmdTaskPlan),

    /// Show planning settings
    SettingsShow(CmdSettingsShow),

    /// Update planning settings
    SettingsSet(CmdSettingsSet),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Week(a)         => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Today(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Stats(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventNew(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventMove(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventDelete(a)  => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventDone(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskList(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskNew(a)      => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskDone(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskDelete(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskPlan(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            SettingsShow(a) => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            SettingsSet(a)  => Self::run_with(config, |x| a.run(x).boxed_local()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Planner) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (api_config, _config) = parse_config(config).await?;
        let mut planner = Planner::new(api_config, Box::new(TermNotifier))?;

        f(&mut planner).await?;

        if planner.session_expired() {
            return Err("Session expired, please refresh your API token".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_flag() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Today(_)));
    }

    #[test]
    fn defaults_to_daily_review() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        assert!(matches!(cli.command, Commands::Today(_)));
    }

    #[test]
    fn parses_week() {
        let cli = Cli::try_parse_from(vec!["test", "week", "2024-01-03"]).unwrap();
        match cli.command {
            Commands::Week(cmd) => assert_eq!(cmd.date, Some("2024-01-03".to_string())),
            _ => panic!("Expected Week command"),
        }
    }

    #[test]
    fn parses_week_alias() {
        let cli = Cli::try_parse_from(vec!["test", "w"]).unwrap();
        assert!(matches!(cli.command, Commands::Week(_)));
    }

    #[test]
    fn parses_event_move() {
        let cli =
            Cli::try_parse_from(vec!["test", "event", "move", "e1", "2024-01-02 10:00"]).unwrap();
        match cli.command {
            Commands::EventMove(cmd) => {
                assert_eq!(cmd.id, "e1");
                assert_eq!(cmd.start, "2024-01-02 10:00");
            }
            _ => panic!("Expected EventMove command"),
        }
    }

    #[test]
    fn parses_event_done() {
        let cli = Cli::try_parse_from(vec!["test", "event", "done", "e1"]).unwrap();
        match cli.command {
            Commands::EventDone(cmd) => assert_eq!(cmd.id, "e1"),
            _ => panic!("Expected EventDone command"),
        }
    }

    #[test]
    fn parses_task_plan() {
        let cli = Cli::try_parse_from(vec![
            "test",
            "task",
            "plan",
            "t1",
            "09:00",
            "--duration",
            "45",
        ])
        .unwrap();
        match cli.command {
            Commands::TaskPlan(cmd) => {
                assert_eq!(cmd.id, "t1");
                assert_eq!(cmd.duration, Some(45));
            }
            _ => panic!("Expected TaskPlan command"),
        }
    }

    #[test]
    fn parses_task_alias() {
        let cli = Cli::try_parse_from(vec!["test", "t", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::TaskList(_)));
    }

    #[test]
    fn parses_settings_show() {
        let cli = Cli::try_parse_from(vec!["test", "settings", "show"]).unwrap();
        assert!(matches!(cli.command, Commands::SettingsShow(_)));
    }

    #[test]
    fn event_requires_subcommand() {
        assert!(Cli::try_parse_from(vec!["test", "event"]).is_err());
    }
}
