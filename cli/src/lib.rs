// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Terminal front end for the Tempo planner.

mod cli;
mod cmd_event;
mod cmd_settings;
mod cmd_stats;
mod cmd_task;
mod cmd_today;
mod cmd_week;
mod config;
mod formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
