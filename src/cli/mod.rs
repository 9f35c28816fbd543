//! Command-line interface definitions.
//!
//! `CliArgs` carries the global logging flags and an optional subcommand;
//! running without a subcommand shows the current month's calendar.

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::{Args, Parser, Subcommand};

/// A calendar-driven daily journal
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// Print debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(
        long,
        global = true,
        value_name = "FORMAT",
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    /// Log level filter (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show a month with the days that have an entry
    Calendar {
        /// Month to show (format: YYYY-MM); defaults to the current month
        #[arg(short = 'm', long)]
        month: Option<String>,
    },

    /// List all entries
    List,

    /// Print the entry for a day
    Show(DateArg),

    /// Write a day's entry from standard input, autosaving as lines arrive
    Write {
        #[command(flatten)]
        date: DateArg,

        /// Title for the entry
        #[arg(short = 't', long)]
        title: Option<String>,
    },

    /// Open a day's entry in your editor
    Edit(DateArg),

    /// Delete a day's entry
    Delete(DateArg),
}

/// The `--date` option shared by the per-day subcommands.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct DateArg {
    /// Day of the entry: today, yesterday, YYYY-MM-DD or YYYYMMDD (defaults to today)
    #[arg(short = 'd', long)]
    pub date: Option<String>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }
}
