/*!
# Chronicler - A Calendar-Driven Daily Journal

This file contains the binary's flow: parse arguments, install logging, load
configuration, open the entry store, and run the requested subcommand.

## Usage

```text
chronicler [OPTIONS] [COMMAND]

Commands:
  calendar  Show a month with the days that have an entry
  list      List all entries
  show      Print the entry for a day
  write     Write a day's entry from standard input, autosaving as lines arrive
  edit      Open a day's entry in your editor
  delete    Delete a day's entry

Options:
  -v, --verbose               Print debug logs
      --log-format <FORMAT>   Log output format [default: text] [possible values: text, json]
      --log-level <LEVEL>     Log level filter; RUST_LOG takes precedence
```

Logs go to stderr so stdout carries only command output.
*/

use chronicler::cli::{CliArgs, Command, DateArg};
use chronicler::config::Config;
use chronicler::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use chronicler::editor::SystemEditor;
use chronicler::errors::{AppError, AppResult};
use chronicler::journal_core::{DateSpecifier, MonthGrid};
use chronicler::ops;
use chronicler::store::EntryStore;
use chrono::{Local, NaiveDate};
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

fn main() -> ExitCode {
    let args = CliArgs::parse_args();

    if let Err(e) = init_tracing(&args) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let correlation_id = Uuid::new_v4();
    let root_span = tracing::info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    debug!("CLI arguments: {:?}", args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs the global subscriber.
///
/// RUST_LOG wins over `--log-level`; `--verbose` means `debug`.
fn init_tracing(args: &CliArgs) -> AppResult<()> {
    let level = if args.verbose {
        "debug"
    } else {
        args.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", level, e)))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if args.log_format == LOG_FORMAT_JSON {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}

fn run(args: CliArgs) -> AppResult<()> {
    let config = Config::load()?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let today = Local::now().date_naive();
    let open_store = || EntryStore::open(config.entries_path());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let command = args.command.unwrap_or(Command::Calendar { month: None });
    info!("Running {:?}", command);

    match command {
        Command::Calendar { month } => {
            let grid = match month {
                Some(month) => MonthGrid::parse(&month)?,
                None => MonthGrid::containing(today),
            };
            ops::print_calendar(&open_store(), &grid, today, &Local, &mut out)
        }
        Command::List => ops::list_entries(&open_store(), &Local, &mut out),
        Command::Show(date) => {
            let day = resolve_day(&date, today)?;
            ops::show_entry(&open_store(), day, &Local, &mut out)
        }
        Command::Write { date, title } => {
            let day = resolve_day(&date, today)?;
            let stdin = io::stdin();
            ops::write_entry(
                &mut open_store(),
                day,
                title,
                stdin.lock(),
                config.autosave_delay,
                &mut out,
            )
        }
        Command::Edit(date) => {
            let day = resolve_day(&date, today)?;
            let editor = SystemEditor {
                editor_cmd: config.editor_command()?.to_string(),
            };
            ops::edit_entry(&mut open_store(), &editor, day, &mut out)
        }
        Command::Delete(date) => {
            let day = resolve_day(&date, today)?;
            ops::delete_entry(&mut open_store(), day, &Local, &mut out)
        }
    }
}

fn resolve_day(arg: &DateArg, today: NaiveDate) -> AppResult<NaiveDate> {
    Ok(DateSpecifier::from_cli_arg(arg.date.as_deref())?.resolve(today))
}
