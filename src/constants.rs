//! Constants used throughout the application.
//!
//! This module contains all constants used in the Chronicler application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "chronicler";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A calendar-driven daily journal";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the directory holding the entries file.
pub const ENV_VAR_CHRONICLER_DIR: &str = "CHRONICLER_DIR";
/// Environment variable for specifying the preferred Chronicler editor.
pub const ENV_VAR_CHRONICLER_EDITOR: &str = "CHRONICLER_EDITOR";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Environment variable overriding the autosave debounce delay, in milliseconds.
pub const ENV_VAR_AUTOSAVE_MS: &str = "CHRONICLER_AUTOSAVE_MS";
/// Sub-directory created inside the user's document directory.
pub const DEFAULT_DATA_SUBDIR: &str = "Chronicler";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Fixed name of the file holding the serialized entry collection.
pub const ENTRIES_FILE_NAME: &str = "journal_entries.json";
/// Infix used when moving an unreadable entries file aside.
pub const CORRUPT_FILE_INFIX: &str = "corrupt";
/// Extension for the scratch file handed to the external editor.
pub const EDIT_FILE_EXTENSION: &str = ".md";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Format used to stamp quarantined files.
pub const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
/// Long date format used in entry headers (e.g. "Monday, January 15, 2024").
pub const ENTRY_HEADER_DATE_FORMAT: &str = "%A, %B %-d, %Y";
/// Month title format for the calendar (e.g. "January 2024").
pub const MONTH_TITLE_FORMAT: &str = "%B %Y";
/// Number of seconds in a day, used for the sample entries.
pub const SECONDS_PER_DAY: i64 = 86_400;
/// Number of day cells in a calendar month grid (six weeks).
pub const CALENDAR_GRID_CELLS: usize = 42;
/// Number of days in a week.
pub const DAYS_PER_WEEK: usize = 7;

// Editing
/// Default quiet period before an autosave fires, in milliseconds.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 500;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "chronicler";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
