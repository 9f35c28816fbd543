//! Configuration management for the chronicler application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It resolves the directory holding the entries
//! file, the editor command used by `chronicler edit`, and the autosave delay.
//!
//! # Environment Variables
//!
//! - `CHRONICLER_DIR`: Directory holding `journal_entries.json` (defaults to the
//!   user's document directory joined with `Chronicler`)
//! - `CHRONICLER_EDITOR`: Editor to use for journal entries
//! - `EDITOR`: Fallback editor if CHRONICLER_EDITOR is not set (defaults to "vim")
//! - `CHRONICLER_AUTOSAVE_MS`: Quiet period before an autosave, in milliseconds

use crate::constants::{
    DEFAULT_AUTOSAVE_DELAY_MS, DEFAULT_DATA_SUBDIR, DEFAULT_EDITOR_COMMAND,
    EDITOR_FORBIDDEN_CHARS, ENTRIES_FILE_NAME, ENV_VAR_AUTOSAVE_MS, ENV_VAR_CHRONICLER_DIR,
    ENV_VAR_CHRONICLER_EDITOR, ENV_VAR_EDITOR, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use directories::{BaseDirs, UserDirs};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Configuration for the chronicler application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use chronicler::Config;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = Config {
///     editor: "nano".to_string(),
///     data_dir: Some(PathBuf::from("/path/to/journal")),
///     autosave_delay: Duration::from_millis(500),
/// };
/// assert_eq!(
///     config.entries_path(),
///     Some(PathBuf::from("/path/to/journal/journal_entries.json"))
/// );
/// ```
#[derive(Clone)]
pub struct Config {
    /// Editor command used by `chronicler edit`.
    ///
    /// Loaded from CHRONICLER_EDITOR, then EDITOR, then defaults to "vim".
    /// Checked only when an editor is launched; see [`Config::editor_command`].
    pub editor: String,

    /// Directory holding the entries file.
    ///
    /// `None` when no location could be resolved; the store then works in
    /// memory only.
    pub data_dir: Option<PathBuf>,

    /// Quiet period after the last change before the editor autosaves.
    pub autosave_delay: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &REDACTED_PLACEHOLDER)
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field("autosave_delay", &self.autosave_delay)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            data_dir: None,
            autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS),
        }
    }
}

impl Config {
    /// Validates an editor command string for security.
    ///
    /// The command must be non-empty and free of spaces and shell
    /// metacharacters; editors that need arguments go behind a wrapper script.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = editor_cmd.chars().find(|c| EDITOR_FORBIDDEN_CHARS.contains(c)) {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    /// Resolves the data directory.
    ///
    /// CHRONICLER_DIR wins and is expanded with `shellexpand` (handles `~` and
    /// `$VAR`). Otherwise the platform document directory is used, then the
    /// platform data directory.
    fn resolve_data_dir() -> AppResult<Option<PathBuf>> {
        if let Ok(raw) = env::var(ENV_VAR_CHRONICLER_DIR) {
            let expanded = shellexpand::full(&raw)
                .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
            if expanded.is_empty() {
                return Err(AppError::Config(
                    "Data directory path is empty".to_string(),
                ));
            }
            return Ok(Some(PathBuf::from(expanded.into_owned())));
        }

        let documents = UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|dir| dir.join(DEFAULT_DATA_SUBDIR)));
        let fallback = || BaseDirs::new().map(|dirs| dirs.data_dir().join(DEFAULT_DATA_SUBDIR));

        Ok(documents.or_else(fallback))
    }

    fn resolve_autosave_delay() -> AppResult<Duration> {
        let Ok(raw) = env::var(ENV_VAR_AUTOSAVE_MS) else {
            return Ok(Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS));
        };

        match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
            _ => Err(AppError::Config(format!(
                "{} must be a positive number of milliseconds, got '{}'",
                ENV_VAR_AUTOSAVE_MS, raw
            ))),
        }
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - The autosave delay is not a positive integer
    ///
    /// The editor command is stored as given, so an `EDITOR` meant for other
    /// programs does not stop commands that never launch an editor.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chronicler::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Entries live at {:?}", config.entries_path()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let editor = env::var(ENV_VAR_CHRONICLER_EDITOR)
            .or_else(|_| env::var(ENV_VAR_EDITOR))
            .unwrap_or_else(|_| DEFAULT_EDITOR_COMMAND.to_string());

        let data_dir = Config::resolve_data_dir()?;
        if data_dir.is_none() {
            debug!("No data directory could be resolved");
        }

        Ok(Config {
            editor,
            data_dir,
            autosave_delay: Config::resolve_autosave_delay()?,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory must be an absolute path" if the path is relative
    /// - "Autosave delay must be greater than zero" if the delay is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicler::Config;
    /// use std::path::PathBuf;
    ///
    /// let mut config = Config::default();
    /// config.data_dir = Some(PathBuf::from("/absolute/path"));
    /// assert!(config.validate().is_ok());
    ///
    /// config.data_dir = Some(PathBuf::from("relative/path"));
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if let Some(dir) = &self.data_dir {
            if !dir.is_absolute() {
                return Err(AppError::Config(
                    "Data directory must be an absolute path".to_string(),
                ));
            }
        }

        if self.autosave_delay.is_zero() {
            return Err(AppError::Config(
                "Autosave delay must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The editor command, checked for use with `chronicler edit`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the command is empty or contains spaces
    /// or shell metacharacters.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicler::Config;
    ///
    /// let mut config = Config::default();
    /// assert_eq!(config.editor_command().unwrap(), "vim");
    ///
    /// config.editor = "code --wait".to_string();
    /// assert!(config.editor_command().is_err());
    /// ```
    pub fn editor_command(&self) -> AppResult<&str> {
        Config::validate_editor_command(&self.editor)
    }

    /// Full path of the entries file, if a data directory was resolved.
    pub fn entries_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(ENTRIES_FILE_NAME))
    }
}
