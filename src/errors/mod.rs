//! Error handling utilities for the chronicler application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, the store-level
//! `StoreError` taxonomy, and the convenience aliases `AppResult` and `StoreResult`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// Each variant captures the editor command and, where one exists, the underlying
/// IO error so the full cause chain survives up to the binary.
///
/// # Examples
///
/// ```
/// use chronicler::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}. Please check system resources, disk space, or editor installation.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. The entry was left unchanged.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Failures of the JSON-backed entry store.
///
/// Read-side variants (`LocationUnavailable`, `Read`, `Parse`) are absorbed by
/// [`EntryStore::open`](crate::store::EntryStore::open), which falls back to the
/// sample entries. Write-side variants are handed back from every mutation; the
/// in-memory collection keeps the mutation either way.
///
/// # Examples
///
/// ```
/// use chronicler::errors::StoreError;
/// use std::io::{self, ErrorKind};
/// use std::path::PathBuf;
///
/// let error = StoreError::Write {
///     path: PathBuf::from("/data/journal_entries.json"),
///     source: io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
/// };
/// assert!(error.to_string().contains("journal_entries.json"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// The user data directory could not be resolved.
    #[error("No storage location is available for journal entries. Set CHRONICLER_DIR to choose one.")]
    LocationUnavailable,

    /// The entries file exists but could not be read.
    #[error("Failed to read journal entries from {path}: {source}")]
    Read {
        /// Path of the entries file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The entries file was read but is not a valid entry collection.
    #[error("Journal entries file {path} is malformed: {source}")]
    Parse {
        /// Path of the entries file
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded as JSON.
    #[error("Failed to serialize journal entries: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The serialized collection could not be written to disk.
    #[error("Failed to write journal entries to {path}: {source}. Changes are kept in memory for this session.")]
    Write {
        /// Path of the entries file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the chronicler application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// ```
/// use chronicler::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (e.g., invalid date formats).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use chronicler::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

/// A type alias for `Result<T, StoreError>`, returned by store persistence.
pub type StoreResult<T> = Result<T, StoreError>;
