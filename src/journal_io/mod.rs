//! Filesystem operations for the entries file.
//!
//! This module contains the low-level I/O used by the entry store: creating the
//! data directory with owner-only permissions, replacing the entries file
//! atomically, and moving an unreadable file out of the way.

use crate::constants::{CORRUPT_FILE_INFIX, QUARANTINE_TIMESTAMP_FORMAT};
use chrono::{DateTime, Local};
use std::fs::{self, Permissions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Ensures the data directory exists, creating it if necessary.
///
/// Newly created directories get 0o700 permissions on Unix. An existing
/// directory is left as it is.
///
/// # Errors
///
/// Returns the underlying `io::Error` if the directory or its permissions
/// cannot be created.
pub fn ensure_data_directory_exists(data_dir: &Path) -> io::Result<()> {
    if data_dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(data_dir)?;

    #[cfg(unix)]
    {
        fs::set_permissions(
            data_dir,
            Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS),
        )?;
        debug!("Set 0o700 permissions on data directory");
    }

    Ok(())
}

/// Replaces `path` with `contents` so that readers only ever see the old or
/// the new file.
///
/// The bytes go to a temporary file in the same directory, are flushed to
/// disk, and the temporary file is renamed over `path`. The parent directory
/// is created first if needed. The file ends up with 0o600 permissions on Unix.
///
/// # Errors
///
/// Returns the underlying `io::Error` from any step; `path` is untouched
/// when that happens.
pub fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_data_directory_exists(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;

    #[cfg(unix)]
    {
        temp.as_file().set_permissions(Permissions::from_mode(
            crate::constants::DEFAULT_FILE_PERMISSIONS,
        ))?;
    }

    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

/// Moves an unreadable file aside to `<name>.corrupt-<timestamp>`.
///
/// Returns the new location.
///
/// # Errors
///
/// Returns the underlying `io::Error` if the rename fails.
pub fn quarantine_file(path: &Path, now: &DateTime<Local>) -> io::Result<PathBuf> {
    let target = quarantine_path(path, now);
    fs::rename(path, &target)?;
    Ok(target)
}

fn quarantine_path(path: &Path, now: &DateTime<Local>) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(
        "{}.{}-{}",
        file_name,
        CORRUPT_FILE_INFIX,
        now.format(QUARANTINE_TIMESTAMP_FORMAT)
    ))
}
