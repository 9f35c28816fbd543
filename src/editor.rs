//! Editor abstraction for editing an entry in an external program.
//!
//! `chronicler edit` hands the day's entry to the user's editor as a small
//! Markdown document: the title on a `# ` heading line, a blank line, then the
//! body. [`compose_document`] and [`parse_document`] convert between that
//! document and an entry's fields.

use crate::errors::{AppError, AppResult, EditorError};
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Trait defining the interface for an editor component.
///
/// This trait abstracts opening a file in an editor and waiting for the user
/// to finish, so the edit flow can be tested without a real editor.
///
/// # Examples
///
/// ```
/// use chronicler::editor::Editor;
/// use chronicler::errors::AppResult;
/// use std::path::Path;
///
/// struct DummyEditor;
///
/// impl Editor for DummyEditor {
///     fn open_file(&self, path: &Path) -> AppResult<()> {
///         println!("Would open {:?}", path);
///         Ok(())
///     }
/// }
///
/// DummyEditor.open_file(Path::new("entry.md")).unwrap();
/// ```
pub trait Editor {
    /// Opens `path` and returns once the user is done with it.
    ///
    /// # Errors
    ///
    /// Implementations return `AppError::Editor` when the file could not be
    /// edited.
    fn open_file(&self, path: &Path) -> AppResult<()>;
}

/// An [`Editor`] that runs a system command with the file path as its argument.
///
/// # Examples
///
/// ```no_run
/// use chronicler::editor::{Editor, SystemEditor};
/// use std::path::Path;
///
/// let editor = SystemEditor {
///     editor_cmd: "vim".to_string(),
/// };
/// editor.open_file(Path::new("entry.md")).expect("Failed to open file");
/// ```
pub struct SystemEditor {
    /// The command to use for opening files (e.g., "vim", "code", "nano").
    pub editor_cmd: String,
}

impl Editor for SystemEditor {
    /// # Errors
    ///
    /// Returns `AppError::Editor` if the command cannot be found, may not be
    /// executed, fails to start, or exits with a non-zero status.
    fn open_file(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor: {} {:?}", self.editor_cmd, path);

        let status = Command::new(&self.editor_cmd)
            .arg(path)
            .status()
            .map_err(|e| launch_error(&self.editor_cmd, e))?;

        if !status.success() {
            return Err(AppError::Editor(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }));
        }

        Ok(())
    }
}

fn launch_error(command: &str, e: io::Error) -> AppError {
    let command = command.to_string();
    let error = match e.kind() {
        io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source: e },
        io::ErrorKind::PermissionDenied => EditorError::PermissionDenied { command, source: e },
        _ => EditorError::ExecutionFailed { command, source: e },
    };
    AppError::Editor(error)
}

/// Renders an entry's title and body as the document handed to the editor.
///
/// # Examples
///
/// ```
/// use chronicler::editor::{compose_document, parse_document};
///
/// let doc = compose_document("Monday", "Went for a walk.");
/// assert_eq!(doc, "# Monday\n\nWent for a walk.\n");
/// assert_eq!(
///     parse_document(&doc),
///     ("Monday".to_string(), "Went for a walk.".to_string())
/// );
/// ```
pub fn compose_document(title: &str, content: &str) -> String {
    format!("# {}\n\n{}\n", title, content)
}

/// Splits an edited document back into `(title, content)`.
///
/// The first line is the title, with any leading `#` heading marker removed.
/// Blank lines before the body and trailing whitespace are dropped.
pub fn parse_document(text: &str) -> (String, String) {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    let title = first.trim().trim_start_matches('#').trim();
    let content = rest.trim_start_matches(['\r', '\n']).trim_end();
    (title.to_string(), content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct MockEditor {
        opened_files: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl Editor for MockEditor {
        fn open_file(&self, path: &Path) -> AppResult<()> {
            self.opened_files.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_mock_editor_records_path() {
        let editor = MockEditor {
            opened_files: Arc::new(Mutex::new(Vec::new())),
        };

        editor.open_file(Path::new("entry.md")).unwrap();

        let opened = editor.opened_files.lock().unwrap();
        assert_eq!(opened.as_slice(), [PathBuf::from("entry.md")]);
    }

    #[test]
    fn test_system_editor_missing_command() {
        let editor = SystemEditor {
            editor_cmd: "chronicler-no-such-editor".to_string(),
        };

        match editor.open_file(Path::new("entry.md")) {
            Err(AppError::Editor(EditorError::CommandNotFound { command, .. })) => {
                assert_eq!(command, "chronicler-no-such-editor");
            }
            other => panic!("Expected CommandNotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_system_editor_non_zero_exit() {
        let editor = SystemEditor {
            editor_cmd: "false".to_string(),
        };

        match editor.open_file(Path::new("entry.md")) {
            Err(AppError::Editor(EditorError::NonZeroExit { status_code, .. })) => {
                assert_eq!(status_code, 1);
            }
            other => panic!("Expected NonZeroExit, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_document_without_heading_marker() {
        let (title, content) = parse_document("Plain title\nbody line 1\nbody line 2\n\n");
        assert_eq!(title, "Plain title");
        assert_eq!(content, "body line 1\nbody line 2");
    }

    #[test]
    fn test_parse_document_blank() {
        assert_eq!(
            parse_document(&compose_document("", "")),
            (String::new(), String::new())
        );
        assert_eq!(parse_document(""), (String::new(), String::new()));
    }

    #[test]
    fn test_parse_document_keeps_inner_blank_lines() {
        let doc = "# Title\r\n\r\nfirst paragraph\n\nsecond paragraph\n";
        let (title, content) = parse_document(doc);
        assert_eq!(title, "Title");
        assert_eq!(content, "first paragraph\n\nsecond paragraph");
    }
}
