//! Writing a day's entry, either from a stream of lines or in an external editor.

use crate::constants::{DATE_FORMAT_ISO, EDIT_FILE_EXTENSION};
use crate::editor::{compose_document, parse_document, Editor};
use crate::entry::EntryDraft;
use crate::errors::{AppResult, StoreResult};
use crate::session::EditSession;
use crate::store::{EntryStore, SaveOutcome};
use chrono::NaiveDate;
use std::fs;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Writes the body of `day`'s entry from `input`, one line at a time.
///
/// Every line goes through an [`EditSession`], so a steady stream of lines is
/// saved once the input pauses for `autosave_delay`, and the final state is
/// flushed at end of input. The lines read replace the entry's body; when no
/// line arrives the existing body is kept. A `title` replaces the entry's title.
///
/// # Errors
///
/// Returns `AppError::Io` if reading `input` or writing `out` fails. Store
/// write failures are logged and do not abort.
pub fn write_entry<R: BufRead, W: Write>(
    store: &mut EntryStore,
    day: NaiveDate,
    title: Option<String>,
    input: R,
    autosave_delay: Duration,
    out: &mut W,
) -> AppResult<()> {
    let mut session = EditSession::begin(store, day, autosave_delay);
    let mut changed = false;

    if let Some(title) = title {
        session.set_title(title, Instant::now());
        changed = true;
    }

    let mut body = String::new();
    for line in input.lines() {
        let line = line?;
        let now = Instant::now();
        // The previous line's timer fires here if the input paused long enough.
        log_autosave(session.tick(store, now));

        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&line);
        session.set_content(body.clone(), now);
        changed = true;
    }

    if !changed {
        writeln!(out, "Nothing to save for {}.", day.format(DATE_FORMAT_ISO))?;
        return Ok(());
    }

    debug!("End of input, flushing entry for {}", day);
    report(session.flush(store), day, out)
}

/// Opens `day`'s entry in `editor` and saves the result.
///
/// The entry is written to a scratch Markdown file: title on the first line,
/// body below. When the editor returns, the file is read back and saved
/// through the store. Clearing both title and body deletes the entry.
///
/// # Errors
///
/// Returns `AppError::Editor` if the editor fails, leaving the entry
/// untouched, and `AppError::Io` for scratch file or output failures.
pub fn edit_entry<W: Write>(
    store: &mut EntryStore,
    editor: &dyn Editor,
    day: NaiveDate,
    out: &mut W,
) -> AppResult<()> {
    let original = store
        .entry_for_day(day)
        .map(EntryDraft::from)
        .unwrap_or_default();

    let mut scratch = tempfile::Builder::new()
        .prefix(&format!("chronicler-{}-", day.format(DATE_FORMAT_ISO)))
        .suffix(EDIT_FILE_EXTENSION)
        .tempfile()?;
    scratch.write_all(compose_document(&original.title, &original.content).as_bytes())?;
    scratch.flush()?;

    editor.open_file(scratch.path())?;

    let edited = fs::read_to_string(scratch.path())?;
    let (title, content) = parse_document(&edited);
    // Parsing trims surrounding whitespace, so compare parsed forms.
    let (base_title, base_content) =
        parse_document(&compose_document(&original.title, &original.content));
    if title == base_title && content == base_content {
        writeln!(out, "No changes to the entry for {}.", day.format(DATE_FORMAT_ISO))?;
        return Ok(());
    }

    let mut draft = original;
    if title != base_title {
        draft.title = title;
    }
    if content != base_content {
        draft.content = content;
    }
    if let Some(rich) = draft.formatted_content.as_mut() {
        rich.clamp_to(draft.content.chars().count());
    }

    report(store.save_for_day(day, &draft), day, out)
}

fn log_autosave(result: StoreResult<Option<SaveOutcome>>) {
    match result {
        Ok(Some(outcome)) => debug!("Autosaved: {:?}", outcome),
        Ok(None) => {}
        Err(e) => warn!("Autosave was not written: {}", e),
    }
}

fn report<W: Write>(result: StoreResult<SaveOutcome>, day: NaiveDate, out: &mut W) -> AppResult<()> {
    let date = day.format(DATE_FORMAT_ISO);
    match result {
        Ok(SaveOutcome::Created(id)) => {
            info!("Created entry {}", id);
            writeln!(out, "Saved new entry for {}.", date)?;
        }
        Ok(SaveOutcome::Updated(id)) => {
            info!("Updated entry {}", id);
            writeln!(out, "Updated entry for {}.", date)?;
        }
        Ok(SaveOutcome::Deleted(id)) => {
            info!("Deleted entry {}", id);
            writeln!(out, "Deleted entry for {}.", date)?;
        }
        Ok(SaveOutcome::Unchanged) => {
            writeln!(out, "Nothing to save for {}.", date)?;
        }
        Err(e) => {
            warn!("Entry for {} was not written to disk: {}", day, e);
            writeln!(out, "Entry for {} kept for this session only.", date)?;
        }
    }
    Ok(())
}
