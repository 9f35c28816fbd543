//! Read-only views over the store plus deleting a day's entry.

use crate::constants::{DATE_FORMAT_ISO, ENTRY_HEADER_DATE_FORMAT};
use crate::entry::JournalEntry;
use crate::errors::AppResult;
use crate::store::EntryStore;
use chrono::{NaiveDate, TimeZone};
use std::io::Write;
use tracing::{info, warn};

const UNTITLED: &str = "(untitled)";

/// Prints one line per entry, in collection order.
///
/// # Errors
///
/// Returns `AppError::Io` if writing to `out` fails.
pub fn list_entries<Tz: TimeZone, W: Write>(
    store: &EntryStore,
    tz: &Tz,
    out: &mut W,
) -> AppResult<()> {
    if store.is_empty() {
        writeln!(out, "No entries yet.")?;
        return Ok(());
    }

    for entry in store.entries() {
        writeln!(
            out,
            "{}  {}  ({} chars)",
            entry.day_in(tz).format(DATE_FORMAT_ISO),
            display_title(entry),
            entry.character_count()
        )?;
    }
    Ok(())
}

/// Prints the entry for `day`, or a note that there is none.
///
/// # Errors
///
/// Returns `AppError::Io` if writing to `out` fails.
pub fn show_entry<Tz: TimeZone, W: Write>(
    store: &EntryStore,
    day: NaiveDate,
    tz: &Tz,
    out: &mut W,
) -> AppResult<()> {
    let Some(entry) = store.entry_for_day_in(day, tz) else {
        writeln!(out, "No entry for {}.", day.format(DATE_FORMAT_ISO))?;
        return Ok(());
    };

    writeln!(out, "{}", day.format(ENTRY_HEADER_DATE_FORMAT))?;
    writeln!(out)?;
    writeln!(out, "# {}", display_title(entry))?;
    if !entry.content.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", entry.content)?;
    }
    if let Some(song) = &entry.song {
        writeln!(out)?;
        writeln!(out, "Song: {}", song)?;
    }
    Ok(())
}

/// Deletes the entry for `day`.
///
/// A failed write is logged and the deletion stands for the rest of the run.
///
/// # Errors
///
/// Returns `AppError::Io` if writing to `out` fails.
pub fn delete_entry<Tz: TimeZone, W: Write>(
    store: &mut EntryStore,
    day: NaiveDate,
    tz: &Tz,
    out: &mut W,
) -> AppResult<()> {
    let Some(entry) = store.entry_for_day_in(day, tz).cloned() else {
        writeln!(out, "No entry for {}.", day.format(DATE_FORMAT_ISO))?;
        return Ok(());
    };

    match store.delete(&entry) {
        Ok(_) => info!("Deleted entry {}", entry.id()),
        Err(e) => warn!("Deletion was not saved: {}", e),
    }
    writeln!(out, "Deleted entry for {}.", day.format(DATE_FORMAT_ISO))?;
    Ok(())
}

fn display_title(entry: &JournalEntry) -> &str {
    if entry.title.trim().is_empty() {
        UNTITLED
    } else {
        &entry.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::fs;
    use tempfile::tempdir;

    fn at(y: i32, m: u32, d: u32, h: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> AppResult<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_entries_newest_first() {
        let mut store = EntryStore::in_memory(Vec::new());
        let _ = store.add(JournalEntry::new("Older", "abc", at(2024, 1, 1, 9)));
        let _ = store.add(JournalEntry::new("", "newer body", at(2024, 1, 2, 9)));

        let text = output(|out| list_entries(&store, &Utc, out));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines, ["2024-01-02  (untitled)  (10 chars)", "2024-01-01  Older  (3 chars)"]);
    }

    #[test]
    fn test_list_entries_empty() {
        let store = EntryStore::in_memory(Vec::new());
        assert_eq!(output(|out| list_entries(&store, &Utc, out)), "No entries yet.\n");
    }

    #[test]
    fn test_show_entry() {
        let entry = JournalEntry::new("Walk", "Went to the park.", at(2024, 1, 15, 18)).with_song("Blue in Green");
        let store = EntryStore::in_memory(vec![entry]);
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let text = output(|out| show_entry(&store, day, &Utc, out));

        assert_eq!(
            text,
            "Monday, January 15, 2024\n\n# Walk\n\nWent to the park.\n\nSong: Blue in Green\n"
        );
    }

    #[test]
    fn test_show_entry_missing_day() {
        let store = EntryStore::in_memory(Vec::new());
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert_eq!(output(|out| show_entry(&store, day, &Utc, out)), "No entry for 2024-01-15.\n");
    }

    #[test]
    fn test_delete_entry_persists() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("journal_entries.json");
        fs::write(&path, "[]").unwrap();
        let mut store = EntryStore::open(Some(path.clone()));
        store.add(JournalEntry::new("Gone", "soon", at(2024, 1, 15, 8))).unwrap();
        store.add(JournalEntry::new("Kept", "here", at(2024, 1, 16, 8))).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let text = output(|out| delete_entry(&mut store, day, &Utc, out));

        assert_eq!(text, "Deleted entry for 2024-01-15.\n");
        let on_disk = EntryStore::load(&path).unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].title, "Kept");
    }

    #[test]
    fn test_delete_entry_without_location_still_removes_in_memory() {
        let mut store = EntryStore::in_memory(vec![JournalEntry::new("x", "y", at(2024, 1, 15, 8))]);
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        output(|out| delete_entry(&mut store, day, &Utc, out));

        assert!(store.is_empty());
    }
}
