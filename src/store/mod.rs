//! The JSON-backed entry store.
//!
//! [`EntryStore`] owns the complete collection of journal entries for a session.
//! It is loaded once from the entries file, and every mutation rewrites the whole
//! file atomically. Collaborators hold the store by reference and query it
//! directly; there is no global state.
//!
//! Loading never fails from the caller's point of view: a missing, unreadable,
//! or malformed file is replaced by the sample entries. Writes report failure
//! through [`StoreResult`] but the in-memory collection always keeps the
//! mutation, so the session can continue with its working copy.


use crate::entry::{self, EntryDraft, JournalEntry};
use crate::errors::{StoreError, StoreResult};
use crate::journal_core;
use crate::journal_io;
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What [`EntryStore::save_for_day`] did with a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new entry was added for the day.
    Created(Uuid),
    /// The day's existing entry was updated in place.
    Updated(Uuid),
    /// The draft was blank and the day's entry was removed.
    Deleted(Uuid),
    /// The draft was blank and the day had no entry.
    Unchanged,
}

impl SaveOutcome {
    /// Id of the entry the editor should keep pointing at afterwards.
    pub fn entry_id(&self) -> Option<Uuid> {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => Some(*id),
            SaveOutcome::Deleted(_) | SaveOutcome::Unchanged => None,
        }
    }
}

/// The authoritative, ordered collection of journal entries.
///
/// # Examples
///
/// ```
/// use chronicler::entry::JournalEntry;
/// use chronicler::store::EntryStore;
/// use chrono::{TimeZone, Utc};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = EntryStore::open(Some(dir.path().join("journal_entries.json")));
/// assert_eq!(store.len(), 3); // sample entries on first run
///
/// let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// let entry = JournalEntry::new("A", "hello", created);
/// store.add(entry.clone()).unwrap();
///
/// assert!(store.get(entry.id()).is_some());
/// ```
#[derive(Debug)]
pub struct EntryStore {
    path: Option<PathBuf>,
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    /// Opens the store backed by `path`.
    ///
    /// If the file exists and parses, its entries are used in file order.
    /// Otherwise the sample entries are installed and written immediately; a
    /// file that exists but does not parse is first moved aside. `None` means no
    /// storage location could be resolved: the store then works in memory only
    /// and every write reports [`StoreError::LocationUnavailable`].
    pub fn open(path: Option<PathBuf>) -> Self {
        let loaded = match path.as_deref() {
            Some(path) => Self::load(path),
            None => Err(StoreError::LocationUnavailable),
        };

        match loaded {
            Ok(entries) => {
                info!("Loaded {} journal entries", entries.len());
                EntryStore { path, entries }
            }
            Err(err) => {
                Self::log_load_failure(&err);
                if let StoreError::Parse { path, .. } = &err {
                    match journal_io::quarantine_file(path, &Local::now()) {
                        Ok(moved) => warn!("Moved unreadable entries file to {:?}", moved),
                        Err(e) => warn!("Could not move unreadable entries file aside: {}", e),
                    }
                }

                let store = EntryStore {
                    path,
                    entries: JournalEntry::sample_entries(entry::now()),
                };
                if let Err(e) = store.persist() {
                    warn!("Sample entries were not saved: {}", e);
                }
                store
            }
        }
    }

    /// A store over `entries` with no backing file.
    ///
    /// Queries work as usual; every mutation reports
    /// [`StoreError::LocationUnavailable`] after applying in memory.
    pub fn in_memory(entries: Vec<JournalEntry>) -> Self {
        EntryStore {
            path: None,
            entries,
        }
    }

    /// Reads and parses the entries file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file cannot be read (including when
    /// it does not exist) and `StoreError::Parse` if it is not a JSON array of
    /// entries.
    pub fn load(path: &Path) -> StoreResult<Vec<JournalEntry>> {
        debug!("Reading journal entries from {:?}", path);
        let bytes = fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn log_load_failure(err: &StoreError) {
        match err {
            StoreError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                info!("No saved entries found, starting with sample entries");
            }
            other => warn!("{}; starting with sample entries", other),
        }
    }

    /// Location of the entries file, if one was resolved.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All entries in collection order.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Appends `entry`, re-sorts newest first by `createdAt`, and persists.
    ///
    /// No check is made for another entry on the same day. The sort is stable,
    /// so entries with equal `createdAt` keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns the write failure, if any. The entry stays in the collection.
    pub fn add(&mut self, entry: JournalEntry) -> StoreResult<()> {
        debug!("Adding entry {}", entry.id());
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.persist()
    }

    /// Replaces the entry with the same id in place and persists.
    ///
    /// Collection order is preserved. Returns `Ok(false)` without writing when
    /// no entry has that id.
    ///
    /// # Errors
    ///
    /// Returns the write failure, if any. The replacement stays in the collection.
    pub fn update(&mut self, entry: JournalEntry) -> StoreResult<bool> {
        let Some(slot) = self.entries.iter_mut().find(|e| e.id() == entry.id()) else {
            debug!("Update for unknown entry {} ignored", entry.id());
            return Ok(false);
        };
        debug!("Updating entry {}", entry.id());
        *slot = entry;
        self.persist()?;
        Ok(true)
    }

    /// Removes every entry whose id matches `entry` and persists.
    ///
    /// Returns how many entries were removed; nothing is written when that is
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns the write failure, if any. The removal is kept in memory.
    pub fn delete(&mut self, entry: &JournalEntry) -> StoreResult<usize> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != entry.id());
        let removed = before - self.entries.len();
        if removed == 0 {
            debug!("Delete for unknown entry {} ignored", entry.id());
            return Ok(0);
        }
        debug!("Deleted {} entries with id {}", removed, entry.id());
        self.persist()?;
        Ok(removed)
    }

    /// "The" entry for `day` in the local time zone.
    pub fn entry_for_day(&self, day: NaiveDate) -> Option<&JournalEntry> {
        self.entry_for_day_in(day, &Local)
    }

    /// "The" entry for `day` in `tz`.
    ///
    /// When several entries fall on the same day, the most recently modified
    /// one wins; ties go to the earliest in collection order.
    pub fn entry_for_day_in<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Option<&JournalEntry> {
        self.entries
            .iter()
            .filter(|entry| journal_core::is_same_day(&entry.created_at, day, tz))
            .reduce(|best, entry| {
                if entry.modified_at > best.modified_at {
                    entry
                } else {
                    best
                }
            })
    }

    /// Whether any entry falls on `day` in the local time zone.
    pub fn has_entry(&self, day: NaiveDate) -> bool {
        self.has_entry_in(day, &Local)
    }

    /// Whether any entry falls on `day` in `tz`.
    pub fn has_entry_in<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> bool {
        self.entries
            .iter()
            .any(|entry| journal_core::is_same_day(&entry.created_at, day, tz))
    }

    /// The days of `year`/`month` that have at least one entry in the local
    /// time zone.
    pub fn days_with_entries(&self, year: i32, month: u32) -> BTreeSet<NaiveDate> {
        self.days_with_entries_in(year, month, &Local)
    }

    /// The days of `year`/`month` that have at least one entry in `tz`.
    pub fn days_with_entries_in<Tz: TimeZone>(
        &self,
        year: i32,
        month: u32,
        tz: &Tz,
    ) -> BTreeSet<NaiveDate> {
        self.entries
            .iter()
            .map(|entry| entry.day_in(tz))
            .filter(|day| day.year() == year && day.month() == month)
            .collect()
    }

    /// Saves the editor's draft for `day` in the local time zone.
    ///
    /// See [`EntryStore::save_for_day_in`].
    pub fn save_for_day(&mut self, day: NaiveDate, draft: &EntryDraft) -> StoreResult<SaveOutcome> {
        self.save_for_day_in(day, draft, &Local, entry::now())
    }

    /// Saves the editor's draft for `day`.
    ///
    /// - Blank draft: the day's entry is deleted, if there is one.
    /// - The day has an entry: its fields are replaced, it is touched, and it
    ///   is updated in place.
    /// - Otherwise a new entry created at the start of `day` is added.
    ///
    /// # Errors
    ///
    /// Returns the write failure, if any. The in-memory change is kept and the
    /// outcome it would have had is lost, so callers re-query the store.
    pub fn save_for_day_in<Tz: TimeZone>(
        &mut self,
        day: NaiveDate,
        draft: &EntryDraft,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> StoreResult<SaveOutcome> {
        let existing = self.entry_for_day_in(day, tz).cloned();

        match existing {
            Some(entry) if draft.is_blank() => {
                self.delete(&entry)?;
                Ok(SaveOutcome::Deleted(entry.id()))
            }
            None if draft.is_blank() => Ok(SaveOutcome::Unchanged),
            Some(mut entry) => {
                draft.apply_to(&mut entry);
                entry.modified_at = now;
                let id = entry.id();
                self.update(entry)?;
                Ok(SaveOutcome::Updated(id))
            }
            None => {
                let mut entry = JournalEntry::new(
                    draft.title.clone(),
                    draft.content.clone(),
                    journal_core::start_of_day(day, tz),
                );
                draft.apply_to(&mut entry);
                entry.modified_at = now;
                let id = entry.id();
                self.add(entry)?;
                Ok(SaveOutcome::Created(id))
            }
        }
    }

    /// Serializes the whole collection and replaces the entries file.
    fn persist(&self) -> StoreResult<()> {
        let path = self.path.as_deref().ok_or(StoreError::LocationUnavailable)?;

        let mut bytes = serde_json::to_vec_pretty(&self.entries).map_err(StoreError::Serialize)?;
        bytes.push(b'\n');

        journal_io::write_atomically(path, &bytes).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved {} journal entries to {:?}", self.entries.len(), path);
        Ok(())
    }
}
