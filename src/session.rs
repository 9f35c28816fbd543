//! Edit sessions with debounced autosave.
//!
//! An [`EditSession`] holds the editor's working copy of one day's entry. Every
//! change re-arms a single-shot [`Debouncer`]; when the quiet period elapses the
//! session saves whatever its fields hold at that moment, so a burst of edits
//! produces one write. Time is passed in by the caller, which keeps the session
//! single-threaded and deterministic under test.

use crate::entry::{Attribute, EntryDraft, RichText};
use crate::errors::StoreResult;
use crate::store::{EntryStore, SaveOutcome};
use chrono::NaiveDate;
use std::ops::Range;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// A restartable single-shot timer.
///
/// # Examples
///
/// ```
/// use chronicler::session::Debouncer;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(500));
///
/// debouncer.schedule(start);
/// debouncer.schedule(start + Duration::from_millis(300)); // restarts the wait
///
/// assert!(!debouncer.poll(start + Duration::from_millis(600)));
/// assert!(debouncer.poll(start + Duration::from_millis(800)));
/// assert!(!debouncer.poll(start + Duration::from_millis(900))); // fires once
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the timer to fire `delay` after `now`, replacing any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending deadline, if one is armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once when the armed deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// The editor's working copy of one day's entry.
#[derive(Debug)]
pub struct EditSession {
    day: NaiveDate,
    draft: EntryDraft,
    entry_id: Option<Uuid>,
    autosave: Debouncer,
}

impl EditSession {
    /// Starts editing `day`, loading its entry from the store if there is one.
    pub fn begin(store: &EntryStore, day: NaiveDate, autosave_delay: Duration) -> Self {
        let existing = store.entry_for_day(day);
        debug!(
            "Editing {} ({})",
            day,
            if existing.is_some() { "existing entry" } else { "new entry" }
        );
        EditSession {
            day,
            draft: existing.map(EntryDraft::from).unwrap_or_default(),
            entry_id: existing.map(|entry| entry.id()),
            autosave: Debouncer::new(autosave_delay),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    pub fn content(&self) -> &str {
        &self.draft.content
    }

    pub fn formatted_content(&self) -> Option<&RichText> {
        self.draft.formatted_content.as_ref()
    }

    /// Id of the entry backing this session, once one exists.
    pub fn entry_id(&self) -> Option<Uuid> {
        self.entry_id
    }

    pub fn character_count(&self) -> usize {
        self.draft.content.chars().count()
    }

    /// Whether an autosave is waiting for the quiet period to end.
    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    pub fn set_title(&mut self, title: impl Into<String>, now: Instant) {
        self.draft.title = title.into();
        self.autosave.schedule(now);
    }

    /// Replaces the body; formatting past the new end is dropped.
    pub fn set_content(&mut self, content: impl Into<String>, now: Instant) {
        self.draft.content = content.into();
        let len = self.character_count();
        if let Some(rich) = self.draft.formatted_content.as_mut() {
            rich.clamp_to(len);
            if rich.is_plain() {
                self.draft.formatted_content = None;
            }
        }
        self.autosave.schedule(now);
    }

    pub fn set_song(&mut self, song: Option<String>, now: Instant) {
        self.draft.song = song;
        self.autosave.schedule(now);
    }

    /// Toggles a character attribute over `range` of the body.
    pub fn toggle(&mut self, range: Range<usize>, attribute: Attribute, now: Instant) {
        self.edit_formatting(|rich| rich.toggle(range, attribute));
        self.autosave.schedule(now);
    }

    /// Sets or clears the font size over `range` of the body.
    pub fn set_font_size(&mut self, range: Range<usize>, size: Option<f32>, now: Instant) {
        self.edit_formatting(|rich| rich.set_font_size(range, size));
        self.autosave.schedule(now);
    }

    fn edit_formatting(&mut self, edit: impl FnOnce(&mut RichText)) {
        let len = self.character_count();
        let mut rich = self.draft.formatted_content.take().unwrap_or_default();
        edit(&mut rich);
        rich.clamp_to(len);
        self.draft.formatted_content = (!rich.is_plain()).then_some(rich);
    }

    /// Saves if the quiet period has elapsed since the last change.
    ///
    /// Returns `Ok(None)` when nothing was due.
    ///
    /// # Errors
    ///
    /// Returns the store's write failure; the store keeps the change in memory.
    pub fn tick(&mut self, store: &mut EntryStore, now: Instant) -> StoreResult<Option<SaveOutcome>> {
        if !self.autosave.poll(now) {
            return Ok(None);
        }
        debug!("Autosave fired for {}", self.day);
        self.save(store).map(Some)
    }

    /// Cancels any pending autosave and saves immediately.
    ///
    /// # Errors
    ///
    /// Returns the store's write failure; the store keeps the change in memory.
    pub fn flush(&mut self, store: &mut EntryStore) -> StoreResult<SaveOutcome> {
        self.autosave.cancel();
        self.save(store)
    }

    fn save(&mut self, store: &mut EntryStore) -> StoreResult<SaveOutcome> {
        let result = store.save_for_day(self.day, &self.draft);
        // Re-resolve even on failure: the store applied the change in memory.
        self.entry_id = store.entry_for_day(self.day).map(|entry| entry.id());
        result
    }
}
