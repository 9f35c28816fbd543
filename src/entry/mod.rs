//! The journal entry data model.
//!
//! A [`JournalEntry`] is one record tied by convention to a single calendar day.
//! Entries serialize to camelCase JSON with ISO 8601 timestamps, and every field
//! added after the first schema (`formattedContent`, `song`) is optional so older
//! files keep loading.

pub mod rich_text;

use crate::constants::SECONDS_PER_DAY;
use crate::journal_core;
use chrono::{DateTime, Duration, NaiveDate, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use uuid::Uuid;

pub use rich_text::{Attribute, FormatSpan, RichText, Style};

/// One journal record.
///
/// The `id` is assigned at construction and cannot be changed afterwards; all
/// other fields are plain data edited by the editor and written back through
/// [`EntryStore::update`](crate::store::EntryStore::update).
///
/// # Examples
///
/// ```
/// use chronicler::entry::JournalEntry;
/// use chrono::{TimeZone, Utc};
///
/// let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// let entry = JournalEntry::new("A", "hello", created);
///
/// assert_eq!(entry.title, "A");
/// assert_eq!(entry.created_at, created);
/// assert!(!entry.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    id: Uuid,
    /// Free-text title, may be empty.
    pub title: String,
    /// Plain-text rendering of the body.
    pub content: String,
    /// Formatting spans over `content`; `None` means plain text.
    #[serde(
        default,
        deserialize_with = "lenient_rich_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub formatted_content: Option<RichText>,
    /// Song attached to the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song: Option<String>,
    /// Identifies the calendar day the entry belongs to.
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    /// Updated on every edit.
    #[serde(with = "iso8601")]
    pub modified_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Creates an entry with a fresh id, modified now.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        JournalEntry {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            formatted_content: None,
            song: None,
            created_at: created_at.trunc_subsecs(0),
            modified_at: now(),
        }
    }

    /// Attaches a rich-text payload.
    pub fn with_formatted_content(mut self, formatted: RichText) -> Self {
        self.formatted_content = Some(formatted);
        self
    }

    /// Attaches a song.
    pub fn with_song(mut self, song: impl Into<String>) -> Self {
        self.song = Some(song.into());
        self
    }

    /// The entry's stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Marks the entry as modified now.
    pub fn touch(&mut self) {
        self.modified_at = now();
    }

    /// True when both title and content are empty.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Number of characters in the body, as shown in the editor status bar.
    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }

    /// The calendar day this entry belongs to in `tz`.
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        journal_core::local_day(&self.created_at, tz)
    }

    /// The three entries written when no usable entries file exists.
    ///
    /// They are dated two days before `now`, one day before, and `now` itself,
    /// and returned in that (oldest first) order.
    pub fn sample_entries(now: DateTime<Utc>) -> Vec<JournalEntry> {
        let day = Duration::seconds(SECONDS_PER_DAY);
        vec![
            JournalEntry::new("TEST", "Today was a great day.", now - day * 2),
            JournalEntry::new("TEST TEST", "I'm not sure if I like it yet.", now - day),
            JournalEntry::new("TEST TEST TEST", "I think it will be.", now),
        ]
    }
}

/// The editable fields of an entry, as held by the editor between saves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub formatted_content: Option<RichText>,
    pub song: Option<String>,
}

impl EntryDraft {
    /// True when there is nothing worth saving.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Copies the draft's fields onto `entry`. Does not touch `modified_at`.
    pub fn apply_to(&self, entry: &mut JournalEntry) {
        entry.title.clone_from(&self.title);
        entry.content.clone_from(&self.content);
        entry.formatted_content.clone_from(&self.formatted_content);
        entry.song.clone_from(&self.song);
    }
}

impl From<&JournalEntry> for EntryDraft {
    fn from(entry: &JournalEntry) -> Self {
        EntryDraft {
            title: entry.title.clone(),
            content: entry.content.clone(),
            formatted_content: entry.formatted_content.clone(),
            song: entry.song.clone(),
        }
    }
}

/// Current time at the precision entries are stored with.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Accepts a missing, null, or foreign-format rich-text payload as `None`.
///
/// Files written before formatting spans existed stored an opaque blob here;
/// the plain `content` still carries the text, so the blob is dropped.
fn lenient_rich_text<'de, D>(deserializer: D) -> Result<Option<RichText>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| match serde_json::from_value::<RichText>(raw) {
        Ok(rich) => Some(rich),
        Err(e) => {
            debug!("Ignoring unrecognized formattedContent payload: {}", e);
            None
        }
    }))
}

/// ISO 8601 timestamps in UTC with second precision, e.g. `2024-01-01T09:30:00Z`.
///
/// Reading accepts any RFC 3339 timestamp, including fractional seconds and
/// explicit offsets.
pub(crate) mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|timestamp| timestamp.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_new_entries_get_distinct_ids() {
        let created = ymd_hms(2024, 1, 1, 9, 0, 0);
        let a = JournalEntry::new("A", "", created);
        let b = JournalEntry::new("A", "", created);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_touch_keeps_id_and_created_at() {
        let created = ymd_hms(2020, 5, 1, 8, 0, 0);
        let mut entry = JournalEntry::new("title", "body", created);
        let id = entry.id();
        entry.modified_at = created;

        entry.touch();

        assert_eq!(entry.id(), id);
        assert_eq!(entry.created_at, created);
        assert!(entry.modified_at > created);
    }

    #[test]
    fn test_serializes_camel_case_iso8601() {
        let created = ymd_hms(2024, 1, 1, 9, 30, 0);
        let mut entry = JournalEntry::new("A", "hello", created);
        entry.modified_at = ymd_hms(2024, 1, 1, 10, 0, 0);

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["createdAt"], "2024-01-01T09:30:00Z");
        assert_eq!(json["modifiedAt"], "2024-01-01T10:00:00Z");
        assert_eq!(json["title"], "A");
        assert!(json.get("formattedContent").is_none());
        assert!(json.get("song").is_none());
    }

    #[test]
    fn test_deserializes_first_schema_without_optional_fields() {
        let json = r#"{
            "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
            "title": "Old",
            "content": "plain",
            "createdAt": "2023-12-31T23:00:00Z",
            "modifiedAt": "2024-01-01T00:00:00Z"
        }"#;

        let entry: JournalEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id().to_string(), "3f2504e0-4f89-11d3-9a0c-0305e82c3301");
        assert_eq!(entry.formatted_content, None);
        assert_eq!(entry.song, None);
    }

    #[test]
    fn test_foreign_formatted_content_degrades_to_plain_text() {
        let json = r#"{
            "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
            "title": "Rich",
            "content": "bold words",
            "formattedContent": "e1xydGYxXGFuc2k=",
            "createdAt": "2024-01-01T00:00:00Z",
            "modifiedAt": "2024-01-01T00:00:00Z"
        }"#;

        let entry: JournalEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.formatted_content, None);
        assert_eq!(entry.content, "bold words");
    }

    #[test]
    fn test_accepts_offsets_and_fractional_seconds() {
        let json = r#"{
            "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
            "title": "",
            "content": "",
            "createdAt": "2024-01-01T09:30:00.250+02:00",
            "modifiedAt": "2024-01-01T07:30:00Z"
        }"#;

        let entry: JournalEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.created_at.timestamp(), ymd_hms(2024, 1, 1, 7, 30, 0).timestamp());
    }

    #[test]
    fn test_day_in_uses_time_zone() {
        let entry = JournalEntry::new("", "", ymd_hms(2024, 3, 1, 23, 30, 0));
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(entry.day_in(&Utc), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(entry.day_in(&tokyo), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_sample_entries_are_one_day_apart() {
        let now = ymd_hms(2024, 6, 15, 12, 0, 0);
        let samples = JournalEntry::sample_entries(now);

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].title, "TEST");
        assert_eq!(samples[0].created_at, ymd_hms(2024, 6, 13, 12, 0, 0));
        assert_eq!(samples[2].created_at, now);
        assert!(samples.iter().all(|e| !e.is_blank()));
    }

    #[test]
    fn test_draft_apply_and_character_count() {
        let mut entry = JournalEntry::new("", "", ymd_hms(2024, 1, 1, 0, 0, 0));
        let draft = EntryDraft {
            title: "Title".to_string(),
            content: "héllo".to_string(),
            formatted_content: None,
            song: Some("Blue in Green".to_string()),
        };

        draft.apply_to(&mut entry);

        assert_eq!(entry.title, "Title");
        assert_eq!(entry.character_count(), 5);
        assert_eq!(EntryDraft::from(&entry), draft);
    }
}
