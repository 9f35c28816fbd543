/*!
# Chronicler

Chronicler is a calendar-driven daily journal. Each calendar day holds at most
one entry as far as the editor is concerned; entries carry a title, a plain-text
body with optional rich-text formatting, and an optional song. The whole
collection lives in a single JSON file that is rewritten atomically on every
change.

## Architecture

- `store`: the authoritative entry collection and its JSON persistence
- `entry`: the `JournalEntry` record, editor drafts, and rich-text formatting
- `journal_core`: calendar-day matching, date arguments, and the month grid
- `session`: the edit session with its debounced autosave
- `editor`: the external editor abstraction and its document format
- `ops`: the operations behind each CLI subcommand
- `journal_io`: atomic file replacement and quarantining of unreadable files
- `config`, `cli`, `errors`, `constants`: the application plumbing

## Usage Example

```rust,no_run
use chronicler::{Config, EntryStore};
use chrono::Local;

fn main() -> chronicler::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let store = EntryStore::open(config.entries_path());
    let today = Local::now().date_naive();
    if let Some(entry) = store.entry_for_day(today) {
        println!("{}", entry.title);
    }
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// External editor integration
pub mod editor;
/// Journal entry records and rich-text formatting
pub mod entry;
/// Error types and utilities for error handling
pub mod errors;
/// Date logic without I/O
pub mod journal_core;
/// Filesystem helpers for the entries file
pub mod journal_io;
/// Operations behind the CLI subcommands
pub mod ops;
/// Edit sessions with debounced autosave
pub mod session;
/// The JSON-backed entry store
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use entry::{EntryDraft, JournalEntry};
pub use errors::{AppError, AppResult, StoreError, StoreResult};
pub use journal_core::{DateSpecifier, MonthGrid};
pub use session::{Debouncer, EditSession};
pub use store::{EntryStore, SaveOutcome};
