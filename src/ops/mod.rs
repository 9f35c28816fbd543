//! High-level operations behind the CLI subcommands.
//!
//! Each operation takes the store by reference and writes its user-facing
//! output to a caller-supplied writer, so the binary passes stdout and tests
//! pass a buffer. Store write failures are logged, never fatal.

pub mod calendar;
pub mod entries;
pub mod write;

// Re-export commonly used functions
pub use calendar::{month_cells, print_calendar, render_month, CalendarCell};
pub use entries::{delete_entry, list_entries, show_entry};
pub use write::{edit_entry, write_entry};
