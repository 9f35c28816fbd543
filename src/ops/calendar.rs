//! The calendar surface: a month grid marking the days that have an entry.

use crate::constants::DAYS_PER_WEEK;
use crate::errors::AppResult;
use crate::journal_core::MonthGrid;
use crate::store::EntryStore;
use chrono::{Datelike, NaiveDate, TimeZone};
use std::io::Write;

const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CELL_WIDTH: usize = 4;

/// One in-month day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: NaiveDate,
    pub has_entry: bool,
    pub is_today: bool,
}

/// The grid's cells decorated with entry and today markers.
pub fn month_cells<Tz: TimeZone>(
    store: &EntryStore,
    grid: &MonthGrid,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<Option<CalendarCell>> {
    let marked = store.days_with_entries_in(grid.year(), grid.month(), tz);
    grid.cells()
        .into_iter()
        .map(|cell| {
            cell.map(|day| CalendarCell {
                day,
                has_entry: marked.contains(&day),
                is_today: day == today,
            })
        })
        .collect()
}

/// Renders the month as text.
///
/// Each cell is four characters wide: a `>` before today, the day number, and
/// a `*` after days with an entry. Weeks with no day of the month are omitted.
pub fn render_month<Tz: TimeZone>(
    store: &EntryStore,
    grid: &MonthGrid,
    today: NaiveDate,
    tz: &Tz,
) -> String {
    let width = CELL_WIDTH * DAYS_PER_WEEK;
    let mut lines = vec![format!("{:^width$}", grid.title(), width = width)];
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!(" {} ", label))
            .collect(),
    );

    for week in month_cells(store, grid, today, tz).chunks(DAYS_PER_WEEK) {
        if week.iter().all(Option::is_none) {
            continue;
        }
        lines.push(week.iter().map(render_cell).collect());
    }

    let mut rendered = lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    rendered.push('\n');
    rendered
}

fn render_cell(cell: &Option<CalendarCell>) -> String {
    match cell {
        Some(cell) => format!(
            "{}{:>2}{}",
            if cell.is_today { '>' } else { ' ' },
            cell.day.day(),
            if cell.has_entry { '*' } else { ' ' }
        ),
        None => " ".repeat(CELL_WIDTH),
    }
}

/// Prints the calendar for `grid` followed by a count of its entries.
///
/// # Errors
///
/// Returns `AppError::Io` if writing to `out` fails.
pub fn print_calendar<Tz: TimeZone, W: Write>(
    store: &EntryStore,
    grid: &MonthGrid,
    today: NaiveDate,
    tz: &Tz,
    out: &mut W,
) -> AppResult<()> {
    write!(out, "{}", render_month(store, grid, today, tz))?;

    let count = store.days_with_entries_in(grid.year(), grid.month(), tz).len();
    writeln!(
        out,
        "\n{} {} with an entry",
        count,
        if count == 1 { "day" } else { "days" }
    )?;
    Ok(())
}
