//! Core date logic without I/O operations.
//!
//! This module maps timestamps onto calendar days, parses the date arguments
//! accepted on the command line, and models the month grid shown by the
//! calendar. Nothing here touches the filesystem.

use crate::constants::{
    CALENDAR_GRID_CELLS, DATE_FORMAT_COMPACT, DATE_FORMAT_ISO, DAYS_PER_WEEK, MONTH_TITLE_FORMAT,
};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};

/// The calendar day `timestamp` falls on in `tz`.
///
/// # Examples
///
/// ```
/// use chronicler::journal_core::local_day;
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
///
/// let late = Utc.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap();
/// let berlin_winter = FixedOffset::east_opt(3600).unwrap();
///
/// assert_eq!(local_day(&late, &Utc), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// assert_eq!(local_day(&late, &berlin_winter), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// ```
pub fn local_day<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Calendar-day equality: year, month and day agree in `tz`, time of day ignored.
pub fn is_same_day<Tz: TimeZone>(timestamp: &DateTime<Utc>, day: NaiveDate, tz: &Tz) -> bool {
    local_day(timestamp, tz) == day
}

/// The first instant of `day` in `tz`.
///
/// Where local midnight does not exist (a DST gap), the first hour that does
/// exist is used instead.
pub fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    (0..24)
        .filter_map(|hour| day.and_hms_opt(hour, 0, 0))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Represents the ways a single journal day can be named on the command line.
///
/// # Examples
///
/// ```
/// use chronicler::journal_core::DateSpecifier;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
///
/// assert_eq!(DateSpecifier::from_cli_arg(None).unwrap(), DateSpecifier::Today);
/// assert_eq!(
///     DateSpecifier::from_cli_arg(Some("yesterday")).unwrap().resolve(today),
///     NaiveDate::from_ymd_opt(2023, 6, 14).unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DateSpecifier {
    /// Today's entry.
    Today,

    /// The entry for the day before today.
    Yesterday,

    /// A specific date's entry.
    Specific(NaiveDate),
}

impl DateSpecifier {
    /// Creates a DateSpecifier from the optional `--date` argument.
    ///
    /// Accepts `today`, `yesterday`, `YYYY-MM-DD` and `YYYYMMDD`; no argument
    /// means today.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` if the string is none of the accepted forms.
    pub fn from_cli_arg(date_str: Option<&str>) -> AppResult<Self> {
        let Some(raw) = date_str.map(str::trim) else {
            return Ok(DateSpecifier::Today);
        };

        match raw.to_ascii_lowercase().as_str() {
            "today" => Ok(DateSpecifier::Today),
            "yesterday" => Ok(DateSpecifier::Yesterday),
            _ => parse_date_string(raw)
                .map(DateSpecifier::Specific)
                .map_err(|e| AppError::Journal(format!("Invalid date format '{}': {}", raw, e))),
        }
    }

    /// Resolves the specifier against the reference date.
    pub fn resolve(&self, reference_date: NaiveDate) -> NaiveDate {
        match self {
            DateSpecifier::Today => reference_date,
            DateSpecifier::Yesterday => reference_date.pred_opt().unwrap_or(reference_date),
            DateSpecifier::Specific(date) => *date,
        }
    }
}

/// Parse a date string in YYYY-MM-DD or YYYYMMDD format
fn parse_date_string(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}

/// One month of the calendar, laid out as six Sunday-first weeks.
///
/// # Examples
///
/// ```
/// use chronicler::journal_core::MonthGrid;
/// use chrono::NaiveDate;
///
/// let grid = MonthGrid::new(2024, 2).unwrap();
/// let cells = grid.cells();
///
/// assert_eq!(cells.len(), 42);
/// // February 1st 2024 was a Thursday.
/// assert_eq!(cells[4], NaiveDate::from_ymd_opt(2024, 2, 1));
/// assert_eq!(grid.next().title(), "March 2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
}

impl MonthGrid {
    /// Returns `None` for an invalid month number.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| MonthGrid { first })
    }

    /// The month containing `day`.
    pub fn containing(day: NaiveDate) -> Self {
        MonthGrid {
            first: day.with_day(1).unwrap_or(day),
        }
    }

    /// Parses `YYYY-MM`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` for anything else.
    pub fn parse(month_str: &str) -> AppResult<Self> {
        let invalid = || AppError::Journal(format!("Invalid month '{}', expected YYYY-MM", month_str));
        let (year, month) = month_str.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthGrid::new(year, month).ok_or_else(invalid)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.year() && day.month() == self.month()
    }

    pub fn previous(&self) -> Self {
        MonthGrid {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        MonthGrid {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// "January 2024"
    pub fn title(&self) -> String {
        self.first.format(MONTH_TITLE_FORMAT).to_string()
    }

    /// 42 cells starting on the Sunday on or before the 1st; days outside the
    /// month are `None`.
    ///
    /// Cells past either end of the representable date range are `None` as
    /// well, so the last and first supported months still render.
    pub fn cells(&self) -> Vec<Option<NaiveDate>> {
        let lead = i64::from(self.first.weekday().num_days_from_sunday());
        (0..CALENDAR_GRID_CELLS as i64)
            .map(|offset| self.first.checked_add_signed(Duration::days(offset - lead)))
            .map(|day| day.filter(|day| self.contains(*day)))
            .collect()
    }

    /// The cells grouped into weeks.
    pub fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        self.cells()
            .chunks(DAYS_PER_WEEK)
            .map(<[Option<NaiveDate>]>::to_vec)
            .collect()
    }
}
