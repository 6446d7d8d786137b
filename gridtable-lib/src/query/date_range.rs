//! Date ranges and named presets for the two-column date filter.

use chrono::Datelike;
use chrono::Days;
use chrono::Local;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// An inclusive pair of calendar dates.
///
/// The grid filters on whole days: a range ending on `end` includes every
/// timestamp up to the end of that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range, inclusive.
    pub start: NaiveDate,
    /// Last day of the range, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range spanning `start..=end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a range covering a single day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }
}

/// Named date ranges offered to a date-range-picker collaborator.
///
/// The engine itself never consumes presets; it only sees the resolved
/// start/end dates. Presets exist so every picker shows the same fixed
/// menu.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use gridtable_lib::query::DatePreset;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let range = DatePreset::Last7Days.range_from(today);
/// assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
/// assert_eq!(range.end, today);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePreset {
    /// The current day.
    Today,
    /// The day before the current day.
    Yesterday,
    /// The current day and the six days before it.
    Last7Days,
    /// The current day and the twenty-nine days before it.
    Last30Days,
    /// The whole current calendar month.
    ThisMonth,
    /// The whole previous calendar month.
    PreviousMonth,
}

impl DatePreset {
    /// Every preset, in menu order.
    pub const ALL: [DatePreset; 6] = [
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::ThisMonth,
        DatePreset::PreviousMonth,
    ];

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Yesterday => "Yesterday",
            DatePreset::Last7Days => "Last 7 Days",
            DatePreset::Last30Days => "Last 30 Days",
            DatePreset::ThisMonth => "This Month",
            DatePreset::PreviousMonth => "Previous Month",
        }
    }

    /// Resolves this preset relative to the given day.
    pub fn range_from(self, today: NaiveDate) -> DateRange {
        match self {
            DatePreset::Today => DateRange::single_day(today),
            DatePreset::Yesterday => {
                DateRange::single_day(today.checked_sub_days(Days::new(1)).unwrap_or(today))
            }
            DatePreset::Last7Days => DateRange::new(
                today.checked_sub_days(Days::new(6)).unwrap_or(today),
                today,
            ),
            DatePreset::Last30Days => DateRange::new(
                today.checked_sub_days(Days::new(29)).unwrap_or(today),
                today,
            ),
            DatePreset::ThisMonth => {
                let first = first_of_month(today);
                DateRange::new(first, last_of_month(first))
            }
            DatePreset::PreviousMonth => {
                let first = first_of_previous_month(today);
                DateRange::new(first, last_of_month(first))
            }
        }
    }

    /// Resolves this preset relative to the current local date.
    pub fn range(self) -> DateRange {
        self.range_from(Local::now().date_naive())
    }
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn first_of_previous_month(day: NaiveDate) -> NaiveDate {
    let first = first_of_month(day);
    let prev = first.checked_sub_days(Days::new(1)).unwrap_or(first);
    first_of_month(prev)
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_month
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(first)
}
