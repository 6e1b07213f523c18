//! Calendar Dates and Time of Day
//!
//! `CalendarDate` pairs the year/era/month/day quartet with its derived
//! weekday; `TimeOfDay` is the bell-and-knot clock. The `date_key` encoding
//! gives dates their canonical total order, shared by timeline sorting and
//! nearest-entry search so the two can never disagree.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::calendar::{weekday_for_day, Month, Weekday};

/// Historical era marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    AF,
    AN,
    AH,
    AD,
    LW,
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Era::AF => "AF",
            Era::AN => "AN",
            Era::AH => "AH",
            Era::AD => "AD",
            Era::LW => "LW",
        };
        f.write_str(s)
    }
}

/// A date in the Obojima calendar.
///
/// Invariant: in the Veil month `day == 1` and `weekday` is the fixed Rest
/// Day; otherwise `day` is in 1-28 and the weekday is derived from it.
/// Construct through [`CalendarDate::new`] to keep the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub era: Era,
    pub month: Month,
    pub day: u8,
    pub weekday: Weekday,
}

impl CalendarDate {
    /// Builds a date, deriving the weekday from the day number.
    ///
    /// Dates in the Veil month take the fixed Rest Day weekday and must have
    /// `day == 1`. Returns `None` when the day is out of range for the month.
    pub fn new(year: i32, era: Era, month: Month, day: u8) -> Option<Self> {
        let weekday = if month.is_veil() {
            if day != 1 {
                return None;
            }
            Weekday::RestDay
        } else {
            weekday_for_day(day)?
        };
        Some(Self {
            year,
            era,
            month,
            day,
            weekday,
        })
    }

    /// Encodes the date as `year * 10000 + month_ordinal * 100 + day`.
    ///
    /// Keys compare chronologically; two dates share a key only when they
    /// name the same day.
    pub fn date_key(&self) -> i64 {
        self.year as i64 * 10_000 + self.month.number() as i64 * 100 + self.day as i64
    }

    /// Chronological comparison by [`date_key`](Self::date_key).
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        self.date_key().cmp(&other.date_key())
    }

    /// True when both dates name the same year, month, and day.
    ///
    /// Era and weekday are not consulted.
    pub fn same_day(&self, other: &Self) -> bool {
        self.year == other.year && self.month == other.month && self.day == other.day
    }

    /// Formats the date in common notation, e.g. "AD 327, Sep 13".
    ///
    /// The Veil month renders as the fixed "Veil Day" sentinel.
    pub fn format(&self) -> String {
        if self.month.is_veil() {
            format!("{} {}, Veil Day", self.era, self.year)
        } else {
            format!("{} {}, {} {}", self.era, self.year, self.month, self.day)
        }
    }

    /// Formats the date with its weekday, e.g. "Star Day, Sep 13, AD 327".
    ///
    /// Veil Day has no weekday and renders the same sentinel as
    /// [`format`](Self::format) regardless of the stored day and weekday.
    pub fn format_with_weekday(&self) -> String {
        if self.month.is_veil() {
            format!("{} {}, Veil Day", self.era, self.year)
        } else {
            format!(
                "{}, {} {}, {} {}",
                self.weekday, self.month, self.day, self.era, self.year
            )
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// In-world clock time: 8 bells a day, 6 knots a bell.
///
/// No arithmetic is defined beyond display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Bell of the day, 1-8.
    pub bell: u8,
    /// Knot within the bell, 0-5.
    pub knot: u8,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bell, self.knot)
    }
}
