//! Calendar Constants and Math
//!
//! The Obojima calendar: 13 named months of exactly 28 days (4 weeks of 7),
//! closed by the one-day intercalary Veil Day that sits outside the weekday
//! cycle. Everything here is deterministic and side-effect free.
//!
//! # Example
//!
//! ```
//! use almanac::calendar::{weekday_for_day, Month, Weekday};
//!
//! assert_eq!(weekday_for_day(1), Some(Weekday::TideDay));
//! assert_eq!(weekday_for_day(8), Some(Weekday::TideDay));
//! assert!(Month::Vell.is_veil());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of months in a year, the Veil month included.
pub const MONTHS_PER_YEAR: u8 = 13;

/// Number of days in every regular month.
pub const DAYS_PER_MONTH: u8 = 28;

/// Number of days in a week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Number of weeks in every regular month.
pub const WEEKS_PER_MONTH: u8 = 4;

/// Number of bells in a day.
pub const BELLS_PER_DAY: u8 = 8;

/// Number of knots in a bell.
pub const KNOTS_PER_BELL: u8 = 6;

/// Day of the week.
///
/// Veil Day is not part of the weekday cycle; dates in the Veil month carry
/// [`Weekday::RestDay`] by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "Tide Day")]
    TideDay,
    #[serde(rename = "Leaf Day")]
    LeafDay,
    #[serde(rename = "Bell Day")]
    BellDay,
    #[serde(rename = "Hearth Day")]
    HearthDay,
    #[serde(rename = "Gale Day")]
    GaleDay,
    #[serde(rename = "Star Day")]
    StarDay,
    #[serde(rename = "Rest Day")]
    RestDay,
}

/// Weekdays in cycle order; day 1 of every month is a Tide Day.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::TideDay,
    Weekday::LeafDay,
    Weekday::BellDay,
    Weekday::HearthDay,
    Weekday::GaleDay,
    Weekday::StarDay,
    Weekday::RestDay,
];

impl Weekday {
    /// Returns the full display name, e.g. "Tide Day".
    pub fn name(self) -> &'static str {
        match self {
            Weekday::TideDay => "Tide Day",
            Weekday::LeafDay => "Leaf Day",
            Weekday::BellDay => "Bell Day",
            Weekday::HearthDay => "Hearth Day",
            Weekday::GaleDay => "Gale Day",
            Weekday::StarDay => "Star Day",
            Weekday::RestDay => "Rest Day",
        }
    }

    /// Returns the short column heading used by grid rendering.
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::TideDay => "Tide",
            Weekday::LeafDay => "Leaf",
            Weekday::BellDay => "Bell",
            Weekday::HearthDay => "Hrth",
            Weekday::GaleDay => "Gale",
            Weekday::StarDay => "Star",
            Weekday::RestDay => "Rest",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Month of the year.
///
/// `Vell` is the 13th, one-day Veil month. Older documents spell it "Veil";
/// deserialization accepts either spelling and normalizes to `Vell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apu,
    Mei,
    Jun,
    Jol,
    Aug,
    Sep,
    Ock,
    Nov,
    Dez,
    #[serde(alias = "Veil")]
    Vell,
}

impl Month {
    /// Returns the month's ordinal position in the year (1-13).
    pub fn number(self) -> u8 {
        self.info().number
    }

    /// Returns the static metadata for this month.
    pub fn info(self) -> &'static MonthInfo {
        &MONTHS[self as usize]
    }

    /// Returns the display name, e.g. "Sep".
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// True for the intercalary Veil month.
    pub fn is_veil(self) -> bool {
        matches!(self, Month::Vell)
    }

    /// Looks up a month by name.
    ///
    /// Accepts the legacy "Veil" spelling for the Veil month. Returns `None`
    /// for unknown names; callers treat absence as "do not navigate".
    pub fn lookup(name: &str) -> Option<Month> {
        match name {
            "Jan" => Some(Month::Jan),
            "Feb" => Some(Month::Feb),
            "Mar" => Some(Month::Mar),
            "Apu" => Some(Month::Apu),
            "Mei" => Some(Month::Mei),
            "Jun" => Some(Month::Jun),
            "Jol" => Some(Month::Jol),
            "Aug" => Some(Month::Aug),
            "Sep" => Some(Month::Sep),
            "Ock" => Some(Month::Ock),
            "Nov" => Some(Month::Nov),
            "Dez" => Some(Month::Dez),
            "Vell" | "Veil" => Some(Month::Vell),
            _ => None,
        }
    }

    /// Returns all months in year order.
    pub fn all() -> &'static [Month] {
        &[
            Month::Jan,
            Month::Feb,
            Month::Mar,
            Month::Apu,
            Month::Mei,
            Month::Jun,
            Month::Jol,
            Month::Aug,
            Month::Sep,
            Month::Ock,
            Month::Nov,
            Month::Dez,
            Month::Vell,
        ]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static metadata for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthInfo {
    pub name: &'static str,
    pub abbrev: &'static str,
    /// Ordinal position in the year, 1-13.
    pub number: u8,
    /// Almanac flavor notes.
    pub notes: &'static str,
}

/// The fixed 13-month table, loaded once at process start.
pub const MONTHS: [MonthInfo; 13] = [
    MonthInfo { name: "Jan", abbrev: "JAN", number: 1, notes: "cold clarity, new routes" },
    MonthInfo { name: "Feb", abbrev: "FEB", number: 2, notes: "thaw, first green" },
    MonthInfo { name: "Mar", abbrev: "MAR", number: 3, notes: "winds, restlessness" },
    MonthInfo { name: "Apu", abbrev: "APU", number: 4, notes: "rains, repairs" },
    MonthInfo { name: "Mei", abbrev: "MEI", number: 5, notes: "blossoms, courting" },
    MonthInfo { name: "Jun", abbrev: "JUN", number: 6, notes: "bright days" },
    MonthInfo { name: "Jol", abbrev: "JOL", number: 7, notes: "heat, festivals" },
    MonthInfo { name: "Aug", abbrev: "AUG", number: 8, notes: "heavy fruit" },
    MonthInfo { name: "Sep", abbrev: "SEP", number: 9, notes: "harvest begins" },
    MonthInfo { name: "Ock", abbrev: "OCK", number: 10, notes: "lanterns, long shadows" },
    MonthInfo { name: "Nov", abbrev: "NOV", number: 11, notes: "fogs, quiet markets" },
    MonthInfo { name: "Dez", abbrev: "DEZ", number: 12, notes: "frost, hearths" },
    MonthInfo { name: "Vell", abbrev: "VEL", number: 13, notes: "\"thin sky\" month; spirits nearer" },
];

/// Returns the metadata for a month.
pub fn month_info(month: Month) -> &'static MonthInfo {
    month.info()
}

/// Looks up a month's metadata by ordinal (1-13).
///
/// Returns `None` out of range.
pub fn month_by_number(number: u8) -> Option<&'static MonthInfo> {
    if (1..=MONTHS_PER_YEAR).contains(&number) {
        Some(&MONTHS[(number - 1) as usize])
    } else {
        None
    }
}

/// Returns the weekday a day of the month falls on.
///
/// Every month starts on a Tide Day, so the weekday depends only on the day
/// number. Returns `None` outside 1-28.
pub fn weekday_for_day(day: u8) -> Option<Weekday> {
    if (1..=DAYS_PER_MONTH).contains(&day) {
        Some(WEEKDAYS[((day - 1) % DAYS_PER_WEEK) as usize])
    } else {
        None
    }
}

/// True iff the month is the intercalary Veil month.
pub fn is_veil_day(month: Month) -> bool {
    month.is_veil()
}

/// Generates the day grid for a month: 4 weeks of 7 days covering 1-28.
///
/// Every regular month shares the same shape, so the month argument is not
/// consulted; it is accepted so Veil Day callers can branch on
/// [`is_veil_day`] and render their single-cell grid with the same call site.
pub fn month_grid_by_weeks(_month: Month) -> Vec<Vec<u8>> {
    (0..WEEKS_PER_MONTH)
        .map(|week| {
            (1..=DAYS_PER_WEEK)
                .map(|day| week * DAYS_PER_WEEK + day)
                .collect()
        })
        .collect()
}

/// One step of month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthStep {
    /// The month navigated to.
    pub month: &'static MonthInfo,
    /// Year adjustment implied by the step: +1 past Vell, -1 before Jan.
    pub year_delta: i32,
}

/// Steps forward one month, wrapping Vell (13) around to Jan of the next year.
///
/// Returns `None` when `current_number` is not a valid ordinal.
pub fn next_month(current_number: u8) -> Option<MonthStep> {
    month_by_number(current_number)?;
    if current_number == MONTHS_PER_YEAR {
        Some(MonthStep {
            month: month_by_number(1)?,
            year_delta: 1,
        })
    } else {
        Some(MonthStep {
            month: month_by_number(current_number + 1)?,
            year_delta: 0,
        })
    }
}

/// Steps back one month, wrapping Jan (1) around to Vell of the previous year.
///
/// Returns `None` when `current_number` is not a valid ordinal.
pub fn prev_month(current_number: u8) -> Option<MonthStep> {
    month_by_number(current_number)?;
    if current_number == 1 {
        Some(MonthStep {
            month: month_by_number(MONTHS_PER_YEAR)?,
            year_delta: -1,
        })
    } else {
        Some(MonthStep {
            month: month_by_number(current_number - 1)?,
            year_delta: 0,
        })
    }
}
