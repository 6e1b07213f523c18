//! Calendar math, date ordering, and timeline resolution for the Obojima
//! party tracker.
//!
//! This crate is pure data and computation with no I/O. It is a dependency
//! for all other crates in the workspace.

pub mod calendar;
pub mod date;
pub mod snapshot;
pub mod timeline;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export calendar types
pub use calendar::{
    is_veil_day, month_by_number, month_grid_by_weeks, month_info, next_month, prev_month,
    weekday_for_day, Month, MonthInfo, MonthStep, Weekday, BELLS_PER_DAY, DAYS_PER_MONTH,
    DAYS_PER_WEEK, KNOTS_PER_BELL, MONTHS, MONTHS_PER_YEAR, WEEKDAYS, WEEKS_PER_MONTH,
};

// Re-export date types
pub use date::{CalendarDate, Era, TimeOfDay};

// Re-export timeline types
pub use timeline::{
    filter_by_exact_date, find_nearest, sort_descending, EventEntry, SessionEntry, TimelineEntry,
};

// Re-export snapshot types
pub use snapshot::{transform, CurrentState, RawSnapshot, TransformError};
