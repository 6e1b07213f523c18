//! Snapshot Schema and Transform
//!
//! Raw serialization structs matching the external JSON document, and the
//! transform that turns one raw snapshot into an in-memory [`CurrentState`].
//!
//! Two schema versions exist in the wild: the current one carries a unified
//! `timeline` array with per-item `type` tags, the legacy one splits the same
//! items into `events` and `adventureLog` arrays with no tag. Both funnel
//! into the one canonical [`TimelineEntry`] representation here; the legacy
//! shape never leaks past this module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{Month, BELLS_PER_DAY, KNOTS_PER_BELL};
use crate::date::{CalendarDate, Era, TimeOfDay};
use crate::timeline::{sort_descending, EventEntry, SessionEntry, TimelineEntry};

/// The full in-memory state for one fetch cycle.
///
/// Built once per successful fetch and replaced wholesale on the next; never
/// mutated in place. The timeline is pre-sorted into display order (newest
/// first) by the transform, so consumers must not re-sort it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentState {
    pub date: CalendarDate,
    pub time: TimeOfDay,
    pub timeline: Vec<TimelineEntry>,
}

/// Raw top-level snapshot document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    pub current_date: RawDate,
    pub current_time: RawTime,
    /// Current schema: unified timeline with per-item `type`.
    #[serde(default)]
    pub timeline: Option<Vec<RawEntry>>,
    /// Legacy schema: world events, no `type` field.
    #[serde(default)]
    pub events: Option<Vec<RawEntry>>,
    /// Legacy schema: session journal, no `type` field.
    #[serde(default)]
    pub adventure_log: Option<Vec<RawEntry>>,
}

/// Raw date quartet as it appears in the document.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawDate {
    pub year: i32,
    pub era: Era,
    pub month: Month,
    pub day: u8,
}

/// Raw clock reading as it appears in the document.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawTime {
    pub bell: u8,
    pub knot: u8,
}

/// Entry type discriminator used by the unified schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawEntryType {
    Event,
    Session,
}

/// One raw timeline item. Covers both schema versions: the legacy arrays
/// carry the same fields minus `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub id: String,
    #[serde(default, rename = "type")]
    pub entry_type: Option<RawEntryType>,
    pub title: String,
    pub year: i32,
    pub era: Era,
    pub month: Month,
    pub day: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_important: Option<bool>,
    #[serde(default)]
    pub session_number: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub npcs_encountered: Vec<String>,
    #[serde(default)]
    pub locations_visited: Vec<String>,
    #[serde(default)]
    pub items_acquired: Vec<String>,
}

impl RawSnapshot {
    /// Parses a raw snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Errors that fail the whole transform.
///
/// A malformed snapshot never produces a partially populated state; the
/// previous state, if any, stays in place at the caller.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("snapshot JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("current date is out of range: {month} {day}")]
    InvalidCurrentDate { month: Month, day: u8 },
    #[error("current time is out of range: bell {bell}, knot {knot}")]
    InvalidCurrentTime { bell: u8, knot: u8 },
    #[error("timeline entry '{id}' carries no type tag")]
    MissingEntryType { id: String },
    #[error("timeline entry '{id}' has an out-of-range date: {month} {day}")]
    InvalidEntryDate { id: String, month: Month, day: u8 },
}

/// Transforms a raw snapshot into [`CurrentState`].
///
/// Derives every weekday through the calendar math (Rest Day forced for the
/// Veil month), validates day and clock ranges, accepts either schema
/// version, and returns the timeline already sorted newest-first.
pub fn transform(raw: RawSnapshot) -> Result<CurrentState, TransformError> {
    let date = CalendarDate::new(
        raw.current_date.year,
        raw.current_date.era,
        raw.current_date.month,
        raw.current_date.day,
    )
    .ok_or(TransformError::InvalidCurrentDate {
        month: raw.current_date.month,
        day: raw.current_date.day,
    })?;

    let time = validate_time(raw.current_time)?;

    let mut timeline = match raw.timeline {
        Some(entries) => entries
            .into_iter()
            .map(|e| convert_entry(e, None))
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            // Legacy split arrays: the events array holds world events, the
            // adventure log holds the session journal.
            let mut entries = Vec::new();
            for item in raw.events.unwrap_or_default() {
                entries.push(convert_entry(item, Some(RawEntryType::Event))?);
            }
            for item in raw.adventure_log.unwrap_or_default() {
                entries.push(convert_entry(item, Some(RawEntryType::Session))?);
            }
            entries
        }
    };

    sort_descending(&mut timeline);

    Ok(CurrentState {
        date,
        time,
        timeline,
    })
}

fn validate_time(raw: RawTime) -> Result<TimeOfDay, TransformError> {
    if !(1..=BELLS_PER_DAY).contains(&raw.bell) || raw.knot >= KNOTS_PER_BELL {
        return Err(TransformError::InvalidCurrentTime {
            bell: raw.bell,
            knot: raw.knot,
        });
    }
    Ok(TimeOfDay {
        bell: raw.bell,
        knot: raw.knot,
    })
}

/// Converts one raw item, falling back to the legacy array's implied type
/// when the item carries no tag of its own.
fn convert_entry(
    raw: RawEntry,
    implied_type: Option<RawEntryType>,
) -> Result<TimelineEntry, TransformError> {
    let entry_type = raw
        .entry_type
        .or(implied_type)
        .ok_or_else(|| TransformError::MissingEntryType {
            id: raw.id.clone(),
        })?;

    let date = CalendarDate::new(raw.year, raw.era, raw.month, raw.day).ok_or_else(|| {
        TransformError::InvalidEntryDate {
            id: raw.id.clone(),
            month: raw.month,
            day: raw.day,
        }
    })?;

    let entry = match entry_type {
        RawEntryType::Event => TimelineEntry::Event(EventEntry {
            id: raw.id,
            title: raw.title,
            date,
            description: raw.description,
            is_important: raw.is_important.unwrap_or(false),
        }),
        RawEntryType::Session => TimelineEntry::Session(SessionEntry {
            id: raw.id,
            title: raw.title,
            date,
            session_number: raw.session_number,
            summary: raw.summary,
            highlights: raw.highlights,
            npcs_encountered: raw.npcs_encountered,
            locations_visited: raw.locations_visited,
            items_acquired: raw.items_acquired,
        }),
    };
    Ok(entry)
}
