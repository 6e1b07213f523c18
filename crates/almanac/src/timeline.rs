//! Timeline Entries and Resolution
//!
//! The adventure log is a list of narrative records, either world events or
//! played sessions. This module owns the canonical display ordering and the
//! "nearest entry to a date" resolution that drives the log highlight.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::date::CalendarDate;

/// A world event on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEntry {
    pub id: String,
    pub title: String,
    pub date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_important: bool,
}

/// A played game session on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    pub id: String,
    pub title: String,
    pub date: CalendarDate,
    /// Sequence number of the session. Older log entries may lack one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub npcs_encountered: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations_visited: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items_acquired: Vec<String>,
}

/// One record on the campaign timeline.
///
/// Events and sessions carry different payloads, so they are distinct
/// variants rather than one struct of optionals; matching on the variant is
/// exhaustive and a session cannot masquerade as an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineEntry {
    Event(EventEntry),
    Session(SessionEntry),
}

impl TimelineEntry {
    /// Unique identifier of the entry.
    pub fn id(&self) -> &str {
        match self {
            TimelineEntry::Event(e) => &e.id,
            TimelineEntry::Session(s) => &s.id,
        }
    }

    /// Display title of the entry.
    pub fn title(&self) -> &str {
        match self {
            TimelineEntry::Event(e) => &e.title,
            TimelineEntry::Session(s) => &s.title,
        }
    }

    /// Date the entry occurred on.
    pub fn date(&self) -> &CalendarDate {
        match self {
            TimelineEntry::Event(e) => &e.date,
            TimelineEntry::Session(s) => &s.date,
        }
    }

    /// Session number, for sessions that carry one.
    pub fn session_number(&self) -> Option<u32> {
        match self {
            TimelineEntry::Event(_) => None,
            TimelineEntry::Session(s) => s.session_number,
        }
    }

    /// True for session entries.
    pub fn is_session(&self) -> bool {
        matches!(self, TimelineEntry::Session(_))
    }

    /// True for events flagged important.
    pub fn is_important(&self) -> bool {
        matches!(self, TimelineEntry::Event(e) if e.is_important)
    }
}

/// Sorts the timeline into display order: newest first.
///
/// Entries with equal date keys put sessions before events; same-day
/// sessions order by higher session number first. The sort is stable, so
/// entries the rules cannot separate keep their input order.
pub fn sort_descending(entries: &mut [TimelineEntry]) {
    entries.sort_by(compare_descending);
}

fn compare_descending(a: &TimelineEntry, b: &TimelineEntry) -> Ordering {
    b.date()
        .date_key()
        .cmp(&a.date().date_key())
        .then_with(|| type_rank(a).cmp(&type_rank(b)))
        .then_with(|| match (a.session_number(), b.session_number()) {
            (Some(an), Some(bn)) => bn.cmp(&an),
            _ => Ordering::Equal,
        })
}

fn type_rank(entry: &TimelineEntry) -> u8 {
    if entry.is_session() {
        0
    } else {
        1
    }
}

/// Finds the timeline entry nearest to a query date.
///
/// Prefers the most recent entry on or before the query; when the query
/// predates the whole timeline, falls back to the oldest entry. Same-day
/// candidates tie-break by session number, favoring the later session on the
/// past branch and the earlier session on the future branch, so the pick is
/// the one that would have been experienced in sequence. Ties where either
/// candidate lacks a session number keep the first encountered; that choice
/// follows input order and is implementation-defined, not a contract.
///
/// Returns `None` only for an empty timeline.
pub fn find_nearest<'a>(
    entries: &'a [TimelineEntry],
    query: &CalendarDate,
) -> Option<&'a TimelineEntry> {
    let query_key = query.date_key();

    let mut latest_past: Option<&TimelineEntry> = None;
    for entry in entries {
        let key = entry.date().date_key();
        if key > query_key {
            continue;
        }
        match latest_past {
            None => latest_past = Some(entry),
            Some(best) => {
                let best_key = best.date().date_key();
                if key > best_key {
                    latest_past = Some(entry);
                } else if key == best_key {
                    if let (Some(n), Some(bn)) = (entry.session_number(), best.session_number()) {
                        if n > bn {
                            latest_past = Some(entry);
                        }
                    }
                }
            }
        }
    }
    if latest_past.is_some() {
        return latest_past;
    }

    // Query predates every entry: the oldest entry is the nearest one.
    let mut oldest: Option<&TimelineEntry> = None;
    for entry in entries {
        let key = entry.date().date_key();
        match oldest {
            None => oldest = Some(entry),
            Some(best) => {
                let best_key = best.date().date_key();
                if key < best_key {
                    oldest = Some(entry);
                } else if key == best_key {
                    if let (Some(n), Some(bn)) = (entry.session_number(), best.session_number()) {
                        if n < bn {
                            oldest = Some(entry);
                        }
                    }
                }
            }
        }
    }
    oldest
}

/// Returns the entries that fall exactly on the given date.
///
/// Surfaces same-day items distinct from the nearest pick; era and weekday
/// are not part of the match.
pub fn filter_by_exact_date<'a>(
    entries: &'a [TimelineEntry],
    date: &CalendarDate,
) -> Vec<&'a TimelineEntry> {
    entries.iter().filter(|e| e.date().same_day(date)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Month;
    use crate::date::Era;

    fn date(year: i32, month: Month, day: u8) -> CalendarDate {
        CalendarDate::new(year, Era::AD, month, day).unwrap()
    }

    fn event(id: &str, d: CalendarDate) -> TimelineEntry {
        TimelineEntry::Event(EventEntry {
            id: id.to_string(),
            title: format!("event {}", id),
            date: d,
            description: None,
            is_important: false,
        })
    }

    fn session(id: &str, number: Option<u32>, d: CalendarDate) -> TimelineEntry {
        TimelineEntry::Session(SessionEntry {
            id: id.to_string(),
            title: format!("session {}", id),
            date: d,
            session_number: number,
            summary: None,
            highlights: Vec::new(),
            npcs_encountered: Vec::new(),
            locations_visited: Vec::new(),
            items_acquired: Vec::new(),
        })
    }

    fn ids(entries: &[TimelineEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_sort_descending_by_date() {
        let mut timeline = vec![
            event("old", date(327, Month::Sep, 10)),
            event("new", date(327, Month::Ock, 15)),
            event("mid", date(327, Month::Sep, 20)),
        ];
        sort_descending(&mut timeline);
        assert_eq!(ids(&timeline), ["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_sessions_before_events_on_same_day() {
        let mut timeline = vec![
            event("e", date(327, Month::Sep, 10)),
            session("s", Some(1), date(327, Month::Sep, 10)),
        ];
        sort_descending(&mut timeline);
        assert_eq!(ids(&timeline), ["s", "e"]);
    }

    #[test]
    fn test_sort_same_day_sessions_by_number_desc() {
        let mut timeline = vec![
            session("s1", Some(1), date(327, Month::Sep, 10)),
            session("s3", Some(3), date(327, Month::Sep, 10)),
            session("s2", Some(2), date(327, Month::Sep, 10)),
        ];
        sort_descending(&mut timeline);
        assert_eq!(ids(&timeline), ["s3", "s2", "s1"]);
    }

    #[test]
    fn test_sort_stable_without_session_numbers() {
        let mut timeline = vec![
            session("a", None, date(327, Month::Sep, 10)),
            session("b", None, date(327, Month::Sep, 10)),
            session("c", None, date(327, Month::Sep, 10)),
        ];
        sort_descending(&mut timeline);
        assert_eq!(ids(&timeline), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_idempotent() {
        let mut timeline = vec![
            session("s2", Some(2), date(327, Month::Ock, 2)),
            session("s1", Some(1), date(327, Month::Sep, 10)),
            event("e", date(327, Month::Sep, 10)),
        ];
        sort_descending(&mut timeline);
        let once = timeline.clone();
        sort_descending(&mut timeline);
        assert_eq!(timeline, once);
    }

    #[test]
    fn test_sort_empty() {
        let mut timeline: Vec<TimelineEntry> = Vec::new();
        sort_descending(&mut timeline);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_find_nearest_empty() {
        let timeline: Vec<TimelineEntry> = Vec::new();
        assert!(find_nearest(&timeline, &date(327, Month::Sep, 13)).is_none());
    }

    #[test]
    fn test_find_nearest_exact_match() {
        let timeline = vec![
            session("s1", Some(1), date(327, Month::Sep, 10)),
            event("festival", date(327, Month::Ock, 15)),
        ];
        let hit = find_nearest(&timeline, &date(327, Month::Ock, 15)).unwrap();
        assert_eq!(hit.id(), "festival");
    }

    #[test]
    fn test_find_nearest_scenario_table() {
        // The reference scenario: one session, one later event.
        let timeline = vec![
            session("s1", Some(1), date(327, Month::Sep, 10)),
            event("festival", date(327, Month::Ock, 15)),
        ];

        // Query between the two: the session is the only past entry.
        let hit = find_nearest(&timeline, &date(327, Month::Sep, 13)).unwrap();
        assert_eq!(hit.id(), "s1");

        // Query before everything: oldest entry wins.
        let hit = find_nearest(&timeline, &date(327, Month::Jan, 1)).unwrap();
        assert_eq!(hit.id(), "s1");

        // Query on the event date: exact match on the past-or-present branch.
        let hit = find_nearest(&timeline, &date(327, Month::Ock, 15)).unwrap();
        assert_eq!(hit.id(), "festival");
    }

    #[test]
    fn test_find_nearest_past_tie_prefers_higher_session() {
        let timeline = vec![
            session("s1", Some(1), date(327, Month::Sep, 10)),
            session("s2", Some(2), date(327, Month::Sep, 10)),
        ];
        let hit = find_nearest(&timeline, &date(327, Month::Sep, 13)).unwrap();
        assert_eq!(hit.id(), "s2");
    }

    #[test]
    fn test_find_nearest_future_tie_prefers_lower_session() {
        let timeline = vec![
            session("s2", Some(2), date(327, Month::Ock, 1)),
            session("s1", Some(1), date(327, Month::Ock, 1)),
        ];
        let hit = find_nearest(&timeline, &date(327, Month::Sep, 1)).unwrap();
        assert_eq!(hit.id(), "s1");
    }

    #[test]
    fn test_find_nearest_tie_without_numbers_keeps_first() {
        let timeline = vec![
            event("first", date(327, Month::Sep, 10)),
            event("second", date(327, Month::Sep, 10)),
        ];
        let hit = find_nearest(&timeline, &date(327, Month::Sep, 13)).unwrap();
        assert_eq!(hit.id(), "first");
    }

    #[test]
    fn test_find_nearest_ignores_order() {
        // Order-independent apart from the documented no-number tie.
        let a = vec![
            session("s1", Some(1), date(327, Month::Sep, 10)),
            event("festival", date(327, Month::Ock, 15)),
        ];
        let mut b = a.clone();
        b.reverse();
        let query = date(327, Month::Sep, 13);
        assert_eq!(
            find_nearest(&a, &query).unwrap().id(),
            find_nearest(&b, &query).unwrap().id()
        );
    }

    #[test]
    fn test_filter_by_exact_date() {
        let timeline = vec![
            session("s1", Some(1), date(327, Month::Sep, 10)),
            event("e1", date(327, Month::Sep, 10)),
            event("e2", date(327, Month::Sep, 11)),
        ];
        let same_day = filter_by_exact_date(&timeline, &date(327, Month::Sep, 10));
        assert_eq!(
            same_day.iter().map(|e| e.id()).collect::<Vec<_>>(),
            ["s1", "e1"]
        );
        assert!(filter_by_exact_date(&timeline, &date(326, Month::Sep, 10)).is_empty());
    }

    #[test]
    fn test_entry_serde_tag() {
        let entry = session("session-1", Some(1), date(327, Month::Sep, 10));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""type":"session""#));
        assert!(json.contains(r#""sessionNumber":1"#));
        let back: TimelineEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
