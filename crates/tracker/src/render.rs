//! Plain-text rendering of the tracker display.
//!
//! Builds the calendar grid, the current date/time widget, and the adventure
//! log listing with the nearest-entry highlight. Pure string building over
//! its inputs; all selection state arrives as plain parameters.

use almanac::{
    filter_by_exact_date, find_nearest, month_grid_by_weeks, CalendarDate, CurrentState, Era,
    Month, TimeOfDay, TimelineEntry, WEEKDAYS,
};

/// Renders the current date/time widget, e.g.
/// "Star Day, Sep 13, AD 327 at bell 3:2".
pub fn render_current(date: &CalendarDate, time: &TimeOfDay) -> String {
    format!("{} at bell {}", date.format_with_weekday(), time)
}

/// Renders a month as a 4x7 day grid with a weekday header.
///
/// The selected day, when given, is bracketed. The Veil month renders as a
/// single-cell grid in place of the week rows.
pub fn render_month_grid(month: Month, year: i32, era: Era, selected_day: Option<u8>) -> String {
    let info = month.info();
    let mut out = format!("{} {} {} - {}\n", info.abbrev, year, era, info.notes);

    if month.is_veil() {
        let cell = if selected_day == Some(1) {
            "[Veil Day]"
        } else {
            " Veil Day"
        };
        out.push_str(cell);
        out.push('\n');
        return out;
    }

    let header: Vec<String> = WEEKDAYS
        .iter()
        .map(|wd| format!("{:<4}", wd.short_name()))
        .collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');

    for week in month_grid_by_weeks(month) {
        let mut row = String::new();
        for day in week {
            if selected_day == Some(day) {
                row.push_str(&format!("[{:>2}] ", day));
            } else {
                row.push_str(&format!("{:>3}  ", day));
            }
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

/// Renders the adventure log listing.
///
/// The entry nearest to the selected date is marked with `>`; entries that
/// fall exactly on the selected date are listed again in an "On this day"
/// section. The timeline is expected in display order (newest first, as the
/// transform leaves it) and is not re-sorted here.
pub fn render_adventure_log(timeline: &[TimelineEntry], selected: &CalendarDate) -> String {
    if timeline.is_empty() {
        return "Adventure Log\n  (no entries)\n".to_string();
    }

    let nearest = find_nearest(timeline, selected);
    let mut out = String::from("Adventure Log\n");
    for entry in timeline {
        let marker = match nearest {
            Some(hit) if std::ptr::eq(hit, entry) => '>',
            _ => ' ',
        };
        out.push_str(&format!(
            "{} [{}] {} ({})\n",
            marker,
            entry_label(entry),
            entry.title(),
            entry.date().format()
        ));
    }

    let same_day = filter_by_exact_date(timeline, selected);
    if !same_day.is_empty() {
        out.push_str(&format!("On this day ({}):\n", selected.format()));
        for entry in same_day {
            out.push_str(&format!("  {}\n", entry.title()));
        }
    }
    out
}

/// Short label for a log line: `S<n>` for sessions, `E` for events with `!`
/// appended when the event is flagged important.
fn entry_label(entry: &TimelineEntry) -> String {
    match entry {
        TimelineEntry::Session(s) => match s.session_number {
            Some(n) => format!("S{}", n),
            None => "S?".to_string(),
        },
        TimelineEntry::Event(e) => {
            if e.is_important {
                "E!".to_string()
            } else {
                "E".to_string()
            }
        }
    }
}

/// Renders the detail block for one entry.
pub fn render_entry_details(entry: &TimelineEntry) -> String {
    let mut out = String::new();
    match entry {
        TimelineEntry::Event(e) => {
            out.push_str(&format!("Event: {}\n", e.title));
            if let Some(description) = &e.description {
                out.push_str(&format!("  {}\n", description));
            }
        }
        TimelineEntry::Session(s) => {
            match s.session_number {
                Some(n) => out.push_str(&format!("Session {}: {}\n", n, s.title)),
                None => out.push_str(&format!("Session: {}\n", s.title)),
            }
            if let Some(summary) = &s.summary {
                out.push_str(&format!("  {}\n", summary));
            }
            push_list(&mut out, "Highlights", &s.highlights);
            push_list(&mut out, "NPCs encountered", &s.npcs_encountered);
            push_list(&mut out, "Locations visited", &s.locations_visited);
            push_list(&mut out, "Items acquired", &s.items_acquired);
        }
    }
    out
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("  {}:\n", heading));
    for item in items {
        out.push_str(&format!("    - {}\n", item));
    }
}

/// Renders the full tracker display for one snapshot and selected date.
pub fn render_tracker(state: &CurrentState, selected: &CalendarDate) -> String {
    let mut out = format!("Current: {}\n\n", render_current(&state.date, &state.time));

    out.push_str(&render_month_grid(
        selected.month,
        selected.year,
        selected.era,
        Some(selected.day),
    ));
    out.push('\n');

    out.push_str(&render_adventure_log(&state.timeline, selected));

    if let Some(nearest) = find_nearest(&state.timeline, selected) {
        out.push('\n');
        out.push_str(&render_entry_details(nearest));
    }
    out
}
