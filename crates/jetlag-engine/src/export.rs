//! Calendar export — serializes a plan into an RFC 5545 `VCALENDAR` text.
//!
//! One `VEVENT` per intervention. UIDs derive deterministically from
//! `(flight_id, kind, day, start)` so repeated exports of the same
//! unmodified plan are byte-stable; DTSTAMP is derived from the event start
//! for the same reason. All event times are emitted as absolute UTC
//! timestamps, never floating local time, so the document cannot drift when
//! opened in a third timezone.

use crate::error::{JetlagError, Result};
use crate::plan::JetlagPlan;
use chrono::{DateTime, Utc};

/// Maximum content-line length in octets before folding (RFC 5545 §3.1).
const FOLD_AT: usize = 75;

/// A ready-to-download calendar export.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDocument {
    /// Conventional download filename, `jetlag-plan-{ORIGIN}-{DEST}-{date}.ics`.
    pub filename: String,
    /// The serialized `VCALENDAR` text (CRLF line endings).
    pub ics: String,
}

impl std::fmt::Display for CalendarDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.ics)
    }
}

/// Build the conventional download filename for a plan export.
///
/// Codes are uppercased IATA-style; the date is the departure's UTC date.
pub fn plan_filename(origin: &str, dest: &str, departure: DateTime<Utc>) -> String {
    format!(
        "jetlag-plan-{}-{}-{}.ics",
        origin.to_uppercase(),
        dest.to_uppercase(),
        departure.format("%Y-%m-%d")
    )
}

/// Serialize a plan to `VCALENDAR` text.
///
/// An empty plan produces a valid calendar shell with zero `VEVENT`s.
///
/// # Errors
/// Returns `JetlagError::Export` when the plan is internally inconsistent
/// (an event with `end <= start`, or overlapping same-kind sleep/light
/// windows) — the exporter never emits a corrupt document and never panics
/// past its boundary.
pub fn export_to_calendar(plan: &JetlagPlan, flight_id: &str) -> Result<String> {
    plan.check_consistency().map_err(JetlagError::Export)?;

    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//jetlag-engine//circadian adaptation//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for event in &plan.events {
        let stamp = format_utc(event.start);
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:jetlag-{}-{}-d{}-{}@jetlag-engine",
            flight_id,
            event.kind.token(),
            event.day,
            stamp
        ));
        lines.push(format!("DTSTAMP:{}", stamp));
        lines.push(format!("DTSTART:{}", stamp));
        lines.push(format!("DTEND:{}", format_utc(event.end)));
        lines.push(format!(
            "SUMMARY:Day {}: {}",
            event.day,
            event.kind.summary()
        ));
        lines.push(format!(
            "DESCRIPTION:{}",
            escape_text(&event.description)
        ));
        lines.push(format!("CATEGORIES:{}", event.kind.token().to_uppercase()));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        fold_line(&mut out, line);
    }
    Ok(out)
}

/// Serialize a plan and pair it with its conventional filename.
pub fn export_document(
    plan: &JetlagPlan,
    flight_id: &str,
    origin: &str,
    dest: &str,
    departure: DateTime<Utc>,
) -> Result<CalendarDocument> {
    Ok(CalendarDocument {
        filename: plan_filename(origin, dest, departure),
        ics: export_to_calendar(plan, flight_id)?,
    })
}

/// UTC basic format with the `Z` designator, e.g. `20251016T120000Z`.
fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape TEXT property values per RFC 5545 §3.3.11.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Append a content line, folding at 75 octets with CRLF + space
/// continuations. Splits only at char boundaries so multi-byte characters
/// are never cut.
fn fold_line(out: &mut String, line: &str) {
    let mut budget = FOLD_AT;
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > budget {
            out.push_str("\r\n ");
            width = 0;
            // Continuation lines start with a space, leaving one less octet.
            budget = FOLD_AT - 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
}
