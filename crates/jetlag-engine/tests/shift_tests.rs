//! Tests for timezone and shift resolution — shorter-arc reduction on the
//! 24-hour circle with independent per-side DST evaluation.

use chrono::{DateTime, Utc};
use jetlag_engine::{resolve_shift, JetlagError, ShiftDirection, TripContext};

fn instant(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("test instant must parse")
        .with_timezone(&Utc)
}

fn trip(origin: &str, dest: &str, departure: &str, arrival: &str) -> TripContext {
    TripContext::new(origin, dest, instant(departure), instant(arrival))
        .expect("test trip must be valid")
}

// ---------------------------------------------------------------------------
// Direction classification
// ---------------------------------------------------------------------------

#[test]
fn same_timezone_resolves_to_none() {
    let t = trip(
        "America/Los_Angeles",
        "America/Los_Angeles",
        "2025-10-15T18:00:00-07:00",
        "2025-10-15T19:10:00-07:00",
    );
    let shift = resolve_shift(&t);

    assert_eq!(shift.direction, ShiftDirection::None);
    assert_eq!(shift.magnitude_hours, 0);
    assert_eq!(shift.exact_magnitude, 0.0);
    assert!(!shift.arc_flipped);
}

#[test]
fn new_york_to_london_is_an_advance() {
    // Both sides on summer time: EDT (UTC-4) → BST (UTC+1), delta +5.
    let t = trip(
        "America/New_York",
        "Europe/London",
        "2025-06-10T19:00:00-04:00",
        "2025-06-11T07:00:00+01:00",
    );
    let shift = resolve_shift(&t);

    assert_eq!(shift.direction, ShiftDirection::East);
    assert_eq!(shift.magnitude_hours, 5);
    assert!(!shift.arc_flipped);
}

#[test]
fn london_to_new_york_is_a_delay() {
    let t = trip(
        "Europe/London",
        "America/New_York",
        "2025-06-10T10:00:00+01:00",
        "2025-06-10T13:00:00-04:00",
    );
    let shift = resolve_shift(&t);

    assert_eq!(shift.direction, ShiftDirection::West);
    assert_eq!(shift.magnitude_hours, 5);
    assert!(!shift.arc_flipped);
}

// ---------------------------------------------------------------------------
// Shorter-arc reduction — the LAX → NRT arc-flip scenario
// ---------------------------------------------------------------------------

#[test]
fn lax_to_tokyo_reduces_sixteen_to_west_eight() {
    // Raw offset: PDT (UTC-7) → JST (UTC+9) = +16 h eastward. The shorter
    // arc is 8 h the other way: a westward-style circadian delay despite
    // the geographically eastward flight.
    let t = trip(
        "America/Los_Angeles",
        "Asia/Tokyo",
        "2025-10-15T18:00:00-07:00",
        "2025-10-16T21:00:00+09:00",
    );
    let shift = resolve_shift(&t);

    assert_eq!(shift.direction, ShiftDirection::West);
    assert_eq!(shift.magnitude_hours, 8);
    assert_eq!(shift.exact_magnitude, 8.0);
    assert!(shift.arc_flipped, "16 h raw offset must flip the arc");
}

#[test]
fn london_to_auckland_flips_to_west_eleven() {
    // January: GMT (UTC+0) → NZDT (UTC+13), raw +13 reduces to -11.
    let t = trip(
        "Europe/London",
        "Pacific/Auckland",
        "2025-01-10T20:00:00+00:00",
        "2025-01-12T10:00:00+13:00",
    );
    let shift = resolve_shift(&t);

    assert_eq!(shift.direction, ShiftDirection::West);
    assert_eq!(shift.magnitude_hours, 11);
    assert!(shift.arc_flipped);
}

#[test]
fn magnitude_is_never_the_raw_unreduced_offset() {
    let t = trip(
        "America/Los_Angeles",
        "Asia/Tokyo",
        "2025-10-15T18:00:00-07:00",
        "2025-10-16T21:00:00+09:00",
    );
    let shift = resolve_shift(&t);

    assert!(shift.magnitude_hours <= 12);
    assert!(shift.exact_magnitude <= 12.0);
}

// ---------------------------------------------------------------------------
// DST independence — each side evaluated at its own instant
// ---------------------------------------------------------------------------

#[test]
fn offsets_evaluated_at_each_sides_own_instant() {
    // Depart New York on Nov 1 (still EDT, UTC-4); land in London on Nov 2
    // after the UK already fell back to GMT (UTC+0) on Oct 26. The delta is
    // +4, not the +5 a shared-instant evaluation would produce.
    let t = trip(
        "America/New_York",
        "Europe/London",
        "2025-11-01T22:00:00-04:00",
        "2025-11-02T09:00:00+00:00",
    );
    let shift = resolve_shift(&t);

    assert_eq!(shift.direction, ShiftDirection::East);
    assert_eq!(shift.magnitude_hours, 4);
}

// ---------------------------------------------------------------------------
// Fractional offsets
// ---------------------------------------------------------------------------

#[test]
fn half_hour_zone_keeps_fractional_magnitude() {
    // January: EST (UTC-5) → IST (UTC+5:30), delta +10.5.
    let t = trip(
        "America/New_York",
        "Asia/Kolkata",
        "2025-01-10T20:00:00-05:00",
        "2025-01-11T21:30:00+05:30",
    );
    let shift = resolve_shift(&t);

    assert_eq!(shift.direction, ShiftDirection::East);
    assert_eq!(shift.exact_magnitude, 10.5, "fraction must not be discarded");
    assert_eq!(shift.magnitude_hours, 11, "rounds to the nearest hour band");
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[test]
fn invalid_timezone_is_rejected() {
    let result = TripContext::new(
        "Not/A_Zone",
        "Asia/Tokyo",
        instant("2025-10-15T18:00:00-07:00"),
        instant("2025-10-16T21:00:00+09:00"),
    );
    assert!(matches!(result, Err(JetlagError::InvalidTimezone(_))));
}

#[test]
fn inverted_instants_are_rejected() {
    let result = TripContext::new(
        "America/Los_Angeles",
        "Asia/Tokyo",
        instant("2025-10-16T21:00:00+09:00"),
        instant("2025-10-15T18:00:00-07:00"),
    );
    assert!(matches!(result, Err(JetlagError::InvalidTrip(_))));
}

#[test]
fn flight_duration_is_derived_from_the_instants() {
    let t = trip(
        "America/Los_Angeles",
        "Asia/Tokyo",
        "2025-10-15T18:00:00-07:00",
        "2025-10-16T21:00:00+09:00",
    );
    assert_eq!(t.flight_duration_hours, 11.0);
}
