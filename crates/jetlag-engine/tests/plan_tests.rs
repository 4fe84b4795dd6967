//! Tests for plan persistence — the host stores a plan as opaque text and
//! revives it later, so serialization must round-trip instants exactly and
//! degrade gracefully on corrupt input.

use chrono::{DateTime, Utc};
use jetlag_engine::{plan_trip, JetlagPlan, SynthesisOptions, TripContext};

fn instant(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("test instant must parse")
        .with_timezone(&Utc)
}

fn sample_plan() -> JetlagPlan {
    let t = TripContext::new(
        "America/Los_Angeles",
        "Asia/Tokyo",
        instant("2025-10-15T18:00:00-07:00"),
        instant("2025-10-16T21:00:00+09:00"),
    )
    .expect("trip must be valid");
    plan_trip(&t, &SynthesisOptions::default())
}

#[test]
fn json_roundtrip_preserves_the_plan_exactly() {
    let plan = sample_plan();
    let stored = plan.to_json();

    let revived = JetlagPlan::from_json(&stored).expect("stored plan must revive");
    assert_eq!(revived, plan, "timestamps and events must survive storage");
}

#[test]
fn malformed_stored_text_degrades_to_none() {
    assert!(JetlagPlan::from_json("").is_none());
    assert!(JetlagPlan::from_json("not json at all {{{").is_none());
    assert!(JetlagPlan::from_json(r#"{"direction":"sideways"}"#).is_none());
}

#[test]
fn truncated_stored_text_degrades_to_none() {
    let stored = sample_plan().to_json();
    let truncated = &stored[..stored.len() / 2];
    assert!(JetlagPlan::from_json(truncated).is_none());
}

#[test]
fn empty_plan_roundtrips() {
    let plan = JetlagPlan::empty();
    let revived = JetlagPlan::from_json(&plan.to_json()).expect("empty plan must revive");
    assert_eq!(revived, plan);
}

#[test]
fn events_for_day_groups_by_recovery_day() {
    let plan = sample_plan();
    let total: usize = (1..=plan.recovery_days)
        .map(|d| plan.events_for_day(d).count())
        .sum();
    assert_eq!(total, plan.events.len(), "every event belongs to some day");
    assert_eq!(plan.events_for_day(0).count(), 0);
    assert_eq!(plan.events_for_day(plan.recovery_days + 1).count(), 0);
}
