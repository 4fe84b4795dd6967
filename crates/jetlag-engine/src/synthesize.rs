//! Schedule synthesis — converts a resolved shift and recovery envelope into
//! ordered, non-overlapping intervention events.
//!
//! All scheduling happens in destination-local wall time anchored to the
//! arrival date, then converts to UTC instants. Local times that fall in a
//! DST gap shift forward to the next valid wall time; ambiguous times take
//! the earliest mapping.

use crate::plan::{InterventionEvent, InterventionKind, JetlagPlan, SynthesisOptions};
use crate::rate::{plan_recovery, RecoveryRate};
use crate::shift::{resolve_shift, ShiftDescriptor, ShiftDirection};
use crate::trip::TripContext;
use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Canonical target bedtime at the destination, minutes after local midnight.
const TARGET_BEDTIME_MIN: i64 = 23 * 60;

/// Fixed sleep window length.
const SLEEP_WINDOW_HOURS: i64 = 8;

/// Nominal light-exposure window length.
const LIGHT_WINDOW_MIN: i64 = 45;

/// A daylight-clamped light window shorter than this is dropped for the day.
const MIN_LIGHT_WINDOW_MIN: i64 = 30;

/// Fixed daylight simplification — sunrise/sunset assumed at 06:00/18:00
/// local absent astronomical data.
const DAYLIGHT_START_MIN: i64 = 6 * 60;
const DAYLIGHT_END_MIN: i64 = 18 * 60;

/// Melatonin lead time before target bedtime (advance plans only).
const MELATONIN_LEAD_HOURS: i64 = 5;

/// Resolve, rate, and synthesize in one call — the full pipeline for a trip.
pub fn plan_trip(trip: &TripContext, options: &SynthesisOptions) -> JetlagPlan {
    let shift = resolve_shift(trip);
    let rate = plan_recovery(&shift);
    synthesize(trip, &shift, &rate, options)
}

/// Synthesize the per-day intervention schedule for a resolved shift.
///
/// For `ShiftDirection::None` the plan is empty — no intervention is
/// prescribed. Long recoveries are never truncated: a 12-hour advance
/// produces all twelve days, since truncation would silently misrepresent
/// the recovery duration.
pub fn synthesize(
    trip: &TripContext,
    shift: &ShiftDescriptor,
    rate: &RecoveryRate,
    options: &SynthesisOptions,
) -> JetlagPlan {
    if shift.direction == ShiftDirection::None || rate.recovery_days == 0 {
        return JetlagPlan::empty();
    }

    let tz = trip.destination_tz;
    let arrival_date = trip.arrival.with_timezone(&tz).date_naive();
    let magnitude_min = (shift.exact_magnitude * 60.0).round() as i64;
    let budget_min = (rate.daily_budget_hours * 60.0).round() as i64;

    let mut events: Vec<InterventionEvent> = Vec::new();

    for day in 1..=rate.recovery_days {
        let applied_min = (day as i64 * budget_min).min(magnitude_min);
        let remaining_min = magnitude_min - applied_min;

        let midnight = (arrival_date + Duration::days(day as i64 - 1)).and_time(NaiveTime::MIN);

        // The body clock starts displaced from the 23:00 anchor by the full
        // magnitude and walks toward it: advance plans start later and move
        // earlier each day, delay plans start earlier and move later.
        let bedtime_shift_min = match shift.direction {
            ShiftDirection::East => remaining_min,
            ShiftDirection::West => -remaining_min,
            ShiftDirection::None => 0,
        };
        let bedtime_local = midnight + Duration::minutes(TARGET_BEDTIME_MIN + bedtime_shift_min);
        let sleep_start = local_to_utc(tz, bedtime_local);
        // Wake is the sleep window's absolute end, not bedtime plus eight
        // wall-clock hours. The two disagree by an hour when the night spans
        // a DST transition, and every wake-anchored window must agree with
        // the sleep event it follows.
        let sleep_end = sleep_start + Duration::hours(SLEEP_WINDOW_HOURS);

        push_sleep(&mut events, day, sleep_start, bedtime_local);
        push_light_windows(
            &mut events,
            tz,
            shift.direction,
            day,
            bedtime_local,
            sleep_start,
            sleep_end,
        );

        // Melatonin advances the clock; it is contraindicated for delay
        // plans and must be omitted entirely, not just de-emphasized.
        if shift.direction == ShiftDirection::East {
            push_event(
                &mut events,
                InterventionKind::Melatonin,
                day,
                local_to_utc(tz, bedtime_local - Duration::hours(MELATONIN_LEAD_HOURS)),
                Duration::minutes(15),
                "Take 0.5 mg melatonin (nominal low dose), 5 hours before your target bedtime, to advance your body clock.".to_string(),
            );
        }

        if options.include_meals {
            push_event(
                &mut events,
                InterventionKind::Meal,
                day,
                sleep_end + Duration::minutes(30),
                Duration::minutes(30),
                "Eat breakfast shortly after waking to anchor your shifted rhythm.".to_string(),
            );
        }

        if options.include_exercise {
            let start = match shift.direction {
                ShiftDirection::East => sleep_end + Duration::hours(2),
                _ => local_to_utc(tz, bedtime_local - Duration::hours(4)),
            };
            push_event(
                &mut events,
                InterventionKind::Exercise,
                day,
                start,
                Duration::minutes(45),
                "Moderate exercise aligned with your target phase helps the shift along."
                    .to_string(),
            );
        }

        if options.include_caffeine {
            push_event(
                &mut events,
                InterventionKind::Caffeine,
                day,
                sleep_end,
                Duration::hours(2),
                "Caffeine is fine in this window; avoid it within 8 hours of your target bedtime."
                    .to_string(),
            );
        }
    }

    // Day-1 events cannot precede the arrival. The sleep window survives a
    // late landing: shortened when in progress, restarted at touchdown when
    // the nominal window is already over. Other events already finished when
    // the flight lands are dropped, in-progress ones are clipped.
    events.retain(|e| {
        e.day != 1 || e.kind == InterventionKind::Sleep || e.end > trip.arrival
    });
    for e in events.iter_mut().filter(|e| e.day == 1) {
        if e.kind == InterventionKind::Sleep && e.end <= trip.arrival {
            e.start = trip.arrival;
            e.end = trip.arrival + Duration::hours(SLEEP_WINDOW_HOURS);
        } else if e.start < trip.arrival {
            e.start = trip.arrival;
        }
    }

    // Clipping can push a day-1 window into the (possibly restarted) sleep
    // window; a restart also strands the nominal wake-anchored nudges inside
    // it. Everything overlapping the final day-1 sleep interval is dropped
    // rather than left colliding with it.
    let day_one_sleep = events
        .iter()
        .find(|e| e.day == 1 && e.kind == InterventionKind::Sleep)
        .map(|e| (e.start, e.end));
    if let Some((sleep_start, sleep_end)) = day_one_sleep {
        events.retain(|e| {
            e.day != 1
                || e.kind == InterventionKind::Sleep
                || e.end <= sleep_start
                || e.start >= sleep_end
        });
    }

    events.sort_by_key(|e| (e.day, e.start));

    let plan = JetlagPlan {
        direction: shift.direction,
        magnitude_hours: shift.magnitude_hours,
        recovery_days: rate.recovery_days,
        events,
    };
    debug_assert!(plan.check_consistency().is_ok());
    plan
}

/// Emit the day's single 8-hour sleep window.
///
/// Day-1 arrival clipping happens uniformly in `synthesize`; the window
/// keeps its end, so a late arrival yields a shortened first night rather
/// than a displaced one.
fn push_sleep(
    events: &mut Vec<InterventionEvent>,
    day: u32,
    start: DateTime<Utc>,
    bedtime_local: NaiveDateTime,
) {
    events.push(InterventionEvent {
        kind: InterventionKind::Sleep,
        day,
        start,
        end: start + Duration::hours(SLEEP_WINDOW_HOURS),
        description: format!(
            "Target sleep window for day {} — lights out by {}.",
            day,
            bedtime_local.format("%H:%M")
        ),
    });
}

/// Emit the day's light-seeking and light-avoidance windows.
///
/// Advance plans seek morning light after waking and avoid evening light
/// before bed; delay plans seek evening light before bed and avoid light
/// right after waking. Seek windows are clamped to the fixed 06:00–18:00
/// daylight band and dropped when less than 30 minutes of it remains. The
/// endpoints shared with the sleep window are the converted `sleep_start`
/// and `sleep_end` instants themselves, so the windows stay clear of the
/// sleep event even when the night spans a DST transition.
fn push_light_windows(
    events: &mut Vec<InterventionEvent>,
    tz: Tz,
    direction: ShiftDirection,
    day: u32,
    bedtime_local: NaiveDateTime,
    sleep_start: DateTime<Utc>,
    sleep_end: DateTime<Utc>,
) {
    match direction {
        ShiftDirection::East => {
            let wake_date = sleep_end.with_timezone(&tz).date_naive();
            let daylight_start = local_to_utc(
                tz,
                wake_date.and_time(NaiveTime::MIN) + Duration::minutes(DAYLIGHT_START_MIN),
            );
            let daylight_end = local_to_utc(
                tz,
                wake_date.and_time(NaiveTime::MIN) + Duration::minutes(DAYLIGHT_END_MIN),
            );
            let seek_start = sleep_end.max(daylight_start);
            let seek_end = (seek_start + Duration::minutes(LIGHT_WINDOW_MIN)).min(daylight_end);
            if seek_end - seek_start >= Duration::minutes(MIN_LIGHT_WINDOW_MIN) {
                push_event(
                    events,
                    InterventionKind::LightSeek,
                    day,
                    seek_start,
                    seek_end - seek_start,
                    "Get bright morning light as soon as you wake — it pulls your clock earlier."
                        .to_string(),
                );
            }

            push_event(
                events,
                InterventionKind::LightAvoid,
                day,
                sleep_start - Duration::minutes(LIGHT_WINDOW_MIN),
                Duration::minutes(LIGHT_WINDOW_MIN),
                "Dim the lights before bed; evening light pushes your clock the wrong way."
                    .to_string(),
            );
        }
        ShiftDirection::West => {
            let bedtime_date = bedtime_local.date();
            let daylight_start = local_to_utc(
                tz,
                bedtime_date.and_time(NaiveTime::MIN) + Duration::minutes(DAYLIGHT_START_MIN),
            );
            let daylight_end = local_to_utc(
                tz,
                bedtime_date.and_time(NaiveTime::MIN) + Duration::minutes(DAYLIGHT_END_MIN),
            );
            let seek_end = sleep_start.min(daylight_end);
            let seek_start = (seek_end - Duration::minutes(LIGHT_WINDOW_MIN)).max(daylight_start);
            if seek_end - seek_start >= Duration::minutes(MIN_LIGHT_WINDOW_MIN) {
                push_event(
                    events,
                    InterventionKind::LightSeek,
                    day,
                    seek_start,
                    seek_end - seek_start,
                    "Get bright evening light to push your clock later.".to_string(),
                );
            }

            push_event(
                events,
                InterventionKind::LightAvoid,
                day,
                sleep_end,
                Duration::minutes(LIGHT_WINDOW_MIN),
                "Keep light low right after waking; early light pulls your clock forward."
                    .to_string(),
            );
        }
        ShiftDirection::None => {}
    }
}

/// Append an event as an absolute start plus a fixed duration, which keeps
/// `start < end` unconditionally.
fn push_event(
    events: &mut Vec<InterventionEvent>,
    kind: InterventionKind,
    day: u32,
    start: DateTime<Utc>,
    duration: Duration,
    description: String,
) {
    events.push(InterventionEvent {
        kind,
        day,
        start,
        end: start + duration,
        description,
    });
}

/// Map a destination-local wall time to a UTC instant.
///
/// DST gap times shift forward one hour to the next valid wall time;
/// ambiguous times resolve to the earliest mapping.
fn local_to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => match tz.from_local_datetime(&(local + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            // Unreachable for real tzdata, but never panic over it.
            LocalResult::None => local.and_utc(),
        },
    }
}
