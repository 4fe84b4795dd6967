//! Shift resolution — how far, and which way, the body clock must move.
//!
//! Computes the wall-clock offset delta between the origin zone (evaluated at
//! the departure instant) and the destination zone (evaluated at the arrival
//! instant), then reduces it to the shorter arc of the 24-hour circle. An
//! eastward geographic flight can therefore resolve to a westward-style
//! circadian adaptation when the raw offset exceeds 12 hours.

use crate::trip::TripContext;
use chrono::Offset;
use serde::{Deserialize, Serialize};

/// Direction of the required circadian adaptation.
///
/// `East` means the body clock must *advance* (shift earlier), `West` means
/// it must *delay* (shift later). This is the circadian direction after
/// shorter-arc reduction, not the geographic heading of the flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    East,
    West,
    None,
}

/// The resolved circadian shift for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftDescriptor {
    pub direction: ShiftDirection,
    /// Shorter-arc magnitude rounded to the nearest hour, always in `0..=12`.
    pub magnitude_hours: u8,
    /// Unrounded shorter-arc magnitude in fractional hours. Zones with 30/45
    /// minute offsets keep their remainder here so the rate model never
    /// schedules against a truncated value.
    pub exact_magnitude: f64,
    /// True when shorter-arc reduction flipped the sign of the raw delta —
    /// the geographic and circadian directions disagree.
    pub arc_flipped: bool,
}

/// Resolve the circadian shift a trip requires.
///
/// Each zone's UTC offset is evaluated at its *own* relevant instant (origin
/// at departure, destination at arrival) so DST transitions on either side
/// are accounted for independently.
pub fn resolve_shift(trip: &TripContext) -> ShiftDescriptor {
    let origin_offset_min = trip
        .departure
        .with_timezone(&trip.origin_tz)
        .offset()
        .fix()
        .local_minus_utc()
        / 60;
    let dest_offset_min = trip
        .arrival
        .with_timezone(&trip.destination_tz)
        .offset()
        .fix()
        .local_minus_utc()
        / 60;

    let raw_delta_min = dest_offset_min - origin_offset_min;

    // Reduce to the shorter arc in (-12h, +12h]. An exact 12-hour tie keeps
    // the raw geographic direction rather than arbitrarily flipping it.
    let mut reduced_min = raw_delta_min.rem_euclid(24 * 60);
    if reduced_min > 12 * 60 {
        reduced_min -= 24 * 60;
    }
    if reduced_min == 12 * 60 && raw_delta_min < 0 {
        reduced_min = -12 * 60;
    }

    let exact_magnitude = reduced_min.abs() as f64 / 60.0;
    let magnitude_hours = exact_magnitude.round().min(12.0) as u8;

    let direction = match reduced_min {
        0 => ShiftDirection::None,
        m if m > 0 => ShiftDirection::East,
        _ => ShiftDirection::West,
    };

    let arc_flipped =
        reduced_min != 0 && raw_delta_min != 0 && reduced_min.signum() != raw_delta_min.signum();

    ShiftDescriptor {
        direction,
        magnitude_hours,
        exact_magnitude,
        arc_flipped,
    }
}
