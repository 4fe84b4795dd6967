//! Adaptation-rate model — shift magnitude to recovery days and daily budget.
//!
//! Delaying the circadian clock is physiologically easier than advancing it,
//! so westward-equivalent shifts recover faster per day. The asymmetry is
//! load-bearing: tests assert recovery days differ for equal-magnitude east
//! vs. west shifts.

use crate::shift::{ShiftDescriptor, ShiftDirection};
use serde::{Deserialize, Serialize};

/// Maximum hours/day the body clock can shift earlier (advance, eastward).
pub const ADVANCE_HOURS_PER_DAY: f64 = 1.0;

/// Maximum hours/day the body clock can shift later (delay, westward).
pub const DELAY_HOURS_PER_DAY: f64 = 1.5;

/// How long adaptation takes and how much shift each day may apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRate {
    pub recovery_days: u32,
    pub daily_budget_hours: f64,
}

/// Convert a resolved shift into a recovery schedule envelope.
///
/// Uses the exact (fractional) magnitude so half-hour zones round up into an
/// extra day where the linear model requires one, instead of being truncated.
pub fn plan_recovery(shift: &ShiftDescriptor) -> RecoveryRate {
    let daily_budget_hours = match shift.direction {
        ShiftDirection::East => ADVANCE_HOURS_PER_DAY,
        ShiftDirection::West => DELAY_HOURS_PER_DAY,
        ShiftDirection::None => {
            return RecoveryRate {
                recovery_days: 0,
                daily_budget_hours: 0.0,
            }
        }
    };

    let recovery_days = (shift.exact_magnitude / daily_budget_hours).ceil() as u32;

    RecoveryRate {
        recovery_days,
        daily_budget_hours,
    }
}
