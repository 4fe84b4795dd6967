//! Adaptation-language translation — internal shift vocabulary to
//! user-facing text and difficulty tiers.
//!
//! A presentation adapter, not a scheduling decision: pure functions over a
//! [`ShiftDescriptor`], never feeding back into the synthesizer.

use crate::shift::{ShiftDescriptor, ShiftDirection};
use serde::{Deserialize, Serialize};

/// How hard this adaptation will feel, on fixed magnitude thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    VeryHard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very hard",
        };
        f.write_str(s)
    }
}

/// User-facing description of a resolved shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationMessage {
    pub headline: String,
    pub detail: String,
    pub difficulty: Difficulty,
    /// Present when the geographic flight direction and the circadian
    /// adaptation direction disagree (raw offset beyond 12 hours) — users
    /// otherwise find it counterintuitive that flying east can require a
    /// "delay" adaptation.
    pub direction_note: Option<String>,
}

/// Thresholds are stricter for advance shifts, mirroring the rate model's
/// asymmetry: a 1 h/day advance makes the same magnitude harder to absorb
/// than a 1.5 h/day delay.
fn classify(direction: ShiftDirection, magnitude_hours: u8) -> Difficulty {
    let (easy, moderate, hard) = match direction {
        ShiftDirection::East => (2, 4, 7),
        ShiftDirection::West => (3, 6, 9),
        ShiftDirection::None => return Difficulty::Easy,
    };
    match magnitude_hours {
        m if m <= easy => Difficulty::Easy,
        m if m <= moderate => Difficulty::Moderate,
        m if m <= hard => Difficulty::Hard,
        _ => Difficulty::VeryHard,
    }
}

/// Describe a resolved shift in user-facing language.
pub fn describe(shift: &ShiftDescriptor) -> AdaptationMessage {
    let difficulty = classify(shift.direction, shift.magnitude_hours);

    let (headline, detail) = match shift.direction {
        ShiftDirection::None => (
            "No adaptation needed".to_string(),
            "Your destination keeps the same clock time as your origin — no jetlag plan is required.".to_string(),
        ),
        ShiftDirection::East => (
            format!("Advance your body clock by {} hours", shift.magnitude_hours),
            format!(
                "You'll need to shift your sleep {} hours earlier. Advancing is the harder direction — the body manages about 1 hour per day.",
                shift.magnitude_hours
            ),
        ),
        ShiftDirection::West => (
            format!("Delay your body clock by {} hours", shift.magnitude_hours),
            format!(
                "You'll need to shift your sleep {} hours later. Delaying is the easier direction — the body manages about 1.5 hours per day.",
                shift.magnitude_hours
            ),
        ),
    };

    let direction_note = if shift.arc_flipped {
        let word = match shift.direction {
            ShiftDirection::East => "advance",
            _ => "delay",
        };
        Some(format!(
            "Although your flight crosses more than 12 hours of clock time, the shorter way around the 24-hour clock is a {} — so your plan adapts in the opposite direction from your flight path.",
            word
        ))
    } else {
        None
    };

    AdaptationMessage {
        headline,
        detail,
        difficulty,
        direction_note,
    }
}
