//! Plan data model, synthesis options, and JSON persistence.
//!
//! A [`JetlagPlan`] is created once when a flight's plan is requested and is
//! treated as immutable after generation — a flight edit triggers full
//! regeneration, never incremental patching. The host stores it as opaque
//! serialized text and revives it with [`JetlagPlan::from_json`].

use crate::shift::ShiftDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kinds of intervention the synthesizer can prescribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    LightSeek,
    LightAvoid,
    Sleep,
    Melatonin,
    Meal,
    Exercise,
    Caffeine,
}

impl InterventionKind {
    /// Stable lowercase token used in UIDs and calendar categories.
    pub fn token(&self) -> &'static str {
        match self {
            InterventionKind::LightSeek => "light_seek",
            InterventionKind::LightAvoid => "light_avoid",
            InterventionKind::Sleep => "sleep",
            InterventionKind::Melatonin => "melatonin",
            InterventionKind::Meal => "meal",
            InterventionKind::Exercise => "exercise",
            InterventionKind::Caffeine => "caffeine",
        }
    }

    /// Human-readable summary line for calendar events.
    pub fn summary(&self) -> &'static str {
        match self {
            InterventionKind::LightSeek => "Seek bright light",
            InterventionKind::LightAvoid => "Avoid bright light",
            InterventionKind::Sleep => "Target sleep window",
            InterventionKind::Melatonin => "Take melatonin",
            InterventionKind::Meal => "Meal",
            InterventionKind::Exercise => "Exercise",
            InterventionKind::Caffeine => "Caffeine window",
        }
    }
}

/// A single timed intervention within a plan.
///
/// `day` is 1-indexed relative to the arrival date in destination-local time.
/// Invariant: `start < end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionEvent {
    pub kind: InterventionKind,
    pub day: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
}

/// Inclusion flags for the optional nudge events.
///
/// Every supported flag is enumerated here with an explicit default — this is
/// deliberately not an open-ended options bag. A disabled flag fully excludes
/// that event kind from the synthesized output, not just from display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Emit a daily breakfast anchor shortly after the target wake time.
    pub include_meals: bool,
    /// Emit a daily exercise window aligned with the adaptation direction.
    pub include_exercise: bool,
    /// Emit a daily morning caffeine window with a bedtime-relative cutoff.
    pub include_caffeine: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            include_meals: true,
            include_exercise: true,
            include_caffeine: true,
        }
    }
}

/// The synthesized, day-grouped intervention schedule for one flight leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JetlagPlan {
    pub direction: ShiftDirection,
    pub magnitude_hours: u8,
    pub recovery_days: u32,
    /// Events sorted by `(day, start)`.
    pub events: Vec<InterventionEvent>,
}

impl JetlagPlan {
    /// A plan with no interventions (same-zone trips).
    pub fn empty() -> Self {
        Self {
            direction: ShiftDirection::None,
            magnitude_hours: 0,
            recovery_days: 0,
            events: Vec::new(),
        }
    }

    /// Iterate the events scheduled for a given 1-indexed recovery day.
    pub fn events_for_day(&self, day: u32) -> impl Iterator<Item = &InterventionEvent> {
        self.events.iter().filter(move |e| e.day == day)
    }

    /// Serialize for persistence in the host's flight record.
    pub fn to_json(&self) -> String {
        // Serialization of a well-formed plan cannot fail: every field is a
        // plain value with an infallible serde representation.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Revive a previously stored plan.
    ///
    /// Malformed or truncated stored text degrades to `None` ("no plan
    /// available") rather than surfacing an error to the caller.
    pub fn from_json(stored: &str) -> Option<Self> {
        serde_json::from_str(stored).ok()
    }

    /// Check the structural invariants the synthesizer guarantees.
    ///
    /// Returns the first violation found: an event with `end <= start`, two
    /// same-day events of kind sleep/light_seek/light_avoid that overlap,
    /// two sleep windows from distinct days that overlap, or a light window
    /// that overlaps any sleep window.
    pub fn check_consistency(&self) -> Result<(), String> {
        for e in &self.events {
            if e.end <= e.start {
                return Err(format!(
                    "{} event on day {} has end {} <= start {}",
                    e.kind.token(),
                    e.day,
                    e.end,
                    e.start
                ));
            }
        }

        let guarded = [
            InterventionKind::Sleep,
            InterventionKind::LightSeek,
            InterventionKind::LightAvoid,
        ];

        for (i, a) in self.events.iter().enumerate() {
            for b in &self.events[i + 1..] {
                if a.kind != b.kind || !guarded.contains(&a.kind) {
                    continue;
                }
                // Sleep windows must not overlap even across days; light
                // windows are only constrained within the same day.
                if a.kind != InterventionKind::Sleep && a.day != b.day {
                    continue;
                }
                if a.start < b.end && b.start < a.end {
                    return Err(format!(
                        "overlapping {} events on days {} and {}",
                        a.kind.token(),
                        a.day,
                        b.day
                    ));
                }
            }
        }

        // Light windows must stay clear of every sleep window, across days:
        // a sleep event can span into the next calendar day and collide with
        // windows scheduled there.
        for light in self.events.iter().filter(|e| {
            matches!(
                e.kind,
                InterventionKind::LightSeek | InterventionKind::LightAvoid
            )
        }) {
            for sleep in self
                .events
                .iter()
                .filter(|e| e.kind == InterventionKind::Sleep)
            {
                if light.start < sleep.end && sleep.start < light.end {
                    return Err(format!(
                        "{} window on day {} overlaps the sleep window of day {}",
                        light.kind.token(),
                        light.day,
                        sleep.day
                    ));
                }
            }
        }

        Ok(())
    }
}
