//! # jetlag-engine
//!
//! Circadian-adaptation scheduler for flight itineraries.
//!
//! Given a flight's origin/destination timezones and departure/arrival
//! instants, the engine derives the direction and magnitude of the required
//! circadian shift and synthesizes a multi-day, time-stamped intervention
//! schedule (light exposure, sleep windows, melatonin, meal/exercise/caffeine
//! nudges) that walks the traveler's body clock to the destination phase.
//!
//! Everything here is pure, synchronous computation — no I/O, no shared
//! state. The host application persists the resulting [`JetlagPlan`] as
//! opaque serialized text and renders or exports it via the consumers below.
//!
//! ## Modules
//!
//! - [`trip`] — validated flight context (zones + instants)
//! - [`shift`] — shorter-arc shift resolution on the 24-hour circle
//! - [`rate`] — asymmetric advance/delay adaptation-rate model
//! - [`plan`] — plan data model, options, and JSON persistence
//! - [`synthesize`] — per-day intervention schedule generation
//! - [`describe`] — user-facing adaptation language and difficulty tiers
//! - [`export`] — RFC 5545 calendar export with deterministic UIDs
//! - [`error`] — Error types

pub mod describe;
pub mod error;
pub mod export;
pub mod plan;
pub mod rate;
pub mod shift;
pub mod synthesize;
pub mod trip;

pub use describe::{describe, AdaptationMessage, Difficulty};
pub use error::JetlagError;
pub use export::{export_document, export_to_calendar, plan_filename, CalendarDocument};
pub use plan::{InterventionEvent, InterventionKind, JetlagPlan, SynthesisOptions};
pub use rate::{plan_recovery, RecoveryRate};
pub use shift::{resolve_shift, ShiftDescriptor, ShiftDirection};
pub use synthesize::{plan_trip, synthesize};
pub use trip::TripContext;
