//! WASM bindings for jetlag-engine.
//!
//! Exposes plan synthesis, shift description, and calendar export to
//! JavaScript via `wasm-bindgen` — the host web application calls these from
//! its flight routes. All complex values cross the boundary as JSON strings;
//! datetimes cross as RFC 3339 strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p jetlag-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/jetlag-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/jetlag_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use jetlag_engine::{JetlagPlan, SynthesisOptions, TripContext};
use wasm_bindgen::prelude::*;

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

/// Build a validated trip context from the raw boundary values.
fn build_trip(
    origin_tz: &str,
    destination_tz: &str,
    departure: &str,
    arrival: &str,
) -> Result<TripContext, JsValue> {
    let departure = parse_instant(departure)?;
    let arrival = parse_instant(arrival)?;
    TripContext::new(origin_tz, destination_tz, departure, arrival)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute a jetlag plan for a flight leg.
///
/// `options_json` is an optional JSON object with `include_meals`,
/// `include_exercise`, and `include_caffeine` booleans; omitted fields take
/// their defaults (all enabled). Returns the plan as a JSON string suitable
/// for storage and for later `exportCalendar` calls.
#[wasm_bindgen(js_name = "planTrip")]
pub fn plan_trip(
    origin_tz: &str,
    destination_tz: &str,
    departure: &str,
    arrival: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let trip = build_trip(origin_tz, destination_tz, departure, arrival)?;

    let options: SynthesisOptions = match options_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))?,
        None => SynthesisOptions::default(),
    };

    Ok(jetlag_engine::plan_trip(&trip, &options).to_json())
}

/// Describe the required adaptation in user-facing language.
///
/// Returns a JSON object with `headline`, `detail`, `difficulty`, and an
/// optional `direction_note` explaining geographic/circadian disagreement.
#[wasm_bindgen(js_name = "describeShift")]
pub fn describe_shift(
    origin_tz: &str,
    destination_tz: &str,
    departure: &str,
    arrival: &str,
) -> Result<String, JsValue> {
    let trip = build_trip(origin_tz, destination_tz, departure, arrival)?;
    let message = jetlag_engine::describe(&jetlag_engine::resolve_shift(&trip));

    serde_json::to_string(&message)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Export a stored plan (JSON, as produced by `planTrip`) to iCalendar text.
///
/// Malformed stored plan text maps to an error — the host surfaces it as
/// "no plan available" and regenerates.
#[wasm_bindgen(js_name = "exportCalendar")]
pub fn export_calendar(plan_json: &str, flight_id: &str) -> Result<String, JsValue> {
    let plan = JetlagPlan::from_json(plan_json)
        .ok_or_else(|| JsValue::from_str("no plan available: stored plan text is malformed"))?;

    jetlag_engine::export_to_calendar(&plan, flight_id)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Build the conventional download filename for a plan export.
#[wasm_bindgen(js_name = "planFilename")]
pub fn plan_filename(origin: &str, dest: &str, departure: &str) -> Result<String, JsValue> {
    let departure = parse_instant(departure)?;
    Ok(jetlag_engine::plan_filename(origin, dest, departure))
}
