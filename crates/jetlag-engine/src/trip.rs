//! Validated flight context — the single input every other module derives from.

use crate::error::{JetlagError, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Origin/destination zones plus the absolute departure and arrival instants
/// of a single flight leg. Immutable once constructed; all derived entities
/// (shift descriptor, recovery rate, plan) reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct TripContext {
    pub origin_tz: Tz,
    pub destination_tz: Tz,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    /// Derived from the instants — arrival minus departure in fractional hours.
    pub flight_duration_hours: f64,
}

impl TripContext {
    /// Build a trip context from IANA timezone names and absolute instants.
    ///
    /// # Errors
    /// Returns `JetlagError::InvalidTimezone` if either zone name is not a
    /// valid IANA identifier, and `JetlagError::InvalidTrip` if the arrival
    /// does not come strictly after the departure.
    pub fn new(
        origin_tz: &str,
        destination_tz: &str,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Result<Self> {
        let origin: Tz = origin_tz
            .parse()
            .map_err(|_| JetlagError::InvalidTimezone(origin_tz.to_string()))?;
        let destination: Tz = destination_tz
            .parse()
            .map_err(|_| JetlagError::InvalidTimezone(destination_tz.to_string()))?;

        if departure >= arrival {
            return Err(JetlagError::InvalidTrip(format!(
                "departure {} is not before arrival {}",
                departure, arrival
            )));
        }

        let flight_duration_hours = (arrival - departure).num_minutes() as f64 / 60.0;

        Ok(Self {
            origin_tz: origin,
            destination_tz: destination,
            departure,
            arrival,
            flight_duration_hours,
        })
    }
}
