use std::f64::consts::PI;
use crate::data::state_vector::{self, RawStateVector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub longitude: f64,     // Decimal degrees
    pub latitude: f64       // Decimal degrees
}

/// A validated, renderable aircraft derived from one state vector.
#[derive(Clone, Debug, PartialEq)]
pub struct AircraftEntity {
    pub identity: String,               // Trimmed callsign, may be blank
    pub origin: String,                 // Origin country, may be blank
    pub position: Position,
    pub heading_radians: f64,           // Whole degrees of |true track|, in radians
    pub raw_telemetry: RawStateVector   // Full record, kept for inspection
}

impl AircraftEntity {
    /// Builds an entity from a raw state vector, or None if longitude, latitude or heading is
    /// missing. A heading of exactly zero counts as missing.
    pub fn parse(raw: &RawStateVector) -> Option<Self> {
        let latitude = raw.number(state_vector::LATITUDE)?;
        let longitude = raw.number(state_vector::LONGITUDE)?;
        let heading = raw.number(state_vector::TRUE_TRACK)?;

        Some(Self {
            identity: raw.text(state_vector::CALLSIGN).trim().to_string(),
            origin: raw.text(state_vector::ORIGIN_COUNTRY),
            position: Position { longitude, latitude },
            heading_radians: heading_to_radians(heading),
            raw_telemetry: raw.clone()
        })
    }
}

// Sign and fractional degrees are discarded
pub fn heading_to_radians(degrees: f64) -> f64 {
    degrees.abs().trunc() * (PI / 180.0)
}
