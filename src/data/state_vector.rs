use serde::{Deserialize, Serialize};
use serde_json::Value;

// Field offsets within an OpenSky state vector
pub const CALLSIGN: usize = 1;
pub const ORIGIN_COUNTRY: usize = 2;
pub const LONGITUDE: usize = 5;
pub const LATITUDE: usize = 6;
pub const TRUE_TRACK: usize = 10;

/// One aircraft's state as delivered by the feed: a positional array of mixed values
/// (icao24, callsign, origin_country, time_position, last_contact, longitude, latitude,
/// baro_altitude, on_ground, velocity, true_track, ...). Only the offsets above are interpreted;
/// everything else is carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawStateVector(Vec<Value>);

impl RawStateVector {
    // Records otherwise only arrive through deserialisation
    #[cfg(test)]
    pub fn new(fields: Vec<Value>) -> Self {
        Self(fields)
    }

    #[cfg(test)]
    pub fn fields(&self) -> &[Value] {
        &self.0
    }

    pub fn field(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Numeric value at `index`, or None if absent, null, zero, non-finite or non-numeric.
    /// Numeric strings are accepted; an aircraft at exactly 0.0 is indistinguishable from one
    /// with no data and is treated the same.
    pub fn number(&self, index: usize) -> Option<f64> {
        let value = match self.field(index)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
            _ => return None
        };

        if value == 0.0 || !value.is_finite() { None } else { Some(value) }
    }

    /// Display form of the value at `index`; missing and null fields display as blank.
    pub fn text(&self, index: usize) -> String {
        match self.field(index) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string()
        }
    }
}
