use log::info;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use crate::data::aircraft::Position;
use crate::errors::StartupError;
use crate::sources::httpclient;
use crate::sources::sources::Source;

// Some providers report coordinates as strings
#[derive(Debug, Deserialize)]
struct GeoResponse {
    latitude: Value,
    longitude: Value
}

fn coordinate(name: &str, value: &Value) -> Result<f64, StartupError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None
    };

    parsed.filter(|v| v.is_finite())
        .ok_or_else(|| StartupError::Geolocation(format!("invalid {} ({})", name, value)))
}

pub fn parse_location(data: &str) -> Result<Position, StartupError> {
    let response: GeoResponse = serde_json::from_str(data)
        .map_err(|e| StartupError::Geolocation(format!("unexpected response: {}", e)))?;

    Ok(Position {
        longitude: coordinate("longitude", &response.longitude)?,
        latitude: coordinate("latitude", &response.latitude)?
    })
}

/// Resolves the caller's approximate location, used once to centre the map.
pub fn locate(client: &Client, source: &Source) -> Result<Position, StartupError> {
    let body = httpclient::get(client, source.get_path())
        .map_err(|e| StartupError::Geolocation(e.to_string()))?;

    let position = parse_location(&body)?;
    info!("Centring map on {:.4},{:.4}", position.longitude, position.latitude);
    Ok(position)
}
