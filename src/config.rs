use std::time::Duration;
use crate::refresh::RetryPolicy;

pub const STATE_VECTORS_URL: &str = "https://opensky-network.org/api/states/all";
pub const GEOLOCATION_URL: &str = "https://api.ipgeolocation.io/ipgeo";

const API_KEY_PATH: &str = "apikey";

pub const REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

// When false, the first failed refresh halts the cycle and the map keeps its last snapshot
pub const RETRY_ON_FAILURE: bool = true;
pub const RETRY_INITIAL_DELAY: Duration = Duration::from_secs(5);
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(60);

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

pub const WINDOW_SIZE: [f64; 2] = [1024.0, 512.0];
pub const INITIAL_ZOOM_LEVEL: f64 = 4.0;
pub const HIT_RADIUS_PX: f64 = 6.0;

#[derive(Clone, Debug)]
pub struct Settings {
    pub refresh_interval: Duration,
    pub retry: RetryPolicy,
    pub http_timeout: Duration,
    pub window_size: [f64; 2],
    pub zoom_level: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval: REFRESH_INTERVAL,
            retry: if RETRY_ON_FAILURE {
                RetryPolicy::Backoff { initial: RETRY_INITIAL_DELAY, max: RETRY_MAX_DELAY, max_attempts: None }
            } else {
                RetryPolicy::FailStop
            },
            http_timeout: HTTP_TIMEOUT,
            window_size: WINDOW_SIZE,
            zoom_level: INITIAL_ZOOM_LEVEL,
        }
    }
}

// Key for the geolocation service, if one has been dropped next to the binary
pub fn init_api_key() -> Option<String> {
    match std::fs::read_to_string(API_KEY_PATH) {
        Ok(x) if !x.trim().is_empty() => Some(x.trim().to_string()),
        _ => None
    }
}
