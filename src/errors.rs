use failure::Fail;

/// Failures of a single telemetry retrieval. Records that fail to parse are not errors; they are
/// dropped by the snapshot transform.
#[derive(Debug, Fail)]
pub enum FeedError {
    #[fail(display = "transport error fetching {}: {}", url, reason)]
    Transport { url: String, reason: String },

    #[fail(display = "malformed state vector payload: {}", _0)]
    MalformedPayload(String),
}

#[derive(Debug, Fail)]
pub enum StartupError {
    #[fail(display = "cannot build HTTP client: {}", _0)]
    HttpClient(#[cause] reqwest::Error),

    #[fail(display = "geolocation bootstrap failed: {}", _0)]
    Geolocation(String),

    #[fail(display = "initial state vector retrieval failed")]
    InitialFetch(#[cause] FeedError),
}

impl FeedError {
    pub fn transport(url: &str, err: reqwest::Error) -> Self {
        FeedError::Transport { url: url.to_string(), reason: err.to_string() }
    }
}
