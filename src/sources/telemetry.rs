use log::debug;
use reqwest::blocking::Client;
use crate::data::snapshot::StatesPayload;
use crate::errors::FeedError;
use crate::sources::httpclient;
use crate::sources::sources::Source;

/// Retrieves one complete state vector payload per call. Retry is left to the caller.
pub trait TelemetrySource {
    fn fetch_snapshot(&self) -> Result<StatesPayload, FeedError>;
}

pub struct HttpTelemetrySource {
    client: Client,
    source: Source
}

impl HttpTelemetrySource {
    pub fn new(client: Client, source: Source) -> Self {
        Self { client, source }
    }
}

impl TelemetrySource for HttpTelemetrySource {
    fn fetch_snapshot(&self) -> Result<StatesPayload, FeedError> {
        let url = self.source.get_path();
        debug!("Requesting state vectors from {}", url);

        let body = httpclient::get(&self.client, url)
            .map_err(|e| FeedError::transport(url, e))?;

        StatesPayload::from_json(&body)
    }
}
