use std::time::Duration;
use reqwest::blocking::Client;

pub fn client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .build()
}

// Non-success statuses are reported as errors alongside transport failures
pub fn get(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    client.get(url).send()?.error_for_status()?.text()
}
