pub mod geolocation;
pub mod httpclient;
pub mod sources;
pub mod telemetry;
