use std::io;
use std::process;
use std::sync::mpsc;
use std::thread;
use env_logger::{Builder, Env, Target};
use failure::Fail;
use log::{error, info};

mod config;
mod core;
mod data;
mod errors;
mod geo;
mod inspection;
mod refresh;
mod rendering;
mod sources;

#[cfg(test)]
mod testing;

use crate::config::Settings;
use crate::core::flight_radar::FlightRadar;
use crate::core::console;
use crate::errors::StartupError;
use crate::refresh::clock::SystemClock;
use crate::refresh::RefreshScheduler;
use crate::rendering::radar::RadarSurface;
use crate::sources::geolocation;
use crate::sources::httpclient;
use crate::sources::sources::SourceProvider;
use crate::sources::telemetry::HttpTelemetrySource;

fn main() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    if let Err(e) = run(Settings::default()) {
        error!("Startup failed: {}", e);
        let fail: &dyn Fail = &e;
        for cause in fail.iter_causes() {
            error!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn run(settings: Settings) -> Result<(), StartupError> {
    let source_provider = SourceProvider::new(config::init_api_key());
    info!("Locating with {} geolocation", if source_provider.has_api_key() { "keyed" } else { "anonymous" });

    let client = httpclient::client(settings.http_timeout)
        .map_err(StartupError::HttpClient)?;

    let center = geolocation::locate(&client, &source_provider.source_geolocation())?;
    let telemetry = HttpTelemetrySource::new(client, source_provider.source_state_vectors());

    let surface = RadarSurface::create(&settings, config::HIT_RADIUS_PX);
    let scheduler = RefreshScheduler::new(SystemClock, settings.refresh_interval, settings.retry.clone());
    let mut radar = FlightRadar::create(surface, scheduler);
    radar.startup(center, &telemetry)?;

    // Console -> event loop; the fetch worker posts on a clone of the same sender
    let (tx_events, rx_events) = mpsc::channel();
    let tx_console = tx_events.clone();
    thread::spawn(move || console::read_commands(io::stdin().lock(), tx_console));

    info!("Tracking; commands: move X Y, click X Y, close, quit");
    radar.execute(telemetry, rx_events, tx_events);
    Ok(())
}
