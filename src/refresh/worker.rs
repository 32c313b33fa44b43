use std::sync::mpsc::{Receiver, Sender};
use log::debug;
use crate::core::Event;
use crate::data::snapshot::Snapshot;
use crate::sources::telemetry::TelemetrySource;

/// Fetch thread body: one fetch and transform per trigger, result posted back to the event loop.
/// Returns when either channel is closed.
pub fn fetch_snapshots<S: TelemetrySource>(source: S, trigger: Receiver<()>, out: Sender<Event>) {
    for () in trigger.iter() {
        debug!("Fetching state vectors...");

        let outcome = source.fetch_snapshot()
            .map(|payload| Snapshot::transform(&payload));

        if out.send(Event::Telemetry(outcome)).is_err() {
            break;
        }
    }
    debug!("Fetch worker stopped");
}
