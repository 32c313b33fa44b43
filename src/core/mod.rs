pub mod console;
pub mod flight_radar;

use crate::data::snapshot::Snapshot;
use crate::errors::FeedError;
use crate::inspection::PointerEvent;

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum Event {
    Telemetry(Result<Snapshot, FeedError>),
    Pointer(PointerEvent),
    Shutdown
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Flow {
    Continue,
    Stop
}
