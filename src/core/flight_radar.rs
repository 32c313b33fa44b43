use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use log::{debug, error, info};
use crate::core::{Event, Flow};
use crate::data::aircraft::Position;
use crate::data::snapshot::Snapshot;
use crate::errors::StartupError;
use crate::inspection::InspectionController;
use crate::refresh::clock::Clock;
use crate::refresh::live::LiveSnapshot;
use crate::refresh::worker;
use crate::refresh::RefreshScheduler;
use crate::rendering::MapSurface;
use crate::sources::telemetry::TelemetrySource;

/// Owns everything the radar mutates: the map surface, the live snapshot, the inspection state
/// and the refresh schedule. All of it is touched only from the thread running `execute`.
pub struct FlightRadar<M: MapSurface, C: Clock> {
    surface: M,
    live: LiveSnapshot,
    inspection: InspectionController,
    scheduler: RefreshScheduler<C>
}

impl<M: MapSurface, C: Clock> FlightRadar<M, C> {
    pub fn create(surface: M, scheduler: RefreshScheduler<C>) -> Self {
        Self {
            surface,
            live: LiveSnapshot::new(),
            inspection: InspectionController::new(),
            scheduler
        }
    }

    /// Centres the map and runs the first refresh cycle in place. A failed first fetch is not
    /// retried: the schedule halts, nothing is rendered and the error is returned.
    pub fn startup<S: TelemetrySource + ?Sized>(&mut self, center: Position, source: &S) -> Result<(), StartupError> {
        self.surface.set_center(center);

        match source.fetch_snapshot() {
            Ok(payload) => self.scheduler.complete(Ok(Snapshot::transform(&payload)), &mut self.live, &mut self.surface)
                .map_err(StartupError::InitialFetch),
            Err(e) => {
                self.scheduler.halt();
                Err(StartupError::InitialFetch(e))
            }
        }
    }

    /// Runs the event loop until `Shutdown` arrives or every sender is gone. Fetches run on a
    /// worker thread, so pointer events keep being served against the current snapshot while a
    /// fetch is outstanding.
    pub fn execute<S>(mut self, source: S, events: Receiver<Event>, sender: Sender<Event>)
        where S: TelemetrySource + Send + 'static
    {
        let (tx_fetch, rx_fetch) = mpsc::channel();     // Event loop -> fetch worker
        thread::spawn(move || worker::fetch_snapshots(source, rx_fetch, sender));

        loop {
            if self.scheduler.poll() {
                debug!("Refresh due");
                if tx_fetch.send(()).is_err() {
                    error!("Fetch worker has stopped; no further refreshes");
                    self.scheduler.halt();
                }
            }

            let next = match self.scheduler.until_due() {
                Some(wait) => events.recv_timeout(wait),
                None => events.recv().map_err(|_| RecvTimeoutError::Disconnected)
            };

            match next {
                Ok(event) => if self.handle(event) == Flow::Stop { break },
                Err(RecvTimeoutError::Timeout) => (),
                Err(RecvTimeoutError::Disconnected) => break
            }
        }

        info!("Shutting down after {} refreshes, {} aircraft on the map", self.scheduler.cycles(), self.live.current().len());
    }

    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::Telemetry(outcome) => {
                // The retry policy has already logged and scheduled around the failure
                if let Err(e) = self.scheduler.complete(outcome, &mut self.live, &mut self.surface) {
                    debug!("Refresh cycle ended with: {}", e);
                }
                Flow::Continue
            },
            Event::Pointer(pointer) => {
                let cursor = self.inspection.cursor();
                self.inspection.handle(pointer, &mut self.surface);
                if self.inspection.cursor() != cursor {
                    debug!("Cursor: {:?}", self.inspection.cursor());
                }
                Flow::Continue
            },
            Event::Shutdown => Flow::Stop
        }
    }
}
