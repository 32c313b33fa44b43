// Shared fixtures for unit tests
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Mutex;
use std::thread;
use serde_json::json;
use crate::data::aircraft::{AircraftEntity, Position};
use crate::data::snapshot::{Snapshot, StatesPayload};
use crate::data::state_vector::RawStateVector;
use crate::errors::FeedError;
use crate::inspection::OverlayContent;
use crate::rendering::{MapSurface, ScreenPoint};
use crate::sources::telemetry::TelemetrySource;

pub fn state_vector(callsign: &str, lon: f64, lat: f64, heading: f64) -> RawStateVector {
    RawStateVector::new(vec![
        json!("abc123"), json!(callsign), json!("Testland"), json!(null), json!(null),
        json!(lon), json!(lat), json!(null), json!(false), json!(null), json!(heading)
    ])
}

pub fn entity(callsign: &str, lon: f64, lat: f64, heading: f64) -> AircraftEntity {
    AircraftEntity::parse(&state_vector(callsign, lon, lat, heading))
        .unwrap_or_else(|| panic!("invalid test entity {}", callsign))
}

pub fn states(aircraft: Vec<(&str, f64, f64, f64)>) -> StatesPayload {
    StatesPayload {
        time: Some(1568390400),
        states: aircraft.into_iter().map(|(c, lon, lat, hdg)| state_vector(c, lon, lat, hdg)).collect()
    }
}

/// Hands out queued results in order, then fails.
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<StatesPayload, FeedError>>>
}

impl ScriptedSource {
    pub fn new(results: Vec<Result<StatesPayload, FeedError>>) -> Self {
        Self { results: Mutex::new(results.into_iter().collect()) }
    }
}

impl TelemetrySource for ScriptedSource {
    fn fetch_snapshot(&self) -> Result<StatesPayload, FeedError> {
        self.results.lock().unwrap().pop_front()
            .unwrap_or_else(|| Err(FeedError::Transport { url: "scripted".to_string(), reason: "exhausted".to_string() }))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Attach(usize),
    Detach(usize),
    SetCenter(Position),
    ShowOverlay,
    HideOverlay
}

/// Records every mutating call. Hit-tests resolve only the configured target point.
pub struct RecordingSurface {
    pub layers: Vec<Snapshot>,
    pub overlay: Option<(ScreenPoint, OverlayContent)>,
    pub ops: Vec<SurfaceOp>,
    target: Option<(ScreenPoint, AircraftEntity)>
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { layers: vec![], overlay: None, ops: vec![], target: None }
    }

    pub fn with_target(point: ScreenPoint, entity: AircraftEntity) -> Self {
        Self { target: Some((point, entity)), ..Self::new() }
    }
}

impl MapSurface for RecordingSurface {
    fn attach_entities(&mut self, snapshot: &Snapshot) {
        self.ops.push(SurfaceOp::Attach(snapshot.len()));
        self.layers.push(snapshot.clone());
    }

    fn detach_entities(&mut self, snapshot: &Snapshot) {
        self.ops.push(SurfaceOp::Detach(snapshot.len()));
        self.layers.retain(|layer| !layer.is_same(snapshot));
    }

    fn hit_test(&self, point: ScreenPoint) -> Option<AircraftEntity> {
        self.target.as_ref()
            .filter(|(p, _)| *p == point)
            .map(|(_, e)| e.clone())
    }

    fn set_center(&mut self, center: Position) {
        self.ops.push(SurfaceOp::SetCenter(center));
    }

    fn show_overlay(&mut self, anchor: ScreenPoint, content: &OverlayContent) {
        self.ops.push(SurfaceOp::ShowOverlay);
        self.overlay = Some((anchor, content.clone()));
    }

    fn hide_overlay(&mut self) {
        self.ops.push(SurfaceOp::HideOverlay);
        self.overlay = None;
    }
}

// Lets a test inspect the surface after handing it to a radar that consumes itself
impl MapSurface for Rc<RefCell<RecordingSurface>> {
    fn attach_entities(&mut self, snapshot: &Snapshot) {
        self.borrow_mut().attach_entities(snapshot)
    }

    fn detach_entities(&mut self, snapshot: &Snapshot) {
        self.borrow_mut().detach_entities(snapshot)
    }

    fn hit_test(&self, point: ScreenPoint) -> Option<AircraftEntity> {
        self.borrow().hit_test(point)
    }

    fn set_center(&mut self, center: Position) {
        self.borrow_mut().set_center(center)
    }

    fn show_overlay(&mut self, anchor: ScreenPoint, content: &OverlayContent) {
        self.borrow_mut().show_overlay(anchor, content)
    }

    fn hide_overlay(&mut self) {
        self.borrow_mut().hide_overlay()
    }
}

/// Serves a single HTTP response on a local port and returns the URL to request.
pub fn serve_once(status: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let response = format!("HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                           status, body.len(), body);

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n])
                }
            }
            let _ = stream.write_all(response.as_bytes());
        }
    });

    url
}

// Address with nothing listening on it
pub fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);
    url
}
