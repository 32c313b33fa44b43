pub mod radar;

use crate::data::aircraft::{AircraftEntity, Position};
use crate::data::snapshot::Snapshot;
use crate::inspection::OverlayContent;

/// Pixel location within the map window, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The operations the radar needs from whatever draws the map.
pub trait MapSurface {
    fn attach_entities(&mut self, snapshot: &Snapshot);

    /// Removes a previously attached snapshot; detaching one that is not attached does nothing.
    fn detach_entities(&mut self, snapshot: &Snapshot);

    fn hit_test(&self, point: ScreenPoint) -> Option<AircraftEntity>;

    fn set_center(&mut self, center: Position);

    /// Shows the overlay anchored at the map coordinate under `anchor`.
    fn show_overlay(&mut self, anchor: ScreenPoint, content: &OverlayContent);

    fn hide_overlay(&mut self);
}
