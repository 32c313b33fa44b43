use std::fmt;
use log::debug;
use crate::data::aircraft::AircraftEntity;
use crate::data::state_vector::{self, RawStateVector};
use crate::rendering::{MapSurface, ScreenPoint};

// The overlay labels raw offset 5 as latitude and 6 as longitude, the reverse of how the parser
// reads position. Kept as is.
pub const DISPLAY_LATITUDE: usize = 5;
pub const DISPLAY_LONGITUDE: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(ScreenPoint),
    Click(ScreenPoint),
    Close
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cursor {
    Default,
    Pointer
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayContent {
    pub identity: String,
    pub origin: String,
    pub latitude: String,
    pub longitude: String
}

impl OverlayContent {
    pub fn from_telemetry(raw: &RawStateVector) -> Self {
        Self {
            identity: raw.text(state_vector::CALLSIGN),
            origin: raw.text(state_vector::ORIGIN_COUNTRY),
            latitude: raw.text(DISPLAY_LATITUDE),
            longitude: raw.text(DISPLAY_LONGITUDE)
        }
    }
}

impl fmt::Display for OverlayContent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Callsign: {} | Origin: {} | Latitude: {} | Longitude: {}",
               self.identity, self.origin, self.latitude, self.longitude)
    }
}

/// The selected aircraft, as it was when clicked. Later refreshes do not update it.
#[derive(Clone, Debug, PartialEq)]
pub struct InspectionState {
    pub entity: AircraftEntity,
    pub anchor: ScreenPoint
}

/// Outcome of hit-testing one pointer event.
#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    Hover(bool),
    Select(AircraftEntity, ScreenPoint),
    Dismiss
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayView {
    Shown { anchor: ScreenPoint, content: OverlayContent },
    Hidden
}

pub struct InspectionController {
    state: Option<InspectionState>,
    cursor: Cursor
}

impl InspectionController {
    pub fn new() -> Self {
        Self { state: None, cursor: Cursor::Default }
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<&InspectionState> {
        self.state.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn handle<M: MapSurface + ?Sized>(&mut self, event: PointerEvent, surface: &mut M) {
        let interaction = Self::resolve(event, surface);
        if let Some(view) = self.update(interaction) {
            Self::render(&view, surface);
        }
    }

    pub fn resolve<M: MapSurface + ?Sized>(event: PointerEvent, surface: &M) -> Interaction {
        match event {
            PointerEvent::Move(point) => Interaction::Hover(surface.hit_test(point).is_some()),
            PointerEvent::Click(point) => match surface.hit_test(point) {
                Some(entity) => Interaction::Select(entity, point),
                None => Interaction::Dismiss
            },
            PointerEvent::Close => Interaction::Dismiss
        }
    }

    /// Applies an interaction, returning the overlay change it requires. Hovering never touches
    /// the overlay; dismissing always hides it.
    pub fn update(&mut self, interaction: Interaction) -> Option<OverlayView> {
        match interaction {
            Interaction::Hover(over_aircraft) => {
                self.cursor = if over_aircraft { Cursor::Pointer } else { Cursor::Default };
                None
            },
            Interaction::Select(entity, anchor) => {
                debug!("Selected {:?} ({}), heading {:.0}", entity.identity, entity.origin, entity.heading_radians.to_degrees());
                let content = OverlayContent::from_telemetry(&entity.raw_telemetry);
                self.state = Some(InspectionState { entity, anchor });
                Some(OverlayView::Shown { anchor, content })
            },
            Interaction::Dismiss => {
                if let Some(previous) = self.state.take() {
                    debug!("Deselected {:?} (clicked at {:?})", previous.entity.identity, previous.anchor);
                }
                Some(OverlayView::Hidden)
            }
        }
    }

    pub fn render<M: MapSurface + ?Sized>(view: &OverlayView, surface: &mut M) {
        match view {
            OverlayView::Shown { anchor, content } => surface.show_overlay(*anchor, content),
            OverlayView::Hidden => surface.hide_overlay()
        }
    }
}

impl Default for InspectionController {
    fn default() -> Self {
        Self::new()
    }
}
