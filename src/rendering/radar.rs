use log::{debug, info};
use crate::config::Settings;
use crate::data::aircraft::{AircraftEntity, Position};
use crate::data::snapshot::Snapshot;
use crate::geo::coords::{centred_view_origin, lon_lat_to_window, window_to_lon_lat};
use crate::inspection::OverlayContent;
use crate::rendering::{MapSurface, ScreenPoint};

/// Headless map surface: projects attached aircraft into window space for hit-testing and
/// reports what it would draw through the log.
pub struct RadarSurface {
    window_size: [f64; 2],
    view_origin: [f64; 2],
    zoom_level: f64,
    hit_radius_sq: f64,

    layers: Vec<Snapshot>,
    overlay: Option<(Position, OverlayContent)>
}

impl RadarSurface {
    pub fn create(settings: &Settings, hit_radius: f64) -> Self {
        Self {
            window_size: settings.window_size,
            view_origin: [0.0, 0.0],
            zoom_level: settings.zoom_level,
            hit_radius_sq: hit_radius * hit_radius,

            layers: vec![],
            overlay: None
        }
    }

    #[cfg(test)]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[cfg(test)]
    pub fn overlay(&self) -> Option<&(Position, OverlayContent)> {
        self.overlay.as_ref()
    }

    fn window_position(&self, entity: &AircraftEntity) -> (f64, f64) {
        lon_lat_to_window(entity.position.longitude, entity.position.latitude,
                          &self.window_size, &self.view_origin, self.zoom_level)
    }

    fn in_view(&self, (x, y): (f64, f64)) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.window_size[0] && y < self.window_size[1]
    }
}

impl MapSurface for RadarSurface {
    fn attach_entities(&mut self, snapshot: &Snapshot) {
        let rendered = snapshot.entities().iter()
            .filter(|x| self.in_view(self.window_position(x)))
            .count();

        debug!("Attached: {}, in view: {}", snapshot.len(), rendered);
        self.layers.push(snapshot.clone());
    }

    fn detach_entities(&mut self, snapshot: &Snapshot) {
        let before = self.layers.len();
        self.layers.retain(|layer| !layer.is_same(snapshot));

        if self.layers.len() != before {
            debug!("Detached: {}", snapshot.len());
        }
    }

    fn hit_test(&self, point: ScreenPoint) -> Option<AircraftEntity> {
        // Closest aircraft within the hit radius; later layers are drawn on top and win ties
        self.layers.iter()
            .flat_map(|layer| layer.entities().iter())
            .map(|x| (x, self.window_position(x)))
            .map(|(x, pos)| (x, (pos.0 - point.x) * (pos.0 - point.x) + (pos.1 - point.y) * (pos.1 - point.y)))
            .filter(|&(_, d2)| d2 <= self.hit_radius_sq)
            .fold(None, |best: Option<(&AircraftEntity, f64)>, (x, d2)| match best {
                Some((_, d2min)) if d2min < d2 => best,
                _ => Some((x, d2))
            })
            .map(|(x, _)| x.clone())
    }

    fn set_center(&mut self, center: Position) {
        self.view_origin = centred_view_origin(center.longitude, center.latitude, self.zoom_level);
    }

    fn show_overlay(&mut self, anchor: ScreenPoint, content: &OverlayContent) {
        let (longitude, latitude) = window_to_lon_lat(anchor.x, anchor.y, &self.window_size, &self.view_origin, self.zoom_level);
        info!("Overlay at {:.4},{:.4}: {}", longitude, latitude, content);

        self.overlay = Some((Position { longitude, latitude }, content.clone()));
    }

    fn hide_overlay(&mut self) {
        if self.overlay.take().is_some() {
            info!("Overlay closed");
        }
    }
}
