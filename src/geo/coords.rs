// Map space is the equirectangular world in [0, 1] on each axis, origin at the north-west corner.
// Window space is map space after applying the view origin and zoom, scaled to the window size.

pub fn normalised_equirectangular_coords(lon: f64, lat: f64) -> (f64, f64) {
    (
        (lon + 180.0) * (1.0 / 360.0),
        ((lat * -1.0) + 90.0) * (1.0 / 180.0)
    )
}

pub fn equirectangular_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    (
        (x * 360.0) - 180.0,
        90.0 - (y * 180.0)
    )
}

pub fn lon_lat_to_window(lon: f64, lat: f64, window_size: &[f64; 2], view_origin: &[f64; 2], zoom_level: f64) -> (f64, f64) {
    let (x, y) = normalised_equirectangular_coords(lon, lat);
    (
        (x - view_origin[0]) * zoom_level * window_size[0],
        (y - view_origin[1]) * zoom_level * window_size[1]
    )
}

pub fn window_to_lon_lat(x: f64, y: f64, window_size: &[f64; 2], view_origin: &[f64; 2], zoom_level: f64) -> (f64, f64) {
    equirectangular_to_lon_lat(
        view_origin[0] + (x / window_size[0]) / zoom_level,
        view_origin[1] + (y / window_size[1]) / zoom_level)
}

// View origin which places the given position at the centre of the window
pub fn centred_view_origin(lon: f64, lat: f64, zoom_level: f64) -> [f64; 2] {
    let (x, y) = normalised_equirectangular_coords(lon, lat);
    [x - 0.5 / zoom_level, y - 0.5 / zoom_level]
}
