//! Web-Mercator slippy-map math for the tile basemap.
//!
//! World pixel space at zoom `z` is a square of `TILE_SIZE * 2^z` pixels with
//! the origin at the north-west corner (lon -180, lat ~85.05). X grows east,
//! Y grows south, the same orientation as screen coordinates.
use std::f64::consts::PI;

use crate::models::LatLng;

pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web-Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: LatLng::new(39.0, -122.0),
            zoom: 7,
            min_zoom: 3,
            max_zoom: 18,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

impl MapConfig {
    pub fn clamp_zoom(&self, zoom: i32) -> u8 {
        zoom.clamp(self.min_zoom as i32, self.max_zoom as i32) as u8
    }
}

/// Side length of the world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom.min(30))
}

/// Project a coordinate to world pixels at `zoom`.
pub fn project(p: LatLng, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: u8) -> LatLng {
    let size = world_size(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lon)
}

/// Position of `p` in a `width` x `height` viewport centred on `center`.
pub fn to_viewport(p: LatLng, center: LatLng, zoom: u8, width: f64, height: f64) -> (f64, f64) {
    let (px, py) = project(p, zoom);
    let (cx, cy) = project(center, zoom);
    (px - cx + width / 2.0, py - cy + height / 2.0)
}

/// Inverse of [`to_viewport`].
pub fn from_viewport(x: f64, y: f64, center: LatLng, zoom: u8, width: f64, height: f64) -> LatLng {
    let (cx, cy) = project(center, zoom);
    unproject(cx + x - width / 2.0, cy + y - height / 2.0, zoom)
}

/// Centre to use after changing zoom so the point under `(x, y)` stays put.
pub fn zoom_center_at(
    x: f64,
    y: f64,
    center: LatLng,
    old_zoom: u8,
    new_zoom: u8,
    width: f64,
    height: f64,
) -> LatLng {
    let anchor = from_viewport(x, y, center, old_zoom, width, height);
    let (ax, ay) = project(anchor, new_zoom);
    unproject(ax - (x - width / 2.0), ay - (y - height / 2.0), new_zoom)
}

/// New map centre after dragging the viewport by `(dx, dy)` screen pixels.
/// Latitude stays inside the world; longitude wraps.
pub fn pan_center(center: LatLng, zoom: u8, dx: f64, dy: f64) -> LatLng {
    let size = world_size(zoom);
    let (cx, cy) = project(center, zoom);
    let x = (cx - dx).rem_euclid(size);
    let y = (cy - dy).clamp(0.0, size);
    unproject(x, y, zoom)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRef {
    pub z: u8,
    pub x: u32,
    pub y: u32,
    /// Offset of the tile's top-left corner in the viewport.
    pub left: f64,
    pub top: f64,
}

/// Tiles covering a `width` x `height` viewport centred on `center`.
pub fn visible_tiles(center: LatLng, zoom: u8, width: f64, height: f64) -> Vec<TileRef> {
    let (cx, cy) = project(center, zoom);
    let x0 = cx - width / 2.0;
    let y0 = cy - height / 2.0;
    let n = 1i64 << zoom.min(30);

    let first_col = (x0 / TILE_SIZE).floor() as i64;
    let last_col = ((x0 + width) / TILE_SIZE).floor() as i64;
    let first_row = ((y0 / TILE_SIZE).floor() as i64).max(0);
    let last_row = (((y0 + height) / TILE_SIZE).floor() as i64).min(n - 1);

    let mut tiles = Vec::new();
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            tiles.push(TileRef {
                z: zoom,
                x: col.rem_euclid(n) as u32,
                y: row as u32,
                left: col as f64 * TILE_SIZE - x0,
                top: row as f64 * TILE_SIZE - y0,
            });
        }
    }
    tiles
}

/// Expand a `{s}/{z}/{x}/{y}` tile URL template.
pub fn tile_url(template: &str, z: u8, x: u32, y: u32) -> String {
    let s = SUBDOMAINS[((x + y) % SUBDOMAINS.len() as u32) as usize];
    template
        .replace("{s}", s)
        .replace("{z}", &z.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_origin_is_world_center() {
        let (x, y) = project(LatLng::new(0.0, 0.0), 0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_corners() {
        let (x, y) = project(LatLng::new(MAX_LATITUDE, -180.0), 2);
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
        let (x, y) = project(LatLng::new(-MAX_LATITUDE, 180.0), 2);
        assert!((x - 1024.0).abs() < 1e-6);
        assert!((y - 1024.0).abs() < 1e-6);
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let p = LatLng::new(38.6, -122.55);
        let (x, y) = project(p, 9);
        let back = unproject(x, y, 9);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lon - p.lon).abs() < 1e-9);
    }

    #[test]
    fn test_center_maps_to_viewport_middle() {
        let c = LatLng::new(39.0, -122.0);
        let (x, y) = to_viewport(c, c, 7, 800.0, 600.0);
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_north_is_up_east_is_right() {
        let c = LatLng::new(39.0, -122.0);
        let (_, y_north) = to_viewport(LatLng::new(40.0, -122.0), c, 7, 800.0, 600.0);
        let (x_east, _) = to_viewport(LatLng::new(39.0, -121.0), c, 7, 800.0, 600.0);
        assert!(y_north < 300.0);
        assert!(x_east > 400.0);
    }

    #[test]
    fn test_from_viewport_inverts_to_viewport() {
        let c = LatLng::new(39.0, -122.0);
        let p = LatLng::new(38.62, -122.30);
        let (x, y) = to_viewport(p, c, 8, 900.0, 700.0);
        let back = from_viewport(x, y, c, 8, 900.0, 700.0);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lon - p.lon).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_center_at_keeps_anchor_under_cursor() {
        let c = LatLng::new(39.0, -122.0);
        let anchor = from_viewport(150.0, 420.0, c, 7, 800.0, 600.0);
        let new_c = zoom_center_at(150.0, 420.0, c, 7, 8, 800.0, 600.0);
        let (x, y) = to_viewport(anchor, new_c, 8, 800.0, 600.0);
        assert!((x - 150.0).abs() < 1e-6);
        assert!((y - 420.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_center_at_viewport_middle_keeps_center() {
        let c = LatLng::new(39.0, -122.0);
        let new_c = zoom_center_at(400.0, 300.0, c, 7, 9, 800.0, 600.0);
        assert!((new_c.lat - c.lat).abs() < 1e-9);
        assert!((new_c.lon - c.lon).abs() < 1e-9);
    }

    #[test]
    fn test_pan_center_moves_opposite_to_drag() {
        let c = LatLng::new(39.0, -122.0);
        let moved = pan_center(c, 7, 100.0, 0.0);
        assert!(moved.lon < c.lon);
        assert!((moved.lat - c.lat).abs() < 1e-9);
    }

    #[test]
    fn test_pan_center_wraps_longitude() {
        let c = LatLng::new(0.0, 179.0);
        let moved = pan_center(c, 0, -10.0, 0.0);
        assert!(moved.lon < 0.0);
    }

    #[test]
    fn test_visible_tiles_zoom_zero_single_tile() {
        let tiles = visible_tiles(LatLng::new(0.0, 0.0), 0, 256.0, 256.0);
        // Viewport exactly covers the world; the right/bottom edge touches the next tile column
        assert!(tiles.iter().any(|t| t.x == 0 && t.y == 0 && t.left == 0.0 && t.top == 0.0));
        assert!(tiles.iter().all(|t| t.y == 0));
    }

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let tiles = visible_tiles(LatLng::new(39.0, -122.0), 7, 800.0, 600.0);
        let min_left = tiles.iter().map(|t| t.left).fold(f64::INFINITY, f64::min);
        let max_right = tiles.iter().map(|t| t.left + TILE_SIZE).fold(f64::NEG_INFINITY, f64::max);
        let min_top = tiles.iter().map(|t| t.top).fold(f64::INFINITY, f64::min);
        let max_bottom = tiles.iter().map(|t| t.top + TILE_SIZE).fold(f64::NEG_INFINITY, f64::max);
        assert!(min_left <= 0.0);
        assert!(max_right >= 800.0);
        assert!(min_top <= 0.0);
        assert!(max_bottom >= 600.0);
        assert!(tiles.iter().all(|t| t.x < 128 && t.y < 128 && t.z == 7));
    }

    #[test]
    fn test_visible_tiles_skip_rows_outside_world() {
        let tiles = visible_tiles(LatLng::new(MAX_LATITUDE, 0.0), 1, 512.0, 512.0);
        assert!(tiles.iter().all(|t| t.y < 2));
    }

    #[test]
    fn test_tile_url_expansion() {
        let url = tile_url("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", 7, 20, 48);
        assert_eq!(url, "https://c.tile.openstreetmap.org/7/20/48.png");
    }

    #[test]
    fn test_clamp_zoom() {
        let cfg = MapConfig::default();
        assert_eq!(cfg.clamp_zoom(0), cfg.min_zoom);
        assert_eq!(cfg.clamp_zoom(40), cfg.max_zoom);
        assert_eq!(cfg.clamp_zoom(9), 9);
    }
}
