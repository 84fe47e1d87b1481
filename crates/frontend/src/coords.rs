use fire_map_shared::layers::Shape;
use fire_map_shared::models::LatLng;
use fire_map_shared::tiles;
use wasm_bindgen::JsCast;

/// Viewport size used until the container has been measured.
pub const FALLBACK_SIZE: (f64, f64) = (960.0, 640.0);

/// Measure an element's client size using web_sys.
pub fn container_size(container_id: &str) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let element = document
        .get_element_by_id(container_id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()?;
    let (w, h) = (element.client_width() as f64, element.client_height() as f64);
    if w > 0.0 && h > 0.0 {
        Some((w, h))
    } else {
        None
    }
}

/// Convert client (viewport) coordinates to container-relative coordinates.
pub fn client_to_container(container_id: &str, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let rect = document
        .get_element_by_id(container_id)?
        .get_bounding_client_rect();
    Some((client_x - rect.left(), client_y - rect.top()))
}

/// Screen-space view of the map: what is centred where, at what zoom, in how
/// large a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn to_screen(&self, p: LatLng) -> (f64, f64) {
        tiles::to_viewport(p, self.center, self.zoom, self.width, self.height)
    }

    pub fn to_lat_lng(&self, x: f64, y: f64) -> LatLng {
        tiles::from_viewport(x, y, self.center, self.zoom, self.width, self.height)
    }

    /// SVG `points` attribute for a shape's ring.
    pub fn polygon_points(&self, shape: &Shape) -> String {
        shape
            .closed_ring()
            .iter()
            .map(|&p| {
                let (x, y) = self.to_screen(p);
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_map_shared::layers::{LayerFilterController, Membership};
    use fire_map_shared::models::Category;
    use fire_map_shared::regions::sample_regions;

    fn viewport() -> Viewport {
        Viewport {
            center: LatLng::new(39.0, -122.0),
            zoom: 7,
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_center_is_container_middle() {
        let vp = viewport();
        let (x, y) = vp.to_screen(vp.center);
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_roundtrip() {
        let vp = viewport();
        let p = vp.to_lat_lng(123.0, 456.0);
        let (x, y) = vp.to_screen(p);
        assert!((x - 123.0).abs() < 1e-6);
        assert!((y - 456.0).abs() < 1e-6);
    }

    #[test]
    fn test_polygon_points_closed_ring() {
        let ctl = LayerFilterController::initialize(&sample_regions(), Membership::default());
        let shape = &ctl.group(Category::Risk).shapes[0];
        let points = viewport().polygon_points(shape);
        let pairs: Vec<&str> = points.split(' ').collect();
        assert_eq!(pairs.len(), shape.ring.len() + 1);
        assert_eq!(pairs.first(), pairs.last());
        assert!(pairs.iter().all(|p| p.split(',').count() == 2));
    }
}
