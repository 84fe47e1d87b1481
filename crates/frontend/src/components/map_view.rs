use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use fire_map_shared::layers::{LayerFilterController, FILL_OPACITY, STROKE_WIDTH};
use fire_map_shared::models::LatLng;
use fire_map_shared::tiles::{self, MapConfig, TILE_SIZE};

use crate::coords::{self, Viewport};

pub const MAP_CONTAINER_ID: &str = "fire-map-container";

/// Movement below this many pixels is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenPopup {
    region_index: usize,
    /// Where the shape was clicked; the popup stays pinned there while panning.
    anchor: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragStart {
    client: (f64, f64),
    center: LatLng,
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// One zoom level per wheel event: scrolling up zooms in.
fn wheel_zoom_step(delta_y: f64) -> i32 {
    if delta_y < 0.0 {
        1
    } else if delta_y > 0.0 {
        -1
    } else {
        0
    }
}

fn step_zoom(current: u8, step: i32, bounds: (u8, u8)) -> u8 {
    (current as i32 + step).clamp(bounds.0 as i32, bounds.1 as i32) as u8
}

fn exceeds_drag_threshold(start: (f64, f64), current: (f64, f64)) -> bool {
    let dx = current.0 - start.0;
    let dy = current.1 - start.1;
    (dx * dx + dy * dy).sqrt() > DRAG_THRESHOLD
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(controller: Signal<LayerFilterController>, config: MapConfig) -> Element {
    let initial_center = config.center;
    let initial_zoom = config.zoom;
    let zoom_bounds = (config.min_zoom, config.max_zoom);

    let mut center = use_signal(move || initial_center);
    let mut zoom = use_signal(move || initial_zoom);
    let mut size = use_signal(|| coords::FALLBACK_SIZE);
    let mut popup = use_signal(|| None::<OpenPopup>);
    let mut drag_start = use_signal(|| None::<DragStart>);
    let mut did_drag = use_signal(|| false);

    let (width, height) = *size.read();
    let vp = Viewport {
        center: *center.read(),
        zoom: *zoom.read(),
        width,
        height,
    };

    let tile_views: Vec<(String, f64, f64)> = tiles::visible_tiles(vp.center, vp.zoom, width, height)
        .into_iter()
        .map(|t| (tiles::tile_url(&config.tile_url, t.z, t.x, t.y), t.left, t.top))
        .collect();

    // Only shapes whose group is attached are drawn
    let (polygons, popup_view) = {
        let ctl = controller.read();
        let polygons: Vec<(usize, String, &'static str)> = ctl
            .visible_shapes()
            .map(|s| (s.region_index, vp.polygon_points(s), s.color))
            .collect();
        let open = *popup.read();
        let popup_view = open.and_then(|p| {
            ctl.visible_shapes()
                .find(|s| s.region_index == p.region_index)
                .map(|s| {
                    let [title, kind, date] = s.popup.clone();
                    let (x, y) = vp.to_screen(p.anchor);
                    (title, kind, date, x, y)
                })
        });
        (polygons, popup_view)
    };

    let mut zoom_about = move |x: f64, y: f64, step: i32| {
        let old_z = *zoom.read();
        let new_z = step_zoom(old_z, step, zoom_bounds);
        if new_z == old_z {
            return;
        }
        let (w, h) = *size.read();
        let c = *center.read();
        center.set(tiles::zoom_center_at(x, y, c, old_z, new_z, w, h));
        zoom.set(new_z);
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "map-container",

            onmounted: move |_| {
                if let Some(measured) = coords::container_size(MAP_CONTAINER_ID) {
                    size.set(measured);
                }
            },

            onmousedown: move |evt: Event<MouseData>| {
                // Only the primary button pans
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let c = evt.client_coordinates();
                drag_start.set(Some(DragStart { client: (c.x, c.y), center: *center.read() }));
                did_drag.set(false);
            },

            onmousemove: move |evt: Event<MouseData>| {
                let Some(start) = *drag_start.read() else { return };
                let c = evt.client_coordinates();
                if !*did_drag.read() && exceeds_drag_threshold(start.client, (c.x, c.y)) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let dx = c.x - start.client.0;
                    let dy = c.y - start.client.1;
                    center.set(tiles::pan_center(start.center, *zoom.read(), dx, dy));
                }
            },

            onmouseup: move |_| {
                drag_start.set(None);
                if let Some(measured) = coords::container_size(MAP_CONTAINER_ID) {
                    size.set(measured);
                }
            },

            onmouseleave: move |_| drag_start.set(None),

            // Background click closes the popup
            onclick: move |_| {
                if !*did_drag.read() {
                    popup.set(None);
                }
            },

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let step = wheel_zoom_step(wheel_delta_y(evt.data().delta()));
                let c = evt.data().client_coordinates();
                let (w, h) = *size.read();
                let (x, y) = coords::client_to_container(MAP_CONTAINER_ID, c.x, c.y)
                    .unwrap_or((w / 2.0, h / 2.0));
                zoom_about(x, y, step);
            },

            div { class: "tile-layer",
                for (url, left, top) in tile_views {
                    img {
                        key: "{url}@{left}",
                        class: "map-tile",
                        src: "{url}",
                        draggable: "false",
                        alt: "",
                        style: "left:{left}px;top:{top}px;width:{TILE_SIZE}px;height:{TILE_SIZE}px;",
                    }
                }
            }

            svg {
                class: "region-layer",
                "width": "{width}",
                "height": "{height}",
                for (region_index, points, color) in polygons {
                    polygon {
                        key: "{region_index}",
                        class: "region-shape",
                        "points": "{points}",
                        "fill": "{color}",
                        "fill-opacity": "{FILL_OPACITY}",
                        "stroke": "{color}",
                        "stroke-width": "{STROKE_WIDTH}",
                        "stroke-linejoin": "round",
                        onclick: move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            if *did_drag.read() {
                                return;
                            }
                            let c = evt.client_coordinates();
                            if let Some((x, y)) = coords::client_to_container(MAP_CONTAINER_ID, c.x, c.y) {
                                popup.set(Some(OpenPopup { region_index, anchor: vp.to_lat_lng(x, y) }));
                            }
                        },
                    }
                }
            }

            if let Some((title, kind, date, px, py)) = popup_view {
                div {
                    class: "map-popup",
                    style: "left:{px}px;top:{py}px;",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                    button {
                        class: "map-popup-close",
                        "aria-label": "Close popup",
                        onclick: move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            popup.set(None);
                        },
                        "×"
                    }
                    strong { "{title}" }
                    br {}
                    "{kind}"
                    br {}
                    "{date}"
                }
            }

            div { class: "zoom-controls",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                button {
                    "aria-label": "Zoom in",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        let (w, h) = *size.read();
                        zoom_about(w / 2.0, h / 2.0, 1);
                    },
                    "+"
                }
                button {
                    "aria-label": "Zoom out",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        let (w, h) = *size.read();
                        zoom_about(w / 2.0, h / 2.0, -1);
                    },
                    "−"
                }
            }

            div { class: "map-attribution", "{config.attribution}" }
        }
    }
}
