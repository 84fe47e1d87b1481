use dioxus::prelude::*;
use fire_map_shared::controls::ControlPanel;
use fire_map_shared::layers::{LayerFilterController, Membership};
use fire_map_shared::regions::sample_regions;
use fire_map_shared::tiles::MapConfig;

use crate::api;
use crate::components::filter_panel::FilterPanel;
use crate::components::map_view::MapView;
use crate::components::risk_panel::RiskPanel;

#[component]
pub fn FireMap() -> Element {
    // Groups are built once; filtering only changes which ones are attached
    let controller = use_signal(|| LayerFilterController::initialize(&sample_regions(), Membership::default()));
    let panel = use_signal(ControlPanel::default);

    use_hook(api::log_backend_status);

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Fire Map" }
                span { class: "subtitle", "Current, historical and at-risk fire regions" }
            }

            div { class: "sidebar",
                FilterPanel { controller, panel }
                RiskPanel {}
            }

            div { class: "main",
                MapView { controller, config: MapConfig::default() }
            }
        }
    }
}
