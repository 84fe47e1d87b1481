use dioxus::prelude::*;
use fire_map_shared::controls::{category_options, ControlPanel, PanelEvent, DATE_OPTIONS, PANEL_BUTTONS};
use fire_map_shared::layers::LayerFilterController;
use fire_map_shared::models::Category;

#[component]
pub fn FilterPanel(controller: Signal<LayerFilterController>, panel: Signal<ControlPanel>) -> Element {
    // Every control funnels through the shared panel so the filter is always
    // re-applied with both selector values.
    let mut dispatch = move |event: PanelEvent| {
        let mut ctl = controller.write();
        panel.write().handle(event, &mut *ctl);
    };

    let current = panel.read().clone();
    let legend: Vec<(&'static str, &'static str, usize, bool)> = {
        let ctl = controller.read();
        Category::ALL
            .iter()
            .map(|&c| (c.label(), c.color(), ctl.group(c).len(), ctl.is_attached(c)))
            .collect()
    };

    rsx! {
        div { class: "panel filter-panel",
            h3 { "Filters" }

            label { r#for: "date-filter", "Date" }
            select {
                id: "date-filter",
                value: "{current.date}",
                onchange: move |evt: Event<FormData>| dispatch(PanelEvent::DateChanged(evt.value())),
                for d in DATE_OPTIONS {
                    option {
                        value: "{d}",
                        selected: current.date == d,
                        "{d}"
                    }
                }
            }
            p { class: "hint", "Regions from every date are shown." }

            label { r#for: "category-filter", "Fire type" }
            select {
                id: "category-filter",
                value: "{current.category}",
                onchange: move |evt: Event<FormData>| dispatch(PanelEvent::CategoryChanged(evt.value())),
                for (value, label) in category_options() {
                    option {
                        value: "{value}",
                        selected: current.category == value,
                        "{label}"
                    }
                }
            }

            div { class: "filter-buttons",
                for b in PANEL_BUTTONS {
                    button {
                        class: if current.category == b.filter.as_str() { "active" } else { "secondary" },
                        "data-category": b.filter.as_str(),
                        onclick: move |_| dispatch(PanelEvent::ButtonClicked(b.filter)),
                        "{b.label}"
                    }
                }
            }

            ul { class: "legend",
                for (label, color, count, attached) in legend {
                    li {
                        class: if attached { "" } else { "hidden-layer" },
                        span {
                            class: "swatch",
                            style: "background:{color};",
                        }
                        "{label} ({count})"
                    }
                }
            }
        }
    }
}
