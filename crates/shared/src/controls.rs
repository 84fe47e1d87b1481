//! Control panel state: the date selector, the category selector and the
//! category buttons, and how their events drive the filter controller.

use crate::layers::{DateFilter, DisplaySurface, LayerFilterController};
use crate::models::{Category, CategoryFilter};

/// Dates offered by the date selector, newest first.
pub const DATE_OPTIONS: [&str; 3] = ["2023-04-15", "2023-04-14", "2023-04-13"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelButton {
    pub label: &'static str,
    pub filter: CategoryFilter,
}

pub const PANEL_BUTTONS: [PanelButton; 4] = [
    PanelButton {
        label: "Show All Fires",
        filter: CategoryFilter::All,
    },
    PanelButton {
        label: "Show Current Fires",
        filter: CategoryFilter::Only(Category::Current),
    },
    PanelButton {
        label: "Show Historical Fires",
        filter: CategoryFilter::Only(Category::Historical),
    },
    PanelButton {
        label: "Show Risk Areas",
        filter: CategoryFilter::Only(Category::Risk),
    },
];

/// Options of the category selector as `(value, label)`.
pub fn category_options() -> Vec<(&'static str, &'static str)> {
    let mut options = vec![("all", "All Fires")];
    options.extend(Category::ALL.iter().map(|c| (c.as_str(), c.label())));
    options
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    DateChanged(String),
    CategoryChanged(String),
    ButtonClicked(CategoryFilter),
}

/// Current values of the two selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    pub date: String,
    pub category: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        ControlPanel {
            date: DATE_OPTIONS[0].to_string(),
            category: CategoryFilter::All.as_str().to_string(),
        }
    }
}

impl ControlPanel {
    pub fn category_filter(&self) -> CategoryFilter {
        CategoryFilter::parse(&self.category)
    }

    pub fn date_filter(&self) -> DateFilter {
        DateFilter::new(&self.date)
    }

    /// Update the selector values for `event`, then re-apply the filter with
    /// both current values.
    pub fn handle<S: DisplaySurface>(
        &mut self,
        event: PanelEvent,
        controller: &mut LayerFilterController<S>,
    ) {
        match event {
            PanelEvent::DateChanged(date) => self.date = date,
            PanelEvent::CategoryChanged(category) => self.category = category,
            PanelEvent::ButtonClicked(filter) => self.category = filter.as_str().to_string(),
        }
        controller.apply_filter(self.date_filter(), self.category_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Membership;
    use crate::regions::sample_regions;

    fn setup() -> (ControlPanel, LayerFilterController) {
        (
            ControlPanel::default(),
            LayerFilterController::initialize(&sample_regions(), Membership::default()),
        )
    }

    fn button(label: &str) -> PanelButton {
        *PANEL_BUTTONS.iter().find(|b| b.label == label).unwrap()
    }

    #[test]
    fn test_historical_button_syncs_dropdown() {
        let (mut panel, mut ctl) = setup();
        let b = button("Show Historical Fires");
        panel.handle(PanelEvent::ButtonClicked(b.filter), &mut ctl);
        assert_eq!(panel.category, "historical");
        assert_eq!(ctl.attached_categories(), vec![Category::Historical]);
    }

    #[test]
    fn test_all_button_resets_dropdown() {
        let (mut panel, mut ctl) = setup();
        panel.handle(PanelEvent::CategoryChanged("risk".to_string()), &mut ctl);
        panel.handle(PanelEvent::ButtonClicked(button("Show All Fires").filter), &mut ctl);
        assert_eq!(panel.category, "all");
        assert_eq!(ctl.attached_categories().len(), 3);
    }

    #[test]
    fn test_date_change_keeps_category() {
        let (mut panel, mut ctl) = setup();
        panel.handle(PanelEvent::CategoryChanged("current".to_string()), &mut ctl);
        panel.handle(PanelEvent::DateChanged("2023-04-13".to_string()), &mut ctl);
        assert_eq!(panel.date, "2023-04-13");
        assert_eq!(ctl.attached_categories(), vec![Category::Current]);
        assert_eq!(ctl.date_filter().as_deref(), Some("2023-04-13"));
    }

    #[test]
    fn test_unknown_category_value_shows_all() {
        let (mut panel, mut ctl) = setup();
        panel.handle(PanelEvent::CategoryChanged("risk".to_string()), &mut ctl);
        panel.handle(PanelEvent::CategoryChanged("smoke".to_string()), &mut ctl);
        assert_eq!(ctl.attached_categories().len(), 3);
    }

    #[test]
    fn test_every_button_tag_is_a_category_option() {
        let values: Vec<&str> = category_options().iter().map(|(v, _)| *v).collect();
        for b in PANEL_BUTTONS {
            assert!(values.contains(&b.filter.as_str()), "{}", b.label);
        }
    }

    #[test]
    fn test_default_panel() {
        let panel = ControlPanel::default();
        assert_eq!(panel.date, "2023-04-15");
        assert_eq!(panel.category_filter(), CategoryFilter::All);
    }
}
