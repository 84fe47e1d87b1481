//! Layer groups and the filter controller that decides which of them are
//! attached to the map.
//!
//! Every region is rendered once, at startup, into a [`Shape`] that lands in
//! the [`LayerGroup`] for its category. After that the only mutable state is
//! which groups are attached to the [`DisplaySurface`].

use crate::models::{Category, CategoryFilter, LatLng, Region};

/// Fill opacity applied to every region polygon.
pub const FILL_OPACITY: f64 = 0.35;

/// Stroke width, in screen pixels, of every region polygon.
pub const STROKE_WIDTH: f64 = 2.0;

/// Rendered form of a single region.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Index of the source region in the slice given to `initialize`.
    pub region_index: usize,
    pub name: String,
    pub category: Category,
    pub observed_date: String,
    pub ring: Vec<LatLng>,
    pub color: &'static str,
    pub popup: [String; 3],
}

impl Shape {
    fn render(region_index: usize, region: &Region) -> Self {
        Shape {
            region_index,
            name: region.name.clone(),
            category: region.category,
            observed_date: region.observed_date.clone(),
            ring: region.boundary.clone(),
            color: region.category.color(),
            popup: region.popup_lines(),
        }
    }

    /// Ring with the first point repeated at the end.
    pub fn closed_ring(&self) -> Vec<LatLng> {
        let mut ring = self.ring.clone();
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        ring
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerGroup {
    pub category: Category,
    pub shapes: Vec<Shape>,
}

impl LayerGroup {
    fn new(category: Category) -> Self {
        LayerGroup {
            category,
            shapes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Whatever layer groups get attached to. The map view reads the attached set
/// back to decide which shapes to draw.
pub trait DisplaySurface {
    fn attach(&mut self, category: Category);
    fn detach(&mut self, category: Category);
    fn is_attached(&self, category: Category) -> bool;
}

/// In-memory attached/detached flag per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Membership {
    attached: [bool; 3],
}

impl DisplaySurface for Membership {
    fn attach(&mut self, category: Category) {
        self.attached[category.index()] = true;
    }

    fn detach(&mut self, category: Category) {
        self.attached[category.index()] = false;
    }

    fn is_attached(&self, category: Category) -> bool {
        self.attached[category.index()]
    }
}

/// Date selector value handed to `apply_filter`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateFilter(pub Option<String>);

impl DateFilter {
    pub fn new(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            DateFilter(None)
        } else {
            DateFilter(Some(value.to_string()))
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether a shape passes the date filter. Every shape passes: the
    /// selected date is recorded but does not yet narrow visibility.
    // TODO: decide whether `observed_date` should gate visibility (exact day or on-or-before).
    pub fn admits(&self, _shape: &Shape) -> bool {
        true
    }
}

/// Owns the three layer groups and the surface they are attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFilterController<S = Membership> {
    groups: [LayerGroup; 3],
    surface: S,
    date_filter: DateFilter,
}

impl<S: DisplaySurface> LayerFilterController<S> {
    /// Partition `regions` by category, render each into a shape and attach
    /// all three groups to `surface`.
    pub fn initialize(regions: &[Region], mut surface: S) -> Self {
        let mut groups = Category::ALL.map(LayerGroup::new);
        for (i, region) in regions.iter().enumerate() {
            groups[region.category.index()]
                .shapes
                .push(Shape::render(i, region));
        }
        for c in Category::ALL {
            surface.attach(c);
        }
        tracing::info!(
            current = groups[0].len(),
            historical = groups[1].len(),
            risk = groups[2].len(),
            "Initialized fire layers"
        );
        LayerFilterController {
            groups,
            surface,
            date_filter: DateFilter::default(),
        }
    }

    /// Detach every group, then re-attach the ones `category` selects.
    pub fn apply_filter(&mut self, date_filter: DateFilter, category: CategoryFilter) {
        tracing::debug!(
            date = date_filter.as_deref().unwrap_or(""),
            category = category.as_str(),
            "Applying layer filter"
        );
        for c in Category::ALL {
            self.surface.detach(c);
        }
        for c in Category::ALL {
            if category.includes(c) {
                self.surface.attach(c);
            }
        }
        self.date_filter = date_filter;
    }

    pub fn group(&self, category: Category) -> &LayerGroup {
        &self.groups[category.index()]
    }

    pub fn groups(&self) -> &[LayerGroup; 3] {
        &self.groups
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn date_filter(&self) -> &DateFilter {
        &self.date_filter
    }

    pub fn is_attached(&self, category: Category) -> bool {
        self.surface.is_attached(category)
    }

    pub fn attached_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| self.surface.is_attached(c))
            .collect()
    }

    /// Shapes in attached groups that pass the date filter, in category order.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.groups
            .iter()
            .filter(|g| self.surface.is_attached(g.category))
            .flat_map(|g| g.shapes.iter())
            .filter(|s| self.date_filter.admits(s))
    }

    pub fn shape_count(&self) -> usize {
        self.groups.iter().map(LayerGroup::len).sum()
    }
}
