use crate::models::{Category, LatLng, Region};

fn region(name: &str, category: Category, observed_date: &str, boundary: &[(f64, f64)]) -> Region {
    Region {
        name: name.to_string(),
        boundary: boundary
            .iter()
            .map(|&(lat, lon)| LatLng::new(lat, lon))
            .collect(),
        category,
        observed_date: observed_date.to_string(),
    }
}

/// The fixed region set shown on the map.
pub fn sample_regions() -> Vec<Region> {
    vec![
        region(
            "Current Fire 1",
            Category::Current,
            "2023-04-15",
            &[
                (38.60, -122.80),
                (38.75, -122.55),
                (38.62, -122.30),
                (38.45, -122.52),
            ],
        ),
        region(
            "Current Fire 2",
            Category::Current,
            "2023-04-15",
            &[
                (39.70, -121.75),
                (39.88, -121.50),
                (39.72, -121.30),
                (39.58, -121.55),
            ],
        ),
        region(
            "Historical Fire 1",
            Category::Historical,
            "2022-08-10",
            &[
                (40.55, -122.70),
                (40.80, -122.40),
                (40.62, -122.10),
                (40.40, -122.35),
            ],
        ),
        region(
            "Risk Zone 1",
            Category::Risk,
            "2023-04-15",
            &[
                (37.30, -121.95),
                (37.52, -121.70),
                (37.36, -121.40),
                (37.15, -121.68),
            ],
        ),
    ]
}
