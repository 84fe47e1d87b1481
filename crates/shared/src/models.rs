use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Current,
    Historical,
    Risk,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Current, Category::Historical, Category::Risk];

    /// Selector value, e.g. `"historical"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Current => "current",
            Category::Historical => "historical",
            Category::Risk => "risk",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Current => "Current",
            Category::Historical => "Historical",
            Category::Risk => "Risk",
        }
    }

    /// Stroke and fill colour used when rendering regions of this category.
    pub fn color(self) -> &'static str {
        match self {
            Category::Current => "red",
            Category::Historical => "purple",
            Category::Risk => "orange",
        }
    }

    /// Position in `Category::ALL`, used to index per-category arrays.
    pub fn index(self) -> usize {
        match self {
            Category::Current => 0,
            Category::Historical => 1,
            Category::Risk => 2,
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which layer groups a filter request leaves attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a category selector value. Anything that is not a known
    /// category selects every layer.
    pub fn parse(value: &str) -> Self {
        match Category::from_str_opt(value.trim()) {
            Some(c) => CategoryFilter::Only(c),
            None => CategoryFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn includes(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        LatLng { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub name: String,
    /// Polygon ring; the closing edge back to the first point is implied.
    pub boundary: Vec<LatLng>,
    pub category: Category,
    pub observed_date: String,
}

impl Region {
    /// Popup lines shown when the region's shape is clicked.
    pub fn popup_lines(&self) -> [String; 3] {
        [
            self.name.clone(),
            format!("Type: {}", self.category),
            format!("Date: {}", self.observed_date),
        ]
    }
}

// Fire risk estimate

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_temp_c: f64,
    pub heating_deg_days_c: f64,
    pub cooling_deg_days_c: f64,
    pub precip_mm: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed_knots: f64,
    pub avg_dew_point_f: f64,
    pub avg_visibility_km: f64,
    pub avg_sea_level_pressure_mb: f64,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionMethod {
    Model,
    RuleBased,
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionMethod::Model => write!(f, "model"),
            PredictionMethod::RuleBased => write!(f, "rule-based"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirePrediction {
    pub fire_probability: f64,
    pub location: String,
    pub prediction_method: PredictionMethod,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_assessment: String,
    pub contributing_factors: Vec<String>,
    pub recommended_actions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_parses_known_values() {
        assert_eq!(CategoryFilter::parse("current"), CategoryFilter::Only(Category::Current));
        assert_eq!(
            CategoryFilter::parse("historical"),
            CategoryFilter::Only(Category::Historical)
        );
        assert_eq!(CategoryFilter::parse("risk"), CategoryFilter::Only(Category::Risk));
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    }

    #[test]
    fn test_category_filter_unknown_is_all() {
        assert_eq!(CategoryFilter::parse("wildfire"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("Risk"), CategoryFilter::All);
    }

    #[test]
    fn test_category_filter_as_str_roundtrips_through_parse() {
        for f in [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Current),
            CategoryFilter::Only(Category::Historical),
            CategoryFilter::Only(Category::Risk),
        ] {
            assert_eq!(CategoryFilter::parse(f.as_str()), f);
        }
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(Category::Current.color(), "red");
        assert_eq!(Category::Historical.color(), "purple");
        assert_eq!(Category::Risk.color(), "orange");
    }

    #[test]
    fn test_category_index_matches_all_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_region_popup_lines() {
        let region = Region {
            name: "Risk Zone 1".to_string(),
            boundary: vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(1.0, 0.0),
                LatLng::new(1.0, 1.0),
            ],
            category: Category::Risk,
            observed_date: "2023-04-15".to_string(),
        };
        let lines = region.popup_lines();
        assert_eq!(lines[0], "Risk Zone 1");
        assert_eq!(lines[1], "Type: Risk");
        assert_eq!(lines[2], "Date: 2023-04-15");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Historical).unwrap();
        assert_eq!(json, "\"historical\"");
    }
}
