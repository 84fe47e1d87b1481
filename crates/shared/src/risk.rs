use crate::models::{
    FirePrediction, PredictionMethod, RiskAnalysis, RiskLevel, WeatherObservation,
};

/// Reported when no location accompanies an observation.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Upper bound for rule-based probabilities.
const MAX_PROBABILITY: f64 = 0.99;

const BASE_PROBABILITY: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum RiskInputError {
    NotFinite(&'static str),
    HumidityOutOfRange(f64),
    ProbabilityOutOfRange(f64),
}

impl std::fmt::Display for RiskInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskInputError::NotFinite(field) => write!(f, "{} must be a finite number", field),
            RiskInputError::HumidityOutOfRange(v) => {
                write!(f, "avg_humidity must be between 0 and 100, got {}", v)
            }
            RiskInputError::ProbabilityOutOfRange(v) => {
                write!(f, "fire_probability must be between 0 and 1, got {}", v)
            }
        }
    }
}

impl std::error::Error for RiskInputError {}

/// Features computed from an observation on top of the raw readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub temp_range_c: f64,
    pub heat_index: f64,
    pub drought: bool,
}

pub fn derived_features(obs: &WeatherObservation) -> DerivedFeatures {
    DerivedFeatures {
        temp_range_c: obs.max_temp_c - obs.min_temp_c,
        heat_index: obs.avg_temp_c * (1.0 + 0.01 * obs.avg_humidity),
        drought: obs.precip_mm < 5.0 && obs.avg_temp_c > 25.0,
    }
}

pub fn validate(obs: &WeatherObservation) -> Result<(), RiskInputError> {
    let fields = [
        ("max_temp_c", obs.max_temp_c),
        ("min_temp_c", obs.min_temp_c),
        ("avg_temp_c", obs.avg_temp_c),
        ("heating_deg_days_c", obs.heating_deg_days_c),
        ("cooling_deg_days_c", obs.cooling_deg_days_c),
        ("precip_mm", obs.precip_mm),
        ("avg_humidity", obs.avg_humidity),
        ("avg_wind_speed_knots", obs.avg_wind_speed_knots),
        ("avg_dew_point_f", obs.avg_dew_point_f),
        ("avg_visibility_km", obs.avg_visibility_km),
        ("avg_sea_level_pressure_mb", obs.avg_sea_level_pressure_mb),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(RiskInputError::NotFinite(name));
    }
    if !(0.0..=100.0).contains(&obs.avg_humidity) {
        return Err(RiskInputError::HumidityOutOfRange(obs.avg_humidity));
    }
    Ok(())
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Threshold-based fire probability in `[0.01, 0.99]`.
pub fn rule_based_probability(obs: &WeatherObservation) -> f64 {
    let mut p = BASE_PROBABILITY;

    p += if obs.avg_temp_c > 30.0 {
        0.20
    } else if obs.avg_temp_c > 25.0 {
        0.10
    } else if obs.avg_temp_c > 20.0 {
        0.05
    } else {
        0.0
    };

    p += if obs.avg_humidity < 30.0 {
        0.20
    } else if obs.avg_humidity < 40.0 {
        0.10
    } else {
        0.0
    };

    p += if obs.precip_mm < 1.0 {
        0.15
    } else if obs.precip_mm < 5.0 {
        0.05
    } else {
        0.0
    };

    p += if obs.avg_wind_speed_knots > 15.0 {
        0.15
    } else if obs.avg_wind_speed_knots > 10.0 {
        0.10
    } else {
        0.0
    };

    round4(p).min(MAX_PROBABILITY)
}

pub fn risk_level(probability: f64) -> RiskLevel {
    if probability > 0.5 {
        RiskLevel::High
    } else if probability > 0.3 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

fn location_or_unknown(location: Option<&str>) -> String {
    match location.map(str::trim) {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => UNKNOWN_LOCATION.to_string(),
    }
}

pub fn predict(obs: &WeatherObservation) -> Result<FirePrediction, RiskInputError> {
    validate(obs)?;
    let fire_probability = rule_based_probability(obs);
    let location = location_or_unknown(obs.location.as_deref());
    tracing::debug!(
        location = %location,
        fire_probability,
        drought = derived_features(obs).drought,
        "Computed rule-based fire probability"
    );
    Ok(FirePrediction {
        fire_probability,
        location,
        prediction_method: PredictionMethod::RuleBased,
        risk_level: risk_level(fire_probability),
    })
}

/// Assessment text for a probability, without any external analysis service.
pub fn analyze(probability: f64, location: Option<&str>) -> Result<RiskAnalysis, RiskInputError> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(RiskInputError::ProbabilityOutOfRange(probability));
    }
    let level = risk_level(probability);
    tracing::debug!(
        location = %location_or_unknown(location),
        probability,
        "Analysis service unavailable, using fallback assessment"
    );
    Ok(RiskAnalysis {
        risk_assessment: format!(
            "AI analysis is not available. The fire probability is {:.2}%, which suggests a {} risk level.",
            probability * 100.0,
            level
        ),
        contributing_factors: vec![
            "Temperature and humidity conditions".to_string(),
            "Recent precipitation levels".to_string(),
            "Wind conditions".to_string(),
        ],
        recommended_actions: "Please consult local fire authorities for specific recommendations based on your location and conditions.".to_string(),
    })
}
