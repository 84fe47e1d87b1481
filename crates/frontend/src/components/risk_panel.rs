use dioxus::logger::tracing;
use dioxus::prelude::*;
use fire_map_shared::models::WeatherObservation;
use gloo_timers::future::TimeoutFuture;

use crate::api::{self, AnalysisData, PredictionData};

/// Quiet period after the last edit before the backend is asked again.
const ESTIMATE_DEBOUNCE_MS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherField {
    MaxTemp,
    MinTemp,
    AvgTemp,
    HeatingDegDays,
    CoolingDegDays,
    Precip,
    Humidity,
    WindSpeed,
    DewPoint,
    Visibility,
    Pressure,
}

impl WeatherField {
    pub const ALL: [WeatherField; 11] = [
        WeatherField::MaxTemp,
        WeatherField::MinTemp,
        WeatherField::AvgTemp,
        WeatherField::HeatingDegDays,
        WeatherField::CoolingDegDays,
        WeatherField::Precip,
        WeatherField::Humidity,
        WeatherField::WindSpeed,
        WeatherField::DewPoint,
        WeatherField::Visibility,
        WeatherField::Pressure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WeatherField::MaxTemp => "Max temp (°C)",
            WeatherField::MinTemp => "Min temp (°C)",
            WeatherField::AvgTemp => "Avg temp (°C)",
            WeatherField::HeatingDegDays => "Heating degree days (°C)",
            WeatherField::CoolingDegDays => "Cooling degree days (°C)",
            WeatherField::Precip => "Precipitation (mm)",
            WeatherField::Humidity => "Humidity (%)",
            WeatherField::WindSpeed => "Wind speed (kn)",
            WeatherField::DewPoint => "Dew point (°F)",
            WeatherField::Visibility => "Visibility (km)",
            WeatherField::Pressure => "Sea-level pressure (mb)",
        }
    }

    pub fn get(self, obs: &WeatherObservation) -> f64 {
        match self {
            WeatherField::MaxTemp => obs.max_temp_c,
            WeatherField::MinTemp => obs.min_temp_c,
            WeatherField::AvgTemp => obs.avg_temp_c,
            WeatherField::HeatingDegDays => obs.heating_deg_days_c,
            WeatherField::CoolingDegDays => obs.cooling_deg_days_c,
            WeatherField::Precip => obs.precip_mm,
            WeatherField::Humidity => obs.avg_humidity,
            WeatherField::WindSpeed => obs.avg_wind_speed_knots,
            WeatherField::DewPoint => obs.avg_dew_point_f,
            WeatherField::Visibility => obs.avg_visibility_km,
            WeatherField::Pressure => obs.avg_sea_level_pressure_mb,
        }
    }

    pub fn set(self, obs: &mut WeatherObservation, value: f64) {
        let slot = match self {
            WeatherField::MaxTemp => &mut obs.max_temp_c,
            WeatherField::MinTemp => &mut obs.min_temp_c,
            WeatherField::AvgTemp => &mut obs.avg_temp_c,
            WeatherField::HeatingDegDays => &mut obs.heating_deg_days_c,
            WeatherField::CoolingDegDays => &mut obs.cooling_deg_days_c,
            WeatherField::Precip => &mut obs.precip_mm,
            WeatherField::Humidity => &mut obs.avg_humidity,
            WeatherField::WindSpeed => &mut obs.avg_wind_speed_knots,
            WeatherField::DewPoint => &mut obs.avg_dew_point_f,
            WeatherField::Visibility => &mut obs.avg_visibility_km,
            WeatherField::Pressure => &mut obs.avg_sea_level_pressure_mb,
        };
        *slot = value;
    }
}

/// Starting values for the form: a warm, dry spring day.
pub fn default_observation() -> WeatherObservation {
    WeatherObservation {
        max_temp_c: 29.0,
        min_temp_c: 14.0,
        avg_temp_c: 21.5,
        heating_deg_days_c: 0.0,
        cooling_deg_days_c: 3.5,
        precip_mm: 0.0,
        avg_humidity: 35.0,
        avg_wind_speed_knots: 8.0,
        avg_dew_point_f: 42.0,
        avg_visibility_km: 16.0,
        avg_sea_level_pressure_mb: 1013.0,
        location: None,
    }
}

/// Parse a numeric input; blank or malformed input keeps the previous value.
fn parse_field_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Edits wait out the quiet period; an explicit request runs at once.
fn estimate_delay_ms(requested: bool) -> Option<u32> {
    if requested {
        None
    } else {
        Some(ESTIMATE_DEBOUNCE_MS)
    }
}

fn risk_class(level: &str) -> &'static str {
    match level {
        "HIGH" => "risk-high",
        "MODERATE" => "risk-moderate",
        _ => "risk-low",
    }
}

#[component]
pub fn RiskPanel() -> Element {
    let mut observation = use_signal(default_observation);
    let mut prediction = use_signal(|| None::<PredictionData>);
    let mut analysis = use_signal(|| None::<AnalysisData>);
    let mut error = use_signal(|| None::<String>);
    // Set by the button so the next run skips the quiet period
    let mut immediate = use_signal(|| false);

    // Re-estimate whenever the form changes; a newer edit cancels the pending one
    let mut estimate = use_resource(move || {
        let obs = observation.read().clone();
        let requested = *immediate.peek();
        if requested {
            immediate.set(false);
        }
        async move {
            if let Some(ms) = estimate_delay_ms(requested) {
                TimeoutFuture::new(ms).await;
            }
            let p = match api::predict(&obs).await {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(error = %e, "Fire risk estimate failed");
                    prediction.set(None);
                    analysis.set(None);
                    error.set(Some(e));
                    return;
                }
            };
            error.set(None);
            match api::analyze(p.fire_probability, &p.location).await {
                Ok(a) => analysis.set(Some(a)),
                Err(e) => {
                    tracing::warn!(error = %e, "Risk analysis failed");
                    analysis.set(None);
                }
            }
            prediction.set(Some(p));
        }
    });

    let obs = observation.read().clone();
    let location = obs.location.clone().unwrap_or_default();

    rsx! {
        div { class: "panel risk-panel",
            h3 { "Fire Risk Estimate" }

            input {
                r#type: "text",
                placeholder: "Location...",
                value: "{location}",
                oninput: move |evt: Event<FormData>| {
                    let v = evt.value();
                    observation.write().location = if v.trim().is_empty() { None } else { Some(v) };
                },
            }

            div { class: "weather-fields",
                for field in WeatherField::ALL {
                    label { class: "weather-field",
                        span { "{field.label()}" }
                        input {
                            r#type: "number",
                            step: "0.1",
                            value: "{field.get(&obs)}",
                            oninput: move |evt: Event<FormData>| {
                                if let Some(v) = parse_field_value(&evt.value()) {
                                    field.set(&mut observation.write(), v);
                                }
                            },
                        }
                    }
                }
            }

            button {
                class: "active",
                onclick: move |_| {
                    immediate.set(true);
                    estimate.restart();
                },
                "Estimate risk"
            }

            if let Some(e) = &*error.read() {
                p { class: "error", "Could not estimate risk: {e}" }
            }

            if let Some(p) = &*prediction.read() {
                div { class: "risk-result {risk_class(&p.risk_level)}",
                    strong { "{p.percent()}" }
                    " chance of fire, {p.risk_level.to_lowercase()} risk"
                }
            }

            if let Some(a) = &*analysis.read() {
                div { class: "risk-analysis",
                    p { "{a.risk_assessment}" }
                    ul {
                        for f in a.contributing_factors.iter() {
                            li { "{f}" }
                        }
                    }
                    p { class: "hint", "{a.recommended_actions}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_get_set_cover_every_field() {
        let mut obs = default_observation();
        for (i, field) in WeatherField::ALL.iter().enumerate() {
            field.set(&mut obs, 1000.0 + i as f64);
        }
        for (i, field) in WeatherField::ALL.iter().enumerate() {
            assert_eq!(field.get(&obs), 1000.0 + i as f64, "{}", field.label());
        }
    }

    #[test]
    fn test_parse_field_value() {
        assert_eq!(parse_field_value(" 12.5 "), Some(12.5));
        assert_eq!(parse_field_value(""), None);
        assert_eq!(parse_field_value("abc"), None);
        assert_eq!(parse_field_value("inf"), None);
    }

    #[test]
    fn test_button_skips_debounce() {
        assert_eq!(estimate_delay_ms(true), None);
        assert_eq!(estimate_delay_ms(false), Some(ESTIMATE_DEBOUNCE_MS));
    }

    #[test]
    fn test_risk_class() {
        assert_eq!(risk_class("HIGH"), "risk-high");
        assert_eq!(risk_class("MODERATE"), "risk-moderate");
        assert_eq!(risk_class("LOW"), "risk-low");
    }
}
