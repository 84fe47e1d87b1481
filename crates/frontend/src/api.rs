use fire_map_shared::models::WeatherObservation;
use serde::{Deserialize, Serialize};

/// Build the variables JSON for a predict query.
pub fn build_predict_variables(obs: &WeatherObservation) -> serde_json::Value {
    let location = match obs.location.as_deref().map(str::trim) {
        Some(l) if !l.is_empty() => serde_json::Value::String(l.to_string()),
        _ => serde_json::Value::Null,
    };

    serde_json::json!({
        "input": {
            "maxTempC": obs.max_temp_c,
            "minTempC": obs.min_temp_c,
            "avgTempC": obs.avg_temp_c,
            "heatingDegDaysC": obs.heating_deg_days_c,
            "coolingDegDaysC": obs.cooling_deg_days_c,
            "precipMm": obs.precip_mm,
            "avgHumidity": obs.avg_humidity,
            "avgWindSpeedKnots": obs.avg_wind_speed_knots,
            "avgDewPointF": obs.avg_dew_point_f,
            "avgVisibilityKm": obs.avg_visibility_km,
            "avgSeaLevelPressureMb": obs.avg_sea_level_pressure_mb,
            "location": location
        }
    })
}

/// Build the variables JSON for an analyze query.
pub fn build_analyze_variables(fire_probability: f64, location: &str) -> serde_json::Value {
    serde_json::json!({
        "input": {
            "fireProbability": fire_probability,
            "location": location
        }
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

fn api_url() -> Result<String, String> {
    // Served by the backend, so the API lives on the same origin
    let origin = web_sys::window()
        .ok_or("No window")?
        .location()
        .origin()
        .map_err(|_| "No origin".to_string())?;
    Ok(format!("{}/graphql", origin))
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url()?)
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;

    if let Some(errors) = gql_resp.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(first.message);
        }
    }

    gql_resp.data.ok_or_else(|| "No data returned".to_string())
}

// Types mirroring the GraphQL schema

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
    pub model_loaded: bool,
    pub analysis_available: bool,
    pub version: String,
    pub started_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionData {
    pub fire_probability: f64,
    pub location: String,
    pub prediction_method: String,
    pub risk_level: String,
}

impl PredictionData {
    /// Probability formatted as a percentage, e.g. `"36.0%"`.
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.fire_probability * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub risk_assessment: String,
    pub contributing_factors: Vec<String>,
    pub recommended_actions: String,
}

// API functions

#[derive(Deserialize)]
pub struct StatusResponse {
    pub status: StatusData,
}

pub async fn fetch_status() -> Result<StatusData, String> {
    let resp: StatusResponse = query(
        r#"query { status { modelLoaded analysisAvailable version startedAt } }"#,
        None,
    )
    .await?;
    Ok(resp.status)
}

/// Fire-and-forget backend status check, logged once at startup.
pub fn log_backend_status() {
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_status().await {
            Ok(status) => dioxus::logger::tracing::info!(
                version = %status.version,
                model_loaded = status.model_loaded,
                "Connected to fire map backend"
            ),
            Err(e) => dioxus::logger::tracing::warn!(error = %e, "Backend status unavailable"),
        }
    });
}

#[derive(Deserialize)]
pub struct PredictResponse {
    pub predict: PredictionData,
}

pub async fn predict(obs: &WeatherObservation) -> Result<PredictionData, String> {
    let resp: PredictResponse = query(
        r#"query Predict($input: WeatherInput!) {
            predict(input: $input) { fireProbability location predictionMethod riskLevel }
        }"#,
        Some(build_predict_variables(obs)),
    )
    .await?;
    Ok(resp.predict)
}

#[derive(Deserialize)]
pub struct AnalyzeResponse {
    pub analyze: AnalysisData,
}

pub async fn analyze(fire_probability: f64, location: &str) -> Result<AnalysisData, String> {
    let resp: AnalyzeResponse = query(
        r#"query Analyze($input: AnalysisInput!) {
            analyze(input: $input) { riskAssessment contributingFactors recommendedActions }
        }"#,
        Some(build_analyze_variables(fire_probability, location)),
    )
    .await?;
    Ok(resp.analyze)
}
