use async_graphql::{Context, Enum, InputObject, Object, SimpleObject};
use fire_map_shared::{
    models::{self, PredictionMethod, RiskLevel, WeatherObservation},
    risk,
};

/// Process-wide facts reported by the `status` query.
pub struct ServerInfo {
    pub started_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlPredictionMethod {
    Model,
    RuleBased,
}

impl From<PredictionMethod> for GqlPredictionMethod {
    fn from(m: PredictionMethod) -> Self {
        match m {
            PredictionMethod::Model => GqlPredictionMethod::Model,
            PredictionMethod::RuleBased => GqlPredictionMethod::RuleBased,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlRiskLevel {
    Low,
    Moderate,
    High,
}

impl From<RiskLevel> for GqlRiskLevel {
    fn from(l: RiskLevel) -> Self {
        match l {
            RiskLevel::Low => GqlRiskLevel::Low,
            RiskLevel::Moderate => GqlRiskLevel::Moderate,
            RiskLevel::High => GqlRiskLevel::High,
        }
    }
}

// GraphQL output types

#[derive(SimpleObject)]
pub struct GqlStatus {
    pub model_loaded: bool,
    pub analysis_available: bool,
    pub version: String,
    pub started_at: String,
}

#[derive(SimpleObject)]
pub struct GqlFirePrediction {
    pub fire_probability: f64,
    pub location: String,
    pub prediction_method: GqlPredictionMethod,
    pub risk_level: GqlRiskLevel,
}

impl From<models::FirePrediction> for GqlFirePrediction {
    fn from(p: models::FirePrediction) -> Self {
        GqlFirePrediction {
            fire_probability: p.fire_probability,
            location: p.location,
            prediction_method: p.prediction_method.into(),
            risk_level: p.risk_level.into(),
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlRiskAnalysis {
    pub risk_assessment: String,
    pub contributing_factors: Vec<String>,
    pub recommended_actions: String,
}

impl From<models::RiskAnalysis> for GqlRiskAnalysis {
    fn from(a: models::RiskAnalysis) -> Self {
        GqlRiskAnalysis {
            risk_assessment: a.risk_assessment,
            contributing_factors: a.contributing_factors,
            recommended_actions: a.recommended_actions,
        }
    }
}

// Input types

#[derive(InputObject)]
pub struct WeatherInput {
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

impl From<WeatherInput> for WeatherObservation {
    fn from(w: WeatherInput) -> Self {
        WeatherObservation {
            max_temp_c: w.max_temp_c,
            min_temp_c: w.min_temp_c,
            avg_temp_c: w.avg_temp_c,
            heating_deg_days_c: w.heating_deg_days_c,
            cooling_deg_days_c: w.cooling_deg_days_c,
            precip_mm: w.precip_mm,
            avg_humidity: w.avg_humidity,
            avg_wind_speed_knots: w.avg_wind_speed_knots,
            avg_dew_point_f: w.avg_dew_point_f,
            avg_visibility_km: w.avg_visibility_km,
            avg_sea_level_pressure_mb: w.avg_sea_level_pressure_mb,
            location: w.location,
        }
    }
}

#[derive(InputObject)]
pub struct AnalysisInput {
    pub fire_probability: f64,
    pub location: Option<String>,
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn status(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlStatus> {
        let info = ctx.data::<ServerInfo>()?;
        Ok(GqlStatus {
            model_loaded: false,
            analysis_available: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: info.started_at.to_rfc3339(),
        })
    }

    async fn predict(&self, input: WeatherInput) -> async_graphql::Result<GqlFirePrediction> {
        let obs: WeatherObservation = input.into();
        let prediction = risk::predict(&obs).map_err(|e| {
            tracing::warn!(error = %e, "Rejected prediction request");
            async_graphql::Error::new(e.to_string())
        })?;
        tracing::info!(
            location = %prediction.location,
            fire_probability = prediction.fire_probability,
            method = %prediction.prediction_method,
            "Fire probability calculated"
        );
        Ok(prediction.into())
    }

    async fn analyze(&self, input: AnalysisInput) -> async_graphql::Result<GqlRiskAnalysis> {
        let analysis = risk::analyze(input.fire_probability, input.location.as_deref())
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(analysis.into())
    }
}

pub type Schema = async_graphql::Schema<
    QueryRoot,
    async_graphql::EmptyMutation,
    async_graphql::EmptySubscription,
>;

pub fn build_schema(info: ServerInfo) -> Schema {
    async_graphql::Schema::build(
        QueryRoot,
        async_graphql::EmptyMutation,
        async_graphql::EmptySubscription,
    )
    .data(info)
    .finish()
}
