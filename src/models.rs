use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

// ============================================================================
// Open-Meteo API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Option<Vec<GeoResult>>,
}

impl GeocodeResponse {
    /// First match, if the search found anything
    pub fn first(&self) -> Option<&GeoResult> {
        self.results.as_deref().and_then(|results| results.first())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
}

/// Readings are kept as the provider wrote them so `15.0` renders as `15.0`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Number,
    pub windspeed: Number,
}

#[derive(Debug, Default, Deserialize)]
pub struct DailyForecastResponse {
    #[serde(default)]
    pub daily: Option<DailyForecast>,
}

/// Index-aligned daily series
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<Option<Number>>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<Option<Number>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<Number>>,
}

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AlertResponse {
    #[serde(default)]
    pub features: Option<Vec<AlertFeature>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: Option<AlertProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertProperties {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(rename = "areaDesc", default)]
    pub area_desc: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    #[schemars(description = "City name (e.g., \"London\", \"New York\")")]
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    #[schemars(description = "City name (e.g., \"Paris\", \"Tokyo\")")]
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    #[schemars(description = "Two-letter US state code (e.g., CA, NY)")]
    pub state: String,
}
