use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::config::Config;
use crate::constants::{DAILY_VARIABLES, FORECAST_DAYS, MAX_ALERTS};
use crate::error::ForecastError;
use crate::fetch::Fetcher;
use crate::formatters::{
    forecast_unavailable, format_alerts, format_current_weather, format_daily_forecast,
    location_not_found, no_active_alerts, weather_unavailable,
};
use crate::models::{
    AlertResponse, CurrentWeatherResponse, DailyForecastResponse, GeoResult, GeocodeResponse,
    GetAlertsRequest, GetForecastRequest, GetWeatherRequest,
};

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    fetcher: Fetcher,
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(config.timeout)?;

        Ok(Self {
            fetcher,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        })
    }

    /// Resolves a city name to its first geocoding match
    ///
    /// A failed lookup and an empty result list both yield `None`.
    async fn geocode(&self, city: &str) -> Option<GeoResult> {
        let geo = self
            .fetcher
            .fetch::<GeocodeResponse>(
                &self.config.geocode_url,
                &[("name", city.into()), ("count", 1u32.into())],
                &[],
            )
            .await
            .unwrap_or_default();

        let location = geo.first().cloned();
        match &location {
            Some(loc) => tracing::debug!(
                "Resolved {} to {}, {}",
                city,
                loc.latitude,
                loc.longitude
            ),
            None => tracing::info!("No geocoding match for {}", city),
        }
        location
    }

    /// Current conditions for a city as display text
    pub async fn current_weather(&self, city: &str) -> String {
        let Some(loc) = self.geocode(city).await else {
            return location_not_found(city);
        };

        let weather = self
            .fetcher
            .fetch::<CurrentWeatherResponse>(
                &self.config.forecast_url,
                &[
                    ("latitude", loc.latitude.into()),
                    ("longitude", loc.longitude.into()),
                    ("current_weather", true.into()),
                ],
                &[],
            )
            .await
            .unwrap_or_default();

        match weather.current_weather {
            Some(current) => format_current_weather(city, &current),
            None => weather_unavailable(city),
        }
    }

    /// Three-day forecast for a city as display text
    ///
    /// Fails only when the provider returns fewer days than requested.
    pub async fn daily_forecast(&self, city: &str) -> Result<String, ForecastError> {
        let Some(loc) = self.geocode(city).await else {
            return Ok(location_not_found(city));
        };

        let forecast = self
            .fetcher
            .fetch::<DailyForecastResponse>(
                &self.config.forecast_url,
                &[
                    ("latitude", loc.latitude.into()),
                    ("longitude", loc.longitude.into()),
                    ("daily", DAILY_VARIABLES.as_slice().into()),
                    ("forecast_days", FORECAST_DAYS.into()),
                    ("timezone", "auto".into()),
                ],
                &[],
            )
            .await
            .unwrap_or_default();

        match forecast.daily {
            Some(daily) => format_daily_forecast(&daily, FORECAST_DAYS),
            None => Ok(forecast_unavailable(city)),
        }
    }

    /// Active NWS alerts for a US state as display text
    pub async fn active_alerts(&self, state: &str) -> String {
        let url = self.config.alerts_url(state);

        let alerts = self
            .fetcher
            .fetch::<AlertResponse>(&url, &[], &[("User-Agent", self.config.user_agent.as_str())])
            .await
            .unwrap_or_default();

        match alerts.features.as_deref() {
            Some(features) if !features.is_empty() => format_alerts(features, MAX_ALERTS),
            _ => no_active_alerts(state),
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Worldwide current weather and 3-day forecasts from Open-Meteo, \
                plus active weather alerts for US states from the National Weather Service."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets current weather for a city
    #[tool(description = "Get simple current weather for a city (worldwide). Provide a city name (e.g., 'London', 'New York').")]
    async fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting weather for city: {}", request.city);

        let text = self.current_weather(&request.city).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Gets a 3-day forecast for a city
    #[tool(description = "Get a 3-day forecast for a city (worldwide): daily min/max temperature and precipitation.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting forecast for city: {}", request.city);

        let text = self.daily_forecast(&request.city).await.map_err(|e| {
            tracing::error!("Forecast for {} unusable: {}", request.city, e);
            McpError::internal_error(format!("Failed to render forecast: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Gets active weather alerts for a US state
    #[tool(description = "Get active weather alerts for a US state (NWS only). Provide a two-letter state code (e.g., 'CA' for California, 'NY' for New York).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let text = self.active_alerts(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_providers(forecast: Value) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"latitude": 48.85, "longitude": 2.35}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/alerts/active/area/CA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn weather_for(mock_server: &MockServer) -> Weather {
        Weather::new(Config {
            geocode_url: format!("{}/v1/search", mock_server.uri()),
            forecast_url: format!("{}/v1/forecast", mock_server.uri()),
            nws_api_base: mock_server.uri(),
            ..Config::default()
        })
        .unwrap()
    }

    fn text_of(result: &CallToolResult) -> Value {
        let value = serde_json::to_value(result).unwrap();
        assert_eq!(value["isError"], json!(false));
        value["content"][0]["text"].clone()
    }

    #[tokio::test]
    async fn test_get_forecast_incomplete_is_internal_error() {
        let mock_server = mock_providers(json!({
            "daily": {
                "time": ["2024-05-01", "2024-05-02"],
                "temperature_2m_min": [8.0, 9.0],
                "temperature_2m_max": [17.5, 18.0],
                "precipitation_sum": [0.0, 2.5]
            }
        }))
        .await;

        let err = weather_for(&mock_server)
            .get_forecast(Parameters(GetForecastRequest {
                city: "Paris".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("expected 3 days of time, got 2"));
    }

    #[tokio::test]
    async fn test_get_forecast_success_wraps_text() {
        let mock_server = mock_providers(json!({
            "daily": {
                "time": ["2024-05-01", "2024-05-02", "2024-05-03"],
                "temperature_2m_min": [8.0, 9.0, 10.0],
                "temperature_2m_max": [17.5, 18.0, 19.5],
                "precipitation_sum": [0.0, 2.5, 0.1]
            }
        }))
        .await;

        let result = weather_for(&mock_server)
            .get_forecast(Parameters(GetForecastRequest {
                city: "Paris".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(
            text_of(&result),
            json!("2024-05-01: 8.0–17.5°C, precip 0.0mm\n2024-05-02: 9.0–18.0°C, precip 2.5mm\n2024-05-03: 10.0–19.5°C, precip 0.1mm")
        );
    }

    #[tokio::test]
    async fn test_get_weather_returns_success_text() {
        let mock_server = mock_providers(json!({
            "current_weather": {"temperature": 21.4, "windspeed": 7.2}
        }))
        .await;

        let result = weather_for(&mock_server)
            .get_weather(Parameters(GetWeatherRequest {
                city: "Paris".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(text_of(&result), json!("Weather in Paris: 21.4°C, wind 7.2 km/h"));
    }

    #[tokio::test]
    async fn test_get_weather_missing_data_is_still_success() {
        let mock_server = mock_providers(json!({"elevation": 35.0})).await;

        let result = weather_for(&mock_server)
            .get_weather(Parameters(GetWeatherRequest {
                city: "Paris".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(text_of(&result), json!("Could not fetch weather for Paris."));
    }

    #[tokio::test]
    async fn test_get_alerts_returns_success_text() {
        let mock_server = mock_providers(json!({})).await;

        let result = weather_for(&mock_server)
            .get_alerts(Parameters(GetAlertsRequest {
                state: "ca".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(text_of(&result), json!("No active alerts for ca."));
    }
}
