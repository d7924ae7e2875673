//! Runtime configuration for the weather server
//!
//! Every endpoint can be overridden through the environment, which is how the
//! integration tests point the server at a local mock.

use std::time::Duration;

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, NWS_API_BASE, OPEN_METEO_FORECAST_URL, OPEN_METEO_GEOCODE_URL,
    USER_AGENT,
};

pub const ENV_GEOCODE_URL: &str = "WEATHER_GEOCODE_URL";
pub const ENV_FORECAST_URL: &str = "WEATHER_FORECAST_URL";
pub const ENV_NWS_API_BASE: &str = "WEATHER_NWS_API_BASE";
pub const ENV_USER_AGENT: &str = "WEATHER_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "WEATHER_HTTP_TIMEOUT_SECS";

/// Configuration for the weather server
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Geocoding search endpoint
    pub geocode_url: String,

    /// Forecast endpoint, used for both current conditions and daily forecasts
    pub forecast_url: String,

    /// Base URL of the NWS API
    pub nws_api_base: String,

    /// User-Agent header sent with alert requests
    pub user_agent: String,

    /// Timeout applied to every outbound request
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = lookup(ENV_TIMEOUT_SECS)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            geocode_url: lookup(ENV_GEOCODE_URL).unwrap_or(defaults.geocode_url),
            forecast_url: lookup(ENV_FORECAST_URL).unwrap_or(defaults.forecast_url),
            nws_api_base: lookup(ENV_NWS_API_BASE).unwrap_or(defaults.nws_api_base),
            user_agent: lookup(ENV_USER_AGENT).unwrap_or(defaults.user_agent),
            timeout,
        }
    }

    /// Active alerts URL for a state; the code is uppercased but not validated
    pub fn alerts_url(&self, state: &str) -> String {
        format!(
            "{}/alerts/active/area/{}",
            self.nws_api_base.trim_end_matches('/'),
            state.to_uppercase()
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocode_url: OPEN_METEO_GEOCODE_URL.to_string(),
            forecast_url: OPEN_METEO_FORECAST_URL.to_string(),
            nws_api_base: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.geocode_url, OPEN_METEO_GEOCODE_URL);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_GEOCODE_URL, "http://localhost:1/geo"),
            (ENV_FORECAST_URL, "http://localhost:1/forecast"),
            (ENV_NWS_API_BASE, "http://localhost:1"),
            (ENV_USER_AGENT, "test-agent/0.0"),
            (ENV_TIMEOUT_SECS, "3"),
        ]));

        assert_eq!(config.geocode_url, "http://localhost:1/geo");
        assert_eq!(config.forecast_url, "http://localhost:1/forecast");
        assert_eq!(config.nws_api_base, "http://localhost:1");
        assert_eq!(config.user_agent, "test-agent/0.0");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        for raw in ["soon", "0", "-5", ""] {
            let config = Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, raw)]));
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS), "{raw}");
        }
    }

    #[test]
    fn test_alerts_url_uppercases_state() {
        let config = Config::default();
        assert_eq!(
            config.alerts_url("ca"),
            "https://api.weather.gov/alerts/active/area/CA"
        );
    }

    #[test]
    fn test_alerts_url_passes_unknown_codes_through() {
        let config = Config {
            nws_api_base: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.alerts_url("zz9"),
            "http://localhost:8080/alerts/active/area/ZZ9"
        );
    }
}
