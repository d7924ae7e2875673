/// Open-Meteo geocoding endpoint
pub const OPEN_METEO_GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Open-Meteo forecast endpoint
pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// User agent sent to the NWS API, which rejects anonymous clients
pub const USER_AGENT: &str = "WeatherMCP/1.0 (email@example.com)";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Number of days rendered by the forecast tool
pub const FORECAST_DAYS: usize = 3;

/// Daily aggregates requested from Open-Meteo
pub const DAILY_VARIABLES: [&str; 3] = [
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
];

/// Maximum number of alerts rendered per request
pub const MAX_ALERTS: usize = 3;

/// Separator between rendered alert blocks
pub const ALERT_SEPARATOR: &str = "\n---\n";

/// Shown in place of an alert field the provider left out
pub const MISSING_FIELD: &str = "None provided";

/// Shown in place of a null forecast value
pub const MISSING_VALUE: &str = "n/a";
