use serde_json::Number;

use crate::constants::{ALERT_SEPARATOR, MISSING_FIELD, MISSING_VALUE};
use crate::error::ForecastError;
use crate::models::{AlertFeature, AlertProperties, CurrentWeather, DailyForecast};

pub fn location_not_found(city: &str) -> String {
    format!("Could not find location for {}.", city)
}

pub fn weather_unavailable(city: &str) -> String {
    format!("Could not fetch weather for {}.", city)
}

pub fn forecast_unavailable(city: &str) -> String {
    format!("Could not fetch forecast for {}.", city)
}

pub fn no_active_alerts(state: &str) -> String {
    format!("No active alerts for {}.", state)
}

/// Formats current conditions into a single line
pub fn format_current_weather(city: &str, current: &CurrentWeather) -> String {
    format!(
        "Weather in {}: {}\u{00b0}C, wind {} km/h",
        city, current.temperature, current.windspeed
    )
}

/// Formats the first `days` entries of a daily forecast, one line per day
///
/// Every series must cover `days` entries; short series are rejected rather
/// than truncated.
pub fn format_daily_forecast(daily: &DailyForecast, days: usize) -> Result<String, ForecastError> {
    let lengths = [
        ("time", daily.time.len()),
        ("temperature_2m_min", daily.temperature_min.len()),
        ("temperature_2m_max", daily.temperature_max.len()),
        ("precipitation_sum", daily.precipitation_sum.len()),
    ];
    if let Some((field, got)) = lengths.into_iter().find(|(_, len)| *len < days) {
        return Err(ForecastError::Incomplete {
            expected: days,
            field,
            got,
        });
    }

    let lines: Vec<String> = (0..days)
        .map(|i| {
            format!(
                "{}: {}\u{2013}{}\u{00b0}C, precip {}mm",
                daily.time[i],
                display_value(&daily.temperature_min[i]),
                display_value(&daily.temperature_max[i]),
                display_value(&daily.precipitation_sum[i])
            )
        })
        .collect();

    Ok(lines.join("\n"))
}

/// Formats up to `limit` alerts in provider order
pub fn format_alerts(features: &[AlertFeature], limit: usize) -> String {
    let empty = AlertProperties::default();
    features
        .iter()
        .take(limit)
        .map(|feature| format_alert(feature.properties.as_ref().unwrap_or(&empty)))
        .collect::<Vec<_>>()
        .join(ALERT_SEPARATOR)
}

fn format_alert(props: &AlertProperties) -> String {
    format!(
        "Event: {}\nSeverity: {}\nArea: {}\nInstruction: {}\n",
        display_field(&props.event),
        display_field(&props.severity),
        display_field(&props.area_desc),
        display_field(&props.instruction)
    )
}

fn display_field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING_FIELD)
}

fn display_value(value: &Option<Number>) -> String {
    value
        .as_ref()
        .map_or_else(|| MISSING_VALUE.to_string(), Number::to_string)
}
