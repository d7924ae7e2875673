//! MCP server exposing current weather, short-range forecasts and US alerts
//!
//! Weather data comes from Open-Meteo (geocoding and forecasts, worldwide) and
//! the National Weather Service (active alerts, US only).

pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod models;
pub mod service;

pub use config::Config;
pub use error::{FetchError, FetchResult, ForecastError};
pub use fetch::{Fetcher, QueryValue};
pub use service::Weather;
