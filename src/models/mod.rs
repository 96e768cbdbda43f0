//! Data models for the dashboard backend
//!
//! This module contains the domain models organized by concern:
//! - City: selectable municipalities with their area-warning codes
//! - Forecast: raw per-city forecast days and the derived display records
//! - Warning: national weather advisories and their display form
//! - Weather type: the numeric-code-to-description catalog

pub mod city;
pub mod forecast;
pub mod warning;
pub mod weather_type;

// Re-export all public types for convenient access
pub use city::City;
pub use forecast::{ForecastDayView, RawForecastDay};
pub use warning::{AwarenessLevel, Warning, WarningView};
pub use weather_type::{WeatherTypeEntry, WeatherTypeLookup, build_weather_type_lookup};
