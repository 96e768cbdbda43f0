//! `tempo-pt` - Portuguese weather dashboard backend
//!
//! This library fetches city, weather-type, warning, and per-city forecast
//! data from the IPMA open-data API and derives display-ready view models
//! for a browser dashboard.

pub mod config;
pub mod error;
pub mod ipma;
pub mod models;
pub mod service;
pub mod viewmodel;
pub mod web;

// Re-export core types for public API
pub use config::TempoConfig;
pub use error::TempoError;
pub use ipma::{IpmaClient, ReferenceData};
pub use models::{
    AwarenessLevel, City, ForecastDayView, RawForecastDay, Warning, WarningView, WeatherTypeEntry,
    WeatherTypeLookup,
};
pub use service::{CityDashboard, DashboardService, Selection};
pub use viewmodel::{build_day_views, select_active_warnings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TempoError>;
