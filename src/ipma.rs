//! IPMA open-data API client
//!
//! HTTP client for the four IPMA endpoints the dashboard consumes: the
//! district/island city list, the weather-type catalog, the national warning
//! feed, and the per-city daily forecast. Failures at this boundary map to a
//! single fetch-error variant; there is no automatic retry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::IpmaConfig;
use crate::error::TempoError;
use crate::models::{
    City, RawForecastDay, Warning, WeatherTypeEntry, WeatherTypeLookup, build_weather_type_lookup,
    city::{build_city_index, collation_key},
};

/// Envelope wrapping most IPMA payloads (`{ "owner": ..., "data": [...] }`)
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// Reference data fetched once at startup
///
/// The lookup tables are built here and treated as read-only afterwards; a
/// reload replaces the whole structure, never merges into it.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Cities keyed by their unique identifier
    pub cities: HashMap<u32, City>,
    /// Weather-type code to Portuguese description
    pub weather_types: WeatherTypeLookup,
    /// Full national warning list, in feed order
    pub warnings: Vec<Warning>,
}

impl ReferenceData {
    /// Resolve the area-warning code for a selected city id
    #[must_use]
    pub fn area_code_for(&self, city_id: u32) -> Option<&str> {
        self.cities
            .get(&city_id)
            .map(|city| city.area_warning_code.as_str())
    }

    /// Cities sorted by display name, the order of the dashboard dropdown
    ///
    /// Sorting uses a folded collation key so accented names take their
    /// natural place instead of byte order.
    #[must_use]
    pub fn sorted_cities(&self) -> Vec<&City> {
        let mut cities: Vec<&City> = self.cities.values().collect();
        cities.sort_by_cached_key(|city| collation_key(&city.name));
        cities
    }
}

/// HTTP client for the IPMA open-data API
#[derive(Debug)]
pub struct IpmaClient {
    client: Client,
    base_url: String,
}

impl IpmaClient {
    /// Create a new client from configuration
    pub fn new(config: &IpmaConfig) -> Result<Self, TempoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TempoError::fetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the selectable city list
    #[instrument(skip(self))]
    pub async fn fetch_cities(&self) -> Result<Vec<City>, TempoError> {
        let envelope: Envelope<City> = self.get_json("/distrits-islands.json").await?;
        info!("Fetched {} cities", envelope.data.len());
        Ok(envelope.data)
    }

    /// Fetch the weather-type catalog
    #[instrument(skip(self))]
    pub async fn fetch_weather_types(&self) -> Result<Vec<WeatherTypeEntry>, TempoError> {
        let envelope: Envelope<WeatherTypeEntry> =
            self.get_json("/weather-type-classe.json").await?;
        info!("Fetched {} weather-type entries", envelope.data.len());
        Ok(envelope.data)
    }

    /// Fetch the full national warning list (the feed is a bare array)
    #[instrument(skip(self))]
    pub async fn fetch_warnings(&self) -> Result<Vec<Warning>, TempoError> {
        let warnings: Vec<Warning> = self.get_json("/forecast/warnings/warnings_www.json").await?;
        info!("Fetched {} warnings", warnings.len());
        Ok(warnings)
    }

    /// Fetch the multi-day forecast for a single city
    #[instrument(skip(self), fields(city_id = %city_id))]
    pub async fn fetch_daily_forecast(
        &self,
        city_id: u32,
    ) -> Result<Vec<RawForecastDay>, TempoError> {
        let path = format!("/forecast/meteorology/cities/daily/{city_id}.json");
        let envelope: Envelope<RawForecastDay> = self.get_json(&path).await?;
        info!(
            "Fetched {} forecast days for city {}",
            envelope.data.len(),
            city_id
        );
        Ok(envelope.data)
    }

    /// Fetch all reference data, issuing the three requests concurrently
    ///
    /// The fetches are mutually independent and joined fail-fast: if any one
    /// fails the whole load fails and no partial state is exposed.
    #[instrument(skip(self))]
    pub async fn fetch_reference_data(&self) -> Result<ReferenceData, TempoError> {
        let start = Instant::now();

        let (cities, weather_types, warnings) = tokio::try_join!(
            self.fetch_cities(),
            self.fetch_weather_types(),
            self.fetch_warnings(),
        )?;

        info!(
            "Loaded reference data in {:.3}s",
            start.elapsed().as_secs_f64()
        );

        Ok(ReferenceData {
            cities: build_city_index(cities),
            weather_types: build_weather_type_lookup(&weather_types),
            warnings,
        })
    }

    /// Issue a GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TempoError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "IPMA API request");
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TempoError::fetch(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "IPMA API returned an error status");
            return Err(TempoError::fetch(format!(
                "IPMA API request failed with status {status} for {url}"
            )));
        }

        let body = response.json::<T>().await.map_err(|e| {
            TempoError::fetch(format!("Failed to parse IPMA response from {url}: {e}"))
        })?;

        let elapsed = start.elapsed();
        debug!(
            "IPMA API response decoded in {:.3}s",
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow IPMA API response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AwarenessLevel;

    fn city(id: u32, name: &str, area: &str) -> City {
        City {
            global_id_local: id,
            name: name.to_string(),
            area_warning_code: area.to_string(),
            latitude: "0".to_string(),
            longitude: "0".to_string(),
            region_id: 1,
            district_id: 1,
            county_id: 1,
        }
    }

    fn reference_data() -> ReferenceData {
        ReferenceData {
            cities: build_city_index(vec![
                city(1110600, "Lisboa", "LSB"),
                city(1181600, "Viseu", "VIS"),
                city(1070500, "Évora", "EVR"),
                city(1010500, "Aveiro", "AVR"),
            ]),
            weather_types: HashMap::new(),
            warnings: vec![Warning {
                text: String::new(),
                awareness_type_name: "Vento".to_string(),
                area_warning_code: "LSB".to_string(),
                start_time: "2024-05-01T00:00:00".to_string(),
                end_time: "2024-05-01T12:00:00".to_string(),
                awareness_level: AwarenessLevel::Yellow,
            }],
        }
    }

    #[test]
    fn test_area_code_resolution() {
        let reference = reference_data();
        assert_eq!(reference.area_code_for(1110600), Some("LSB"));
        assert_eq!(reference.area_code_for(999), None);
    }

    #[test]
    fn test_sorted_cities_by_display_name() {
        let reference = reference_data();
        let names: Vec<&str> = reference
            .sorted_cities()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        // "Évora" sorts with the Es, not after "Viseu" in byte order
        assert_eq!(names, vec!["Aveiro", "Évora", "Lisboa", "Viseu"]);
    }

    #[test]
    fn test_client_strips_trailing_slash_from_base_url() {
        let config = IpmaConfig {
            base_url: "https://api.ipma.pt/open-data/".to_string(),
            ..IpmaConfig::default()
        };
        let client = IpmaClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.ipma.pt/open-data");
    }
}
