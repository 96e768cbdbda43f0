//! Weather-type catalog: numeric condition codes and their descriptions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of the IPMA `weather-type-classe.json` catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherTypeEntry {
    /// Numeric weather-type code (IPMA uses -1 for "no information")
    #[serde(rename = "idWeatherType")]
    pub id: i32,
    /// Portuguese description
    #[serde(rename = "descIdWeatherTypePT")]
    pub description_pt: String,
    /// English description
    #[serde(rename = "descIdWeatherTypeEN")]
    pub description_en: String,
}

/// Lookup table from weather-type code to Portuguese description
pub type WeatherTypeLookup = HashMap<i32, String>;

/// Build the code-keyed description table
///
/// Codes are unique in the catalog; a duplicate keeps the last occurrence.
#[must_use]
pub fn build_weather_type_lookup(entries: &[WeatherTypeEntry]) -> WeatherTypeLookup {
    entries
        .iter()
        .map(|entry| (entry.id, entry.description_pt.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_deserializes_wire_names() {
        let json = r#"{
            "descIdWeatherTypeEN": "Clear sky",
            "descIdWeatherTypePT": "Céu limpo",
            "idWeatherType": 1
        }"#;

        let entry: WeatherTypeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.description_pt, "Céu limpo");
        assert_eq!(entry.description_en, "Clear sky");
    }

    #[test]
    fn test_lookup_keyed_by_code() {
        let entries = vec![
            WeatherTypeEntry {
                id: 1,
                description_pt: "Céu limpo".to_string(),
                description_en: "Clear sky".to_string(),
            },
            WeatherTypeEntry {
                id: 2,
                description_pt: "Céu pouco nublado".to_string(),
                description_en: "Partly cloudy".to_string(),
            },
        ];

        let lookup = build_weather_type_lookup(&entries);
        assert_eq!(lookup.get(&1).map(String::as_str), Some("Céu limpo"));
        assert_eq!(lookup.get(&2).map(String::as_str), Some("Céu pouco nublado"));
        assert!(lookup.get(&99).is_none());
    }
}
