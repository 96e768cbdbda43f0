//! Forecast models: raw IPMA daily forecast records and their derived,
//! display-ready form

use serde::{Deserialize, Deserializer, Serialize};

/// One day's unprocessed forecast for a city
///
/// Field names follow the IPMA per-city daily forecast wire format. Numeric
/// values arrive as strings (`tMin`, `tMax`, `precipitaProb`) and are kept as
/// received; the builder never needs them as numbers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawForecastDay {
    /// Forecast date as an ISO string (YYYY-MM-DD)
    #[serde(rename = "forecastDate")]
    pub forecast_date: String,
    /// Minimum temperature in Celsius
    #[serde(rename = "tMin")]
    pub t_min: String,
    /// Maximum temperature in Celsius
    #[serde(rename = "tMax")]
    pub t_max: String,
    /// Precipitation probability as a percentage
    #[serde(rename = "precipitaProb")]
    pub precipitation_prob: String,
    /// Predominant wind direction code (N, NE, ...)
    #[serde(rename = "predWindDir")]
    pub wind_direction: String,
    /// Weather-type code; IPMA sends it as a number in some payload revisions
    /// and a string in others, so both are accepted and kept as a string
    #[serde(rename = "idWeatherType", deserialize_with = "code_as_string")]
    pub weather_type: String,
    /// Wind-speed class, expected in 1..=4
    #[serde(rename = "classWindSpeed")]
    pub wind_speed_class: i64,
    /// Precipitation intensity class, when present
    #[serde(rename = "classPrecInt", default, skip_serializing_if = "Option::is_none")]
    pub precipitation_intensity_class: Option<i64>,
    /// Latitude of the forecast point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    /// Longitude of the forecast point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

/// Accept a JSON number or string and normalize to a string
fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CodeRepr {
        Int(i64),
        Str(String),
    }

    Ok(match CodeRepr::deserialize(deserializer)? {
        CodeRepr::Int(code) => code.to_string(),
        CodeRepr::Str(code) => code,
    })
}

/// Derived, display-ready forecast day
///
/// Carries every raw field plus the four derived ones. Created fresh on each
/// builder invocation and never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDayView {
    /// The unmodified raw forecast fields
    #[serde(flatten)]
    pub raw: RawForecastDay,
    /// Relative day label ("Hoje", "Amanhã", or the weekday name)
    pub day_label: String,
    /// Weather description resolved from the catalog; `None` on lookup miss
    pub weather_desc: Option<String>,
    /// Path of the daytime animated icon asset
    pub icon_path: String,
    /// Descriptive wind-speed label; `None` for a class outside 1..=4
    pub wind_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_day_accepts_numeric_weather_type() {
        let json = r#"{
            "precipitaProb": "40.0",
            "tMin": "10.2",
            "tMax": "20.1",
            "predWindDir": "N",
            "idWeatherType": 3,
            "classWindSpeed": 2,
            "longitude": "-9.13",
            "forecastDate": "2024-05-01",
            "classPrecInt": 1,
            "latitude": "38.77"
        }"#;

        let day: RawForecastDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.weather_type, "3");
        assert_eq!(day.wind_speed_class, 2);
        assert_eq!(day.precipitation_intensity_class, Some(1));
    }

    #[test]
    fn test_raw_day_accepts_string_weather_type() {
        let json = r#"{
            "precipitaProb": "0.0",
            "tMin": "13.6",
            "tMax": "24.0",
            "predWindDir": "NW",
            "idWeatherType": "12",
            "classWindSpeed": 1,
            "forecastDate": "2024-05-02"
        }"#;

        let day: RawForecastDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.weather_type, "12");
        assert!(day.latitude.is_none());
        assert!(day.precipitation_intensity_class.is_none());
    }

    #[test]
    fn test_day_view_serializes_raw_fields_flattened() {
        let day = RawForecastDay {
            forecast_date: "2024-05-01".to_string(),
            t_min: "10".to_string(),
            t_max: "20".to_string(),
            precipitation_prob: "40".to_string(),
            wind_direction: "N".to_string(),
            weather_type: "3".to_string(),
            wind_speed_class: 2,
            precipitation_intensity_class: None,
            latitude: None,
            longitude: None,
        };

        let view = ForecastDayView {
            raw: day,
            day_label: "Hoje".to_string(),
            weather_desc: Some("Céu limpo".to_string()),
            icon_path: "/icons/w_ic_d_03anim.svg".to_string(),
            wind_label: Some("Moderado".to_string()),
        };

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["forecastDate"], "2024-05-01");
        assert_eq!(value["tMin"], "10");
        assert_eq!(value["day_label"], "Hoje");
        assert_eq!(value["wind_label"], "Moderado");
    }
}
