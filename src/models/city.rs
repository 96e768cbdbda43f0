//! City model: selectable municipalities from the IPMA district/island list

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A selectable municipality or island region
///
/// Field names follow the IPMA `distrits-islands.json` wire format. The
/// `global_id_local` identifier is unique within the loaded list and is the
/// value a dashboard selection carries; `area_warning_code` groups several
/// cities under one advisory region.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct City {
    /// Unique city identifier
    #[serde(rename = "globalIdLocal")]
    pub global_id_local: u32,
    /// Display name
    #[serde(rename = "local")]
    pub name: String,
    /// Area-warning code shared by all cities of one advisory region
    #[serde(rename = "idAreaAviso")]
    pub area_warning_code: String,
    /// Latitude in decimal degrees, as sent by IPMA (string)
    pub latitude: String,
    /// Longitude in decimal degrees, as sent by IPMA (string)
    pub longitude: String,
    /// Region identifier (mainland/Madeira/Azores)
    #[serde(rename = "idRegiao")]
    pub region_id: i32,
    /// District identifier
    #[serde(rename = "idDistrito")]
    pub district_id: i32,
    /// Municipality identifier within the district
    #[serde(rename = "idConcelho")]
    pub county_id: i32,
}

/// Build the id-keyed city table for O(1) selection lookup
///
/// City identifiers are unique within the IPMA list; a duplicate id keeps the
/// last occurrence.
#[must_use]
pub fn build_city_index(cities: Vec<City>) -> HashMap<u32, City> {
    cities
        .into_iter()
        .map(|city| (city.global_id_local, city))
        .collect()
}

/// Collation key for sorting city names the way a Portuguese speaker expects
///
/// Lowercases and strips the diacritics occurring in Portuguese place names,
/// so "Évora" sorts with the Es instead of after "Viseu".
#[must_use]
pub fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ê' => 'e',
        'í' | 'ì' | 'î' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lisbon() -> City {
        City {
            global_id_local: 1_110_600,
            name: "Lisboa".to_string(),
            area_warning_code: "LSB".to_string(),
            latitude: "38.7660".to_string(),
            longitude: "-9.1286".to_string(),
            region_id: 1,
            district_id: 11,
            county_id: 6,
        }
    }

    #[test]
    fn test_city_deserializes_wire_names() {
        let json = r#"{
            "idRegiao": 1,
            "idAreaAviso": "LSB",
            "idConcelho": 6,
            "globalIdLocal": 1110600,
            "latitude": "38.7660",
            "idDistrito": 11,
            "local": "Lisboa",
            "longitude": "-9.1286"
        }"#;

        let city: City = serde_json::from_str(json).unwrap();
        assert_eq!(city, lisbon());
    }

    #[test]
    fn test_city_index_keyed_by_id() {
        let index = build_city_index(vec![lisbon()]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&1_110_600).unwrap().name, "Lisboa");
        assert!(index.get(&42).is_none());
    }

    #[test]
    fn test_collation_key_folds_case_and_diacritics() {
        assert_eq!(collation_key("Évora"), "evora");
        assert_eq!(collation_key("Santarém"), "santarem");
        assert_eq!(collation_key("Chamusca"), "chamusca");
        assert_eq!(collation_key("São João da Madeira"), "sao joao da madeira");
    }

    #[test]
    fn test_collation_key_orders_accented_names_with_their_base_letter() {
        let mut names = vec!["Viseu", "Évora", "Aveiro", "Faro"];
        names.sort_by_key(|name| collation_key(name));
        assert_eq!(names, vec!["Aveiro", "Évora", "Faro", "Viseu"]);
    }
}
