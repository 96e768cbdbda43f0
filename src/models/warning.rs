//! Warning models: national weather advisories and their display form

use serde::{Deserialize, Serialize};

/// Ordinal advisory severity level
///
/// "green" is the lowest level and means no advisory; it is filtered out of
/// the dashboard. An unrecognized level deserializes to `Unknown` and is
/// treated as an advisory rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AwarenessLevel {
    Green,
    Yellow,
    Orange,
    Red,
    #[serde(other)]
    Unknown,
}

impl AwarenessLevel {
    /// Whether this level represents an active advisory
    #[must_use]
    pub const fn is_advisory(self) -> bool {
        !matches!(self, Self::Green)
    }
}

/// A weather advisory for one area, as sent by the IPMA national warning feed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Warning {
    /// Free-text advisory body (may be empty)
    #[serde(default)]
    pub text: String,
    /// Advisory category name (e.g. "Agitação Marítima")
    #[serde(rename = "awarenessTypeName")]
    pub awareness_type_name: String,
    /// Area-warning code this advisory applies to
    #[serde(rename = "idAreaAviso")]
    pub area_warning_code: String,
    /// Advisory start, local ISO timestamp
    #[serde(rename = "startTime")]
    pub start_time: String,
    /// Advisory end, local ISO timestamp
    #[serde(rename = "endTime")]
    pub end_time: String,
    /// Severity level
    #[serde(rename = "awarenessLevelID")]
    pub awareness_level: AwarenessLevel,
}

/// Derived warning with human-formatted timestamps
///
/// Always a fresh copy; the canonical warning list is reused across city
/// selections and is never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WarningView {
    /// Free-text advisory body
    pub text: String,
    /// Advisory category name
    pub awareness_type_name: String,
    /// Area-warning code
    pub area_warning_code: String,
    /// Severity level
    pub awareness_level: AwarenessLevel,
    /// Localized long-form start time
    pub start_time: String,
    /// Localized long-form end time
    pub end_time: String,
}
