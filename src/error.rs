//! Error types and handling for the `tempo-pt` dashboard backend

use thiserror::Error;

/// Main error type for the dashboard backend
#[derive(Error, Debug)]
pub enum TempoError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IPMA fetch errors (network, non-2xx status, malformed JSON)
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Invalid or unknown city selection
    #[error("Invalid selection: {message}")]
    Selection { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TempoError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new selection error
    pub fn selection<S: Into<String>>(message: S) -> Self {
        Self::Selection {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly message for the single user-facing error slot
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TempoError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TempoError::Fetch { .. } => "Error fetching weather data".to_string(),
            TempoError::Selection { .. } => "Please select a city".to_string(),
            TempoError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TempoError::config("missing base URL");
        assert!(matches!(config_err, TempoError::Config { .. }));

        let fetch_err = TempoError::fetch("connection failed");
        assert!(matches!(fetch_err, TempoError::Fetch { .. }));

        let selection_err = TempoError::selection("unknown city id 42");
        assert!(matches!(selection_err, TempoError::Selection { .. }));
    }

    #[test]
    fn test_user_messages() {
        let fetch_err = TempoError::fetch("HTTP 502");
        assert_eq!(fetch_err.user_message(), "Error fetching weather data");

        let selection_err = TempoError::selection("no city");
        assert_eq!(selection_err.user_message(), "Please select a city");

        let general_err = TempoError::general("something broke");
        assert!(general_err.user_message().contains("something broke"));
    }
}
