//! Error types and handling for `FloodAid`
//!
//! The weather pipeline never surfaces these to a presentation surface: the
//! public geocoding and forecast operations log the error and hand back
//! `None` instead. They exist so the cause is still visible in the logs and
//! so configuration and input problems can be reported properly.

use thiserror::Error;

/// Main error type for the `FloodAid` application
#[derive(Error, Debug)]
pub enum FloodAidError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External service returned something we cannot use
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Transport-level HTTP failures, including timeouts
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl FloodAidError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FloodAidError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FloodAidError::Api { .. } => {
                "The weather service sent data we could not read. Flood risk is shown as unknown until it recovers."
                    .to_string()
            }
            FloodAidError::Http { .. } => {
                "Unable to reach the weather service. Check your internet connection; flood risk is shown as unknown meanwhile."
                    .to_string()
            }
            FloodAidError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            FloodAidError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            FloodAidError::General { message } => message.clone(),
        }
    }
}
