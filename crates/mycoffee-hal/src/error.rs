//! # HAL Error Types
//!
//! Error types for the HAL client layer.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       HAL Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   HTTP          │  │     Body / Mapping      │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Status         │  │  InvalidBody            │ │
//! │  │  InvalidUrl     │  │  Transport      │  │  Decode                 │ │
//! │  │  ConfigLoad/Save│  │                 │  │  MissingLink            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Domain: CoreError / ValidationError raised before a request    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every non-2xx response maps to the single [`HalError::Status`] variant.
//! Callers that care about 404 vs 500 inspect [`HalError::status`].

use mycoffee_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

/// Error type covering every failure of a HAL call.
#[derive(Debug, Error)]
pub enum HalError {
    // =========================================================================
    // HTTP Errors
    // =========================================================================
    /// The backend answered with a non-success status.
    ///
    /// `detail` holds the response text for POST, PATCH and DELETE calls.
    #[error("HTTP {status} {method} {url}{}", detail_suffix(.detail))]
    Status {
        status: u16,
        method: String,
        url: String,
        detail: Option<String>,
    },

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    // =========================================================================
    // Body / Mapping Errors
    // =========================================================================
    /// The response body is not a HAL JSON object.
    #[error("Invalid HAL body: {0}")]
    InvalidBody(String),

    /// A resource did not match the expected entity shape.
    #[error("Failed to decode {entity}: {message}")]
    Decode {
        entity: &'static str,
        message: String,
    },

    /// A link relation needed to continue is absent.
    #[error("Missing '{rel}' link")]
    MissingLink { rel: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A URL could not be parsed or has the wrong scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// A storefront rule rejected the action before any request was made.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Input failed validation before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail.as_deref() {
        Some(d) if !d.is_empty() => format!(". Details: {d}"),
        _ => String::new(),
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for HalError {
    fn from(err: reqwest::Error) -> Self {
        HalError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for HalError {
    fn from(err: serde_json::Error) -> Self {
        HalError::InvalidBody(err.to_string())
    }
}

impl From<url::ParseError> for HalError {
    fn from(err: url::ParseError) -> Self {
        HalError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for HalError {
    fn from(err: std::io::Error) -> Self {
        HalError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for HalError {
    fn from(err: toml::de::Error) -> Self {
        HalError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for HalError {
    fn from(err: toml::ser::Error) -> Self {
        HalError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl HalError {
    /// Returns the HTTP status code if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            HalError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HalError::InvalidConfig(_)
                | HalError::InvalidUrl(_)
                | HalError::ConfigLoadFailed(_)
                | HalError::ConfigSaveFailed(_)
        )
    }

    /// Returns true for rejections raised locally, before any request.
    pub fn is_rejected_locally(&self) -> bool {
        matches!(self, HalError::Domain(_) | HalError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_contains_code() {
        let err = HalError::Status {
            status: 404,
            method: "GET".into(),
            url: "http://127.0.0.1:8080/baskets/9".into(),
            detail: None,
        };
        assert_eq!(err.to_string(), "HTTP 404 GET http://127.0.0.1:8080/baskets/9");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_status_message_with_detail() {
        let err = HalError::Status {
            status: 500,
            method: "PATCH".into(),
            url: "/inventories/1".into(),
            detail: Some("boom".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.ends_with("Details: boom"));
    }

    #[test]
    fn test_categories() {
        assert!(HalError::InvalidConfig("x".into()).is_config_error());
        assert!(!HalError::MissingLink { rel: "self".into() }.is_config_error());
        assert_eq!(HalError::Transport("refused".into()).status(), None);

        let local: HalError = CoreError::NegativeStock { requested: -1 }.into();
        assert!(local.is_rejected_locally());
    }
}
