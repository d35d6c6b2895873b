//! Common error types used across all site crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for site operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum SiteError {
    // Page errors
    #[error("Element not found: #{id}")]
    MissingElement { id: String },

    #[error("Unknown season code: {code}")]
    UnknownSeason { code: String },

    // Chart errors
    #[error("Invalid chart descriptor for {chart}: {message}")]
    InvalidDescriptor { chart: String, message: String },

    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    #[error("Render engine error: {message}")]
    RenderEngine { message: String },

    // Scheduling errors
    #[error("Timer error: {message}")]
    Timer { message: String },

    // Serialization errors
    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    // WASM-specific errors
    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },

    #[error("Not supported by this browser: {feature}")]
    Unsupported { feature: String },
}

/// Result type alias for site operations
pub type SiteResult<T> = Result<T, SiteError>;

impl SiteError {
    pub fn missing(id: impl Into<String>) -> Self {
        SiteError::MissingElement { id: id.into() }
    }

    pub fn engine(message: impl Into<String>) -> Self {
        SiteError::RenderEngine {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "wasm-bindgen")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        SiteError::JsInterop {
            message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

#[cfg(feature = "wasm-bindgen")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SiteError::missing("season-select");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("MissingElement"));
        assert!(json.contains("season-select"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SiteError::missing("load-map-btn").to_string(),
            "Element not found: #load-map-btn"
        );
        assert_eq!(
            SiteError::engine("Chart is not defined").to_string(),
            "Render engine error: Chart is not defined"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        match SiteError::from(json_err) {
            SiteError::Serialization { message } => assert!(!message.is_empty()),
            other => panic!("Wrong error variant: {other:?}"),
        }
    }
}
