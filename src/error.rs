//! Error types for the geocoding tools
//!
//! Every failure aborts the current tool call; nothing is downgraded to a
//! default value. The formatter never fails, so it has no variant here.

use std::time::Duration;

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Failure of a single geocoding tool invocation
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// The upstream API key is not configured
    #[error("API key is required for geocoding requests: set {var}")]
    Configuration { var: String },

    /// A tool argument failed validation
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// The geocoding API answered with a non-2xx status
    #[error("Geocoding API returned HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// The geocoding API answered with something other than a location list
    #[error("Failed to parse geocoding response: {0}")]
    UpstreamParse(#[from] serde_json::Error),

    #[error("Geocoding request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure before a response arrived
    #[error("Geocoding request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Result type alias for geocoding operations
pub type Result<T> = std::result::Result<T, GeocodeError>;

impl From<GeocodeError> for McpError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::InvalidArgument { .. } => McpError::invalid_params(err.to_string(), None),
            _ => McpError::internal_error(err.to_string(), None),
        }
    }
}
