// Error types for the retrieval pipeline

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The official API answered with a non-success status or an empty collection
    #[error("API error: {status} {message}")]
    Api { status: u16, message: String },

    /// The resolved strategy produced no playlist items
    #[error("Could not obtain any videos from the playlist")]
    EmptyPlaylist,

    /// A single video could not be resolved and no fallback was allowed
    #[error("Failed to fetch details for video {video_id}: {reason}")]
    ExtractionFailure { video_id: String, reason: String },

    /// Fallback disabled and no usable API key
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed payload from an endpoint
    #[error("Parse error: {0}")]
    Parse(String),

    /// Public page or relay answered with a non-success status
    #[error("Relay returned HTTP {status}")]
    Relay { status: u16 },
}

impl ExtractionError {
    /// Whether a weaker strategy may be tried after this error.
    ///
    /// Configuration errors and an empty resolved playlist are final.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::EmptyPlaylist)
    }

    /// HTTP status attached to this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Relay { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExtractionError {
    /// The request URL carries the API key as a query parameter, so it is dropped
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            return Self::Network(format!("timed out: {}", e));
        }
        if e.is_decode() {
            return Self::Parse(e.to_string());
        }
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON parse error: {}", e))
    }
}
