//! Error types for the track feed subscriber

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while subscribing to the track feed
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Websocket connection or protocol failure
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid feed endpoint URL
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
