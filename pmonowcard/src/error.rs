//! Error types for card rendering

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a now-playing card
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No track has been received from the feed yet
    #[error("no track received from the feed yet")]
    NoTrack,

    /// HTTP request failed (artwork fetch, client construction)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The artwork source answered with a non-success status
    #[error("artwork source returned status: {0}")]
    ArtworkStatus(reqwest::StatusCode),

    /// The artwork bytes could not be decoded into a palette
    #[error("palette extraction failed: {0}")]
    Palette(#[from] pmopalette::Error),
}
