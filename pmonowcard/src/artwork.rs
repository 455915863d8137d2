//! Artwork fetching and inline embedding
//!
//! The card must be self-contained, so the track's artwork is downloaded at
//! render time and embedded as base64 in a `data:` URI instead of being
//! referenced by URL.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;

/// Default User-Agent for artwork requests
pub const DEFAULT_USER_AGENT: &str = "PMONowPlaying/0.1.0 (pmonowcard)";

/// Fetch the raw artwork bytes from a URL
///
/// The timeout bounds the whole request so a stalled artwork source cannot
/// hold a render indefinitely. Non-success statuses are errors; the caller
/// never embeds an error page as artwork.
pub async fn fetch_artwork(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let response = client.get(url).timeout(timeout).send().await?;

    if !response.status().is_success() {
        return Err(Error::ArtworkStatus(response.status()));
    }

    Ok(response.bytes().await?.to_vec())
}

/// Encode artwork bytes for inline `data:` embedding
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_base64_known_value() {
        assert_eq!(encode_base64(b"now playing"), "bm93IHBsYXlpbmc=");
    }

    #[test]
    fn test_encode_base64_empty() {
        assert_eq!(encode_base64(b""), "");
    }

    /// Test artwork fetching against a real image host
    #[tokio::test]
    #[ignore = "Integration test - fetches a real remote image"]
    async fn test_fetch_artwork_real_url() {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .unwrap();

        let bytes = fetch_artwork(
            &client,
            "https://www.rust-lang.org/static/images/rust-logo-blk.svg",
            Duration::from_secs(10),
        )
        .await
        .unwrap();

        assert!(!bytes.is_empty());
    }
}
