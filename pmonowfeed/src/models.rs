//! Data model for track feed messages
//!
//! The feed pushes one JSON object per track change. A message is only
//! accepted as a whole: every field below is required, so a missing or
//! mistyped field fails the decode and the message is discarded without
//! touching the previously published snapshot.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The latest known "what is playing" fact
///
/// All fields are display-ready strings taken verbatim from the feed;
/// nothing is escaped or normalized here. Escaping for markup output is the
/// renderer's concern.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackSnapshot {
    /// Track title
    pub title: String,
    /// Artist display name
    pub artist: String,
    /// Channel/owner name
    pub channel: String,
    /// Canonical track URL
    pub url: String,
    /// Canonical channel URL
    pub channel_url: String,
    /// Thumbnail/artwork URL
    pub thumbnail: String,
    /// Formatted duration (e.g. "3:21")
    pub duration_fresh: String,
    /// View-count display (e.g. "100", "1.2M")
    pub views: String,
}

impl TrackSnapshot {
    /// Decode a raw feed message
    ///
    /// Unknown fields are tolerated; missing required fields are not.
    pub fn decode(message: &str) -> Result<Self> {
        Ok(serde_json::from_str(message)?)
    }
}
