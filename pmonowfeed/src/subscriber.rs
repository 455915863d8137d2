//! Reconnecting websocket subscriber for the track feed
//!
//! The subscriber keeps a persistent connection to the remote feed endpoint
//! and publishes every successfully decoded message into the
//! [`SnapshotStore`](crate::store::SnapshotStore). Every failure mode is
//! transient: malformed messages are skipped, closed or broken connections
//! are re-opened after a fixed delay, forever. The only externally
//! observable effect of this module is the store's value changing.

use crate::error::Result;
use crate::models::TrackSnapshot;
use crate::store::SnapshotStore;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

/// Fixed delay before re-attempting a failed or closed feed connection
pub const RECONNECT_DELAY_SECS: u64 = 5;

/// Websocket subscriber mirroring the remote feed into a snapshot store
pub struct FeedSubscriber {
    url: String,
    store: SnapshotStore,
}

impl FeedSubscriber {
    /// Create a subscriber for the given feed endpoint
    ///
    /// The URL is validated eagerly so a misconfigured endpoint fails at
    /// startup instead of silently retrying forever.
    pub fn new(url: impl Into<String>, store: SnapshotStore) -> Result<Self> {
        let url = url.into();
        Url::parse(&url)?;
        Ok(Self { url, store })
    }

    /// The feed endpoint this subscriber connects to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run the reconnect-and-listen loop until shutdown is signalled
    ///
    /// Connection errors and closures are logged and retried after
    /// [`RECONNECT_DELAY_SECS`], unconditionally and without bound. Nothing
    /// propagates out of this loop; a stale or absent snapshot is the only
    /// visible symptom of feed trouble.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Shutting down feed subscriber");
                    return;
                }
                result = self.connect_and_listen() => {
                    match result {
                        Ok(()) => info!("Feed connection closed"),
                        Err(e) => warn!("Feed connection error: {}", e),
                    }
                }
            }

            info!(
                "Retrying feed connection in {} seconds...",
                RECONNECT_DELAY_SECS
            );
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Shutting down feed subscriber");
                    return;
                }
                _ = tokio::time::sleep(Duration::from_secs(RECONNECT_DELAY_SECS)) => {}
            }
        }
    }

    /// One connection session: connect, then drain messages until the
    /// stream ends
    async fn connect_and_listen(&self) -> Result<()> {
        info!("Connecting to feed: {}", self.url);
        let (mut stream, _) = connect_async(self.url.as_str()).await?;
        info!("Connected to feed");

        while let Some(message) = stream.next().await {
            match message? {
                Message::Text(text) => self.handle_message(&text).await,
                Message::Close(frame) => {
                    info!(?frame, "Feed closed the connection");
                    break;
                }
                // Ping/pong/binary frames carry no track metadata
                _ => {}
            }
        }

        Ok(())
    }

    /// Decode one feed message and publish it
    ///
    /// Decode failures are non-fatal: the message is dropped whole and the
    /// previously published snapshot stays in place.
    async fn handle_message(&self, text: &str) {
        match TrackSnapshot::decode(text) {
            Ok(snapshot) => {
                debug!(title=%snapshot.title, artist=%snapshot.artist, "Received track update");
                self.store.replace(snapshot).await;
            }
            Err(e) => warn!("Discarding malformed feed message: {}", e),
        }
    }
}
