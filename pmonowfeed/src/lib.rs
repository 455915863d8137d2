//! Track feed subscriber library for PMONowPlaying
//!
//! This crate maintains a best-effort mirror of a remote "now playing" feed:
//! a persistent websocket connection receives track-change messages, and each
//! successfully decoded message replaces the process-wide current snapshot.
//!
//! # Features
//!
//! - **Snapshot Store**: concurrency-safe holder of the latest known track,
//!   readable from any number of request handlers
//! - **Feed Subscriber**: reconnecting websocket client with a fixed backoff,
//!   never giving up short of process shutdown
//! - **Full-or-nothing decoding**: a malformed message is discarded whole,
//!   leaving the previous snapshot in place
//!
//! # Example
//!
//! ```no_run
//! use pmonowfeed::{FeedSubscriber, SnapshotStore};
//! use tokio::sync::broadcast;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SnapshotStore::new();
//!     let subscriber = FeedSubscriber::new("wss://example.org/receive", store.clone())?;
//!
//!     let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
//!     tokio::spawn(async move { subscriber.run(shutdown_rx).await });
//!
//!     // ... serve requests reading store.current() ...
//!
//!     let _ = shutdown_tx.send(());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod store;
pub mod subscriber;

// Re-exports
pub use error::{Error, Result};
pub use models::TrackSnapshot;
pub use store::SnapshotStore;
pub use subscriber::{FeedSubscriber, RECONNECT_DELAY_SECS};
