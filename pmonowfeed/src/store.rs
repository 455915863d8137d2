//! Process-wide store of the latest known track
//!
//! The store is the only point of contact between the always-running feed
//! subscriber (single writer) and the request handlers (many readers).

use crate::models::TrackSnapshot;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Concurrency-safe holder of the latest known track snapshot
///
/// Cloning the store is cheap and every clone observes the same value.
/// Readers never see a partially-written snapshot: replacement swaps the
/// whole value under the write lock, and concurrent readers share the read
/// lock without excluding each other.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Option<TrackSnapshot>>>,
}

impl SnapshotStore {
    /// Create an empty store (no track known yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally overwrite the current snapshot
    ///
    /// Last write wins; there is no history and no validation here (the
    /// subscriber only publishes fully decoded messages).
    pub async fn replace(&self, snapshot: TrackSnapshot) {
        *self.inner.write().await = Some(snapshot);
    }

    /// Get the current snapshot, or `None` if no message was ever received
    ///
    /// Never waits for a value to appear; callers must handle `None`.
    pub async fn current(&self) -> Option<TrackSnapshot> {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(title: &str) -> TrackSnapshot {
        TrackSnapshot {
            title: title.to_string(),
            artist: "artist".to_string(),
            channel: "channel".to_string(),
            url: "https://example.org/track".to_string(),
            channel_url: "https://example.org/channel".to_string(),
            thumbnail: "https://example.org/cover.jpg".to_string(),
            duration_fresh: "3:21".to_string(),
            views: "100".to_string(),
        }
    }

    #[tokio::test]
    async fn test_starts_absent() {
        let store = SnapshotStore::new();
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_and_read() {
        let store = SnapshotStore::new();

        store.replace(snapshot("first")).await;
        assert_eq!(store.current().await.unwrap().title, "first");
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = SnapshotStore::new();

        store.replace(snapshot("first")).await;
        store.replace(snapshot("second")).await;

        // A reader sampling after both writes sees the second value whole,
        // never a mixture of fields
        let current = store.current().await.unwrap();
        assert_eq!(current.title, "second");
        assert_eq!(current.artist, "artist");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SnapshotStore::new();
        let reader = store.clone();

        store.replace(snapshot("shared")).await;
        assert_eq!(reader.current().await.unwrap().title, "shared");
    }

    #[tokio::test]
    async fn test_concurrent_writer_and_readers() {
        let store = SnapshotStore::new();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..100 {
                    store.replace(snapshot(&format!("track-{i}"))).await;
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    for _ in 0..100 {
                        // Either absent or a complete snapshot; a torn value
                        // would fail the field-consistency check below
                        if let Some(current) = store.current().await {
                            assert!(current.title.starts_with("track-"));
                            assert_eq!(current.artist, "artist");
                        }
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }

        assert_eq!(store.current().await.unwrap().title, "track-99");
    }
}
