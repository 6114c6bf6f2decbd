use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use threadstash_core::domain::post::PostRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk shape: the single `savedPosts` namespace mapping post id to record.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(rename = "savedPosts", default)]
    saved_posts: HashMap<String, PostRecord>,
}

/// JSON snapshot store for saved threads.
///
/// Every mutation reads the whole map, changes one key, and writes the whole
/// map back; a concurrent writer in another process can lose an update inside
/// that window. The store assumes a single active process.
#[derive(Debug, Clone)]
pub struct SavedPostStore {
    path: PathBuf,
}

impl SavedPostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full map. A missing file is an empty store; an unreadable snapshot
    /// is logged and treated the same rather than failing reads forever.
    pub async fn load(&self) -> HashMap<String, PostRecord> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<Snapshot>(&bytes) {
                Ok(snapshot) => snapshot.saved_posts,
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "snapshot unreadable; starting empty");
                    HashMap::new()
                }
            },
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no snapshot yet");
                HashMap::new()
            }
        }
    }

    pub async fn get(&self, id: &str) -> Option<PostRecord> {
        self.load().await.remove(id)
    }

    /// All records, most recently saved first.
    pub async fn list(&self) -> Vec<PostRecord> {
        let mut records: Vec<PostRecord> = self.load().await.into_values().collect();
        records.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        records
    }

    /// Insert or replace under the record's id. Last write wins.
    pub async fn upsert(&self, record: PostRecord) -> Result<(), StoreError> {
        let mut map = self.load().await;
        map.insert(record.id.clone(), record);
        self.persist(map).await
    }

    /// Remove one record; returns whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut map = self.load().await;
        let removed = map.remove(id).is_some();
        if removed {
            self.persist(map).await?;
        }
        Ok(removed)
    }

    async fn persist(&self, saved_posts: HashMap<String, PostRecord>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&Snapshot { saved_posts })?;
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
