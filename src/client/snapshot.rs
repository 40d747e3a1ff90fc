use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Last known like state, mirrored to disk so the page can show something
/// when both the feed and REST are unreachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeSnapshot {
    pub count: u64,
    pub has_liked: bool,
}

/// Best-effort file-backed mirror. Every operation is allowed to fail
/// silently apart from a warning; the snapshot is a display fallback, not a
/// source of truth.
pub struct SnapshotStore {
    path: Option<PathBuf>,
}

impl SnapshotStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Per-user location under the platform cache directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("portfolio").join("likes.json"))
    }

    pub fn load(&self) -> Option<LikeSnapshot> {
        let path = self.path.as_ref()?;
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save(&self, snapshot: &LikeSnapshot) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(error = %err, "could not create snapshot directory");
                return;
            }
        }
        match serde_json::to_string(snapshot) {
            Ok(raw) => {
                if let Err(err) = fs::write(path, raw) {
                    tracing::warn!(error = %err, "could not persist like snapshot");
                }
            }
            Err(err) => tracing::warn!(error = %err, "could not encode like snapshot"),
        }
    }
}
