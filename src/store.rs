use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::roadmap::GoalResponse;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait RoadmapStore: Send + Sync {
    /// Save a roadmap under `name`, replacing any previous one.
    /// Returns where it was written.
    async fn save(&self, name: &str, roadmap: &GoalResponse) -> Result<PathBuf, StoreError>;

    /// Load the roadmap saved under `name`, if any.
    async fn load(&self, name: &str) -> Result<Option<GoalResponse>, StoreError>;
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryRoadmapStore {
    roadmaps: std::sync::Mutex<HashMap<String, GoalResponse>>,
}

impl MemoryRoadmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.roadmaps.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RoadmapStore for MemoryRoadmapStore {
    async fn save(&self, name: &str, roadmap: &GoalResponse) -> Result<PathBuf, StoreError> {
        self.roadmaps.lock().unwrap().insert(name.to_string(), roadmap.clone());
        Ok(PathBuf::from(format!("memory://{}", name)))
    }

    async fn load(&self, name: &str) -> Result<Option<GoalResponse>, StoreError> {
        Ok(self.roadmaps.lock().unwrap().get(name).cloned())
    }
}

/// Saves each roadmap as a pretty-printed JSON file `<dir>/<name>.json`.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so readers never see a partial record.
pub struct FileRoadmapStore {
    base_path: PathBuf,
}

impl FileRoadmapStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { base_path: path.into() }
    }

    pub fn roadmap_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }

    fn atomic_write(dir: &Path, target: &Path, content: &str) -> Result<(), StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        std::fs::create_dir_all(dir).map_err(io_err(dir))?;
        let mut temp = NamedTempFile::new_in(dir).map_err(io_err(dir))?;
        temp.write_all(content.as_bytes()).map_err(io_err(target))?;
        temp.write_all(b"\n").map_err(io_err(target))?;
        temp.flush().map_err(io_err(target))?;
        temp.persist(target).map_err(|e| StoreError::Io {
            path:   target.to_path_buf(),
            source: e.error,
        })?;
        Ok(())
    }
}

#[async_trait]
impl RoadmapStore for FileRoadmapStore {
    async fn save(&self, name: &str, roadmap: &GoalResponse) -> Result<PathBuf, StoreError> {
        let path = self.roadmap_path(name);
        let data = serde_json::to_string_pretty(roadmap)?;
        Self::atomic_write(&self.base_path, &path, &data)?;
        tracing::info!(path = %path.display(), "roadmap saved");
        Ok(path)
    }

    async fn load(&self, name: &str) -> Result<Option<GoalResponse>, StoreError> {
        let path = self.roadmap_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        Ok(Some(serde_json::from_str(&data)?))
    }
}
