//! File-based storage implementation for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::roster::RosterFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each roster as a pretty-printed JSON file in a directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the directory.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Storage under the platform data directory, e.g.
    /// `~/.local/share/tacticboard/rosters/` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("tacticboard").join("rosters"))
    }

    /// File path for a roster id, with unsafe characters replaced.
    fn roster_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, roster: &RosterFile) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.roster_path(id);
        let json = roster.to_json();

        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            log::info!("Saved roster to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<RosterFile>> {
        let path = self.roster_path(id);
        let id = id.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id));
            }
            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let roster = RosterFile::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            log::info!("Loaded {} players from {}", roster.players.len(), path.display());
            Ok(roster)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.roster_path(id);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.roster_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}
