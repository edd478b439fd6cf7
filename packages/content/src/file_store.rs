//! # Filesystem-backed content store
//!
//! [`FileStore`] maps each key to a file under a base directory, so the
//! server's content survives restarts and stays readable by hand.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── site.toml
//! └── entries/
//!     └── <id>.json
//! ```
//!
//! Keys are relative paths using `/`. Keys containing `..` or starting with
//! `/` are refused.

use std::path::{Component, Path, PathBuf};

use crate::error::ContentError;
use crate::repo::ContentStore;

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let rel = Path::new(key);
        if rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            Some(self.base.join(rel))
        } else {
            None
        }
    }
}

impl ContentStore for FileStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path_for(key)?).ok()
    }

    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), ContentError> {
        let path = self
            .path_for(key)
            .ok_or_else(|| ContentError::Storage(format!("invalid key `{key}`")))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, ContentError> {
        let Some(path) = self.path_for(key) else {
            return Ok(false);
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self, prefix: &str) -> Vec<String> {
        // Prefixes name a directory ("entries/") or a file stem.
        let (dir, _) = prefix.rsplit_once('/').unwrap_or(("", prefix));
        let Some(dir_path) = self.path_for(dir) else {
            return Vec::new();
        };
        let Ok(read) = std::fs::read_dir(dir_path) else {
            return Vec::new();
        };
        read.filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|e| e.file_name().into_string().ok())
            .map(|name| if dir.is_empty() { name } else { format!("{dir}/{name}") })
            .filter(|key| key.starts_with(prefix))
            .collect()
    }
}
