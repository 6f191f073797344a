//! Filesystem-backed object store.
//!
//! Keys map one-to-one onto paths below the bucket root, so the on-disk
//! tree mirrors the key layout exactly.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{ObjectStore, StorageError};

/// Object store rooted at a local directory.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Map a key to a path under the root. Empty keys and path-traversal
    /// segments are rejected rather than resolved.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let segments: Vec<&str> = key.split('/').collect();
        if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let mut path = self.root.clone();
        path.extend(&segments);
        Ok(path)
    }

    /// Same mapping for a prefix, where a trailing slash is allowed.
    fn path_for_prefix(&self, prefix: &str) -> Result<PathBuf, StorageError> {
        let mut path = self.root.clone();
        for segment in prefix.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(prefix.to_string()));
            }
            path.push(segment);
        }
        Ok(path)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;
        debug!("Wrote object {}", key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let dir = self.path_for_prefix(prefix)?;
        let mut keys = Vec::new();
        let mut stack = vec![dir];

        while let Some(current) = stack.pop() {
            let mut entries = match fs::read_dir(&current).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    stack.push(path);
                } else if let Ok(relative) = path.strip_prefix(&self.root) {
                    let key = relative
                        .iter()
                        .map(|part| part.to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
