//! Object store operations.
//!
//! Everything the handlers persist lives under one bucket, keyed by PUUID:
//! - `users/<puuid>/profile.json` — player profile, overwritten per run
//! - `users/<puuid>/matches/<matchId>.json` — raw match records
//! - `users/<puuid>/processed/match_stats.csv` — the aggregate table
//!
//! The store gives last-write-wins per key and read-after-write on each
//! key; handlers coordinate only through these side effects.

mod fs;

pub use fs::FsObjectStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opaque key/value object store with list-by-prefix.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, overwriting any previous value at the key.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Read an object; `NotFound` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// List keys under a directory-style prefix (e.g. `users/<id>/matches/`),
    /// sorted. An unknown prefix lists as empty, not as an error.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Key of the profile document.
pub fn profile_key(puuid: &str) -> String {
    format!("users/{}/profile.json", puuid)
}

/// Key of one raw match record.
pub fn match_key(puuid: &str, match_id: &str) -> String {
    format!("users/{}/matches/{}.json", puuid, match_id)
}

/// Prefix under which raw match records are listed.
pub fn match_prefix(puuid: &str) -> String {
    format!("users/{}/matches/", puuid)
}

/// Key of the aggregate statistics table.
pub fn stats_key(puuid: &str) -> String {
    format!("users/{}/processed/match_stats.csv", puuid)
}
