//! Filesystem persistence.
//!
//! JSONL files are the source of truth: one global team file plus one match
//! file per team, and a derived/ directory for aggregate snapshots written
//! by the `derive` command. The statistics engine itself never touches the
//! filesystem; callers materialize a snapshot here first.

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Global team file.
    pub fn teams_path(&self) -> PathBuf {
        self.data_dir.join("teams.jsonl")
    }

    /// Directory holding one match file per team.
    pub fn matches_dir(&self) -> PathBuf {
        self.data_dir.join("matches")
    }

    /// Match file for one team.
    pub fn match_path(&self, team_id: &str) -> PathBuf {
        self.matches_dir().join(format!("{}.jsonl", team_id))
    }

    /// Aggregate snapshots written by the derive command.
    pub fn derived_dir(&self) -> PathBuf {
        self.data_dir.join("derived")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
