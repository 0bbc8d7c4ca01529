//! High-score persistence
//!
//! The game keeps exactly one value across runs: the best score seen. The
//! session reads it once at construction and writes through whenever the
//! current score beats it. The store is a trait so tests and embedders can
//! substitute their own backing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External key-value collaborator holding the persisted high score.
pub trait ScoreStore {
    /// Read the stored high score; `None` when nothing was saved yet.
    fn load(&mut self) -> Result<Option<u32>>;

    /// Overwrite the stored high score.
    fn save(&mut self, high_score: u32) -> Result<()>;
}

/// On-disk record format
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ScoreRecord {
    high_score: u32,
}

/// `ScoreStore` backed by a small JSON file.
///
/// A missing file reads as no score; parent directories are created on the
/// first save.
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&mut self) -> Result<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read score file {:?}", self.path))?;
        let record: ScoreRecord = serde_json::from_str(&text)
            .with_context(|| format!("malformed score file {:?}", self.path))?;

        Ok(Some(record.high_score))
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&ScoreRecord { high_score })
            .context("failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write score file {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory `ScoreStore` for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    value: Option<u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(high_score: u32) -> Self {
        Self {
            value: Some(high_score),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<Option<u32>> {
        Ok(self.value)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.value = Some(high_score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonScoreStore::new(dir.path().join("scores.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = JsonScoreStore::new(&path);
        store.save(120).unwrap();
        assert_eq!(store.load().unwrap(), Some(120));

        // A fresh store over the same file sees the value too
        let mut reopened = JsonScoreStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(120));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("scores.json");

        let mut store = JsonScoreStore::new(&path);
        store.save(10).unwrap();

        assert_eq!(store.load().unwrap(), Some(10));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = JsonScoreStore::new(&path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(30).unwrap();
        assert_eq!(store.load().unwrap(), Some(30));

        let mut seeded = MemoryScoreStore::with_value(99);
        assert_eq!(seeded.load().unwrap(), Some(99));
    }
}
