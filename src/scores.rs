//! High-score persistence.
//!
//! Scores are kept as a JSON array of unique integers, highest first, capped
//! at [`MAX_SCORES`]. Read and write failures are logged and otherwise
//! ignored: a broken score file must never stop a game.

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub const MAX_SCORES: usize = 100;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score store i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("score store is not a list of scores: {0}")]
    Format(#[from] serde_json::Error),
}

/// A medium that can hold the serialized score list.
pub trait ScoreStore {
    /// Raw stored text, or `None` if nothing was ever saved.
    fn read(&self) -> Result<Option<String>, ScoreError>;

    fn write(&mut self, contents: &str) -> Result<(), ScoreError>;

    fn try_load(&self) -> Result<Vec<u32>, ScoreError> {
        match self.read()? {
            Some(text) => Ok(normalize(serde_json::from_str::<Vec<u32>>(&text)?)),
            None => Ok(vec![]),
        }
    }

    /// Stored scores, unique and descending. Empty on any failure.
    fn load_scores(&self) -> Vec<u32> {
        self.try_load().unwrap_or_else(|err| {
            tracing::warn!(%err, "could not load scores");
            vec![]
        })
    }

    /// Merges `score` into the stored list.
    fn save_score(&mut self, score: u32) {
        let mut scores = self.load_scores();
        scores.push(score);
        let scores = normalize(scores);

        let result = serde_json::to_string(&scores)
            .map_err(ScoreError::from)
            .and_then(|text| self.write(&text));

        match result {
            Ok(()) => tracing::info!(score, stored = scores.len(), "score saved"),
            Err(err) => tracing::warn!(%err, score, "could not save score"),
        }
    }
}

/// Dedups, sorts highest first and keeps the top [`MAX_SCORES`].
pub fn normalize(scores: Vec<u32>) -> Vec<u32> {
    let unique: BTreeSet<u32> = scores.into_iter().collect();
    unique.into_iter().rev().take(MAX_SCORES).collect()
}

/// Scores in a JSON file on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn read(&self) -> Result<Option<String>, ScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), ScoreError> {
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// A single in-process text slot, the same shape as a browser's local storage key.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_contents(contents: &str) -> Self {
        MemoryStore { slot: Some(contents.to_string()) }
    }
}

#[cfg(test)]
impl ScoreStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, ScoreError> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), ScoreError> {
        self.slot = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn saved_score_is_loaded_back() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("scores.json"));

        assert!(store.load_scores().is_empty());
        store.save_score(42);
        assert_eq!(store.load_scores(), vec![42]);
    }

    #[test]
    fn duplicates_are_stored_once() {
        let mut store = MemoryStore::default();
        store.save_score(42);
        store.save_score(7);
        store.save_score(42);
        assert_eq!(store.load_scores(), vec![42, 7]);
    }

    #[test]
    fn keeps_only_the_top_hundred() {
        let mut store = MemoryStore::default();
        for score in 0..=100 {
            store.save_score(score);
        }

        let scores = store.load_scores();
        assert_eq!(scores.len(), MAX_SCORES);
        assert_eq!(scores[0], 100);
        assert_eq!(scores[99], 1);
        assert!(!scores.contains(&0));
    }

    #[test]
    fn load_sorts_and_dedups_hand_edited_files() {
        let store = MemoryStore::with_contents("[3, 9, 3, 1, 9]");
        assert_eq!(store.load_scores(), vec![9, 3, 1]);
    }

    #[test]
    fn corrupt_store_reads_as_empty() {
        for contents in ["not json", "{\"a\": 1}", "[1, -2]", ""] {
            let store = MemoryStore::with_contents(contents);
            assert!(store.try_load().is_err(), "{:?}", contents);
            assert!(store.load_scores().is_empty());
        }
    }

    #[test]
    fn corrupt_file_is_replaced_on_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "garbage").unwrap();

        let mut store = FileStore::new(&path);
        store.save_score(5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[5]");
    }

    #[test]
    fn unwritable_path_is_not_fatal() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("missing").join("scores.json"));
        store.save_score(5);
        assert!(store.load_scores().is_empty());
    }
}
