//! User store boundary.
//!
//! The store owns a user's [`ProblemCollectionState`]. Core operations never
//! touch it directly: callers read a copy, compute new problems, and write the
//! result back through [`UserStore`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::import::ProblemRecord;

/// A user's stored data: tracked problems plus unrelated fields kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemCollectionState {
    /// Tracked problems.
    #[serde(default)]
    pub problems: Vec<ProblemRecord>,
    /// Other user fields (profile, settings) the core does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProblemCollectionState {
    /// Returns a copy with `problems` replaced and every other field kept.
    #[must_use]
    pub fn with_problems(&self, problems: Vec<ProblemRecord>) -> Self {
        Self {
            problems,
            extra: self.extra.clone(),
        }
    }
}

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("cannot access store '{path}': {source}")]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a valid collection document.
    #[error("store '{path}' is corrupt: {source}\n  Suggestion: Restore from a backup or remove the file to start fresh")]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

/// Read/write access to one user's collection.
pub trait UserStore {
    /// Returns a copy of the stored state.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the state cannot be read.
    fn get_user_data(&self) -> Result<ProblemCollectionState, StoreError>;

    /// Replaces the stored state.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the state cannot be written.
    fn set_user_data(&mut self, state: &ProblemCollectionState) -> Result<(), StoreError>;
}

/// JSON file backed store. A missing file reads as an empty collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl UserStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get_user_data(&self) -> Result<ProblemCollectionState, StoreError> {
        if !self.path.exists() {
            debug!("store file missing, starting empty");
            return Ok(ProblemCollectionState::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let state: ProblemCollectionState =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(problems = state.problems.len(), "store loaded");
        Ok(state)
    }

    /// Writes to a sibling temp file and renames it over the target so a
    /// crash never leaves a half-written store.
    #[instrument(skip(self, state), fields(path = %self.path.display(), problems = state.problems.len()))]
    fn set_user_data(&mut self, state: &ProblemCollectionState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;
        debug!("store saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::import::{ImportSource, RawProblem};
    use tempfile::TempDir;

    fn record(slug: &str) -> ProblemRecord {
        ProblemRecord::from_raw(RawProblem::new(slug, slug, None, ImportSource::Manual))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("user.json"));
        let state = store.get_user_data().unwrap();
        assert!(state.problems.is_empty());
        assert!(state.extra.is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_unrelated_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("user.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"displayName": "sam", "theme": "dark", "problems": []}"#,
        )
        .unwrap();

        let mut store = JsonFileStore::new(&path);
        let state = store.get_user_data().unwrap();
        let updated = state.with_problems(vec![record("two-sum")]);
        store.set_user_data(&updated).unwrap();

        let reloaded = store.get_user_data().unwrap();
        assert_eq!(reloaded.problems.len(), 1);
        assert_eq!(reloaded.extra["displayName"], "sam");
        assert_eq!(reloaded.extra["theme"], "dark");
        assert!(!dir.path().join("nested").join("user.json.tmp").exists());
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("a").join("b").join("user.json"));
        store
            .set_user_data(&ProblemCollectionState::default())
            .unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::new(&path).get_user_data().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("corrupt"));
    }
}
