//! Persistent saved-recipe names.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the saved-recipes file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of an add: the name went in, or it was already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    AlreadySaved,
}

/// Ordered set of saved recipe names, persisted as a JSON string array.
///
/// Membership is unique and insertion order is preserved. Every mutation
/// rewrites the backing file before returning; on a failed write the
/// in-memory list is rolled back so it stays consistent with the file.
pub struct SavedRecipes {
    path: PathBuf,
    names: Vec<String>,
}

impl SavedRecipes {
    /// Load from `path`. A missing file yields an empty list. A file that
    /// cannot be read or parsed is an error, so the caller can decide
    /// whether to continue without the saved-recipes feature.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let names = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        Ok(Self { path, names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append `name` unless it is already present, then persist.
    pub fn add(&mut self, name: &str) -> Result<SaveOutcome, StoreError> {
        if self.contains(name) {
            return Ok(SaveOutcome::AlreadySaved);
        }
        self.names.push(name.to_string());
        if let Err(e) = self.persist() {
            self.names.pop();
            return Err(e);
        }
        Ok(SaveOutcome::Added)
    }

    /// Remove every entry exactly matching `name`. Returns whether
    /// anything was removed; the file is rewritten only on change.
    pub fn remove(&mut self, name: &str) -> Result<bool, StoreError> {
        let filtered: Vec<String> = self
            .names
            .iter()
            .filter(|n| n.as_str() != name)
            .cloned()
            .collect();
        if filtered.len() == self.names.len() {
            return Ok(false);
        }
        let previous = std::mem::replace(&mut self.names, filtered);
        if let Err(e) = self.persist() {
            self.names = previous;
            return Err(e);
        }
        Ok(true)
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.names)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
