//! JSON-file backed student store

use super::{MemoryStore, StoreError, StudentStore};
use crate::core::models::{Student, StudentId, StudentInput, StudentPatch, Subject};
use crate::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// A [`MemoryStore`] that loads from and saves to a JSON file.
///
/// Every successful mutation rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                MemoryStore::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            info!("No data file at {}; starting with an empty store", path.display());
            MemoryStore::new()
        };
        debug!("Loaded {} students from {}", inner.len(), path.display());
        Ok(Self { path, inner })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current contents to disk, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.inner)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Apply a change and save it, restoring the previous contents if either step fails
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let snapshot = self.inner.clone();
        let result = change(&mut self.inner).and_then(|value| {
            self.save()?;
            Ok(value)
        });
        if result.is_err() {
            self.inner = snapshot;
        }
        result
    }
}

impl StudentStore for JsonFileStore {
    fn all(&self) -> Vec<Student> {
        self.inner.all()
    }

    fn get(&self, id: StudentId) -> Option<Student> {
        self.inner.get(id)
    }

    fn insert(&mut self, input: StudentInput) -> Result<Student, StoreError> {
        self.commit(|store| store.insert(input))
    }

    fn update(&mut self, id: StudentId, patch: StudentPatch) -> Result<Student, StoreError> {
        self.commit(|store| store.update(id, patch))
    }

    fn delete(&mut self, id: StudentId) -> Result<Student, StoreError> {
        self.commit(|store| store.delete(id))
    }

    fn add_subject(&mut self, id: StudentId, subject: Subject) -> Result<Student, StoreError> {
        self.commit(|store| store.add_subject(id, subject))
    }

    fn update_subject_marks(
        &mut self,
        id: StudentId,
        subject_name: &str,
        marks: f64,
    ) -> Result<Student, StoreError> {
        self.commit(|store| store.update_subject_marks(id, subject_name, marks))
    }

    fn clear(&mut self) -> Result<usize, StoreError> {
        self.commit(MemoryStore::clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn input(roll: &str, marks: f64) -> StudentInput {
        StudentInput {
            name: Some("Test Student".to_string()),
            roll_number: Some(roll.to_string()),
            class: Some("10th".to_string()),
            section: Some("A".to_string()),
            subjects: vec![Subject::out_of_hundred("Mathematics", marks)],
            ..StudentInput::default()
        }
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("students.json")).expect("open");
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_changes_survive_reopen() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("students.json");

        let mut store = JsonFileStore::open(&path).expect("open");
        let first = store.insert(input("R1", 85.0)).expect("insert");
        store.insert(input("R2", 45.0)).expect("insert");
        store.delete(first.id).expect("delete");

        let reopened = JsonFileStore::open(&path).expect("reopen");
        let rolls: Vec<String> = reopened.all().into_iter().map(|s| s.roll_number).collect();
        assert_eq!(rolls, vec!["R2".to_string()]);

        // Identifiers keep counting after a reload.
        let mut reopened = reopened;
        let third = reopened.insert(input("R3", 70.0)).expect("insert");
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_file_contains_no_derived_fields() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("students.json");
        let mut store = JsonFileStore::open(&path).expect("open");
        store.insert(input("R1", 85.0)).expect("insert");

        let raw = fs::read_to_string(&path).expect("read file");
        assert!(raw.contains("\"rollNumber\": \"R1\""));
        assert!(raw.contains("\"nextId\": 2"));
        assert!(!raw.contains("percentage"));
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("students.json");
        let mut store = JsonFileStore::open(&path).expect("open");
        let kept = store.insert(input("R1", 85.0)).expect("insert");

        // A plain file where the data directory should be makes every save fail.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").expect("write blocker");
        store.path = blocker.join("students.json");

        assert!(matches!(store.insert(input("R2", 60.0)), Err(StoreError::Io(_))));
        assert!(matches!(store.delete(kept.id), Err(StoreError::Io(_))));
        assert!(matches!(store.clear(), Err(StoreError::Io(_))));

        let rolls: Vec<String> = store.all().into_iter().map(|s| s.roll_number).collect();
        assert_eq!(rolls, vec!["R1".to_string()]);

        store.path = path;
        let next = store.insert(input("R2", 60.0)).expect("insert after restore");
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("students.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Json(_))));
    }
}
