//! Student record storage
//!
//! The grading engine only needs to fetch students; this module supplies the
//! collaborator that owns them. [`StudentStore`] is implemented by an
//! in-memory store and by a JSON-file store that persists after every change.

pub mod filter;
pub mod json_file;
pub mod memory;

pub use filter::{SortField, SortOrder, StudentFilter};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::core::cohort::{CohortError, CohortStats};
use crate::core::models::{Student, StudentId, StudentInput, StudentPatch, Subject};
use crate::core::validation::ValidationError;
use thiserror::Error;

/// Errors raised by a student store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No student has the given identifier
    #[error("Student not found: {0}")]
    NotFound(String),

    /// Another student already uses the roll number
    #[error("Roll number already exists: {0}")]
    DuplicateRollNumber(String),

    /// The student has no subject with the given name
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    /// The data failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not valid store JSON
    #[error("Invalid store data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage operations required by the CLI and the statistics engine
pub trait StudentStore {
    /// Every student, in insertion order
    fn all(&self) -> Vec<Student>;

    /// Look up a student by identifier
    fn get(&self, id: StudentId) -> Option<Student>;

    /// Validate and insert a new student
    ///
    /// # Errors
    /// Returns a validation error or [`StoreError::DuplicateRollNumber`].
    fn insert(&mut self, input: StudentInput) -> Result<Student, StoreError>;

    /// Apply a partial update and re-validate the result
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`], a validation error, or
    /// [`StoreError::DuplicateRollNumber`].
    fn update(&mut self, id: StudentId, patch: StudentPatch) -> Result<Student, StoreError>;

    /// Remove a student, returning the removed record
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the student does not exist.
    fn delete(&mut self, id: StudentId) -> Result<Student, StoreError>;

    /// Append a subject to a student
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] or a validation error for the subject.
    fn add_subject(&mut self, id: StudentId, subject: Subject) -> Result<Student, StoreError>;

    /// Replace the marks of one of a student's subjects
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`], [`StoreError::SubjectNotFound`], or a
    /// validation error for the marks.
    fn update_subject_marks(
        &mut self,
        id: StudentId,
        subject_name: &str,
        marks: f64,
    ) -> Result<Student, StoreError>;

    /// Remove every student, returning how many were removed
    ///
    /// # Errors
    /// Returns an error if the change cannot be persisted.
    fn clear(&mut self) -> Result<usize, StoreError>;

    /// Students matching a filter, sorted as requested
    fn list(&self, filter: &StudentFilter) -> Vec<Student> {
        filter.apply(self.all())
    }

    /// Look up a student by roll number (case-insensitive)
    fn find_by_roll_number(&self, roll_number: &str) -> Option<Student> {
        let wanted = roll_number.trim().to_uppercase();
        self.all().into_iter().find(|s| s.roll_number == wanted)
    }

    /// All students of one class and section, ordered by roll number
    fn find_by_class_section(&self, class: &str, section: &str) -> Vec<Student> {
        self.list(&StudentFilter::cohort(class, section))
    }

    /// Cohort statistics for one class and section (section compared uppercase)
    ///
    /// # Errors
    /// Returns [`CohortError::NoData`] when nobody is enrolled there.
    fn class_stats(&self, class: &str, section: &str) -> Result<CohortStats, CohortError> {
        CohortStats::from_students(&self.find_by_class_section(class, &section.to_uppercase()))
    }

    /// Look up a student by roll number or, failing that, numeric identifier
    ///
    /// Roll numbers may be all digits, so an exact roll number always wins
    /// over an identifier with the same spelling.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if neither matches.
    fn resolve(&self, key: &str) -> Result<Student, StoreError> {
        self.find_by_roll_number(key)
            .or_else(|| {
                key.trim()
                    .parse::<StudentId>()
                    .ok()
                    .and_then(|id| self.get(id))
            })
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}
