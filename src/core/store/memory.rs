//! In-memory student store

use super::{StoreError, StudentStore};
use crate::core::models::{Student, StudentId, StudentInput, StudentPatch, Subject};
use crate::core::validation::{self, ValidationError};
use crate::debug;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Students held in memory, in insertion order.
///
/// This is also the on-disk document layout used by
/// [`JsonFileStore`](super::JsonFileStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    next_id: StudentId,
    students: Vec<Student>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store. Identifiers start at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 1,
            students: Vec::new(),
        }
    }

    /// Number of stored students
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the store holds no students
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn position(&self, id: StudentId) -> Result<usize, StoreError> {
        self.students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn ensure_unique_roll(&self, roll_number: &str, except: Option<StudentId>) -> Result<(), StoreError> {
        let taken = self
            .students
            .iter()
            .any(|s| s.roll_number == roll_number && Some(s.id) != except);
        if taken {
            return Err(StoreError::DuplicateRollNumber(roll_number.to_string()));
        }
        Ok(())
    }
}

impl StudentStore for MemoryStore {
    fn all(&self) -> Vec<Student> {
        self.students.clone()
    }

    fn get(&self, id: StudentId) -> Option<Student> {
        self.students.iter().find(|s| s.id == id).cloned()
    }

    fn insert(&mut self, input: StudentInput) -> Result<Student, StoreError> {
        let input = validation::prepare(input)?;
        let roll_number = input.roll_number.clone().unwrap_or_default();
        self.ensure_unique_roll(&roll_number, None)?;

        let id = self.next_id;
        self.next_id += 1;
        let student = input.into_student(id, Utc::now());
        debug!("Inserted student {} with id {id}", student.roll_number);
        self.students.push(student.clone());
        Ok(student)
    }

    fn update(&mut self, id: StudentId, patch: StudentPatch) -> Result<Student, StoreError> {
        let idx = self.position(id)?;
        let current = &self.students[idx];
        let input = validation::prepare(patch.merge_into(current))?;
        let roll_number = input.roll_number.clone().unwrap_or_default();
        self.ensure_unique_roll(&roll_number, Some(id))?;

        let created_at = current.created_at;
        let mut updated = input.into_student(id, Utc::now());
        updated.created_at = created_at;
        self.students[idx] = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, id: StudentId) -> Result<Student, StoreError> {
        let idx = self.position(id)?;
        Ok(self.students.remove(idx))
    }

    fn add_subject(&mut self, id: StudentId, subject: Subject) -> Result<Student, StoreError> {
        let idx = self.position(id)?;
        let student = &mut self.students[idx];
        let errors = validation::subject_errors(student.subjects.len() + 1, &subject);
        if !errors.is_empty() {
            return Err(ValidationError::Invalid(errors).into());
        }
        student.add_subject(Subject {
            name: subject.name.trim().to_string(),
            ..subject
        });
        student.updated_at = Utc::now();
        Ok(student.clone())
    }

    fn update_subject_marks(
        &mut self,
        id: StudentId,
        subject_name: &str,
        marks: f64,
    ) -> Result<Student, StoreError> {
        let idx = self.position(id)?;
        let student = &mut self.students[idx];
        let position = student
            .subjects
            .iter()
            .position(|s| s.is_named(subject_name))
            .ok_or_else(|| StoreError::SubjectNotFound(subject_name.to_string()))?;

        let candidate = Subject {
            marks,
            ..student.subjects[position].clone()
        };
        let errors = validation::subject_errors(position + 1, &candidate);
        if !errors.is_empty() {
            return Err(ValidationError::Invalid(errors).into());
        }

        student.update_subject_marks(subject_name, marks);
        student.updated_at = Utc::now();
        Ok(student.clone())
    }

    fn clear(&mut self) -> Result<usize, StoreError> {
        let removed = self.students.len();
        self.students.clear();
        Ok(removed)
    }
}
