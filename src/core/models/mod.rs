//! Data models for student records

pub mod input;
pub mod student;
pub mod subject;

pub use input::{StudentInput, StudentPatch};
pub use student::{Student, StudentId, StudentRecord};
pub use subject::{Subject, DEFAULT_MAX_MARKS};
