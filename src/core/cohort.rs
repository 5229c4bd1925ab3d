//! Class and section statistics

use super::grading::{round2, Grade};
use super::models::{Student, StudentRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Count of students per letter grade, best grade first.
///
/// Grades nobody holds are absent rather than zero.
pub type GradeDistribution = BTreeMap<Grade, usize>;

/// Errors from cohort statistics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CohortError {
    /// The cohort has no students
    #[error("No students found for this class and section")]
    NoData,
}

/// Aggregate statistics for one class and section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortStats {
    /// Number of students in the cohort
    pub total_students: usize,
    /// Mean percentage, rounded to two decimals
    pub average_percentage: f64,
    /// Students per grade
    pub grade_distribution: GradeDistribution,
    /// Student with the highest percentage (first one wins ties)
    pub top_performer: StudentRecord,
}

impl CohortStats {
    /// Compute statistics over students in input order.
    ///
    /// # Errors
    /// Returns [`CohortError::NoData`] when `students` is empty.
    pub fn from_students(students: &[Student]) -> Result<Self, CohortError> {
        let (first, rest) = students.split_first().ok_or(CohortError::NoData)?;

        let mut total_percentage = 0.0;
        let mut grade_distribution = GradeDistribution::new();
        let mut top = first;
        let mut top_percentage = first.percentage();

        for student in students {
            let percentage = student.percentage();
            total_percentage += percentage;
            *grade_distribution
                .entry(student.grade())
                .or_insert(0) += 1;
        }

        for student in rest {
            let percentage = student.percentage();
            if percentage > top_percentage {
                top = student;
                top_percentage = percentage;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let average = total_percentage / students.len() as f64;

        Ok(Self {
            total_students: students.len(),
            average_percentage: round2(average),
            grade_distribution,
            top_performer: top.to_record(),
        })
    }

    /// Number of students holding `grade`
    #[must_use]
    pub fn count_for(&self, grade: Grade) -> usize {
        self.grade_distribution.get(&grade).copied().unwrap_or(0)
    }
}
