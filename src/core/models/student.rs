//! Student model

use super::Subject;
use crate::core::grading::{self, Grade, Performance};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned student identifier
pub type StudentId = u64;

/// A student record as stored.
///
/// Derived figures (totals, percentage, grade) are never stored; every
/// accessor recomputes them from the current `subjects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Opaque unique identifier
    pub id: StudentId,

    /// Full name
    pub name: String,

    /// Unique roll number (uppercase alphanumeric, e.g. "CS2024001")
    pub roll_number: String,

    /// Class label (e.g., "10th")
    pub class: String,

    /// Section label, uppercase (e.g., "A")
    pub section: String,

    /// Scored subjects
    pub subjects: Vec<Subject>,

    /// Contact email, lowercase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Date of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Create a student with no optional details, timestamped now
    #[must_use]
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        roll_number: impl Into<String>,
        class: impl Into<String>,
        section: impl Into<String>,
        subjects: Vec<Subject>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            roll_number: roll_number.into(),
            class: class.into(),
            section: section.into(),
            subjects,
            email: None,
            phone: None,
            date_of_birth: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of marks over all subjects
    #[must_use]
    pub fn total_marks(&self) -> f64 {
        grading::compute_total_marks(&self.subjects)
    }

    /// Sum of maximum marks over all subjects
    #[must_use]
    pub fn max_total_marks(&self) -> f64 {
        grading::compute_max_total_marks(&self.subjects)
    }

    /// Percentage rounded to two decimals
    #[must_use]
    pub fn percentage(&self) -> f64 {
        grading::compute_percentage(&self.subjects)
    }

    /// Letter grade for the current percentage
    #[must_use]
    pub fn grade(&self) -> Grade {
        grading::compute_grade(self.percentage())
    }

    /// Grade point for the current percentage
    #[must_use]
    pub fn grade_point(&self) -> f64 {
        grading::compute_grade_point(self.percentage())
    }

    /// All derived figures at once
    #[must_use]
    pub fn performance(&self) -> Performance {
        Performance::from_subjects(&self.subjects)
    }

    /// Name with roll number, e.g. "Ayesha Khan (CS001)"
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.roll_number)
    }

    /// Append a subject
    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    /// Find a subject by name (case-insensitive)
    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.is_named(name))
    }

    /// Replace the marks of the named subject
    ///
    /// # Returns
    /// `true` if the subject exists, `false` otherwise
    pub fn update_subject_marks(&mut self, name: &str, marks: f64) -> bool {
        self.subjects
            .iter_mut()
            .find(|s| s.is_named(name))
            .is_some_and(|subject| {
                subject.marks = marks;
                true
            })
    }

    /// Snapshot this student together with its derived figures
    #[must_use]
    pub fn to_record(&self) -> StudentRecord {
        StudentRecord::from(self.clone())
    }
}

/// A student plus its derived figures, as exposed in JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Stored fields
    #[serde(flatten)]
    pub student: Student,

    /// Derived figures computed from `student.subjects`
    #[serde(flatten)]
    pub performance: Performance,

    /// Name with roll number
    pub display_name: String,
}

impl From<Student> for StudentRecord {
    fn from(student: Student) -> Self {
        let performance = student.performance();
        let display_name = student.display_name();
        Self {
            student,
            performance,
            display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student::new(
            1,
            "Test Student",
            "TEST001",
            "10th",
            "A",
            vec![
                Subject::new("Mathematics", 85.0, 100.0),
                Subject::new("Physics", 78.0, 100.0),
                Subject::new("Chemistry", 92.0, 100.0),
            ],
        )
    }

    #[test]
    fn test_derived_fields() {
        let student = sample_student();
        assert!((student.total_marks() - 255.0).abs() < f64::EPSILON);
        assert!((student.max_total_marks() - 300.0).abs() < f64::EPSILON);
        assert!((student.percentage() - 85.0).abs() < f64::EPSILON);
        assert_eq!(student.grade(), Grade::A);
        assert!((student.grade_point() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_derived_fields_follow_mutation() {
        let mut student = sample_student();
        assert_eq!(student.grade(), Grade::A);

        assert!(student.update_subject_marks("physics", 100.0));
        // (85 + 100 + 92) / 300 = 92.33%
        assert!((student.percentage() - 92.33).abs() < 1e-9);
        assert_eq!(student.grade(), Grade::APlus);

        student.add_subject(Subject::new("Art", 0.0, 100.0));
        // 277 / 400 = 69.25%
        assert!((student.percentage() - 69.25).abs() < 1e-9);
        assert_eq!(student.grade(), Grade::BMinus);
    }

    #[test]
    fn test_update_missing_subject() {
        let mut student = sample_student();
        assert!(!student.update_subject_marks("Biology", 50.0));
        assert!(student.subject("Biology").is_none());
    }

    #[test]
    fn test_no_subjects_is_grade_f() {
        let student = Student::new(2, "Empty", "E1", "9th", "B", Vec::new());
        assert!(student.percentage().abs() < f64::EPSILON);
        assert_eq!(student.grade(), Grade::F);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample_student().display_name(), "Test Student (TEST001)");
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(sample_student().to_record()).expect("serialize");
        assert_eq!(json["rollNumber"], "TEST001");
        assert_eq!(json["class"], "10th");
        assert_eq!(json["totalMarks"], 255.0);
        assert_eq!(json["maxTotalMarks"], 300.0);
        assert_eq!(json["percentage"], 85.0);
        assert_eq!(json["grade"], "A");
        assert_eq!(json["gradePoint"], 4.0);
        assert_eq!(json["displayName"], "Test Student (TEST001)");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_stored_json_has_no_derived_fields() {
        let json = serde_json::to_value(sample_student()).expect("serialize");
        assert!(json.get("percentage").is_none());
        assert!(json.get("grade").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
