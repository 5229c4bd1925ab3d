//! Input normalization and validation for student records
//!
//! Raw input is normalized first (trimmed, roll number and section
//! uppercased, email lowercased) and then checked against every rule. All
//! violations are collected so a caller can report them together.

use super::models::{StudentInput, Subject};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Longest accepted student name
pub const NAME_MAX_LEN: usize = 50;
/// Shortest accepted student name
pub const NAME_MIN_LEN: usize = 2;
/// Longest accepted class label
pub const CLASS_MAX_LEN: usize = 20;
/// Longest accepted section label
pub const SECTION_MAX_LEN: usize = 5;
/// Longest accepted address
pub const ADDRESS_MAX_LEN: usize = 200;
/// Highest marks a subject may record
pub const MARKS_MAX: f64 = 100.0;

static ROLL_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("roll number pattern"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[1-9]\d{0,15}$").expect("phone pattern"));

/// Validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are absent or blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The student has no subjects
    #[error("At least one subject is required")]
    NoSubjects,

    /// One or more field rules failed
    #[error("Validation Error: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl ValidationError {
    /// Individual messages carried by this error
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::MissingFields(fields) => vec![format!(
                "Missing required fields: {}",
                fields.join(", ")
            )],
            Self::NoSubjects => vec![self.to_string()],
            Self::Invalid(messages) => messages.clone(),
        }
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim text fields and apply case rules.
#[must_use]
pub fn normalize(input: StudentInput) -> StudentInput {
    StudentInput {
        name: clean(input.name),
        roll_number: clean(input.roll_number).map(|r| r.to_uppercase()),
        class: clean(input.class),
        section: clean(input.section).map(|s| s.to_uppercase()),
        subjects: input
            .subjects
            .into_iter()
            .map(|s| Subject {
                name: s.name.trim().to_string(),
                ..s
            })
            .collect(),
        email: clean(input.email).map(|e| e.to_lowercase()),
        phone: clean(input.phone),
        date_of_birth: input.date_of_birth,
        address: clean(input.address),
    }
}

/// Check a normalized input against every rule.
///
/// # Errors
/// Returns [`ValidationError::MissingFields`] first if any required field is
/// absent, then [`ValidationError::NoSubjects`], then
/// [`ValidationError::Invalid`] with every remaining violation.
pub fn validate(input: &StudentInput) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    for (field, value) in [
        ("name", &input.name),
        ("rollNumber", &input.roll_number),
        ("class", &input.class),
        ("section", &input.section),
    ] {
        if value.is_none() {
            missing.push(field.to_string());
        }
    }
    if input.subjects.is_empty() {
        missing.push("subjects".to_string());
    }
    if missing == ["subjects"] {
        return Err(ValidationError::NoSubjects);
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut errors = Vec::new();

    if let Some(name) = &input.name {
        let len = name.chars().count();
        if len < NAME_MIN_LEN {
            errors.push(format!(
                "Name must be at least {NAME_MIN_LEN} characters long"
            ));
        }
        if len > NAME_MAX_LEN {
            errors.push(format!("Name cannot exceed {NAME_MAX_LEN} characters"));
        }
    }

    if let Some(roll) = &input.roll_number {
        if !ROLL_NUMBER_RE.is_match(roll) {
            errors.push("Roll number can only contain letters and numbers".to_string());
        }
    }

    if let Some(class) = &input.class {
        if class.chars().count() > CLASS_MAX_LEN {
            errors.push(format!("Class cannot exceed {CLASS_MAX_LEN} characters"));
        }
    }

    if let Some(section) = &input.section {
        if section.chars().count() > SECTION_MAX_LEN {
            errors.push(format!(
                "Section cannot exceed {SECTION_MAX_LEN} characters"
            ));
        }
    }

    for (idx, subject) in input.subjects.iter().enumerate() {
        errors.extend(subject_errors(idx + 1, subject));
    }

    if let Some(email) = &input.email {
        if !EMAIL_RE.is_match(email) {
            errors.push("Please enter a valid email".to_string());
        }
    }

    if let Some(phone) = &input.phone {
        if !PHONE_RE.is_match(phone) {
            errors.push("Please enter a valid phone number".to_string());
        }
    }

    if let Some(address) = &input.address {
        if address.chars().count() > ADDRESS_MAX_LEN {
            errors.push(format!(
                "Address cannot exceed {ADDRESS_MAX_LEN} characters"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Invalid(errors))
    }
}

/// Rule violations for one subject, labelled by its 1-based position.
#[must_use]
pub fn subject_errors(position: usize, subject: &Subject) -> Vec<String> {
    let mut errors = Vec::new();
    if subject.name.trim().is_empty() {
        errors.push(format!("Subject {position}: Subject name is required"));
    }
    if !subject.marks.is_finite() {
        errors.push(format!("Subject {position}: Marks must be a number"));
    } else if subject.marks < 0.0 {
        errors.push(format!("Subject {position}: Marks cannot be negative"));
    } else if subject.marks > MARKS_MAX {
        errors.push(format!("Subject {position}: Marks cannot exceed 100"));
    }
    if !subject.max_marks.is_finite() || subject.max_marks < 1.0 {
        errors.push(format!(
            "Subject {position}: Maximum marks must be at least 1"
        ));
    }
    errors
}

/// Normalize and validate in one step.
///
/// # Errors
/// Returns the validation failure, if any.
pub fn prepare(input: StudentInput) -> Result<StudentInput, ValidationError> {
    let input = normalize(input);
    validate(&input)?;
    Ok(input)
}
