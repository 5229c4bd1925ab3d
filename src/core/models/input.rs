//! Incoming student data for create and update operations

use super::{Student, StudentId, Subject};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Raw data for a new student, before validation.
///
/// Required fields are optional here so that validation can report every
/// missing field at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentInput {
    /// Full name
    pub name: Option<String>,
    /// Roll number
    pub roll_number: Option<String>,
    /// Class label
    pub class: Option<String>,
    /// Section label
    pub section: Option<String>,
    /// Scored subjects
    pub subjects: Vec<Subject>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Date of birth (`YYYY-MM-DD`)
    pub date_of_birth: Option<NaiveDate>,
    /// Postal address
    pub address: Option<String>,
}

impl StudentInput {
    /// Build a student from this input with the given identity and timestamp.
    ///
    /// Missing required fields become empty strings; callers validate first.
    #[must_use]
    pub fn into_student(self, id: StudentId, now: DateTime<Utc>) -> Student {
        Student {
            id,
            name: self.name.unwrap_or_default(),
            roll_number: self.roll_number.unwrap_or_default(),
            class: self.class.unwrap_or_default(),
            section: self.section.unwrap_or_default(),
            subjects: self.subjects,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&Student> for StudentInput {
    fn from(student: &Student) -> Self {
        Self {
            name: Some(student.name.clone()),
            roll_number: Some(student.roll_number.clone()),
            class: Some(student.class.clone()),
            section: Some(student.section.clone()),
            subjects: student.subjects.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            date_of_birth: student.date_of_birth,
            address: student.address.clone(),
        }
    }
}

/// Partial update: only fields that are present replace stored values.
///
/// Optional contact fields distinguish an absent key (unchanged) from an
/// explicit `null` (cleared).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentPatch {
    /// New name
    pub name: Option<String>,
    /// New roll number
    pub roll_number: Option<String>,
    /// New class label
    pub class: Option<String>,
    /// New section label
    pub section: Option<String>,
    /// Replacement subject list
    pub subjects: Option<Vec<Subject>>,
    /// New email; `null` clears the stored value
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub email: Option<Option<String>>,
    /// New phone number; `null` clears the stored value
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub phone: Option<Option<String>>,
    /// New date of birth; `null` clears the stored value
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub date_of_birth: Option<Option<NaiveDate>>,
    /// New address; `null` clears the stored value
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub address: Option<Option<String>>,
}

impl StudentPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this patch over an existing student's data
    #[must_use]
    pub fn merge_into(self, current: &Student) -> StudentInput {
        let mut input = StudentInput::from(current);
        if let Some(name) = self.name {
            input.name = Some(name);
        }
        if let Some(roll_number) = self.roll_number {
            input.roll_number = Some(roll_number);
        }
        if let Some(class) = self.class {
            input.class = Some(class);
        }
        if let Some(section) = self.section {
            input.section = Some(section);
        }
        if let Some(subjects) = self.subjects {
            input.subjects = subjects;
        }
        if let Some(email) = self.email {
            input.email = email;
        }
        if let Some(phone) = self.phone {
            input.phone = phone;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            input.date_of_birth = date_of_birth;
        }
        if let Some(address) = self.address {
            input.address = address;
        }
        input
    }
}
