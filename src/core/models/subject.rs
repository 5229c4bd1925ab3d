//! Subject model

use serde::{Deserialize, Serialize};

/// Maximum marks assumed when a subject does not specify one.
pub const DEFAULT_MAX_MARKS: f64 = 100.0;

const fn default_max_marks() -> f64 {
    DEFAULT_MAX_MARKS
}

/// One scored academic component of a student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Subject name (e.g., "Mathematics")
    pub name: String,

    /// Marks obtained
    pub marks: f64,

    /// Maximum possible marks (defaults to 100)
    #[serde(default = "default_max_marks")]
    pub max_marks: f64,
}

impl Subject {
    /// Create a new subject
    ///
    /// # Arguments
    /// * `name` - Subject name
    /// * `marks` - Marks obtained
    /// * `max_marks` - Maximum possible marks
    #[must_use]
    pub fn new(name: impl Into<String>, marks: f64, max_marks: f64) -> Self {
        Self {
            name: name.into(),
            marks,
            max_marks,
        }
    }

    /// Create a subject scored out of [`DEFAULT_MAX_MARKS`]
    #[must_use]
    pub fn out_of_hundred(name: impl Into<String>, marks: f64) -> Self {
        Self::new(name, marks, DEFAULT_MAX_MARKS)
    }

    /// Case-insensitive name comparison used for subject lookups
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}
