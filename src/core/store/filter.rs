//! Listing filters and sort orders

use crate::core::models::Student;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field used to order a student listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Roll number (default)
    #[default]
    RollNumber,
    /// Student name, case-insensitive
    Name,
    /// Computed percentage
    Percentage,
    /// Creation time
    CreatedAt,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "rollnumber" | "roll" => Ok(Self::RollNumber),
            "name" => Ok(Self::Name),
            "percentage" | "percent" => Ok(Self::Percentage),
            "createdat" | "created" => Ok(Self::CreatedAt),
            _ => Err(format!("Unknown sort field: {s}")),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RollNumber => write!(f, "rollNumber"),
            Self::Name => write!(f, "name"),
            Self::Percentage => write!(f, "percentage"),
            Self::CreatedAt => write!(f, "createdAt"),
        }
    }
}

/// Ascending or descending order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first (default)
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!("Unknown sort order: {s}")),
        }
    }
}

/// Criteria for listing students
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Exact class match
    pub class: Option<String>,
    /// Exact section match (compared uppercase)
    pub section: Option<String>,
    /// Case-insensitive substring of name or roll number
    pub search: Option<String>,
    /// Sort field
    pub sort_by: SortField,
    /// Sort direction
    pub order: SortOrder,
}

impl StudentFilter {
    /// Filter matching one class and section, ordered by roll number
    #[must_use]
    pub fn cohort(class: &str, section: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            section: Some(section.to_string()),
            ..Self::default()
        }
    }

    /// Whether a student passes the class, section, and search criteria
    #[must_use]
    pub fn matches(&self, student: &Student) -> bool {
        if let Some(class) = &self.class {
            if &student.class != class {
                return false;
            }
        }
        if let Some(section) = &self.section {
            if student.section != section.to_uppercase() {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !student.name.to_lowercase().contains(&needle)
                && !student.roll_number.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Keep matching students and sort them. The sort is stable.
    #[must_use]
    pub fn apply(&self, students: Vec<Student>) -> Vec<Student> {
        let mut selected: Vec<Student> = students.into_iter().filter(|s| self.matches(s)).collect();
        selected.sort_by(|a, b| {
            let ordering = compare(self.sort_by, a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        selected
    }
}

fn compare(field: SortField, a: &Student, b: &Student) -> Ordering {
    match field {
        SortField::RollNumber => a.roll_number.cmp(&b.roll_number),
        SortField::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortField::Percentage => a
            .percentage()
            .partial_cmp(&b.percentage())
            .unwrap_or(Ordering::Equal),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
