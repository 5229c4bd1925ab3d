//! Subject aggregation and grading
//!
//! Derives total marks, percentage, letter grade, and grade point from a list
//! of subject scores. Everything here is a pure function of its input and is
//! recomputed on every call; nothing is cached on the student.

use super::models::Subject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade on the Karachi University scale.
///
/// Variants are declared best to worst, so the derived ordering sorts `A+`
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above
    #[serde(rename = "A+")]
    APlus,
    /// 85 to below 90
    #[serde(rename = "A")]
    A,
    /// 80 to below 85
    #[serde(rename = "A-")]
    AMinus,
    /// 75 to below 80
    #[serde(rename = "B+")]
    BPlus,
    /// 71 to below 75
    #[serde(rename = "B")]
    B,
    /// 68 to below 71
    #[serde(rename = "B-")]
    BMinus,
    /// 64 to below 68
    #[serde(rename = "C+")]
    CPlus,
    /// 61 to below 64
    #[serde(rename = "C")]
    C,
    /// 57 to below 61
    #[serde(rename = "C-")]
    CMinus,
    /// 53 to below 57
    #[serde(rename = "D+")]
    DPlus,
    /// 45 to below 53
    #[serde(rename = "D")]
    D,
    /// Below 45
    #[serde(rename = "F")]
    F,
}

/// Ordered grade bands: `(minimum percentage, grade, grade point)`.
///
/// Evaluated top-down; the first band whose minimum is met wins. Anything
/// below the last band is an `F` worth 0.0.
pub const GRADE_BANDS: [(f64, Grade, f64); 11] = [
    (90.0, Grade::APlus, 4.0),
    (85.0, Grade::A, 4.0),
    (80.0, Grade::AMinus, 3.8),
    (75.0, Grade::BPlus, 3.4),
    (71.0, Grade::B, 3.0),
    (68.0, Grade::BMinus, 2.8),
    (64.0, Grade::CPlus, 2.4),
    (61.0, Grade::C, 2.0),
    (57.0, Grade::CMinus, 1.8),
    (53.0, Grade::DPlus, 1.4),
    (45.0, Grade::D, 1.0),
];

impl Grade {
    /// Every grade, best to worst.
    pub const ALL: [Self; 12] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::F,
    ];

    /// Map a percentage to its letter grade.
    ///
    /// `NaN` fails every comparison and therefore maps to `F`.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        band_for(percentage).map_or(Self::F, |(_, grade, _)| grade)
    }

    /// The label used on the wire and in reports (e.g. `"A-"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Grade point carried by this letter.
    #[must_use]
    pub fn grade_point(self) -> f64 {
        GRADE_BANDS
            .iter()
            .find(|(_, grade, _)| *grade == self)
            .map_or(0.0, |(_, _, point)| *point)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|grade| grade.label() == wanted)
            .ok_or_else(|| format!("Unknown grade: '{s}'"))
    }
}

fn band_for(percentage: f64) -> Option<(f64, Grade, f64)> {
    GRADE_BANDS
        .iter()
        .copied()
        .find(|(min, _, _)| percentage >= *min)
}

/// Round half-up to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Sum of marks obtained. Zero for an empty list.
#[must_use]
pub fn compute_total_marks(subjects: &[Subject]) -> f64 {
    subjects.iter().map(|s| s.marks).sum()
}

/// Sum of maximum marks. Zero for an empty list.
#[must_use]
pub fn compute_max_total_marks(subjects: &[Subject]) -> f64 {
    subjects.iter().map(|s| s.max_marks).sum()
}

/// Percentage of marks obtained, rounded to two decimals.
///
/// Defined as 0 when the maximum total is 0. Marks above the subject maximum
/// are not clamped, so the result can exceed 100.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn compute_percentage(subjects: &[Subject]) -> f64 {
    let max_total = compute_max_total_marks(subjects);
    if max_total == 0.0 {
        return 0.0;
    }
    round2(compute_total_marks(subjects) / max_total * 100.0)
}

/// Letter grade for a percentage.
#[must_use]
pub fn compute_grade(percentage: f64) -> Grade {
    Grade::from_percentage(percentage)
}

/// Grade point for a percentage.
#[must_use]
pub fn compute_grade_point(percentage: f64) -> f64 {
    band_for(percentage).map_or(0.0, |(_, _, point)| point)
}

/// All derived performance figures for one subject list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    /// Sum of marks obtained
    pub total_marks: f64,
    /// Sum of maximum marks
    pub max_total_marks: f64,
    /// Rounded percentage
    pub percentage: f64,
    /// Letter grade
    pub grade: Grade,
    /// Grade point
    pub grade_point: f64,
}

impl Performance {
    /// Compute every derived figure from the current subjects.
    #[must_use]
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        let percentage = compute_percentage(subjects);
        Self {
            total_marks: compute_total_marks(subjects),
            max_total_marks: compute_max_total_marks(subjects),
            percentage,
            grade: compute_grade(percentage),
            grade_point: compute_grade_point(percentage),
        }
    }
}
