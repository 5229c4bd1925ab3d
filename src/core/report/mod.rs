//! Class report generation
//!
//! Renders a class+section report (summary statistics, grade distribution,
//! and a ranked student table) in Markdown or HTML. Both formats are askama
//! templates under `templates/` and share one [`ReportContext`].

pub mod formats;

use crate::core::cohort::CohortStats;
use crate::core::grading::{Grade, Performance};
use crate::core::models::Student;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// One row of the grade distribution table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRow {
    /// Grade label
    pub grade: String,
    /// Grade point for the label, formatted
    pub grade_point: String,
    /// Number of students
    pub count: usize,
    /// Share of the class, formatted as a percentage
    pub share: String,
}

/// One row of the student table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    /// 1-based rank by percentage
    pub rank: usize,
    /// Roll number
    pub roll_number: String,
    /// Student name
    pub name: String,
    /// Marks obtained over maximum, e.g. "255/300"
    pub marks: String,
    /// Percentage, two decimals
    pub percentage: String,
    /// Letter grade
    pub grade: String,
    /// Grade point, one decimal
    pub grade_point: String,
}

/// Data needed to render a class report
///
/// All numbers are formatted up front so templates only place text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Class label
    pub class_name: String,
    /// Section label
    pub section: String,
    /// Generation timestamp
    pub generated_at: String,
    /// Number of students
    pub total_students: usize,
    /// Average percentage, two decimals
    pub average_percentage: String,
    /// Grade the average percentage falls in
    pub average_grade: String,
    /// Top performer display name
    pub top_performer: String,
    /// Top performer percentage, two decimals
    pub top_percentage: String,
    /// Top performer grade
    pub top_grade: String,
    /// Grade distribution, best grade first
    pub distribution: Vec<DistributionRow>,
    /// Students ranked by percentage (roll number breaks ties)
    pub students: Vec<StudentRow>,
}

impl ReportContext {
    /// Build a report context for one cohort.
    ///
    /// `students` should be the same cohort that produced `stats`.
    #[must_use]
    pub fn new(class_name: &str, section: &str, students: &[Student], stats: &CohortStats) -> Self {
        let top = &stats.top_performer;

        #[allow(clippy::cast_precision_loss)]
        let distribution = stats
            .grade_distribution
            .iter()
            .map(|(grade, count)| DistributionRow {
                grade: grade.label().to_string(),
                grade_point: format!("{:.1}", grade.grade_point()),
                count: *count,
                share: format!("{:.1}", *count as f64 / stats.total_students as f64 * 100.0),
            })
            .collect();

        Self {
            class_name: class_name.to_string(),
            section: section.to_string(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
            total_students: stats.total_students,
            average_percentage: format!("{:.2}", stats.average_percentage),
            average_grade: Grade::from_percentage(stats.average_percentage)
                .label()
                .to_string(),
            top_performer: top.display_name.clone(),
            top_percentage: format!("{:.2}", top.performance.percentage),
            top_grade: top.performance.grade.label().to_string(),
            distribution,
            students: ranked_rows(students),
        }
    }
}

fn ranked_rows(students: &[Student]) -> Vec<StudentRow> {
    let mut scored: Vec<(&Student, Performance)> =
        students.iter().map(|s| (s, s.performance())).collect();
    scored.sort_by(|(a, pa), (b, pb)| {
        pb.percentage
            .partial_cmp(&pa.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.roll_number.cmp(&b.roll_number))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (student, perf))| StudentRow {
            rank: idx + 1,
            roll_number: student.roll_number.clone(),
            name: student.name.clone(),
            marks: format!(
                "{}/{}",
                format_marks(perf.total_marks),
                format_marks(perf.max_total_marks)
            ),
            percentage: format!("{:.2}", perf.percentage),
            grade: perf.grade.label().to_string(),
            grade_point: format!("{:.1}", perf.grade_point),
        })
        .collect()
}

/// Whole numbers without decimals, anything else with two.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_marks(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Subject;

    pub(crate) fn sample_context() -> ReportContext {
        let students = vec![
            Student::new(
                1,
                "Ayesha Khan",
                "R02",
                "10th",
                "A",
                vec![Subject::out_of_hundred("Math", 91.0)],
            ),
            Student::new(
                2,
                "Bilal <Ahmed>",
                "R01",
                "10th",
                "A",
                vec![Subject::new("Art", 20.5, 50.0)],
            ),
        ];
        let stats = CohortStats::from_students(&students).expect("stats");
        ReportContext::new("10th", "A", &students, &stats)
    }

    #[test]
    fn test_context_ranks_by_percentage() {
        let ctx = sample_context();
        assert_eq!(ctx.total_students, 2);
        assert_eq!(ctx.students[0].roll_number, "R02");
        assert_eq!(ctx.students[0].rank, 1);
        assert_eq!(ctx.students[1].marks, "20.50/50");
        assert_eq!(ctx.students[1].percentage, "41.00");
        assert_eq!(ctx.students[1].grade, "F");
        assert_eq!(ctx.top_performer, "Ayesha Khan (R02)");
    }

    #[test]
    fn test_context_distribution_shares() {
        let ctx = sample_context();
        assert_eq!(ctx.distribution.len(), 2);
        assert_eq!(ctx.distribution[0].grade, "A+");
        assert_eq!(ctx.distribution[0].share, "50.0");
        assert_eq!(ctx.distribution[1].grade, "F");
        // (91 + 41) / 2 = 66
        assert_eq!(ctx.average_percentage, "66.00");
        assert_eq!(ctx.average_grade, "C+");
    }

    #[test]
    fn test_format_marks() {
        assert_eq!(format_marks(255.0), "255");
        assert_eq!(format_marks(67.5), "67.50");
    }
}
