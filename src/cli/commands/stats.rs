//! Class statistics command handler

use student_records::core::cohort::CohortStats;
use student_records::core::grading::Grade;
use student_records::core::store::StudentStore;
use student_records::verbose;
use std::fmt::Write as _;

/// Print statistics for one class and section
pub fn run(store: &impl StudentStore, class: &str, section: &str, json: bool) -> Result<(), String> {
    let stats = store
        .class_stats(class, section)
        .map_err(|e| format!("{e}: {class} / {}", section.to_uppercase()))?;
    verbose!(
        "Computed statistics for {} students in {class} {section}",
        stats.total_students
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?
        );
    } else {
        print!("{}", format_stats(class, &section.to_uppercase(), &stats));
    }
    Ok(())
}

/// Human-readable statistics summary
pub fn format_stats(class: &str, section: &str, stats: &CohortStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Class {class}, Section {section} ===\n");
    let _ = writeln!(out, "Students:           {}", stats.total_students);
    let _ = writeln!(
        out,
        "Average Percentage: {:.2}% ({})",
        stats.average_percentage,
        Grade::from_percentage(stats.average_percentage)
    );
    let top = &stats.top_performer;
    let _ = writeln!(
        out,
        "Top Performer:      {} with {:.2}% ({})",
        top.display_name, top.performance.percentage, top.performance.grade
    );

    let _ = writeln!(out, "\nGrade Distribution:");
    for (grade, count) in &stats.grade_distribution {
        let _ = writeln!(out, "  {:<3} {count:>4}  {}", grade.label(), "#".repeat(*count));
    }
    out
}
