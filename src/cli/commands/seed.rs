//! Seed command handler
//!
//! Replaces every stored student with sample data or a JSON array from a file.

use student_records::core::models::{Student, StudentInput};
use student_records::core::store::{MemoryStore, SortField, SortOrder, StudentFilter, StudentStore};
use student_records::{info, warn};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// Sample students inserted when no file is given
const SAMPLE_STUDENTS: &str = include_str!("../../assets/sample_students.json");

/// Number of students listed under "Top Performers"
const TOP_COUNT: usize = 3;

/// Run the seed command.
pub fn run(store: &mut impl StudentStore, input_file: Option<&Path>) -> Result<(), String> {
    let (source, content) = match input_file {
        Some(path) => (
            path.display().to_string(),
            std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        ),
        None => ("built-in sample data".to_string(), SAMPLE_STUDENTS.to_string()),
    };

    let inputs: Vec<StudentInput> =
        serde_json::from_str(&content).map_err(|e| format!("Invalid JSON in {source}: {e}"))?;
    let staged = stage(inputs)?;

    let removed = store.clear().map_err(|e| e.to_string())?;
    if removed > 0 {
        warn!("Seeding removed {removed} existing students");
    }
    println!("✓ Cleared {removed} existing student(s)");

    for input in staged {
        store.insert(input).map_err(|e| e.to_string())?;
    }
    let students = store.all();
    info!("Seeded {} students from {source}", students.len());
    println!("✓ Inserted {} student(s) from {source}", students.len());
    print!("{}", summarize(&students));
    Ok(())
}

/// Validate every entry against a scratch store before touching real data.
fn stage(inputs: Vec<StudentInput>) -> Result<Vec<StudentInput>, String> {
    let mut scratch = MemoryStore::new();
    for (idx, input) in inputs.iter().enumerate() {
        scratch
            .insert(input.clone())
            .map_err(|e| format!("Student #{}: {e}", idx + 1))?;
    }
    Ok(inputs)
}

/// Per-class and per-section counts plus the top performers.
///
/// Class averages are rounded half-up to a whole percent.
pub fn summarize(students: &[Student]) -> String {
    let mut by_class: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    let mut by_section: BTreeMap<&str, usize> = BTreeMap::new();
    for student in students {
        let entry = by_class.entry(student.class.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += student.percentage();
        *by_section.entry(student.section.as_str()).or_insert(0) += 1;
    }

    let mut out = String::new();
    let _ = writeln!(out, "\nTotal Students: {}", students.len());

    let _ = writeln!(out, "\nBy Class:");
    for (class, (count, total)) in &by_class {
        #[allow(clippy::cast_precision_loss)]
        let average = (total / *count as f64 + 0.5).floor();
        let _ = writeln!(out, "  {class}: {count} students (Avg: {average:.0}%)");
    }

    let _ = writeln!(out, "\nBy Section:");
    for (section, count) in &by_section {
        let _ = writeln!(out, "  Section {section}: {count} students");
    }

    let ranked = StudentFilter {
        sort_by: SortField::Percentage,
        order: SortOrder::Desc,
        ..StudentFilter::default()
    }
    .apply(students.to_vec());

    let _ = writeln!(out, "\nTop Performers:");
    for (idx, student) in ranked.iter().take(TOP_COUNT).enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - {:.2}% ({})",
            idx + 1,
            student.display_name(),
            student.percentage(),
            student.grade()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_seed_replaces_existing_data() {
        let mut store = MemoryStore::new();
        run(&mut store, None).expect("seed");
        let first = store.all();
        assert!(!first.is_empty());
        assert!(first.iter().any(|s| s.roll_number == "TEST001"));

        run(&mut store, None).expect("seed again");
        assert_eq!(store.all().len(), first.len());
    }

    #[test]
    fn test_sample_student_results() {
        let mut store = MemoryStore::new();
        run(&mut store, None).expect("seed");
        let student = store.find_by_roll_number("TEST001").expect("sample student");
        assert!((student.total_marks() - 255.0).abs() < 1e-9);
        assert!((student.percentage() - 85.0).abs() < 1e-9);
        assert_eq!(student.grade().label(), "A");
    }

    #[test]
    fn test_invalid_file_leaves_store_untouched() {
        let mut store = MemoryStore::new();
        run(&mut store, None).expect("seed");
        let before = store.all().len();

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(
            br#"[
                {"name": "Good One", "rollNumber": "G1", "class": "9th", "section": "A",
                 "subjects": [{"name": "Math", "marks": 50}]},
                {"name": "Dup", "rollNumber": "g1", "class": "9th", "section": "A",
                 "subjects": [{"name": "Math", "marks": 50}]}
            ]"#,
        )
        .expect("write");

        let err = run(&mut store, Some(file.path())).expect_err("duplicate roll");
        assert!(err.starts_with("Student #2"));
        assert_eq!(store.all().len(), before);
    }

    #[test]
    fn test_summarize() {
        let students = vec![
            Student::new(
                1,
                "Hina",
                "R1",
                "10th",
                "A",
                vec![student_records::core::models::Subject::out_of_hundred("Math", 90.0)],
            ),
            Student::new(
                2,
                "Omar",
                "R2",
                "10th",
                "B",
                vec![student_records::core::models::Subject::out_of_hundred("Math", 59.0)],
            ),
        ];
        let text = summarize(&students);
        assert!(text.contains("Total Students: 2"));
        // (90 + 59) / 2 = 74.5 rounds half-up to a whole percent
        assert!(text.contains("  10th: 2 students (Avg: 75%)"));
        assert!(text.contains("  Section B: 1 students"));
        assert!(text.contains("  1. Hina (R1) - 90.00% (A+)"));
    }
}
