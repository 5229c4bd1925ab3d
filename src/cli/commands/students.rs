//! Student record command handlers
//!
//! `list`, `show`, `add`, `update`, `delete`, `add-subject` and `set-marks`.

use student_records::core::models::{Student, StudentInput, StudentPatch, StudentRecord, Subject};
use student_records::core::report::format_marks;
use student_records::core::store::{
    SortField, SortOrder, StoreError, StudentFilter, StudentStore,
};
use student_records::{debug, info};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Print students matching the filter as a table or JSON
pub fn list(
    store: &impl StudentStore,
    class: Option<String>,
    section: Option<String>,
    search: Option<String>,
    sort_by: &str,
    order: &str,
    json: bool,
) -> Result<(), String> {
    let filter = StudentFilter {
        class,
        section,
        search,
        sort_by: sort_by.parse::<SortField>()?,
        order: order.parse::<SortOrder>()?,
    };
    debug!("Listing students with {filter:?}");
    let students = store.list(&filter);

    if json {
        println!("{}", to_json(&students)?);
    } else if students.is_empty() {
        println!("No students found");
    } else {
        print!("{}", format_table(&students));
        println!("\n{} student(s)", students.len());
    }
    Ok(())
}

/// Print one student with subjects and derived figures
pub fn show(store: &impl StudentStore, key: &str, json: bool) -> Result<(), String> {
    let student = store.resolve(key).map_err(|e| e.to_string())?;
    if json {
        let record = student.to_record();
        println!(
            "{}",
            serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?
        );
    } else {
        print!("{}", format_details(&student));
    }
    Ok(())
}

/// Create a student from a JSON file
pub fn add(store: &mut impl StudentStore, input_file: &Path) -> Result<(), String> {
    let input: StudentInput = read_json(input_file)?;
    let student = store.insert(input).map_err(describe)?;
    info!("Added student {} with id {}", student.roll_number, student.id);
    println!(
        "✓ Added {} (id {}): {:.2}% {}",
        student.display_name(),
        student.id,
        student.percentage(),
        student.grade()
    );
    Ok(())
}

/// Apply a partial update from a JSON file
pub fn update(store: &mut impl StudentStore, key: &str, input_file: &Path) -> Result<(), String> {
    let current = store.resolve(key).map_err(|e| e.to_string())?;
    let patch: StudentPatch = read_json(input_file)?;
    if patch.is_empty() {
        println!("✓ Nothing to update for {}", current.display_name());
        return Ok(());
    }
    let student = store.update(current.id, patch).map_err(describe)?;
    info!("Updated student {}", student.id);
    println!(
        "✓ Updated {}: {:.2}% {}",
        student.display_name(),
        student.percentage(),
        student.grade()
    );
    Ok(())
}

/// Delete a student, asking for confirmation unless `yes` is set
pub fn delete(store: &mut impl StudentStore, key: &str, yes: bool) -> Result<(), String> {
    let student = store.resolve(key).map_err(|e| e.to_string())?;

    if !yes {
        print!("Delete {}? (y/n): ", student.display_name());
        io::stdout().flush().ok();

        let mut response = String::new();
        io::stdin().read_line(&mut response).ok();
        let response = response.trim();
        if !(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")) {
            println!("✗ Delete cancelled");
            return Ok(());
        }
    }

    let removed = store.delete(student.id).map_err(|e| e.to_string())?;
    info!("Deleted student {}", removed.id);
    println!("✓ Deleted {}", removed.display_name());
    Ok(())
}

/// Append a subject to a student
pub fn add_subject(
    store: &mut impl StudentStore,
    key: &str,
    name: &str,
    marks: f64,
    max_marks: f64,
) -> Result<(), String> {
    let current = store.resolve(key).map_err(|e| e.to_string())?;
    let student = store
        .add_subject(current.id, Subject::new(name, marks, max_marks))
        .map_err(describe)?;
    println!(
        "✓ Added {name} to {}: now {:.2}% {}",
        student.display_name(),
        student.percentage(),
        student.grade()
    );
    Ok(())
}

/// Change the marks of one subject
pub fn set_marks(
    store: &mut impl StudentStore,
    key: &str,
    subject: &str,
    marks: f64,
) -> Result<(), String> {
    let current = store.resolve(key).map_err(|e| e.to_string())?;
    let student = store
        .update_subject_marks(current.id, subject, marks)
        .map_err(describe)?;
    println!(
        "✓ Set {subject} marks for {}: now {:.2}% {}",
        student.display_name(),
        student.percentage(),
        student.grade()
    );
    Ok(())
}

/// Store errors as printed; validation failures get one line per problem
fn describe(err: StoreError) -> String {
    match err {
        StoreError::Validation(validation) => {
            let messages = validation.messages();
            if messages.len() == 1 {
                messages.concat()
            } else {
                format!("Validation failed:\n  - {}", messages.join("\n  - "))
            }
        }
        other => other.to_string(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("Invalid JSON in {}: {e}", path.display()))
}

fn to_json(students: &[Student]) -> Result<String, String> {
    let records: Vec<StudentRecord> = students.iter().map(Student::to_record).collect();
    serde_json::to_string_pretty(&records).map_err(|e| e.to_string())
}

/// Fixed-width table of students and their results
pub fn format_table(students: &[Student]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<12} {:<24} {:<8} {:<7} {:>10} {:>6} {:>5}",
        "ID", "Roll", "Name", "Class", "Section", "Percentage", "Grade", "GP"
    );
    let _ = writeln!(out, "{}", "-".repeat(84));
    for student in students {
        let perf = student.performance();
        let _ = writeln!(
            out,
            "{:<5} {:<12} {:<24} {:<8} {:<7} {:>9.2}% {:>6} {:>5.1}",
            student.id,
            student.roll_number,
            student.name,
            student.class,
            student.section,
            perf.percentage,
            perf.grade.label(),
            perf.grade_point
        );
    }
    out
}

/// Multi-line description of one student
pub fn format_details(student: &Student) -> String {
    let perf = student.performance();
    let mut out = String::new();
    let _ = writeln!(out, "\n=== {} ===\n", student.display_name());
    let _ = writeln!(out, "ID:       {}", student.id);
    let _ = writeln!(out, "Class:    {} / Section {}", student.class, student.section);
    if let Some(email) = &student.email {
        let _ = writeln!(out, "Email:    {email}");
    }
    if let Some(phone) = &student.phone {
        let _ = writeln!(out, "Phone:    {phone}");
    }
    if let Some(dob) = student.date_of_birth {
        let _ = writeln!(out, "Born:     {dob}");
    }
    if let Some(address) = &student.address {
        let _ = writeln!(out, "Address:  {address}");
    }

    let _ = writeln!(out, "\nSubjects:");
    for subject in &student.subjects {
        let _ = writeln!(
            out,
            "  {:<20} {:>7}/{}",
            subject.name,
            format_marks(subject.marks),
            format_marks(subject.max_marks)
        );
    }

    let _ = writeln!(
        out,
        "\nTotal:      {}/{}",
        format_marks(perf.total_marks),
        format_marks(perf.max_total_marks)
    );
    let _ = writeln!(out, "Percentage: {:.2}%", perf.percentage);
    let _ = writeln!(out, "Grade:      {} ({:.1})", perf.grade, perf.grade_point);
    out
}
