//! Report command handler
//!
//! Generates class reports in Markdown or HTML.

use student_records::config::Config;
use student_records::core::report::{reporter_for, ReportContext, ReportFormat};
use student_records::core::store::StudentStore;
use student_records::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `store` - Student store to read the class from
/// * `class` / `section` - Cohort to report on
/// * `format_str` - Report format (markdown, html)
/// * `output_file` - Optional output path
/// * `config` - Configuration containing default reports directory
pub fn run(
    store: &impl StudentStore,
    class: &str,
    section: &str,
    format_str: &str,
    output_file: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let output_path = generate_report(store, class, section, format_str, output_file, config)
        .inspect_err(|err| error!("Report generation failed for {class} {section}: {err}"))?;
    println!("✓ Report generated: {}", output_path.display());
    Ok(())
}

fn generate_report(
    store: &impl StudentStore,
    class: &str,
    section: &str,
    format_str: &str,
    output_file: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, String> {
    let format =
        ReportFormat::from_str(format_str).map_err(|e| format!("{e}. Use: markdown or html"))?;

    let section = section.to_uppercase();
    let students = store.find_by_class_section(class, &section);
    let stats = store
        .class_stats(class, &section)
        .map_err(|e| format!("{e}: {class} / {section}"))?;
    let ctx = ReportContext::new(class, &section, &students, &stats);

    let output_path = if let Some(output) = output_file {
        output.to_path_buf()
    } else {
        let reports_dir = config.reports_dir();
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;
        reports_dir.join(default_file_name(class, &section, format))
    };

    reporter_for(format)
        .generate(&ctx, &output_path)
        .map_err(|e| format!("Failed to generate {format} report: {e}"))?;
    info!("Report exported to: {}", output_path.display());

    Ok(output_path)
}

/// `<class>_<section>_report.<ext>` with anything but alphanumerics replaced
fn default_file_name(class: &str, section: &str, format: ReportFormat) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    format!(
        "{}_{}_report.{}",
        clean(class),
        clean(section),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_records::config::ConfigOverrides;
    use student_records::core::models::{StudentInput, Subject};
    use student_records::core::store::MemoryStore;
    use tempfile::TempDir;

    fn store_with_class() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .insert(StudentInput {
                name: Some("Test Student".to_string()),
                roll_number: Some("TEST001".to_string()),
                class: Some("10th".to_string()),
                section: Some("A".to_string()),
                subjects: vec![
                    Subject::out_of_hundred("Mathematics", 85.0),
                    Subject::out_of_hundred("Physics", 78.0),
                    Subject::out_of_hundred("Chemistry", 92.0),
                ],
                ..StudentInput::default()
            })
            .expect("insert");
        store
    }

    fn config_with_reports_dir(dir: &Path) -> Config {
        let mut config = Config::default();
        config.apply_overrides(&ConfigOverrides {
            reports_dir: Some(dir.to_string_lossy().to_string()),
            ..ConfigOverrides::default()
        });
        config
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            default_file_name("10th", "A", ReportFormat::Html),
            "10th_A_report.html"
        );
        assert_eq!(
            default_file_name("Grade 9", "B", ReportFormat::Markdown),
            "Grade_9_B_report.md"
        );
    }

    #[test]
    fn test_report_written_to_reports_dir() {
        let dir = TempDir::new().expect("temp dir");
        let config = config_with_reports_dir(&dir.path().join("reports"));
        let path = generate_report(&store_with_class(), "10th", "a", "md", None, &config)
            .expect("report");

        assert_eq!(path, dir.path().join("reports").join("10th_A_report.md"));
        let content = std::fs::read_to_string(path).expect("read report");
        assert!(content.contains("Test Student"));
        assert!(content.contains("85.00%"));
    }

    #[test]
    fn test_report_errors() {
        let dir = TempDir::new().expect("temp dir");
        let config = config_with_reports_dir(dir.path());
        let store = store_with_class();

        let err = generate_report(&store, "10th", "A", "pdf", None, &config).expect_err("format");
        assert!(err.contains("Unknown report format"));

        let err = generate_report(&store, "9th", "A", "html", None, &config).expect_err("empty");
        assert!(err.starts_with("No students found"));
    }
}
