//! CLI argument definitions for `StudentRecords`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use student_records::config::ConfigOverrides;
use student_records::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_file`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Student record commands
    #[command(flatten)]
    Records(RecordCommand),
}

/// Commands that read or change the student data file
#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// List students with their computed results.
    List {
        /// Only students in this class
        #[arg(long, value_name = "CLASS")]
        class: Option<String>,

        /// Only students in this section (case-insensitive)
        #[arg(long, value_name = "SECTION")]
        section: Option<String>,

        /// Case-insensitive search on name or roll number
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Sort field: rollNumber, name, percentage, createdAt
        #[arg(long, value_name = "FIELD", default_value = "rollNumber")]
        sort_by: String,

        /// Sort order: asc or desc
        #[arg(long, value_name = "ORDER", default_value = "asc")]
        order: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one student by roll number or id.
    Show {
        /// Roll number, or student id when no roll number matches
        #[arg(value_name = "ID|ROLL")]
        key: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Add a student from a JSON file.
    Add {
        /// JSON file with the student's fields
        #[arg(value_name = "FILE")]
        input_file: PathBuf,
    },
    /// Update a student from a JSON file holding only the changed fields.
    Update {
        /// Roll number, or student id when no roll number matches
        #[arg(value_name = "ID|ROLL")]
        key: String,

        /// JSON file with the fields to change
        #[arg(value_name = "FILE")]
        input_file: PathBuf,
    },
    /// Delete a student.
    Delete {
        /// Roll number, or student id when no roll number matches
        #[arg(value_name = "ID|ROLL")]
        key: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a subject to a student.
    AddSubject {
        /// Roll number, or student id when no roll number matches
        #[arg(value_name = "ID|ROLL")]
        key: String,

        /// Subject name
        #[arg(value_name = "NAME")]
        name: String,

        /// Marks obtained
        #[arg(value_name = "MARKS")]
        marks: f64,

        /// Maximum marks for the subject
        #[arg(long, value_name = "N", default_value_t = 100.0)]
        max_marks: f64,
    },
    /// Change the marks of one of a student's subjects.
    SetMarks {
        /// Roll number, or student id when no roll number matches
        #[arg(value_name = "ID|ROLL")]
        key: String,

        /// Subject name (case-insensitive)
        #[arg(value_name = "SUBJECT")]
        subject: String,

        /// New marks
        #[arg(value_name = "MARKS")]
        marks: f64,
    },
    /// Show statistics for one class and section.
    Stats {
        /// Class label
        #[arg(value_name = "CLASS")]
        class: String,

        /// Section label (case-insensitive)
        #[arg(value_name = "SECTION")]
        section: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate a class report.
    ///
    /// Creates a formatted report with summary statistics, grade
    /// distribution, and ranked results.
    Report {
        /// Class label
        #[arg(value_name = "CLASS")]
        class: String,

        /// Section label (case-insensitive)
        #[arg(value_name = "SECTION")]
        section: String,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replace all students with sample data or a JSON array from FILE.
    Seed {
        /// JSON file holding an array of students
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studentrecords",
    about = "Student records command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config student data file
    #[arg(long = "config-data-file", value_name = "PATH")]
    pub config_data_file: Option<PathBuf>,

    /// Override config student data file (short form)
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-file`) take precedence over long-form
    /// flags (e.g., `--config-data-file`) when both are provided.
    ///
    /// # Examples
    /// ```ignore
    /// let args = Cli::parse();
    /// let overrides = args.to_config_overrides();
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_file: path_string(self.data_file.as_ref())
                .or_else(|| path_string(self.config_data_file.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("studentrecords").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["config"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_file.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--data-file",
            "/tmp/students.json",
            "--reports-dir",
            "/output",
            "list",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_file, Some("/tmp/students.json".to_string()));
        assert_eq!(overrides.reports_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = parse(&[
            "--config-data-file",
            "/long/students.json",
            "--data-file",
            "/short/students.json",
            "--config-reports-dir",
            "/long/out",
            "list",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.data_file, Some("/short/students.json".to_string()));
        assert_eq!(overrides.reports_dir, Some("/long/out".to_string()));
    }

    #[test]
    fn test_parse_student_commands() {
        match parse(&["add-subject", "R01", "Physics", "45", "--max-marks", "50"]).command {
            Command::Records(RecordCommand::AddSubject {
                key,
                name,
                marks,
                max_marks,
            }) => {
                assert_eq!(key, "R01");
                assert_eq!(name, "Physics");
                assert!((marks - 45.0).abs() < f64::EPSILON);
                assert!((max_marks - 50.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        match parse(&["report", "10th", "a", "-f", "html"]).command {
            Command::Records(RecordCommand::Report {
                class,
                section,
                format,
                output,
            }) => {
                assert_eq!(class, "10th");
                assert_eq!(section, "a");
                assert_eq!(format, "html");
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(matches!(
            parse(&["seed"]).command,
            Command::Records(RecordCommand::Seed { input_file: None })
        ));
        assert!(matches!(
            parse(&["config", "get"]).command,
            Command::Config { subcommand: Some(_) }
        ));
        assert!(Cli::try_parse_from(["studentrecords", "stats", "10th"]).is_err());
    }
}
