//! Integration tests for configuration management

use student_records::config::{Config, ConfigOverrides, KEYS};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config location
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.storage.data_file.is_empty(),
        "Default data_file should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert!(config.storage.data_file.ends_with(".json"));
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[storage]
data_file = "/tmp/students.json"

[paths]
reports_dir = "./reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.storage.data_file, "/tmp/students.json");
    assert_eq!(config.paths.reports_dir, "./reports");
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields use serde defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.storage.data_file, "");
    assert_eq!(config.paths.reports_dir, "");
}

#[test]
fn test_config_rejects_malformed_toml() {
    assert!(Config::from_toml("[logging\nlevel = ").is_err());
    assert!(Config::from_toml("[logging]\nverbose = \"sometimes\"").is_err());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$STUDENT_RECORDS/test.log"

[storage]
data_file = "$STUDENT_RECORDS/data/students.json"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("studentrecords"));
    assert!(!config.logging.file.contains("$STUDENT_RECORDS"));
    assert!(config.storage.data_file.contains("studentrecords"));
    assert!(config.storage.data_file.ends_with("students.json"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("debug"));

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").as_deref(), Some("true"));
    assert!(config.logging.verbose);

    assert!(config.set("verbose", "maybe").is_err());

    config
        .set("data-file", "/srv/students.json")
        .expect("Failed to set data file");
    assert_eq!(config.get("data_file").as_deref(), Some("/srv/students.json"));
    assert_eq!(config.data_file(), PathBuf::from("/srv/students.json"));

    config
        .set("reports_dir", "$STUDENT_RECORDS/out")
        .expect("Failed to set reports dir");
    assert!(!config.paths.reports_dir.contains('$'));

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_every_key_round_trips_through_get() {
    let config = Config::from_defaults();
    for key in KEYS {
        assert!(config.get(key).is_some(), "get({key}) should be supported");
    }
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config
        .set("data_file", "/elsewhere.json")
        .expect("Failed to set data file");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("data_file", &defaults)
        .expect("Failed to unset data file");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.storage.data_file, defaults.storage.data_file);

    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("reports_dir", "/tmp/reports")
        .expect("Failed to set reports dir");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.paths.reports_dir, "/tmp/reports");
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_creates_missing_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);
    assert!(config_file.exists());
    assert_eq!(config, Config::from_defaults());
}

#[test]
fn test_load_from_merges_and_rewrites_old_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").expect("Failed to write config");

    let config = Config::load_from(&config_file);
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.storage.data_file, Config::from_defaults().storage.data_file);

    let rewritten = fs::read_to_string(&config_file).expect("Failed to read config");
    assert!(rewritten.contains("[storage]"));
    assert!(rewritten.contains("data_file"));
}

#[test]
fn test_load_from_falls_back_on_garbage() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "this is not toml = = =").expect("Failed to write config");

    assert_eq!(Config::load_from(&config_file), Config::from_defaults());
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        data_file: Some("./custom_students.json".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.storage.data_file, "./custom_students.json");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.storage, before.storage);
    assert_eq!(config.paths, before.paths);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[storage]"));
    assert!(display_str.contains("[paths]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("data_file"));
    assert!(display_str.contains("reports_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[storage]
data_file = ""

[paths]
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.storage.data_file, defaults.storage.data_file);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[storage]
data_file = "/my/students.json"

[paths]
reports_dir = "/my/reports"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.storage.data_file, "/my/students.json");
}

#[test]
fn test_get_app_dir() {
    let dir = Config::get_app_dir();

    assert!(dir.to_string_lossy().contains("studentrecords"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
