//! Command-line interface entry point for `StudentRecords`

mod args;
mod commands;

use args::{Cli, Command, RecordCommand};
use clap::Parser;
use student_records::config::Config;
use student_records::core::store::JsonFileStore;
use student_records::info;
use student_records::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if args.verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Records(command) => {
            if let Err(e) = run_with_store(command, &config) {
                eprintln!("✗ {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Open the configured data file and dispatch a student command
fn run_with_store(command: RecordCommand, config: &Config) -> Result<(), String> {
    let mut store = JsonFileStore::open(config.data_file()).map_err(|e| {
        format!(
            "Failed to open student data at {}: {e}",
            config.data_file().display()
        )
    })?;

    match command {
        RecordCommand::List {
            class,
            section,
            search,
            sort_by,
            order,
            json,
        } => commands::students::list(&store, class, section, search, &sort_by, &order, json),
        RecordCommand::Show { key, json } => commands::students::show(&store, &key, json),
        RecordCommand::Add { input_file } => commands::students::add(&mut store, &input_file),
        RecordCommand::Update { key, input_file } => {
            commands::students::update(&mut store, &key, &input_file)
        }
        RecordCommand::Delete { key, yes } => commands::students::delete(&mut store, &key, yes),
        RecordCommand::AddSubject {
            key,
            name,
            marks,
            max_marks,
        } => commands::students::add_subject(&mut store, &key, &name, marks, max_marks),
        RecordCommand::SetMarks {
            key,
            subject,
            marks,
        } => commands::students::set_marks(&mut store, &key, &subject, marks),
        RecordCommand::Stats {
            class,
            section,
            json,
        } => commands::stats::run(&store, &class, &section, json),
        RecordCommand::Report {
            class,
            section,
            format,
            output,
        } => commands::report::run(
            &store,
            &class,
            &section,
            &format,
            output.as_deref(),
            config,
        ),
        RecordCommand::Seed { input_file } => {
            commands::seed::run(&mut store, input_file.as_deref())
        }
    }
}
