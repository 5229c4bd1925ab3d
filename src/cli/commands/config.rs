//! Config command handler

use crate::args::ConfigSubcommand;
use student_records::config::{Config, KEYS};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: '{key}' (expected one of: {})",
        KEYS.join(", ")
    )
}

/// Print one value, or the whole configuration and where it lives
fn show(config: &Config, key: Option<&str>) -> Result<(), String> {
    if let Some(k) = key {
        let value = config.get(k).ok_or_else(|| unknown_key(k))?;
        println!("{value}");
    } else {
        println!("\n=== Configuration ===");
        println!("# {}\n", Config::get_config_file_path().display());
        print!("{config}");
    }
    Ok(())
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    if config.get(key).is_none() {
        return Err(unknown_key(key));
    }
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {}", config.get(key).unwrap_or_default());
    Ok(())
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    if config.get(key).is_none() {
        return Err(unknown_key(key));
    }
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

fn reset() -> Result<(), String> {
    let path = Config::get_config_file_path();
    if !path.exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!(
        "Are you sure you want to reset {} to defaults? (y/n): ",
        path.display()
    );
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
