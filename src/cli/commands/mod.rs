//! CLI command handlers for `StudentRecords`.
//!
//! Each command is implemented in its own submodule. Handlers other than
//! `config` return `Err(message)` and leave printing the failure to `main`.

pub mod config;
pub mod report;
pub mod seed;
pub mod stats;
pub mod students;
