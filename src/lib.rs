//! Student record management library
//!
//! Grading rules, cohort statistics, storage, reports and configuration
//! shared by the `studentrecords` CLI.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::cohort::{CohortError, CohortStats};
pub use crate::core::grading::{Grade, Performance};
pub use crate::core::models::{Student, StudentRecord, Subject};

/// Returns the current version of the `StudentRecords` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
