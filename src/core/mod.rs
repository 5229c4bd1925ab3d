//! Core domain: grading, cohort statistics, records, storage and reports

pub mod cohort;
pub mod grading;
pub mod models;
pub mod report;
pub mod store;
pub mod validation;
