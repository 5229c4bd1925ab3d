//! Markdown report generator
//!
//! Generates class reports as plain Markdown tables. These render well in
//! GitHub, GitLab, and VS Code.

use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "class_report.md")]
struct MarkdownTemplate<'a> {
    ctx: &'a ReportContext,
}

/// Markdown report generator
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(MarkdownTemplate { ctx }.render()?)
    }
}
