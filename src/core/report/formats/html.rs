//! HTML report generator
//!
//! Generates class reports as a single HTML page with embedded CSS.
//! Student names and labels are HTML-escaped by the template engine.

use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "class_report.html")]
struct HtmlTemplate<'a> {
    ctx: &'a ReportContext,
}

/// HTML report generator
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(HtmlTemplate { ctx }.render()?)
    }
}
