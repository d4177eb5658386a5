//! Reference diagnostic sinks.
//!
//! The [`AnalysisOutput`](crate::analysis::AnalysisOutput) trait is the
//! stable boundary between plugins and reporting; these sinks cover the
//! common cases:
//! - [`BufferOutput`]: records diagnostics in memory for aggregation or
//!   assertions
//! - [`ConsoleOutput`]: colored terminal output for human readability
//! - [`render_json`]: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOutput, Severity};
use crate::location::Location;

/// The recorded form of one diagnostic write.
///
/// Info diagnostics carry no location; warnings and errors always do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// In-memory sink that records bracketing and every diagnostic.
#[derive(Debug, Default)]
pub struct BufferOutput {
    diagnostics: Vec<Diagnostic>,
    starts: usize,
    ends: usize,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Number of write_start calls seen so far.
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Number of write_end calls seen so far.
    pub fn ends(&self) -> usize {
        self.ends
    }

    /// Whether any error-severity diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics ordered most severe first, stable within a severity.
    pub fn sorted_by_severity(&self) -> Vec<Diagnostic> {
        let mut sorted = self.diagnostics.clone();
        sorted.sort_by_key(|d| d.severity);
        sorted
    }

    fn record(&mut self, severity: Severity, message: &str, location: Option<&Location>) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.to_string(),
            location: location.cloned(),
        });
    }
}

impl AnalysisOutput for BufferOutput {
    fn write_start(&mut self) {
        self.starts += 1;
    }

    fn write_end(&mut self) {
        self.ends += 1;
    }

    fn write_info(&mut self, message: &str) {
        self.record(Severity::Info, message, None);
    }

    fn write_warning(&mut self, message: &str, location: &Location) {
        self.record(Severity::Warning, message, Some(location));
    }

    fn write_error(&mut self, message: &str, location: &Location) {
        self.record(Severity::Error, message, Some(location));
    }
}

/// Terminal sink with colored severity tags.
pub struct ConsoleOutput {
    name: String,
}

impl ConsoleOutput {
    /// `name` labels the rule whose run this sink brackets.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AnalysisOutput for ConsoleOutput {
    fn write_start(&mut self) {
        println!("{}", self.name.cyan().bold());
    }

    fn write_end(&mut self) {
        println!();
    }

    fn write_info(&mut self, message: &str) {
        println!("  {} {}", "INFO ".dimmed(), message);
    }

    fn write_warning(&mut self, message: &str, location: &Location) {
        println!("  {} {} ({})", "WARN ".yellow(), message, location);
    }

    fn write_error(&mut self, message: &str, location: &Location) {
        println!("  {} {} ({})", "ERROR".red(), message, location);
    }
}

/// JSON report for one rule run.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub name: String,
    pub diagnostics: Vec<Diagnostic>,
    pub errors: usize,
    pub warnings: usize,
}

/// Render recorded diagnostics as a pretty-printed JSON report.
pub fn render_json(name: &str, diagnostics: &[Diagnostic]) -> anyhow::Result<String> {
    let count = |severity| {
        diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    };
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        name: name.to_string(),
        diagnostics: diagnostics.to_vec(),
        errors: count(Severity::Error),
        warnings: count(Severity::Warning),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
