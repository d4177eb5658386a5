//! The analysis plugin contract: severity, rule configuration, and the
//! invocation bundle a plugin receives.
//!
//! A plugin never sees how the document was segmented and never returns
//! findings as a value. It resolves its working set through
//! [`Content::scoped_tokens`](crate::content::Content::scoped_tokens)
//! and reports exclusively through its [`AnalysisOutput`] sink.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::content::Content;
use crate::location::Location;
use crate::value::Value;

/// Severity levels for reported findings.
///
/// The ordinals are part of the contract: `Error = 0`, `Warning = 1`,
/// `Info = 2`, so `Error < Warning < Info` and diagnostics sort most
/// severe first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    Error = 0,
    Warning = 1,
    Info = 2,
}

impl Severity {
    /// The fixed ordinal value of this severity.
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// One configured rule instance: which plugin runs, with what options,
/// at what granularity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Analysis {
    /// Display name for this rule instance.
    #[serde(default)]
    pub name: String,
    /// Identifier of the plugin implementing the rule.
    pub plugin: String,
    /// Free-form options the plugin interprets.
    #[serde(default)]
    pub options: HashMap<String, Value>,
    /// Inspection granularity ("document" or "lines"). Absent means
    /// document. Validated at resolution time, not at construction.
    #[serde(default)]
    pub scope: Option<String>,
}

impl Analysis {
    /// Look up a configuration option by key.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// The diagnostic sink a plugin writes findings to.
///
/// A sink must accept, per plugin run: one `write_start`, any
/// interleaving of the three severity writes, one `write_end`. Info
/// diagnostics carry no location; warnings and errors identify where the
/// finding applies.
pub trait AnalysisOutput {
    fn write_start(&mut self);
    fn write_end(&mut self);
    fn write_info(&mut self, message: &str);
    fn write_warning(&mut self, message: &str, location: &Location);
    fn write_error(&mut self, message: &str, location: &Location);
}

/// Everything a plugin receives for one invocation: the full content,
/// the configuration that selected it, and the sink to report through.
pub struct AnalysisArguments<'a> {
    pub content: &'a mut Content,
    pub analysis: &'a Analysis,
    pub output: &'a mut dyn AnalysisOutput,
}

/// The executable capability implementing a rule's inspection logic.
///
/// Implementations resolve their working set via
/// `args.content.scoped_tokens(args.analysis.scope.as_deref())`, may
/// record their stage in `args.content` and write its metadata, and
/// report findings through `args.output`. `Ok(())` is the only success
/// signal; a failure propagates to the invoker uncaught.
pub trait AnalysisPlugin {
    fn process(&self, args: AnalysisArguments<'_>) -> anyhow::Result<()>;
}
