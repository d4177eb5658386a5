//! Prosecheck - pluggable prose linting core.
//!
//! Prosecheck is the document model and plugin-execution contract
//! underlying a pluggable prose linter. A text file becomes a hierarchy
//! of addressable containers (document, lines, tokens); a configured
//! rule declares the granularity of content it inspects; findings are
//! reported through a severity-classified diagnostic sink tied back to
//! precise source locations.
//!
//! # Architecture
//!
//! - `location`: file/line/column addressing for tokens and diagnostics
//! - `token`: the lexical unit and the token-container capability
//! - `content`: the per-file document model, scope resolution, and
//!   frontmatter text slicing
//! - `value`: typed values for option and metadata bags
//! - `analysis`: severity, rule configuration, and the plugin contract
//! - `project`: a named, ordered set of rule configurations
//! - `output`: reference diagnostic sinks (buffer, console, JSON)
//! - `runner`: executes a project's analyses against one content file
//!
//! Tokenization, sentence/paragraph segmentation, file discovery, and
//! concrete rules are external collaborators; they populate and consume
//! these types but live outside this crate.

pub mod analysis;
pub mod content;
pub mod location;
pub mod output;
pub mod project;
pub mod runner;
pub mod token;
pub mod value;

pub use analysis::{Analysis, AnalysisArguments, AnalysisOutput, AnalysisPlugin, Severity};
pub use content::{
    Content, Line, Paragraph, Scope, ScopeError, Sentence, FRONTMATTER_MARKER,
};
pub use location::Location;
pub use output::{BufferOutput, ConsoleOutput, Diagnostic};
pub use project::Project;
pub use runner::Runner;
pub use token::{Token, TokenContainer};
pub use value::Value;
