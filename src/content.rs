//! The per-file document model: lines, logical groupings, and the
//! content container with scope resolution and text slicing.
//!
//! A [`Content`] holds everything known about one source file: its
//! physical [`Line`]s, the flattened token sequence, which processing
//! stages have already run, and free-form metadata written by those
//! stages. Rules never walk this structure directly; they ask
//! [`Content::scoped_tokens`] for the containers matching their
//! configured granularity.

use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::Location;
use crate::project::Project;
use crate::token::{Token, TokenContainer};
use crate::value::Value;

/// The literal delimiter line conventionally bounding a metadata block
/// at the top of a document.
pub const FRONTMATTER_MARKER: &str = "---";

/// Error produced when a scope string is not a known granularity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scope {scope:?}: must be \"document\" or \"lines\"")]
pub struct ScopeError {
    /// The offending scope string.
    pub scope: String,
}

/// Granularity at which an analysis inspects content.
///
/// The string vocabulary is extensible only by extending this enum and
/// the resolver; rules themselves never change when a granularity is
/// added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Document,
    Lines,
}

impl FromStr for Scope {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(Scope::Document),
            "lines" => Ok(Scope::Lines),
            _ => Err(ScopeError {
                scope: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Document => write!(f, "document"),
            Scope::Lines => write!(f, "lines"),
        }
    }
}

/// A single physical line inside a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// The line's location; begin and end line are always equal.
    pub location: Location,
    /// The raw text of the line, without the terminator.
    pub text: String,
    /// The line's tokens, in order of appearance.
    pub tokens: Vec<Token>,
}

impl Line {
    pub fn new(location: Location, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
            tokens: Vec::new(),
        }
    }
}

impl TokenContainer for Line {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// A single logical sentence, built by an external segmentation stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl TokenContainer for Sentence {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// A single logical paragraph, spanning one or more physical lines,
/// built by an external segmentation stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub tokens: Vec<Token>,
}

impl TokenContainer for Paragraph {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// The contents of a single file inside a project.
///
/// Created once per file, then mutated in place by successive processing
/// stages: each stage records itself in the processed log, may populate
/// tokens, and may write metadata for later stages to read.
#[derive(Debug, Default)]
pub struct Content {
    /// Path of the source file, when known.
    pub path: Option<String>,
    /// Physical lines, ascending, contiguous, zero-indexed.
    pub lines: Vec<Line>,
    /// The flattened token sequence across all lines, document order.
    pub tokens: Vec<Token>,
    /// Free-form metadata written by processing stages and rules.
    pub metadata: HashMap<String, Value>,
    processed: Vec<String>,
    project: Weak<Project>,
}

impl Content {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Append a physical line. Lines must be pushed in document order.
    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Append a token to the line at `line_index`, assigning the next
    /// document-wide token index.
    ///
    /// The token is recorded both on the line and in the flattened
    /// sequence. Returns the assigned index.
    pub fn push_token(&mut self, line_index: usize, mut token: Token) -> anyhow::Result<usize> {
        if line_index >= self.lines.len() {
            anyhow::bail!(
                "line index {} out of range for content with {} lines",
                line_index,
                self.lines.len()
            );
        }
        let index = self.tokens.len();
        token.index = index;
        self.lines[line_index].tokens.push(token.clone());
        self.tokens.push(token);
        Ok(index)
    }

    /// Record the stemmed form of the token with the given index.
    ///
    /// Updates both the flattened sequence and the owning line. Returns
    /// false when no token has that index.
    pub fn set_stem(&mut self, index: usize, stem: &str) -> bool {
        self.update_token(index, |t| t.stem = Some(stem.to_string()))
    }

    /// Record the part-of-speech tag of the token with the given index.
    ///
    /// Updates both the flattened sequence and the owning line. Returns
    /// false when no token has that index.
    pub fn set_part_of_speech(&mut self, index: usize, tag: &str) -> bool {
        self.update_token(index, |t| t.part_of_speech = Some(tag.to_string()))
    }

    fn update_token(&mut self, index: usize, apply: impl Fn(&mut Token)) -> bool {
        let Some(token) = self.tokens.get_mut(index) else {
            return false;
        };
        apply(token);
        for line in &mut self.lines {
            if let Some(token) = line.tokens.iter_mut().find(|t| t.index == index) {
                apply(token);
                return true;
            }
        }
        // Token exists in the flat sequence but belongs to no line
        // (e.g. attached before segmentation rebuilt the lines).
        true
    }

    /// Record that a processing stage has run.
    ///
    /// The log is append-only and duplicate-free; returns false when the
    /// stage was already recorded.
    pub fn mark_processed(&mut self, stage: &str) -> bool {
        if self.is_processed(stage) {
            return false;
        }
        self.processed.push(stage.to_string());
        true
    }

    /// Whether a processing stage has already run on this content.
    pub fn is_processed(&self, stage: &str) -> bool {
        self.processed.iter().any(|s| s == stage)
    }

    /// The stages that have run, in completion order.
    pub fn processed(&self) -> &[String] {
        &self.processed
    }

    /// Associate this content with its owning project.
    ///
    /// The reference is non-owning: the content never controls the
    /// project's lifetime.
    pub fn set_project(&mut self, project: &Rc<Project>) {
        self.project = Rc::downgrade(project);
    }

    /// The owning project, if one is set and still alive.
    pub fn project(&self) -> Option<Rc<Project>> {
        self.project.upgrade()
    }

    /// Resolve a scope string to the ordered containers a rule should
    /// inspect at that granularity.
    ///
    /// An absent or empty scope defaults to `document`, which yields a
    /// single container: the content itself. `lines` yields one
    /// container per physical line, in document order. Any other string
    /// is a [`ScopeError`]; the caller decides whether to skip, report,
    /// or abort.
    pub fn scoped_tokens(
        &self,
        scope: Option<&str>,
    ) -> Result<Vec<&dyn TokenContainer>, ScopeError> {
        let scope = match scope {
            None | Some("") => Scope::Document,
            Some(s) => s.parse()?,
        };
        Ok(match scope {
            Scope::Document => vec![self as &dyn TokenContainer],
            Scope::Lines => self
                .lines
                .iter()
                .map(|line| line as &dyn TokenContainer)
                .collect(),
        })
    }

    /// Index of the first line at or after `start` whose raw text is
    /// exactly `marker`, or `None` when no such line exists.
    ///
    /// Pass [`FRONTMATTER_MARKER`] to find the conventional frontmatter
    /// delimiters.
    pub fn index_of_line(&self, marker: &str, start: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, line)| line.text == marker)
            .map(|(i, _)| i)
    }

    /// The raw text of lines `[start, end)`, each followed by a newline.
    ///
    /// Out-of-range indices are clamped: `end` past the last line stops
    /// at the last line, and `start >= end` yields an empty string.
    pub fn text_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.lines.len());
        let mut buffer = String::new();
        for line in self.lines.iter().take(end).skip(start) {
            buffer.push_str(&line.text);
            buffer.push('\n');
        }
        buffer
    }
}

impl TokenContainer for Content {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
