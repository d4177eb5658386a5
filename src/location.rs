//! Source locations for tokens and diagnostics.
//!
//! A `Location` identifies a point or span within a file as begin/end
//! line and column pairs. Every token carries one, and every warning or
//! error diagnostic is tagged with one so findings can be traced back to
//! the exact source text they apply to.

use serde::{Deserialize, Serialize};

/// Identifies a location within a file as line and column.
///
/// Numeric components use [`Location::UNSET`] (`-1`) when unknown;
/// `path` is `None` when unknown. A location is immutable once
/// constructed. Lines and columns are zero-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: Option<String>,
    pub begin_line: i32,
    pub begin_column: i32,
    pub end_line: i32,
    pub end_column: i32,
}

impl Location {
    /// Sentinel for an unset line or column component.
    pub const UNSET: i32 = -1;

    pub fn new(
        path: Option<String>,
        begin_line: i32,
        begin_column: i32,
        end_line: i32,
        end_column: i32,
    ) -> Self {
        Self {
            path,
            begin_line,
            begin_column,
            end_line,
            end_column,
        }
    }

    /// A location covering one whole physical line (columns unset).
    pub fn for_line(path: Option<String>, line: i32) -> Self {
        Self {
            path,
            begin_line: line,
            begin_column: Self::UNSET,
            end_line: line,
            end_column: Self::UNSET,
        }
    }

    /// A span within a single line.
    pub fn span(path: Option<String>, line: i32, begin_column: i32, end_column: i32) -> Self {
        Self {
            path,
            begin_line: line,
            begin_column,
            end_line: line,
            end_column,
        }
    }

    /// Whether any component of this location has been set.
    pub fn is_set(&self) -> bool {
        self.path.is_some()
            || self.begin_line != Self::UNSET
            || self.begin_column != Self::UNSET
            || self.end_line != Self::UNSET
            || self.end_column != Self::UNSET
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(None, Self::UNSET, Self::UNSET, Self::UNSET, Self::UNSET)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}", path)?,
            None => write!(f, "<unknown>")?,
        }
        if self.begin_line != Self::UNSET {
            write!(f, ":{}", self.begin_line)?;
            if self.begin_column != Self::UNSET {
                write!(f, ":{}", self.begin_column)?;
            }
        }
        Ok(())
    }
}
