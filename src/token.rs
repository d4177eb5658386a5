//! Tokens and the token-container capability.

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// A lexical unit of a line, sentence, or paragraph.
///
/// A token is usually a single word or punctuation mark. The raw `text`
/// is immutable after creation; `stem` and `part_of_speech` are filled
/// in later by external processing stages, through
/// [`Content::set_stem`](crate::content::Content::set_stem) and
/// [`Content::set_part_of_speech`](crate::content::Content::set_part_of_speech)
/// so every view of the token stays consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Where the token appears in the source content, start and end.
    pub location: Location,
    /// The original text within the content.
    pub text: String,
    /// A normalized version of the text used for processing.
    pub normalized: String,
    /// A stemmed version of the normalized text, once stemming has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
    /// The token index within the entire contents. Unique and strictly
    /// increasing in document order, assigned when the token is added to
    /// a [`Content`](crate::content::Content).
    pub index: usize,
    /// Part-of-speech tag (treebank codes), once tagging has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl Token {
    /// Create a token whose normalized form equals its raw text.
    ///
    /// The index is a placeholder until the token is attached to a
    /// content file, which assigns the document-wide index.
    pub fn new(location: Location, text: impl Into<String>) -> Self {
        let text = text.into();
        let normalized = text.clone();
        Self {
            location,
            text,
            normalized,
            stem: None,
            index: 0,
            part_of_speech: None,
        }
    }

    /// Override the normalized form.
    pub fn with_normalized(mut self, normalized: impl Into<String>) -> Self {
        self.normalized = normalized.into();
        self
    }
}

/// Anything exposing an ordered sequence of tokens.
///
/// Implemented by [`Line`](crate::content::Line),
/// [`Sentence`](crate::content::Sentence),
/// [`Paragraph`](crate::content::Paragraph), and
/// [`Content`](crate::content::Content) itself, so scope resolution can
/// hand a rule a uniform set of inspectable containers regardless of
/// granularity.
pub trait TokenContainer: std::fmt::Debug {
    fn tokens(&self) -> &[Token];
}
