//! Tokens with attached trivia.

use std::fmt;

use crate::trivia::{Trivia, trivia_len};

/// Position of a token inside a [`SourceTree`](crate::SourceTree).
///
/// Identifiers follow document order and stay stable across trivia edits,
/// since those never add or remove tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(usize);

impl TokenId {
    /// Wraps a raw token index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw token index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An atomic lexical unit and the trivia attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub const fn new(text: String, leading: Vec<Trivia>, trailing: Vec<Trivia>) -> Self {
        Self {
            text,
            leading,
            trailing,
        }
    }

    /// Returns the token text without trivia.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the trivia preceding the token.
    #[must_use]
    pub fn leading(&self) -> &[Trivia] {
        &self.leading
    }

    /// Returns the trivia following the token on its line.
    #[must_use]
    pub fn trailing(&self) -> &[Trivia] {
        &self.trailing
    }

    /// Returns whether this is the synthetic end-of-file token.
    #[must_use]
    pub fn is_end_of_file(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns a copy of the token with `leading` as its leading trivia.
    #[must_use]
    pub fn with_leading(&self, leading: Vec<Trivia>) -> Self {
        Self {
            text: self.text.clone(),
            leading,
            trailing: self.trailing.clone(),
        }
    }

    /// Returns the byte length of the token including all trivia.
    #[must_use]
    pub fn full_len(&self) -> usize {
        trivia_len(&self.leading) + self.text.len() + trivia_len(&self.trailing)
    }

    /// Returns whether the text rendered by this token ends a source line.
    #[must_use]
    pub fn ends_line(&self) -> bool {
        self.trailing.last().map_or_else(
            || self.text.ends_with('\n') || self.text.ends_with('\r'),
            Trivia::ends_line,
        )
    }

    /// Appends the exact source text of the token to `out`.
    pub fn write_to(&self, out: &mut String) {
        for item in &self.leading {
            item.write_to(out);
        }
        out.push_str(&self.text);
        for item in &self.trailing {
            item.write_to(out);
        }
    }
}
