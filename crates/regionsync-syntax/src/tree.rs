//! Persistent token trees.

use std::fmt;
use std::sync::Arc;

use crate::lexer;
use crate::line_ending::LineEnding;
use crate::token::{Token, TokenId};
use crate::trivia::{Trivia, trivia_len};

/// An immutable, lossless token stream for one source file.
///
/// Edits never mutate a tree. [`SourceTree::with_leading_trivia`] returns a
/// new version that shares every untouched token with its predecessor, so
/// earlier versions stay valid and cheap to keep around.
#[derive(Debug, Clone)]
pub struct SourceTree {
    tokens: Arc<[Arc<Token>]>,
    full_starts: Arc<[usize]>,
    text_starts: Arc<[usize]>,
    text_len: usize,
    line_ending: Option<LineEnding>,
}

impl SourceTree {
    /// Lexes `source` into a tree.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let tokens: Arc<[Arc<Token>]> = lexer::tokenize(source).into_iter().map(Arc::new).collect();
        Self::from_shared(tokens, LineEnding::detect(source))
    }

    /// Builds a tree from hand-made tokens.
    ///
    /// An empty end-of-file token is appended unless the last token already
    /// is one.
    #[must_use]
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_end_of_file) {
            tokens.push(Token::new(String::new(), Vec::new(), Vec::new()));
        }
        let shared: Arc<[Arc<Token>]> = tokens.into_iter().map(Arc::new).collect();
        let line_ending = detect_in_tokens(&shared);
        Self::from_shared(shared, line_ending)
    }

    fn from_shared(tokens: Arc<[Arc<Token>]>, line_ending: Option<LineEnding>) -> Self {
        let mut full_starts = Vec::with_capacity(tokens.len());
        let mut text_starts = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        for token in tokens.iter() {
            full_starts.push(offset);
            text_starts.push(offset + trivia_len(token.leading()));
            offset += token.full_len();
        }
        Self {
            tokens,
            full_starts: full_starts.into(),
            text_starts: text_starts.into(),
            text_len: offset,
            line_ending,
        }
    }

    /// Returns the number of tokens, including the end-of-file token.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns whether the tree holds no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token with the given identifier.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index()).map(|token| &**token)
    }

    /// Iterates over all tokens in document order.
    pub fn tokens(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (TokenId::new(index), &**token))
    }

    /// Returns the identifier of the end-of-file token.
    #[must_use]
    pub fn eof(&self) -> TokenId {
        TokenId::new(self.tokens.len().saturating_sub(1))
    }

    /// Returns the total byte length of the source text.
    #[must_use]
    pub const fn text_len(&self) -> usize {
        self.text_len
    }

    /// Returns the line-ending convention detected in the source, if any.
    #[must_use]
    pub const fn line_ending(&self) -> Option<LineEnding> {
        self.line_ending
    }

    /// Returns the byte offset where the token's leading trivia begins.
    #[must_use]
    pub fn full_start(&self, id: TokenId) -> Option<usize> {
        self.full_starts.get(id.index()).copied()
    }

    /// Returns the byte offset where the token text begins.
    #[must_use]
    pub fn token_start(&self, id: TokenId) -> Option<usize> {
        self.text_starts.get(id.index()).copied()
    }

    /// Returns the byte offset of the `index`-th leading trivia item of a
    /// token.
    #[must_use]
    pub fn leading_trivia_start(&self, id: TokenId, index: usize) -> Option<usize> {
        let token = self.token(id)?;
        let before = token.leading().get(..index)?;
        Some(self.full_start(id)? + trivia_len(before))
    }

    /// Returns the token whose text begins exactly at `offset`.
    #[must_use]
    pub fn token_at(&self, offset: usize) -> Option<TokenId> {
        self.text_starts
            .binary_search(&offset)
            .ok()
            .map(TokenId::new)
    }

    /// Returns the first token whose text begins at or after `offset`,
    /// falling back to the end-of-file token.
    #[must_use]
    pub fn first_token_at_or_after(&self, offset: usize) -> TokenId {
        let index = self.text_starts.partition_point(|&start| start < offset);
        TokenId::new(index.min(self.eof().index()))
    }

    /// Returns whether the token is the first one on its source line.
    #[must_use]
    pub fn starts_line(&self, id: TokenId) -> bool {
        id.index()
            .checked_sub(1)
            .and_then(|previous| self.tokens.get(previous))
            .is_none_or(|previous| previous.ends_line())
    }

    /// Returns a new version of the tree in which the token's leading trivia
    /// is replaced by `leading`.
    ///
    /// Returns `None` when `id` does not belong to this tree.
    #[must_use]
    pub fn with_leading_trivia(&self, id: TokenId, leading: Vec<Trivia>) -> Option<Self> {
        let mut tokens = self.tokens.to_vec();
        let slot = tokens.get_mut(id.index())?;
        *slot = Arc::new(slot.with_leading(leading));
        Some(Self::from_shared(tokens.into(), self.line_ending))
    }

    /// Returns whether both trees hold the very same allocation for `id`.
    #[must_use]
    pub fn shares_token(&self, other: &Self, id: TokenId) -> bool {
        match (self.tokens.get(id.index()), other.tokens.get(id.index())) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Renders the tree back to source text.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.text_len);
        for token in self.tokens.iter() {
            token.write_to(&mut out);
        }
        out
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

fn detect_in_tokens(tokens: &[Arc<Token>]) -> Option<LineEnding> {
    tokens.iter().find_map(|token| {
        let detect_in = |items: &[Trivia]| {
            items
                .iter()
                .find_map(|item| LineEnding::detect(&item.to_string()))
        };
        detect_in(token.leading())
            .or_else(|| LineEnding::detect(token.text()))
            .or_else(|| detect_in(token.trailing()))
    })
}
