//! Character cursor over the source text.

/// Forward-only cursor tracking a byte position inside the source.
pub(super) struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(super) const fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    pub(super) const fn position(&self) -> usize {
        self.position
    }

    pub(super) fn rest(&self) -> &'a str {
        self.source.get(self.position..).unwrap_or_default()
    }

    pub(super) fn is_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub(super) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub(super) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Advances by `len` bytes, clamped to the end of the source.
    pub(super) fn advance(&mut self, len: usize) {
        self.position = self.position.saturating_add(len).min(self.source.len());
    }

    pub(super) fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let start = self.position;
        while self.peek().is_some_and(&mut predicate) {
            self.bump();
        }
        self.slice_from(start)
    }

    pub(super) fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.position).unwrap_or_default()
    }
}
