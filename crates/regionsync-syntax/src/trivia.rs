//! Trivia items attached to tokens.
//!
//! Trivia is the non-semantic part of the source: whitespace, line breaks,
//! comments and preprocessor directives. Each token owns an ordered list of
//! leading and trailing trivia. Directive variants keep every raw piece of
//! their line so that rendering a trivia list reproduces the input byte for
//! byte.

use std::fmt;

use crate::line_ending::LineEnding;

/// Keyword spelling used for freshly created opening markers.
pub const REGION_KEYWORD: &str = "#region";

/// Keyword spelling used for freshly created closing markers.
pub const END_REGION_KEYWORD: &str = "#endregion";

/// A single trivia item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trivia {
    /// A run of horizontal whitespace.
    Whitespace(String),
    /// A line break (`\n`, `\r\n` or `\r`).
    EndOfLine(String),
    /// A `//` comment, excluding the line break.
    LineComment(String),
    /// A `/* ... */` comment.
    BlockComment(String),
    /// A `///` or `/** ... */` documentation comment.
    DocComment(String),
    /// An opening `#region` marker.
    Region(RegionMarker),
    /// A closing `#endregion` marker.
    EndRegion(EndRegionMarker),
    /// Any other preprocessor directive line.
    Directive(Directive),
}

impl Trivia {
    /// Appends the exact source text of this item to `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Self::Whitespace(text)
            | Self::EndOfLine(text)
            | Self::LineComment(text)
            | Self::BlockComment(text)
            | Self::DocComment(text) => out.push_str(text),
            Self::Region(marker) => marker.write_to(out),
            Self::EndRegion(marker) => marker.write_to(out),
            Self::Directive(directive) => directive.write_to(out),
        }
    }

    /// Returns the length of the item in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Whitespace(text)
            | Self::EndOfLine(text)
            | Self::LineComment(text)
            | Self::BlockComment(text)
            | Self::DocComment(text) => text.len(),
            Self::Region(marker) => marker.len(),
            Self::EndRegion(marker) => marker.len(),
            Self::Directive(directive) => directive.len(),
        }
    }

    /// Returns whether the item renders as an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the item is a comment of any flavour.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(
            self,
            Self::LineComment(_) | Self::BlockComment(_) | Self::DocComment(_)
        )
    }

    /// Returns whether the item is plain horizontal whitespace.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace(_))
    }

    /// Returns whether the item ends the current source line.
    ///
    /// Directive lines own their terminator, so they end the line unless
    /// they sit at the very end of the file.
    #[must_use]
    pub fn ends_line(&self) -> bool {
        match self {
            Self::EndOfLine(_) => true,
            Self::Region(marker) => !marker.end_of_directive.is_empty(),
            Self::EndRegion(marker) => !marker.end_of_directive.is_empty(),
            Self::Directive(directive) => !directive.end_of_directive.is_empty(),
            _ => false,
        }
    }

    /// Returns the opening marker carried by this item, if any.
    #[must_use]
    pub const fn as_region(&self) -> Option<&RegionMarker> {
        match self {
            Self::Region(marker) => Some(marker),
            _ => None,
        }
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::with_capacity(self.len());
        self.write_to(&mut text);
        f.write_str(&text)
    }
}

/// Renders a trivia list to its source text.
#[must_use]
pub fn render_trivia(trivia: &[Trivia]) -> String {
    let mut out = String::with_capacity(trivia_len(trivia));
    for item in trivia {
        item.write_to(&mut out);
    }
    out
}

/// Returns the total byte length of a trivia list.
#[must_use]
pub fn trivia_len(trivia: &[Trivia]) -> usize {
    trivia.iter().map(Trivia::len).sum()
}

/// An opening `#region` directive.
///
/// The embedded name is the free text that follows the keyword on the same
/// line. Whitespace around it is kept separately so that renaming touches
/// only the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMarker {
    keyword: String,
    separator: String,
    name: Option<String>,
    tail: String,
    end_of_directive: String,
}

impl RegionMarker {
    /// Creates a marker rendered as `#region <name>` followed by `line_ending`.
    #[must_use]
    pub fn new(name: impl Into<String>, line_ending: LineEnding) -> Self {
        let name = name.into();
        Self {
            keyword: REGION_KEYWORD.to_owned(),
            separator: if name.is_empty() {
                String::new()
            } else {
                " ".to_owned()
            },
            name: Some(name).filter(|text| !text.is_empty()),
            tail: String::new(),
            end_of_directive: line_ending.as_str().to_owned(),
        }
    }

    /// Rebuilds a marker from the raw pieces of a lexed directive line.
    ///
    /// `keyword` runs from `#` to the end of the `region` keyword; `rest` is
    /// everything after it up to the line break.
    pub(crate) fn from_parts(keyword: &str, rest: &str, end_of_directive: &str) -> Self {
        let message = rest.trim_start();
        let separator_len = rest.len().saturating_sub(message.len());
        let name = message.trim_end();
        let tail = message.get(name.len()..).unwrap_or_default();
        Self {
            keyword: keyword.to_owned(),
            separator: rest.get(..separator_len).unwrap_or_default().to_owned(),
            name: Some(name.to_owned()).filter(|text| !text.is_empty()),
            tail: tail.to_owned(),
            end_of_directive: end_of_directive.to_owned(),
        }
    }

    /// Returns the embedded name, or `""` when the marker carries none.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Returns whether the marker carries a name at all.
    #[must_use]
    pub const fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Returns the line terminator that closes the directive.
    #[must_use]
    pub fn end_of_directive(&self) -> &str {
        &self.end_of_directive
    }

    /// Returns a copy of this marker carrying `name`.
    ///
    /// The keyword spelling, trailing blanks and line terminator are kept.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        let separator = if self.separator.is_empty() && !name.is_empty() {
            " ".to_owned()
        } else {
            self.separator.clone()
        };
        Self {
            keyword: self.keyword.clone(),
            separator,
            name: Some(name).filter(|text| !text.is_empty()),
            tail: self.tail.clone(),
            end_of_directive: self.end_of_directive.clone(),
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.keyword);
        out.push_str(&self.separator);
        out.push_str(self.name());
        out.push_str(&self.tail);
        out.push_str(&self.end_of_directive);
    }

    fn len(&self) -> usize {
        self.keyword.len()
            + self.separator.len()
            + self.name().len()
            + self.tail.len()
            + self.end_of_directive.len()
    }
}

/// A closing `#endregion` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRegionMarker {
    keyword: String,
    rest: String,
    end_of_directive: String,
}

impl EndRegionMarker {
    /// Creates a marker rendered as `#endregion` followed by `line_ending`.
    #[must_use]
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            keyword: END_REGION_KEYWORD.to_owned(),
            rest: String::new(),
            end_of_directive: line_ending.as_str().to_owned(),
        }
    }

    pub(crate) fn from_parts(keyword: &str, rest: &str, end_of_directive: &str) -> Self {
        Self {
            keyword: keyword.to_owned(),
            rest: rest.to_owned(),
            end_of_directive: end_of_directive.to_owned(),
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.keyword);
        out.push_str(&self.rest);
        out.push_str(&self.end_of_directive);
    }

    fn len(&self) -> usize {
        self.keyword.len() + self.rest.len() + self.end_of_directive.len()
    }
}

/// A preprocessor directive other than the region markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    text: String,
    end_of_directive: String,
}

impl Directive {
    pub(crate) fn from_parts(text: &str, end_of_directive: &str) -> Self {
        Self {
            text: text.to_owned(),
            end_of_directive: end_of_directive.to_owned(),
        }
    }

    /// Returns the directive line without its terminator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.text);
        out.push_str(&self.end_of_directive);
    }

    fn len(&self) -> usize {
        self.text.len() + self.end_of_directive.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#region", " +Foo", "+Foo")]
    #[case("#region", "  -Bar  ", "-Bar")]
    #[case("# region", " #~Baz", "#~Baz")]
    #[case("#region", "", "")]
    #[case("#region", "   ", "")]
    fn region_marker_extracts_embedded_name(
        #[case] keyword: &str,
        #[case] rest: &str,
        #[case] expected: &str,
    ) {
        let marker = RegionMarker::from_parts(keyword, rest, "\n");
        assert_eq!(marker.name(), expected);
        assert_eq!(Trivia::Region(marker).to_string(), format!("{keyword}{rest}\n"));
    }

    #[test]
    fn renaming_keeps_spelling_and_terminator() {
        let marker = RegionMarker::from_parts("#  region", "\t-Foo  ", "\r\n");
        let renamed = marker.with_name("+Foo");
        assert_eq!(Trivia::Region(renamed).to_string(), "#  region\t+Foo  \r\n");
    }

    #[test]
    fn renaming_bare_marker_adds_separator() {
        let marker = RegionMarker::from_parts("#region", "", "\n");
        assert!(!marker.has_name());
        let renamed = marker.with_name("+Foo");
        assert_eq!(Trivia::Region(renamed).to_string(), "#region +Foo\n");
    }

    #[rstest]
    #[case(LineEnding::Lf, "#region +Foo\n", "#endregion\n")]
    #[case(LineEnding::CrLf, "#region +Foo\r\n", "#endregion\r\n")]
    fn new_markers_follow_line_ending(
        #[case] line_ending: LineEnding,
        #[case] opening: &str,
        #[case] closing: &str,
    ) {
        let region = Trivia::Region(RegionMarker::new("+Foo", line_ending));
        let end = Trivia::EndRegion(EndRegionMarker::new(line_ending));
        assert_eq!(region.to_string(), opening);
        assert_eq!(region.len(), opening.len());
        assert_eq!(end.to_string(), closing);
        assert!(region.ends_line());
    }

    #[test]
    fn directive_at_end_of_file_does_not_end_line() {
        let directive = Trivia::Directive(Directive::from_parts("#endif", ""));
        assert!(!directive.ends_line());
        assert_eq!(directive.to_string(), "#endif");
    }
}
