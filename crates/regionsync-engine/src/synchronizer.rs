//! Region repair.
//!
//! [`synchronize`] brings one declaration's markers in line with its
//! canonical name. A stale name is rewritten in place; a missing pair is
//! inserted around the declaration. Every change yields a new
//! [`SourceTree`] and the list of text edits that turn the old text into the
//! new one.

use std::ops::Range;

use regionsync_syntax::{
    Declaration, EndRegionMarker, LineEnding, RegionMarker, SourceTree, Trivia, render_trivia,
};
use tracing::debug;

use crate::error::RegionError;
use crate::locator::{DeclarationSpan, LocatedRegion, locate};

/// Knobs for inserted markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    line_ending: Option<LineEnding>,
}

impl SyncOptions {
    /// Creates options that follow the source's own conventions.
    #[must_use]
    pub const fn new() -> Self {
        Self { line_ending: None }
    }

    /// Forces the terminator written after inserted markers. `None` keeps
    /// the convention detected in the source.
    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: Option<LineEnding>) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Returns the forced terminator, if any.
    #[must_use]
    pub const fn line_ending(self) -> Option<LineEnding> {
        self.line_ending
    }

    fn line_ending_for(self, tree: &SourceTree) -> LineEnding {
        self.line_ending
            .or_else(|| tree.line_ending())
            .unwrap_or_default()
    }
}

/// A replacement of a byte range of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte range replaced; empty for insertions.
    pub range: Range<usize>,
    /// Text written in place of the range.
    pub replacement: String,
}

impl TextEdit {
    /// Creates an insertion at `offset`.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range: offset..offset,
            replacement: text.into(),
        }
    }

    /// Creates a replacement of `range`.
    #[must_use]
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }

    /// Applies the edit to `text`.
    ///
    /// Returns `None` when the range does not fall on character boundaries
    /// of `text`.
    #[must_use]
    pub fn apply_to(&self, text: &str) -> Option<String> {
        let before = text.get(..self.range.start)?;
        let after = text.get(self.range.end..)?;
        let mut out = String::with_capacity(before.len() + self.replacement.len() + after.len());
        out.push_str(before);
        out.push_str(&self.replacement);
        out.push_str(after);
        Some(out)
    }
}

/// Applies `edits` one after another, each against the output of the
/// previous one.
#[must_use]
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Option<String> {
    edits
        .iter()
        .try_fold(text.to_owned(), |current, edit| edit.apply_to(&current))
}

/// A new tree version and the edits that produced it.
#[derive(Debug, Clone)]
pub struct Change {
    tree: SourceTree,
    edits: Vec<TextEdit>,
}

impl Change {
    /// Returns the edited tree.
    #[must_use]
    pub const fn tree(&self) -> &SourceTree {
        &self.tree
    }

    /// Returns the edits in application order. Each edit is expressed in the
    /// coordinates of the text produced by the edits before it.
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Consumes the change, returning the edited tree.
    #[must_use]
    pub fn into_tree(self) -> SourceTree {
        self.tree
    }
}

/// Result of synchronising one declaration.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// The declaration is already wrapped under its canonical name.
    Unchanged,
    /// The opening marker's name was rewritten.
    Renamed(Change),
    /// A fresh marker pair was inserted.
    Inserted(Change),
}

impl SyncOutcome {
    /// Returns whether nothing had to change.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Returns the change, if any.
    #[must_use]
    pub const fn change(&self) -> Option<&Change> {
        match self {
            Self::Unchanged => None,
            Self::Renamed(change) | Self::Inserted(change) => Some(change),
        }
    }

    /// Returns the resulting tree, falling back to `original` when nothing
    /// changed.
    #[must_use]
    pub fn into_tree(self, original: &SourceTree) -> SourceTree {
        match self {
            Self::Unchanged => original.clone(),
            Self::Renamed(change) | Self::Inserted(change) => change.tree,
        }
    }
}

/// Makes `declaration` wrapped in a region named `canonical_name`.
///
/// # Errors
///
/// Returns [`RegionError::MalformedDeclaration`] when the declaration's
/// tokens do not belong to `tree`. The tree is never modified.
pub fn synchronize(
    tree: &SourceTree,
    declaration: &Declaration,
    canonical_name: &str,
    options: SyncOptions,
) -> Result<SyncOutcome, RegionError> {
    match locate(tree, declaration)? {
        Some(region) if region.name == canonical_name => Ok(SyncOutcome::Unchanged),
        Some(region) => rename(tree, declaration, &region, canonical_name).map(SyncOutcome::Renamed),
        None => insert(tree, declaration, canonical_name, options).map(SyncOutcome::Inserted),
    }
}

fn rename(
    tree: &SourceTree,
    declaration: &Declaration,
    region: &LocatedRegion,
    canonical_name: &str,
) -> Result<Change, RegionError> {
    let target = region.pair.opening;
    let missing = || RegionError::malformed(declaration.identifier(), "opening marker not found");

    let leading = tree.token(target.token).ok_or_else(missing)?.leading();
    let current = leading.get(target.index).ok_or_else(missing)?;
    let marker = current.as_region().ok_or_else(missing)?;
    let replacement = Trivia::Region(marker.with_name(canonical_name));
    let start = tree
        .leading_trivia_start(target.token, target.index)
        .ok_or_else(missing)?;
    let edit = TextEdit::replace(start..start + current.len(), replacement.to_string());

    let mut updated = leading.to_vec();
    if let Some(slot) = updated.get_mut(target.index) {
        *slot = replacement;
    }
    let renamed = tree
        .with_leading_trivia(target.token, updated)
        .ok_or_else(missing)?;

    debug!(
        identifier = declaration.identifier(),
        from = %region.name,
        to = canonical_name,
        "renamed region"
    );
    Ok(Change {
        tree: renamed,
        edits: vec![edit],
    })
}

fn insert(
    tree: &SourceTree,
    declaration: &Declaration,
    canonical_name: &str,
    options: SyncOptions,
) -> Result<Change, RegionError> {
    let span = DeclarationSpan::resolve(tree, declaration)?;
    let first_id = declaration.first_token();
    let next_id = declaration.next_token();
    let line_ending = options.line_ending_for(tree);
    let unresolved = || RegionError::malformed(declaration.identifier(), "token vanished");

    let placement = OpeningPlacement::plan(span.first.leading(), tree.starts_line(first_id));
    let opening = placement.markers(canonical_name, line_ending);
    let opening_offset = tree
        .leading_trivia_start(first_id, placement.index)
        .ok_or_else(unresolved)?;
    let mut leading = span.first.leading().to_vec();
    leading.splice(placement.index..placement.index, opening.iter().cloned());
    let opened = tree
        .with_leading_trivia(first_id, leading)
        .ok_or_else(unresolved)?;

    let mut closing = Vec::with_capacity(3);
    if !span.last.ends_line() {
        closing.push(Trivia::EndOfLine(line_ending.as_str().to_owned()));
    }
    if let Some(indent) = &placement.indent {
        closing.push(Trivia::Whitespace(indent.clone()));
    }
    closing.push(Trivia::EndRegion(EndRegionMarker::new(line_ending)));
    let closing_offset = opened.full_start(next_id).ok_or_else(unresolved)?;
    let next_leading = opened.token(next_id).ok_or_else(unresolved)?.leading();
    let mut wrapped = closing.clone();
    wrapped.extend_from_slice(next_leading);
    let closed = opened
        .with_leading_trivia(next_id, wrapped)
        .ok_or_else(unresolved)?;

    debug!(
        identifier = declaration.identifier(),
        name = canonical_name,
        opening_offset,
        closing_offset,
        "inserted region"
    );
    Ok(Change {
        tree: closed,
        edits: vec![
            TextEdit::insert(opening_offset, render_trivia(&opening)),
            TextEdit::insert(closing_offset, render_trivia(&closing)),
        ],
    })
}

/// Where the opening marker goes inside the declaration's leading trivia.
struct OpeningPlacement {
    index: usize,
    indent: Option<String>,
    break_before: bool,
}

impl OpeningPlacement {
    /// `leading_starts_line` tells whether the first leading item sits at the
    /// start of a line.
    fn plan(leading: &[Trivia], leading_starts_line: bool) -> Self {
        let line_start = line_start_before(leading, leading.len());
        let line_prefix = leading.get(line_start..).unwrap_or_default();
        let on_own_line = (line_start > 0 || leading_starts_line)
            && line_prefix
                .iter()
                .all(|item| item.is_whitespace() || item.is_comment());

        if !on_own_line {
            return Self {
                index: leading.len(),
                indent: None,
                break_before: true,
            };
        }

        Self {
            index: comment_run_start(leading, line_start, leading_starts_line),
            indent: Some(render_trivia(leading_whitespace(line_prefix)))
                .filter(|indent| !indent.is_empty()),
            break_before: false,
        }
    }

    fn markers(&self, name: &str, line_ending: LineEnding) -> Vec<Trivia> {
        let mut items = Vec::with_capacity(3);
        if self.break_before {
            items.push(Trivia::EndOfLine(line_ending.as_str().to_owned()));
        }
        if let Some(indent) = &self.indent {
            items.push(Trivia::Whitespace(indent.clone()));
        }
        items.push(Trivia::Region(RegionMarker::new(name, line_ending)));
        items
    }
}

/// The whitespace items that open `line`.
fn leading_whitespace(line: &[Trivia]) -> &[Trivia] {
    let width = line.iter().take_while(|item| item.is_whitespace()).count();
    line.get(..width).unwrap_or_default()
}

/// Index of the first item on the line that contains `leading[end - 1]`.
fn line_start_before(leading: &[Trivia], end: usize) -> usize {
    leading
        .get(..end)
        .and_then(|before| before.iter().rposition(Trivia::ends_line))
        .map_or(0, |index| index + 1)
}

/// Walks up from `line_start` over whole lines holding only comments and
/// blanks, returning the start of the topmost such line.
fn comment_run_start(leading: &[Trivia], line_start: usize, leading_starts_line: bool) -> usize {
    let mut start = line_start;
    while let Some(break_index) = start.checked_sub(1) {
        if !matches!(leading.get(break_index), Some(Trivia::EndOfLine(_))) {
            break;
        }
        let begin = line_start_before(leading, break_index);
        if begin == 0 && !leading_starts_line {
            break;
        }
        let line = leading.get(begin..break_index).unwrap_or_default();
        let is_comment_line = line.iter().any(Trivia::is_comment)
            && line
                .iter()
                .all(|item| item.is_comment() || item.is_whitespace());
        if !is_comment_line {
            break;
        }
        start = begin;
    }
    start
}
