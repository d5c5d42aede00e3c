//! Declarations of interest and their index.

use std::fmt;

use crate::token::TokenId;

/// Effective accessibility of a member declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    /// `public`.
    Public,
    /// `protected`.
    Protected,
    /// `internal`.
    Internal,
    /// `protected internal`.
    ProtectedOrInternal,
    /// `private protected`.
    ProtectedAndInternal,
    /// `private`, or no modifier inside a class or struct.
    Private,
}

impl Accessibility {
    /// Returns the visibility prefix used in region names.
    ///
    /// ```text
    /// Public                "+"
    /// Protected             "#"
    /// Internal              "~"
    /// ProtectedOrInternal   "#~"
    /// anything else         "-"
    /// ```
    #[must_use]
    pub const fn marker_prefix(self) -> &'static str {
        match self {
            Self::Public => "+",
            Self::Protected => "#",
            Self::Internal => "~",
            Self::ProtectedOrInternal => "#~",
            Self::ProtectedAndInternal | Self::Private => "-",
        }
    }

    /// Derives accessibility from modifier keywords.
    ///
    /// Returns `None` when no access modifier is present, leaving the
    /// container default to the caller.
    #[must_use]
    pub fn from_modifiers<'a>(modifiers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut public = false;
        let mut protected = false;
        let mut internal = false;
        let mut private = false;
        for modifier in modifiers {
            match modifier {
                "public" => public = true,
                "protected" => protected = true,
                "internal" => internal = true,
                "private" => private = true,
                _ => {}
            }
        }
        match (public, protected, internal, private) {
            (true, ..) => Some(Self::Public),
            (false, true, true, _) => Some(Self::ProtectedOrInternal),
            (false, true, false, true) => Some(Self::ProtectedAndInternal),
            (false, true, false, false) => Some(Self::Protected),
            (false, false, true, _) => Some(Self::Internal),
            (false, false, false, true) => Some(Self::Private),
            (false, false, false, false) => None,
        }
    }
}

/// Kind of member a [`Declaration`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A method declaration.
    Method,
    /// A property declaration.
    Property,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Method => "method",
            Self::Property => "property",
        })
    }
}

/// A method or property located in a [`SourceTree`](crate::SourceTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    kind: DeclarationKind,
    accessibility: Accessibility,
    identifier: String,
    first_token: TokenId,
    next_token: TokenId,
    line: u32,
    column: u32,
}

impl Declaration {
    /// Creates a declaration spanning `first_token` up to, but excluding,
    /// `next_token`.
    #[must_use]
    pub fn new(
        kind: DeclarationKind,
        accessibility: Accessibility,
        identifier: impl Into<String>,
        first_token: TokenId,
        next_token: TokenId,
    ) -> Self {
        Self {
            kind,
            accessibility,
            identifier: identifier.into(),
            first_token,
            next_token,
            line: 1,
            column: 1,
        }
    }

    /// Sets the one-based position of the identifier.
    #[must_use]
    pub const fn with_location(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Returns the member kind.
    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Returns the effective accessibility.
    #[must_use]
    pub const fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    /// Returns the declared identifier as spelled in the source.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the first token of the declaration, modifiers and
    /// attributes included.
    #[must_use]
    pub const fn first_token(&self) -> TokenId {
        self.first_token
    }

    /// Returns the token immediately following the declaration.
    #[must_use]
    pub const fn next_token(&self) -> TokenId {
        self.next_token
    }

    /// Returns the one-based line of the identifier.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the one-based column of the identifier.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// A declaration the front-end recognised but could not map onto tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDeclaration {
    /// Identifier as far as it could be read; may be empty.
    pub identifier: String,
    /// One-based line of the declaration.
    pub line: u32,
    /// One-based column of the declaration.
    pub column: u32,
    /// Why the declaration could not be resolved.
    pub reason: String,
}

/// Arena of declarations found in one file, in document order.
///
/// Declarations refer to tokens by [`TokenId`], which survives trivia
/// edits, so an index built for one tree version stays valid for every
/// version derived from it by the synchronizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationIndex {
    declarations: Vec<Declaration>,
    unresolved: Vec<UnresolvedDeclaration>,
}

impl DeclarationIndex {
    /// Creates an index from resolved declarations.
    #[must_use]
    pub const fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations,
            unresolved: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub(crate) fn push_unresolved(&mut self, unresolved: UnresolvedDeclaration) {
        self.unresolved.push(unresolved);
    }

    /// Returns the declaration at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Declaration> {
        self.declarations.get(index)
    }

    /// Iterates over the resolved declarations.
    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    /// Returns the number of resolved declarations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns whether no declaration was resolved.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Returns the declarations that could not be resolved.
    #[must_use]
    pub fn unresolved(&self) -> &[UnresolvedDeclaration] {
        &self.unresolved
    }
}

impl<'a> IntoIterator for &'a DeclarationIndex {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
