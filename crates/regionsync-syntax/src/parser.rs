//! Tree-sitter front-end producing token trees and declaration indices.
//!
//! Tokens and trivia come from the lossless lexer; Tree-sitter only tells us
//! where method and property declarations begin and end. The two views are
//! joined by byte offset: a declaration resolves when its start coincides
//! with the start of a lexer token.

use std::ops::Range;

use tracing::{debug, warn};

use crate::declaration::{
    Accessibility, Declaration, DeclarationIndex, DeclarationKind, UnresolvedDeclaration,
};
use crate::error::SyntaxError;
use crate::language::tree_sitter_language;
use crate::position::point_to_one_based;
use crate::tree::SourceTree;

const METHOD_KIND: &str = "method_declaration";
const PROPERTY_KIND: &str = "property_declaration";
const INTERFACE_KIND: &str = "interface_declaration";
const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "record_declaration",
    "record_struct_declaration",
    INTERFACE_KIND,
];
const ACCESS_KEYWORDS: &[&str] = &["public", "protected", "internal", "private"];

/// A parsed C# file: its token tree plus the declarations found in it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    tree: SourceTree,
    declarations: DeclarationIndex,
    syntax_errors: Vec<SyntaxErrorInfo>,
}

impl SourceFile {
    /// Assembles a file from parts built elsewhere, typically by hand in
    /// tests.
    #[must_use]
    pub const fn new(tree: SourceTree, declarations: DeclarationIndex) -> Self {
        Self {
            tree,
            declarations,
            syntax_errors: Vec::new(),
        }
    }

    /// Returns the token tree.
    #[must_use]
    pub const fn tree(&self) -> &SourceTree {
        &self.tree
    }

    /// Returns the declaration index.
    #[must_use]
    pub const fn declarations(&self) -> &DeclarationIndex {
        &self.declarations
    }

    /// Returns whether Tree-sitter reported syntax errors.
    ///
    /// Declarations outside the damaged region are still indexed.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.syntax_errors.is_empty()
    }

    /// Returns the syntax errors reported by Tree-sitter.
    #[must_use]
    pub fn syntax_errors(&self) -> &[SyntaxErrorInfo] {
        &self.syntax_errors
    }

    /// Splits the file into its tree and index.
    #[must_use]
    pub fn into_parts(self) -> (SourceTree, DeclarationIndex) {
        (self.tree, self.declarations)
    }
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: u32,
    /// Column number (one-based) where the error starts.
    pub column: u32,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "syntax error".to_owned()
        };
        Self {
            byte_range: node.byte_range(),
            line,
            column,
            message,
        }
    }
}

/// C# parser.
///
/// A parser is cheap to reuse but not shareable between threads; callers
/// that lint concurrently should hold one per worker or guard it.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a parser for C#.
    ///
    /// # Errors
    ///
    /// Returns an error if Tree-sitter rejects the grammar.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_language())
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses `source` into a [`SourceFile`].
    ///
    /// # Errors
    ///
    /// Returns an error if Tree-sitter fails to produce a tree at all.
    /// Malformed source still parses; see [`SourceFile::has_errors`].
    pub fn parse(&mut self, source: &str) -> Result<SourceFile, SyntaxError> {
        let syntax = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("parsing failed"))?;
        let tree = SourceTree::from_source(source);

        let mut declarations = DeclarationIndex::default();
        collect_declarations(syntax.root_node(), source, &tree, &mut declarations);

        let mut syntax_errors = Vec::new();
        collect_error_nodes(syntax.root_node(), &mut syntax_errors);

        for unresolved in declarations.unresolved() {
            warn!(
                identifier = %unresolved.identifier,
                line = unresolved.line,
                column = unresolved.column,
                reason = %unresolved.reason,
                "skipping declaration"
            );
        }
        debug!(
            tokens = tree.len(),
            declarations = declarations.len(),
            syntax_errors = syntax_errors.len(),
            "parsed C# source"
        );

        Ok(SourceFile {
            tree,
            declarations,
            syntax_errors,
        })
    }
}

fn collect_declarations(
    node: tree_sitter::Node<'_>,
    source: &str,
    tree: &SourceTree,
    index: &mut DeclarationIndex,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let kind = match child.kind() {
            METHOD_KIND => DeclarationKind::Method,
            PROPERTY_KIND => DeclarationKind::Property,
            _ => {
                collect_declarations(child, source, tree, index);
                continue;
            }
        };
        match resolve(child, kind, source, tree) {
            Ok(declaration) => index.push(declaration),
            Err(unresolved) => index.push_unresolved(unresolved),
        }
    }
}

fn resolve(
    node: tree_sitter::Node<'_>,
    kind: DeclarationKind,
    source: &str,
    tree: &SourceTree,
) -> Result<Declaration, UnresolvedDeclaration> {
    let name = node.child_by_field_name("name");
    // Verbatim identifiers name the same symbol without their `@`.
    let identifier = name
        .and_then(|name_node| source.get(name_node.byte_range()))
        .map(|text| text.strip_prefix('@').unwrap_or(text))
        .unwrap_or_default();
    let (line, column) = point_to_one_based(name.unwrap_or(node).start_position());
    let unresolved = |reason: &str| UnresolvedDeclaration {
        identifier: identifier.to_owned(),
        line,
        column,
        reason: reason.to_owned(),
    };

    if identifier.is_empty() {
        return Err(unresolved("declaration has no identifier"));
    }
    let Some(first_token) = tree.token_at(node.start_byte()) else {
        return Err(unresolved("declaration does not start on a token boundary"));
    };
    let next_token = tree.first_token_at_or_after(node.end_byte());
    if next_token <= first_token {
        return Err(unresolved("declaration has no tokens"));
    }

    Ok(Declaration::new(
        kind,
        accessibility_of(node, source),
        identifier,
        first_token,
        next_token,
    )
    .with_location(line, column))
}

fn accessibility_of(node: tree_sitter::Node<'_>, source: &str) -> Accessibility {
    let mut cursor = node.walk();
    let mut modifiers = Vec::new();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "explicit_interface_specifier" => return Accessibility::Private,
            "modifier" => modifiers.extend(source.get(child.byte_range())),
            keyword if ACCESS_KEYWORDS.contains(&keyword) => modifiers.push(keyword),
            _ => {}
        }
    }
    Accessibility::from_modifiers(modifiers).unwrap_or_else(|| container_default(node))
}

/// Interface members default to public; everything else to private.
fn container_default(node: tree_sitter::Node<'_>) -> Accessibility {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if TYPE_DECLARATION_KINDS.contains(&ancestor.kind()) {
            return if ancestor.kind() == INTERFACE_KIND {
                Accessibility::Public
            } else {
                Accessibility::Private
            };
        }
        current = ancestor.parent();
    }
    Accessibility::Private
}

fn collect_error_nodes(node: tree_sitter::Node<'_>, errors: &mut Vec<SyntaxErrorInfo>) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, errors);
    }
}
