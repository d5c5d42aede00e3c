//! Trivia-preserving C# syntax for the regionsync toolchain.
//!
//! This crate turns C# source into two views joined by byte offset:
//!
//! - a lossless [`SourceTree`] of tokens, each carrying the whitespace,
//!   comments and preprocessor directives around it as [`Trivia`]
//! - a [`DeclarationIndex`] of the method and property declarations found
//!   by the Tree-sitter C# grammar, addressed by [`TokenId`]
//!
//! Trees are persistent. Replacing the leading trivia of one token yields a
//! new tree that shares every other token with the old one, and token
//! identifiers stay valid across such edits.
//!
//! # Trivia ownership
//!
//! A token's trailing trivia extends up to and including the first line
//! break after it; the remaining trivia before a token is its leading
//! trivia. Directives, including `#region` and `#endregion`, are always
//! leading trivia. The last token of every tree is an empty end-of-file
//! token that owns whatever trails the final real token.
//!
//! # Example
//!
//! ```
//! use regionsync_syntax::Parser;
//!
//! let mut parser = Parser::new()?;
//! let file = parser.parse("class C\n{\n    public void Run() { }\n}\n")?;
//!
//! let run = file.declarations().get(0).expect("declaration");
//! assert_eq!(run.identifier(), "Run");
//! assert_eq!(run.accessibility().marker_prefix(), "+");
//! assert_eq!(file.tree().text(), "class C\n{\n    public void Run() { }\n}\n");
//! # Ok::<(), regionsync_syntax::SyntaxError>(())
//! ```

mod declaration;
mod error;
mod language;
mod lexer;
mod line_ending;
mod parser;
mod position;
mod token;
mod tree;
mod trivia;

pub use declaration::{
    Accessibility, Declaration, DeclarationIndex, DeclarationKind, UnresolvedDeclaration,
};
pub use error::SyntaxError;
pub use language::{CSHARP_EXTENSIONS, ensure_csharp_path, is_csharp_path, tree_sitter_language};
pub use line_ending::LineEnding;
pub use parser::{Parser, SourceFile, SyntaxErrorInfo};
pub use token::{Token, TokenId};
pub use tree::SourceTree;
pub use trivia::{
    Directive, END_REGION_KEYWORD, EndRegionMarker, REGION_KEYWORD, RegionMarker, Trivia,
    render_trivia, trivia_len,
};

#[cfg(test)]
mod tests;
