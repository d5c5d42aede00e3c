//! Error types for region analysis and repair.

use regionsync_syntax::SyntaxError;
use thiserror::Error;

/// Errors from locating or synchronising region markers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegionError {
    /// The declaration cannot be mapped onto a token span of the tree.
    ///
    /// Only the affected declaration is skipped; the tree is left as it was.
    #[error("cannot resolve declaration '{identifier}': {reason}")]
    MalformedDeclaration {
        /// Identifier of the offending declaration.
        identifier: String,
        /// Why the declaration could not be resolved.
        reason: String,
    },

    /// Parsing the source failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl RegionError {
    /// Creates a malformed declaration error.
    #[must_use]
    pub fn malformed(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}
