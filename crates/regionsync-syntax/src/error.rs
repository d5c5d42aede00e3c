//! Error types for the C# front-end.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning C# source into a [`SourceFile`](crate::SourceFile).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The Tree-sitter parser rejected the C# grammar.
    #[error("failed to initialise C# parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter produced no tree for the input.
    #[error("failed to parse C#: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// The file extension does not denote a C# source file.
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension {
        /// The extension that was not recognised.
        extension: String,
    },

    /// The path carries no extension at all.
    #[error("could not determine language for path: {}", path.display())]
    UnknownLanguage {
        /// The path without an extension.
        path: PathBuf,
    },

    /// Internal error indicating a bug or system failure.
    #[error("internal error: {message}")]
    InternalError {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates an unsupported extension error.
    #[must_use]
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }

    /// Creates an unknown language error.
    #[must_use]
    pub const fn unknown_language(path: PathBuf) -> Self {
        Self::UnknownLanguage { path }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
