//! Line-ending conventions.

use std::fmt;

/// Line terminator written after inserted directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// Unix-style `\n`.
    #[default]
    Lf,
    /// Windows-style `\r\n`.
    CrLf,
}

impl LineEnding {
    /// Returns the terminator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Detects the convention of `text` from its first line break.
    ///
    /// Returns `None` when the text contains no `\n`. A lone `\r` is not
    /// treated as a convention of its own.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let position = text.find('\n')?;
        let preceded_by_cr = position > 0 && text.as_bytes().get(position - 1) == Some(&b'\r');
        Some(if preceded_by_cr { Self::CrLf } else { Self::Lf })
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lf => "lf",
            Self::CrLf => "crlf",
        })
    }
}
