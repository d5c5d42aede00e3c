//! C# file detection and grammar selection.

use std::path::Path;

use crate::error::SyntaxError;

/// File extensions treated as C# source.
pub const CSHARP_EXTENSIONS: &[&str] = &["cs"];

/// Returns whether `path` names a C# source file.
#[must_use]
pub fn is_csharp_path(path: &Path) -> bool {
    ensure_csharp_path(path).is_ok()
}

/// Checks that `path` names a C# source file.
///
/// # Errors
///
/// Returns [`SyntaxError::UnknownLanguage`] when the path has no extension
/// and [`SyntaxError::UnsupportedExtension`] for any other extension.
pub fn ensure_csharp_path(path: &Path) -> Result<(), SyntaxError> {
    let Some(raw) = path.extension() else {
        return Err(SyntaxError::unknown_language(path.to_path_buf()));
    };
    let extension = raw.to_string_lossy();
    let normalised = extension.to_ascii_lowercase();
    if CSHARP_EXTENSIONS.contains(&normalised.as_str()) {
        Ok(())
    } else {
        Err(SyntaxError::unsupported_extension(extension))
    }
}

/// Returns the Tree-sitter grammar for C#.
#[must_use]
pub fn tree_sitter_language() -> tree_sitter::Language {
    tree_sitter_c_sharp::LANGUAGE.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("src/Widget.cs", true)]
    #[case("Legacy.CS", true)]
    #[case("script.csx", false)]
    #[case("README.md", false)]
    #[case("Makefile", false)]
    fn recognises_csharp_paths(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_csharp_path(Path::new(path)), expected);
    }

    #[test]
    fn reports_offending_extension() {
        let error = ensure_csharp_path(Path::new("notes.txt")).expect_err("txt is not C#");
        assert!(matches!(
            error,
            SyntaxError::UnsupportedExtension { ref extension } if extension == "txt"
        ));
    }
}
