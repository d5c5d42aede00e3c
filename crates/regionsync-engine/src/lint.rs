//! File-level region checking and fixing.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use regionsync_syntax::{Parser, SourceFile, SyntaxError, is_csharp_path};
use tracing::{debug, warn};

use crate::analysis::{Diagnostic, FixAllReport, diagnose, fix_all};
use crate::error::RegionError;
use crate::synchronizer::SyncOptions;

/// Checks and fixes region wrappers in whole C# files.
///
/// Files without a `.cs` extension are skipped.
///
/// # Thread Safety
///
/// This type is thread-safe and can be shared across threads. The cached
/// parser is protected by a mutex.
pub struct RegionLint {
    parser: Mutex<Option<Parser>>,
    options: SyncOptions,
}

impl RegionLint {
    /// Creates a lint using the source's own line endings for fixes.
    ///
    /// The parser is created lazily on first use.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_options(SyncOptions::new())
    }

    /// Creates a lint applying `options` to every fix.
    #[must_use]
    pub const fn with_options(options: SyncOptions) -> Self {
        Self {
            parser: Mutex::new(None),
            options,
        }
    }

    /// Returns the options applied to fixes.
    #[must_use]
    pub const fn options(&self) -> SyncOptions {
        self.options
    }

    /// Reports every region violation in one file.
    ///
    /// Declarations that cannot be resolved are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be initialised or fails to
    /// produce a tree.
    pub fn check_file(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<FileDiagnostic>, RegionError> {
        if !Self::supports_file(path) {
            return Ok(Vec::new());
        }
        let file = self.parse(content)?;

        let mut diagnostics = Vec::new();
        for declaration in file.declarations() {
            match diagnose(file.tree(), declaration) {
                Ok(Some(diagnostic)) => diagnostics.push(FileDiagnostic {
                    path: path.to_path_buf(),
                    diagnostic,
                }),
                Ok(None) => {}
                Err(error) => warn!(path = %path.display(), %error, "skipping declaration"),
            }
        }
        debug!(
            path = %path.display(),
            declarations = file.declarations().len(),
            violations = diagnostics.len(),
            "checked file"
        );
        Ok(diagnostics)
    }

    /// Reports every region violation across several files.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Self::check_file`].
    pub fn check_files<'a, I>(&self, files: I) -> Result<Vec<FileDiagnostic>, RegionError>
    where
        I: IntoIterator<Item = (&'a Path, &'a str)>,
    {
        let mut all_diagnostics = Vec::new();
        for (path, content) in files {
            all_diagnostics.extend(self.check_file(path, content)?);
        }
        Ok(all_diagnostics)
    }

    /// Fixes every declaration in one file.
    ///
    /// Unsupported files come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be initialised or fails to
    /// produce a tree.
    pub fn fix_file(&self, path: &Path, content: &str) -> Result<FileFix, RegionError> {
        if !Self::supports_file(path) {
            return Ok(FileFix {
                path: path.to_path_buf(),
                text: content.to_owned(),
                renamed: Vec::new(),
                inserted: Vec::new(),
                failures: Vec::new(),
            });
        }
        let file = self.parse(content)?;
        let FixAllReport {
            tree,
            renamed,
            inserted,
            failures,
        } = fix_all(&file, self.options);
        debug!(
            path = %path.display(),
            renamed = renamed.len(),
            inserted = inserted.len(),
            failures = failures.len(),
            "fixed file"
        );
        Ok(FileFix {
            path: path.to_path_buf(),
            text: tree.text(),
            renamed,
            inserted,
            failures: failures.into_iter().map(|failure| failure.message).collect(),
        })
    }

    /// Returns whether files at `path` are checked.
    #[must_use]
    pub fn supports_file(path: &Path) -> bool {
        is_csharp_path(path)
    }

    fn parse(&self, content: &str) -> Result<SourceFile, RegionError> {
        let mut slot = self
            .parser
            .lock()
            .map_err(|_| SyntaxError::internal_error("parser lock poisoned"))?;
        if slot.is_none() {
            *slot = Some(Parser::new()?);
        }
        let parser = slot
            .as_mut()
            .ok_or_else(|| SyntaxError::internal_error("parser missing after initialisation"))?;
        Ok(parser.parse(content)?)
    }
}

impl Default for RegionLint {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegionLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionLint")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A diagnostic tied to the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    /// Path of the checked file.
    pub path: PathBuf,
    /// The violation.
    pub diagnostic: Diagnostic,
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.diagnostic)
    }
}

/// The result of fixing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFix {
    /// Path of the fixed file.
    pub path: PathBuf,
    /// Full text after all fixes.
    pub text: String,
    /// Identifiers whose opening marker was renamed.
    pub renamed: Vec<String>,
    /// Identifiers that received a fresh marker pair.
    pub inserted: Vec<String>,
    /// Messages for declarations that were skipped.
    pub failures: Vec<String>,
}

impl FileFix {
    /// Returns whether the text differs from the input.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        !self.renamed.is_empty() || !self.inserted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn lint() -> RegionLint {
        RegionLint::new()
    }

    #[rstest]
    fn reports_unwrapped_member_with_location(lint: RegionLint) {
        let path = Path::new("Widget.cs");
        let diagnostics = lint
            .check_file(path, "class Widget\n{\n    public void Run() { }\n}\n")
            .expect("check");
        let rendered: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            ["Widget.cs:3:17: warning[RegionTogether]: 'Run' is not wrapped in a region; expected '#region +Run'"]
        );
    }

    #[rstest]
    fn skips_unsupported_files(lint: RegionLint) {
        let path = Path::new("notes.txt");
        assert!(lint.check_file(path, "public void Run() { }").expect("check").is_empty());
        let fixed = lint.fix_file(path, "untouched").expect("fix");
        assert_eq!(fixed.text, "untouched");
        assert!(!fixed.has_changes());
    }

    #[rstest]
    fn checks_several_files(lint: RegionLint) {
        let clean = "class A\n{\n    #region -Go\n    void Go() { }\n    #endregion\n}\n";
        let dirty = "class B\n{\n    void Go() { }\n}\n";
        let files = [
            (Path::new("A.cs"), clean),
            (Path::new("B.cs"), dirty),
        ];
        let diagnostics = lint.check_files(files).expect("check");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.first().map(|d| d.path.clone()), Some(PathBuf::from("B.cs")));
    }

    #[rstest]
    fn fixing_then_checking_is_clean(lint: RegionLint) {
        let path = Path::new("C.cs");
        let fixed = lint
            .fix_file(path, "class C\n{\n    int Count { get; set; }\n    public void Run() { }\n}\n")
            .expect("fix");
        assert_eq!(fixed.inserted, ["Count", "Run"]);
        assert!(lint.check_file(path, &fixed.text).expect("check").is_empty());
    }
}
