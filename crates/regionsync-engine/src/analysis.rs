//! Analyzer and fixer entry points.

use std::fmt;

use regionsync_syntax::{Declaration, SourceFile, SourceTree};
use serde::Serialize;
use tracing::warn;

use crate::error::RegionError;
use crate::locator::locate;
use crate::naming::canonical_name;
use crate::synchronizer::{SyncOptions, SyncOutcome, synchronize};

/// Identifier reported with every region diagnostic.
pub const DIAGNOSTIC_ID: &str = "RegionTogether";

/// Category reported with every region diagnostic.
pub const DIAGNOSTIC_CATEGORY: &str = "Comment";

/// Title of the corrective action.
pub const FIX_TITLE: &str = "Wrap in a region block";

/// Verdict for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Wrapped under the canonical name.
    Ok,
    /// Unwrapped or wrapped under another name.
    Violation {
        /// The declaration's identifier.
        identifier: String,
        /// The canonical region name.
        expected: String,
        /// Name found on the existing pair; `None` when there is no pair.
        found: Option<String>,
    },
}

impl Analysis {
    /// Returns whether the declaration needs fixing.
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(self, Self::Violation { .. })
    }
}

/// Checks whether `declaration` is wrapped under its canonical name.
///
/// # Errors
///
/// Returns [`RegionError::MalformedDeclaration`] when the declaration's
/// tokens do not belong to `tree`.
pub fn analyze(tree: &SourceTree, declaration: &Declaration) -> Result<Analysis, RegionError> {
    let expected = canonical_name(declaration.accessibility(), declaration.identifier());
    let found = locate(tree, declaration)?.map(|region| region.name);
    if found.as_deref() == Some(expected.as_str()) {
        return Ok(Analysis::Ok);
    }
    Ok(Analysis::Violation {
        identifier: declaration.identifier().to_owned(),
        expected,
        found,
    })
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported but not fatal.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
        })
    }
}

/// A region violation ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Always [`DIAGNOSTIC_ID`].
    pub id: &'static str,
    /// Always [`DIAGNOSTIC_CATEGORY`].
    pub category: &'static str,
    /// Always [`Severity::Warning`].
    pub severity: Severity,
    /// The declaration's identifier.
    pub identifier: String,
    /// The canonical region name.
    pub expected: String,
    /// Name found on the existing pair, if any.
    pub found: Option<String>,
    /// One-based line of the identifier.
    pub line: u32,
    /// One-based column of the identifier.
    pub column: u32,
}

impl Diagnostic {
    /// Renders the human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.found {
            None => format!(
                "'{}' is not wrapped in a region; expected '#region {}'",
                self.identifier, self.expected
            ),
            Some(found) => format!(
                "'{}' is wrapped in region '{found}'; expected '{}'",
                self.identifier, self.expected
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}]: {}",
            self.line,
            self.column,
            self.severity,
            self.id,
            self.message()
        )
    }
}

/// Returns a diagnostic when `declaration` violates the region rule.
///
/// # Errors
///
/// Returns [`RegionError::MalformedDeclaration`] when the declaration's
/// tokens do not belong to `tree`.
pub fn diagnose(
    tree: &SourceTree,
    declaration: &Declaration,
) -> Result<Option<Diagnostic>, RegionError> {
    let Analysis::Violation {
        identifier,
        expected,
        found,
    } = analyze(tree, declaration)?
    else {
        return Ok(None);
    };
    Ok(Some(Diagnostic {
        id: DIAGNOSTIC_ID,
        category: DIAGNOSTIC_CATEGORY,
        severity: Severity::Warning,
        identifier,
        expected,
        found,
        line: declaration.line(),
        column: declaration.column(),
    }))
}

/// Applies the single correction for `declaration`.
///
/// Returns `tree` itself when the declaration is already correct.
///
/// # Errors
///
/// Returns [`RegionError::MalformedDeclaration`] when the declaration's
/// tokens do not belong to `tree`.
pub fn fix(
    tree: &SourceTree,
    declaration: &Declaration,
    options: SyncOptions,
) -> Result<SourceTree, RegionError> {
    let expected = canonical_name(declaration.accessibility(), declaration.identifier());
    Ok(synchronize(tree, declaration, &expected, options)?.into_tree(tree))
}

/// A declaration the batch fixer had to skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixFailure {
    /// Identifier of the skipped declaration.
    pub identifier: String,
    /// One-based line of the declaration.
    pub line: u32,
    /// One-based column of the declaration.
    pub column: u32,
    /// Why it was skipped.
    pub message: String,
}

/// Outcome of fixing every declaration in a file.
#[derive(Debug, Clone)]
pub struct FixAllReport {
    /// The final tree.
    pub tree: SourceTree,
    /// Identifiers whose opening marker was renamed.
    pub renamed: Vec<String>,
    /// Identifiers that received a fresh marker pair.
    pub inserted: Vec<String>,
    /// Declarations that could not be fixed.
    pub failures: Vec<FixFailure>,
}

impl FixAllReport {
    /// Returns whether any declaration was changed.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        !self.renamed.is_empty() || !self.inserted.is_empty()
    }
}

/// Fixes every declaration of `file` in document order.
///
/// Each fix runs against the tree produced by the previous one. A
/// declaration that cannot be fixed is recorded in
/// [`FixAllReport::failures`] and the pass continues.
#[must_use]
pub fn fix_all(file: &SourceFile, options: SyncOptions) -> FixAllReport {
    let mut report = FixAllReport {
        tree: file.tree().clone(),
        renamed: Vec::new(),
        inserted: Vec::new(),
        failures: file
            .declarations()
            .unresolved()
            .iter()
            .map(|unresolved| FixFailure {
                identifier: unresolved.identifier.clone(),
                line: unresolved.line,
                column: unresolved.column,
                message: unresolved.reason.clone(),
            })
            .collect(),
    };

    for declaration in file.declarations() {
        let expected = canonical_name(declaration.accessibility(), declaration.identifier());
        match synchronize(&report.tree, declaration, &expected, options) {
            Ok(SyncOutcome::Unchanged) => {}
            Ok(SyncOutcome::Renamed(change)) => {
                report.renamed.push(declaration.identifier().to_owned());
                report.tree = change.into_tree();
            }
            Ok(SyncOutcome::Inserted(change)) => {
                report.inserted.push(declaration.identifier().to_owned());
                report.tree = change.into_tree();
            }
            Err(error) => {
                warn!(
                    identifier = declaration.identifier(),
                    %error,
                    "skipping declaration"
                );
                report.failures.push(FixFailure {
                    identifier: declaration.identifier().to_owned(),
                    line: declaration.line(),
                    column: declaration.column(),
                    message: error.to_string(),
                });
            }
        }
    }
    report
}
