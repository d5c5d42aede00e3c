//! Region synchronisation for C# members.
//!
//! Every method and property is expected to sit inside a
//! `#region <prefix><name>` / `#endregion` pair, where the prefix encodes
//! its accessibility (`+` public, `#` protected, `~` internal, `#~`
//! protected internal, `-` otherwise). This crate checks that rule and
//! repairs violations:
//!
//! - [`locate`] finds the pair bracketing a declaration, if any
//! - [`synchronize`] renames a stale opening marker or inserts a fresh pair
//! - [`analyze`], [`diagnose`], [`fix`] and [`fix_all`] wrap both for
//!   hosts that report warnings or apply corrections
//! - [`RegionLint`] works on whole files and caches the C# parser
//!
//! All operations are pure over an immutable
//! [`SourceTree`](regionsync_syntax::SourceTree): fixes return a new tree
//! and leave every byte outside the touched markers as it was.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use regionsync_engine::RegionLint;
//!
//! let lint = RegionLint::new();
//! let source = "class C\n{\n    public void Run() { }\n}\n";
//!
//! let diagnostics = lint.check_file(Path::new("C.cs"), source)?;
//! assert_eq!(diagnostics.len(), 1);
//!
//! let fixed = lint.fix_file(Path::new("C.cs"), source)?;
//! assert_eq!(
//!     fixed.text,
//!     "class C\n{\n    #region +Run\n    public void Run() { }\n    #endregion\n}\n"
//! );
//! # Ok::<(), regionsync_engine::RegionError>(())
//! ```

mod analysis;
mod error;
mod lint;
mod locator;
mod naming;
mod synchronizer;

pub use analysis::{
    Analysis, DIAGNOSTIC_CATEGORY, DIAGNOSTIC_ID, Diagnostic, FIX_TITLE, FixAllReport, FixFailure,
    Severity, analyze, diagnose, fix, fix_all,
};
pub use error::RegionError;
pub use lint::{FileDiagnostic, FileFix, RegionLint};
pub use locator::{LocatedRegion, MarkerPair, TriviaRef, active_closing, active_opening, locate};
pub use naming::canonical_name;
pub use synchronizer::{Change, SyncOptions, SyncOutcome, TextEdit, apply_edits, synchronize};

#[cfg(test)]
mod tests;
