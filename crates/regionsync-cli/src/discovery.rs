//! Expansion of command-line paths into C# source files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regionsync_engine::RegionLint;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::errors::AppError;

/// Expands `paths` into the C# files they name, in a stable order.
///
/// Directories are searched recursively, skipping hidden ones. Explicit
/// files without a `.cs` extension are ignored.
pub(crate) fn collect_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>, AppError> {
    let mut sources = Vec::new();
    for path in paths {
        let metadata = fs::metadata(path).map_err(|source| AppError::Discover {
            path: path.clone(),
            source,
        })?;
        if metadata.is_dir() {
            walk(path, &mut sources)?;
        } else if RegionLint::supports_file(path) {
            sources.push(path.clone());
        } else {
            debug!(path = %path.display(), "skipping non-C# file");
        }
    }
    Ok(sources)
}

fn walk(dir: &Path, sources: &mut Vec<PathBuf>) -> Result<(), AppError> {
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden_dir(entry));

    for entry in walker {
        let entry = entry.map_err(|error| discover_error(dir, error))?;
        if entry.file_type().is_file() && RegionLint::supports_file(entry.path()) {
            sources.push(entry.into_path());
        }
    }
    Ok(())
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn discover_error(root: &Path, error: walkdir::Error) -> AppError {
    let path = error.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    AppError::Discover {
        path,
        source: io::Error::from(error),
    }
}
