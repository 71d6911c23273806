//! Target discovery: which files a run will attempt.

use crate::error::{Error, FileOperation, Result};
use std::path::{Path, PathBuf};

/// Legacy handler module, relative to the project root.
pub const LEGACY_HANDLERS_FILE: &str = "src/api/handlers_legacy.rs";
/// Handler directory scanned for targets, relative to the project root.
pub const HANDLERS_DIR: &str = "src/api/handlers";
pub const SOURCE_EXTENSION: &str = ".rs";

/// Where the targets of one run live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLayout {
    /// Paths attempted first, in order, whether or not they exist.
    pub extra_paths: Vec<PathBuf>,
    /// Directory whose immediate entries are scanned.
    pub directory: PathBuf,
    /// Name suffix an entry must carry to be kept.
    pub extension: String,
}

impl TargetLayout {
    /// The handler layout of a project rooted at `root`.
    pub fn handlers(root: &Path) -> Self {
        Self {
            extra_paths: vec![root.join(LEGACY_HANDLERS_FILE)],
            directory: root.join(HANDLERS_DIR),
            extension: SOURCE_EXTENSION.to_string(),
        }
    }

    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_targets(&self.directory, &self.extension, &self.extra_paths)
    }
}

/// List the immediate entries of `directory` whose name ends with `extension`,
/// appended after `extra_paths`.
///
/// Entries are not checked for being regular files: a directory named
/// `foo.rs` is returned and fails later when it is read. Matches are sorted
/// by name so the order does not depend on the filesystem.
pub fn discover_targets(
    directory: &Path,
    extension: &str,
    extra_paths: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .map_err(|e| Error::file_operation(directory, FileOperation::List, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::file_operation(directory, FileOperation::List, e))?;
        let name = entry.file_name();
        // Names are matched as raw bytes so non-UTF-8 entries survive the join.
        if name.as_encoded_bytes().ends_with(extension.as_bytes()) {
            names.push(name);
        }
    }
    names.sort();

    let mut targets = extra_paths.to_vec();
    targets.extend(names.into_iter().map(|name| directory.join(name)));
    Ok(targets)
}
