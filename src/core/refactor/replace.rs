//! The substitution pass over one file.

use super::table::ReplacementTable;
use crate::error::{Error, FileOperation, Result};
use std::path::Path;

/// Content after applying a table, plus how many substitutions were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub replacements: usize,
}

/// What happened to a file that was read successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// Content changed and was written back.
    Updated { replacements: usize },
    /// Content would change; dry run left it alone.
    WouldUpdate { replacements: usize },
    /// No source token occurred; the file was not touched.
    Unchanged,
}

/// Apply every pair in table order to `content`.
///
/// Each pair replaces all non-overlapping literal occurrences in the working
/// copy left by the previous pair.
pub fn apply_table(content: &str, table: &ReplacementTable) -> Rewrite {
    let mut working = content.to_string();
    let mut replacements = 0;

    for pair in table.iter() {
        let count = working.matches(pair.from.as_str()).count();
        if count == 0 {
            continue;
        }
        replacements += count;
        working = working.replace(pair.from.as_str(), &pair.to);
    }

    Rewrite {
        content: working,
        replacements,
    }
}

/// Read `path`, rewrite it with `table`, and write it back only if it changed.
pub fn rewrite_file(path: &Path, table: &ReplacementTable, dry_run: bool) -> Result<FileChange> {
    let original = std::fs::read_to_string(path)
        .map_err(|e| Error::file_operation(path, FileOperation::Read, e))?;

    let rewrite = apply_table(&original, table);
    if rewrite.content == original {
        return Ok(FileChange::Unchanged);
    }

    if dry_run {
        return Ok(FileChange::WouldUpdate {
            replacements: rewrite.replacements,
        });
    }

    std::fs::write(path, &rewrite.content)
        .map_err(|e| Error::file_operation(path, FileOperation::Write, e))?;

    Ok(FileChange::Updated {
        replacements: rewrite.replacements,
    })
}
