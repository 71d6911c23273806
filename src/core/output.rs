//! Public output types for a rewrite run.
//!
//! Every target gets one `FileOutcome`; `RunSummary` keeps them in order with
//! per-status counters. Used by the CLI for the JSON response and by library
//! callers that want to inspect a run.

use serde::Serialize;
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Updated,
    WouldUpdate,
    Unchanged,
    NotFound,
    Error,
}

/// Result for one target path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub path: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "is_zero")]
    pub replacements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Outcome of a whole run, in target order.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub dry_run: bool,
    pub updated: u32,
    pub would_update: u32,
    pub unchanged: u32,
    pub not_found: u32,
    pub errors: u32,
    pub replacements: usize,
    pub items: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// A changed file: written, or only counted as `would_update` on a dry run.
    pub fn record_updated(&mut self, path: &Path, replacements: usize) {
        self.replacements += replacements;
        let status = if self.dry_run {
            self.would_update += 1;
            FileStatus::WouldUpdate
        } else {
            self.updated += 1;
            FileStatus::Updated
        };
        self.push(path, status, replacements, None);
    }

    pub fn record_unchanged(&mut self, path: &Path) {
        self.unchanged += 1;
        self.push(path, FileStatus::Unchanged, 0, None);
    }

    pub fn record_not_found(&mut self, path: &Path) {
        self.not_found += 1;
        self.push(path, FileStatus::NotFound, 0, None);
    }

    pub fn record_error(&mut self, path: &Path, error: &Error) {
        self.errors += 1;
        self.push(path, FileStatus::Error, 0, Some(error));
    }

    /// Targets that were attempted, including missing ones.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    fn push(&mut self, path: &Path, status: FileStatus, replacements: usize, error: Option<&Error>) {
        self.items.push(FileOutcome {
            path: path.display().to_string(),
            status,
            replacements,
            error: error.map(|e| e.message.clone()),
            error_code: error.map(|e| e.code.as_str().to_string()),
        });
    }
}
