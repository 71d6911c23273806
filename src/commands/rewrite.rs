use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use state_rewrite::refactor::{self, ReplacementTable, RewriteOptions, TargetLayout};
use state_rewrite::{Error, RunSummary};

use crate::commands::CmdResult;

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Project root holding src/api/handlers (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RewriteOutput {
    #[serde(rename = "rewrite", rename_all = "camelCase")]
    Rewrite {
        root: String,
        replacement_pairs: usize,
        #[serde(flatten)]
        summary: RunSummary,
    },
}

/// Run the state-group migration over the handler sources under the root.
///
/// Per-file failures are part of the summary, not an `Err`; the exit code
/// stays 0 once the pass has started.
pub fn run(args: RewriteArgs, report: &mut dyn Write) -> CmdResult<RewriteOutput> {
    let root = resolve_root(args.root.as_deref())?;
    state_rewrite::log_status!("rewrite", "Project root {}", root.display());

    let table = ReplacementTable::state_groups();
    let layout = TargetLayout::handlers(&root);
    let options = RewriteOptions {
        dry_run: args.dry_run,
    };

    let summary = refactor::run_rewrite(&layout, &table, options, report);

    state_rewrite::log_status!(
        "rewrite",
        "{} updated, {} would update, {} unchanged, {} not found, {} failed",
        summary.updated,
        summary.would_update,
        summary.unchanged,
        summary.not_found,
        summary.errors
    );

    Ok((
        RewriteOutput::Rewrite {
            root: root.display().to_string(),
            replacement_pairs: table.len(),
            summary,
        },
        0,
    ))
}

fn resolve_root(root: Option<&Path>) -> state_rewrite::Result<PathBuf> {
    let root = match root {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        })?,
    };

    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "root",
            format!("'{}' is not a directory", root.display()),
            Some(root.display().to_string()),
        )
        .with_hint("Pass --root <DIR> pointing at the project checkout"));
    }

    Ok(root)
}
