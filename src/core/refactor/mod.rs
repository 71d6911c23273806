//! Literal token migration over a fixed set of source files.
//!
//! Loads each target, applies an ordered replacement table with exact
//! substring matching, and writes the file back only when it changed.

mod replace;
mod run;
mod table;
mod targets;

pub use replace::{apply_table, rewrite_file, FileChange, Rewrite};
pub use run::{run_rewrite, RewriteOptions};
pub use table::{Replacement, ReplacementTable};
pub use targets::{
    discover_targets, TargetLayout, HANDLERS_DIR, LEGACY_HANDLERS_FILE, SOURCE_EXTENSION,
};
