//! The top-level pass: every target, one at a time, failures isolated.

use std::io::{ErrorKind, Write};
use std::path::Path;

use super::replace::{rewrite_file, FileChange};
use super::table::ReplacementTable;
use super::targets::TargetLayout;
use crate::output::RunSummary;

#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    /// Report what would change without writing.
    pub dry_run: bool,
}

/// Rewrite every target in `layout`, writing the per-file report to `report`.
///
/// Never fails: a directory that cannot be listed, a missing file, or a file
/// that cannot be read or written is reported and the run moves on.
pub fn run_rewrite(
    layout: &TargetLayout,
    table: &ReplacementTable,
    options: RewriteOptions,
    report: &mut dyn Write,
) -> RunSummary {
    let mut summary = RunSummary::new(options.dry_run);

    let targets = match layout.discover() {
        Ok(targets) => targets,
        Err(err) => {
            line(
                report,
                format_args!("Error processing {}: {}", layout.directory.display(), err),
            );
            summary.record_error(&layout.directory, &err);
            layout.extra_paths.clone()
        }
    };

    log_status!(
        "rewrite",
        "{} target(s), {} replacement pair(s)",
        targets.len(),
        table.len()
    );

    for target in &targets {
        if target.exists() {
            process(target, table, options, report, &mut summary);
        } else {
            line(report, format_args!("File not found: {}", target.display()));
            summary.record_not_found(target);
        }
    }

    summary
}

fn process(
    path: &Path,
    table: &ReplacementTable,
    options: RewriteOptions,
    report: &mut dyn Write,
    summary: &mut RunSummary,
) {
    line(report, format_args!("Processing {}...", path.display()));

    match rewrite_file(path, table, options.dry_run) {
        Ok(FileChange::Updated { replacements }) => {
            line(report, format_args!("Updated {}", path.display()));
            summary.record_updated(path, replacements);
        }
        Ok(FileChange::WouldUpdate { replacements }) => {
            line(report, format_args!("Would update {}", path.display()));
            summary.record_updated(path, replacements);
        }
        Ok(FileChange::Unchanged) => {
            line(report, format_args!("No changes in {}", path.display()));
            summary.record_unchanged(path);
        }
        Err(err) => {
            line(
                report,
                format_args!("Error processing {}: {}", path.display(), err),
            );
            summary.record_error(path, &err);
        }
    }
}

// A closed stdout must not abort the pass; other sink failures go to stderr.
fn line(report: &mut dyn Write, args: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(report, "{}", args) {
        if e.kind() != ErrorKind::BrokenPipe {
            log_status!("rewrite", "Failed to write report line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::FileStatus;
    use tempfile::tempdir;

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/api/handlers")).unwrap();
        dir
    }

    fn run(root: &Path, dry_run: bool) -> (RunSummary, String) {
        let mut out = Vec::new();
        let summary = run_rewrite(
            &TargetLayout::handlers(root),
            &ReplacementTable::state_groups(),
            RewriteOptions { dry_run },
            &mut out,
        );
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn missing_legacy_file_is_reported_and_run_continues() {
        let dir = project();
        let products = dir.path().join("src/api/handlers/products.rs");
        std::fs::write(&products, "state.product_service.list()\n").unwrap();

        let (summary, out) = run(dir.path(), false);
        let legacy = dir.path().join("src/api/handlers_legacy.rs");

        let expected = format!(
            "File not found: {}\nProcessing {}...\nUpdated {}\n",
            legacy.display(),
            products.display(),
            products.display()
        );
        assert_eq!(out, expected);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.updated, 1);
    }

    #[test]
    fn unchanged_file_is_not_rewritten() {
        let dir = project();
        let health = dir.path().join("src/api/handlers/health.rs");
        std::fs::write(&health, "pub async fn health() {}\n").unwrap();
        let before = std::fs::metadata(&health).unwrap().modified().unwrap();

        let (summary, out) = run(dir.path(), false);

        assert!(out.contains(&format!("No changes in {}", health.display())));
        assert_eq!(summary.unchanged, 1);
        assert_eq!(std::fs::metadata(&health).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn failing_file_does_not_stop_later_files() {
        let dir = project();
        std::fs::create_dir(dir.path().join("src/api/handlers/a_dir.rs")).unwrap();
        let tax = dir.path().join("src/api/handlers/tax.rs");
        std::fs::write(&tax, "state.tax_service\n").unwrap();

        let (summary, out) = run(dir.path(), false);

        assert!(out.contains("Error processing"));
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(std::fs::read_to_string(&tax).unwrap(), "state.commerce.taxes\n");
    }

    #[test]
    fn unreadable_directory_falls_back_to_extra_paths() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/api")).unwrap();
        let legacy = dir.path().join("src/api/handlers_legacy.rs");
        std::fs::write(&legacy, "state.sms_service\n").unwrap();

        let (summary, _out) = run(dir.path(), false);

        assert_eq!(summary.errors, 1);
        assert_eq!(summary.items[0].status, FileStatus::Error);
        assert_eq!(summary.items[1].status, FileStatus::Updated);
        assert_eq!(std::fs::read_to_string(&legacy).unwrap(), "state.system.sms\n");
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let dir = project();
        let events = dir.path().join("src/api/handlers/events.rs");
        std::fs::write(&events, "state.event_service\n").unwrap();

        let (summary, out) = run(dir.path(), true);

        assert!(out.contains(&format!("Would update {}", events.display())));
        assert_eq!(summary.items[1].status, FileStatus::WouldUpdate);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.would_update, 1);
        assert_eq!(std::fs::read_to_string(&events).unwrap(), "state.event_service\n");
    }

    #[cfg(unix)]
    #[test]
    fn rewrites_handler_with_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = project();
        let handler = dir
            .path()
            .join("src/api/handlers")
            .join(OsStr::from_bytes(b"caf\xff.rs"));
        std::fs::write(&handler, "state.tax_service\n").unwrap();

        let (summary, _out) = run(dir.path(), false);

        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(std::fs::read_to_string(&handler).unwrap(), "state.commerce.taxes\n");
    }

    struct FailingSink(ErrorKind);

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(self.0, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn report_write_failures_do_not_abort_the_pass() {
        for kind in [ErrorKind::BrokenPipe, ErrorKind::Other] {
            let dir = project();
            let pricing = dir.path().join("src/api/handlers/pricing.rs");
            std::fs::write(&pricing, "state.pricing_service\n").unwrap();

            let summary = run_rewrite(
                &TargetLayout::handlers(dir.path()),
                &ReplacementTable::state_groups(),
                RewriteOptions::default(),
                &mut FailingSink(kind),
            );

            assert_eq!(summary.updated, 1);
            assert_eq!(
                std::fs::read_to_string(&pricing).unwrap(),
                "state.commerce.pricing\n"
            );
        }
    }

    #[test]
    fn custom_layout_uses_given_paths() {
        let dir = tempdir().unwrap();
        let only = dir.path().join("only.txt");
        std::fs::write(&only, "state.label_service").unwrap();
        let layout = TargetLayout {
            extra_paths: vec![only.clone()],
            directory: dir.path().to_path_buf(),
            extension: ".none".to_string(),
        };

        let mut out = Vec::new();
        let summary = run_rewrite(
            &layout,
            &ReplacementTable::state_groups(),
            RewriteOptions::default(),
            &mut out,
        );

        assert_eq!(summary.total(), 1);
        assert_eq!(summary.items[0].path, only.display().to_string());
        assert_eq!(std::fs::read_to_string(&only).unwrap(), "state.system.labels");
    }
}
