// Public modules
pub mod error;
pub mod output;
pub mod refactor;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{FileOutcome, FileStatus, RunSummary};
