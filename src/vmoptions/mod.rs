//! Locating and patching `.vmoptions` files

pub mod engine;
pub mod locator;
pub mod permission;
pub mod rewrite;
pub mod rules;
pub mod transform;

// Re-exports for library consumers
pub use engine::{apply, clear, status, BatchReport, FileChange, FileReport, FileScan, Operation};
pub use locator::find_vmoptions_files;
