//! Backup file operations.
//!
//! This module handles:
//! - Exporting a report to a JSON backup file with atomic writes
//! - Importing a report from a backup file
//! - Async wrappers that run on the blocking thread pool

mod backup;

pub use backup::{export_to_file, export_to_file_async, import_from_file, import_from_file_async};
