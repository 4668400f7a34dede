//! Persistent, isolated storage for questionnaire reports.
//!
//! One [`ReportData`](esg_model::ReportData) aggregate is stored per report
//! id, under a key formed from a fixed prefix and the id. Every value that
//! crosses the store boundary is deep-cloned, so callers never share
//! mutable state with the store or with each other.
//!
//! # Features
//!
//! - **Default fallback**: reports that were never written (or whose stored
//!   payload is corrupt) read as their registry default
//! - **Pluggable media**: in-memory and file-backed key/value media
//! - **Export/import** of a report as pretty-printed JSON, with identity
//!   validation on import
//! - **Backup files** with atomic writes and async wrappers
//!
//! # Example
//!
//! ```ignore
//! use esg_model::{AnswerSet, DefaultRegistry, QuestionnaireId, ReportId};
//! use esg_store::{MemoryMedium, ReportStore};
//!
//! let store = ReportStore::new(MemoryMedium::new(), DefaultRegistry::builtin());
//! let report = ReportId::new("rep-1");
//! let gri2 = QuestionnaireId::new("GRI2");
//!
//! let mut answers = AnswerSet::new();
//! answers.insert("q1field", "x");
//! store.save_questionnaire_answers(&report, &gri2, &answers)?;
//!
//! assert_eq!(store.get_questionnaire_answers(&report, &gri2), answers);
//! ```
//!
//! # Architecture
//!
//! - `medium/` - Durable key/value media (memory, files)
//! - `codec.rs` - JSON encoding of aggregates
//! - `store.rs` - The report store
//! - `directory.rs` - Listing view over all known reports
//! - `io/` - Backup file export/import
//! - `error.rs` - Error types with user-friendly messages

mod codec;
mod directory;
mod error;
mod io;
mod medium;
mod store;

pub use codec::{decode_report_data, encode_report_data, encode_report_data_pretty};
pub use directory::ReportDirectory;
pub use error::{Result, StoreError};
pub use io::{export_to_file, export_to_file_async, import_from_file, import_from_file_async};
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use store::{DEFAULT_KEY_PREFIX, ReportStore};
