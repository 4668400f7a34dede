//! Data model for questionnaire-driven sustainability reports.
//!
//! A report instance ([`Report`]) owns one answer set per questionnaire.
//! Together with a modification timestamp they form the [`ReportData`]
//! aggregate, which is the unit of persistence in `esg-store`.
//!
//! # Architecture
//!
//! - `ids.rs` - Opaque identifiers (`ReportId`, `QuestionnaireId`)
//! - `report.rs` - Report metadata, lifecycle status and partial updates
//! - `answers.rs` - Schema-agnostic answer sets
//! - `report_data.rs` - The persisted aggregate and its top-level update
//! - `registry.rs` - Static registry of default reports
//! - `deep_clone.rs` - Structural copies for values crossing the store boundary

mod answers;
mod deep_clone;
mod error;
mod ids;
mod registry;
mod report;
mod report_data;

pub use answers::{AnswerSet, AnswerValue};
pub use deep_clone::{DeepClone, deep_clone};
pub use error::{ModelError, Result};
pub use ids::{QuestionnaireId, ReportId};
pub use registry::DefaultRegistry;
pub use report::{Report, ReportStatus, ReportUpdate};
pub use report_data::{QuestionnaireAnswers, ReportData, ReportDataUpdate};
