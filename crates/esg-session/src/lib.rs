//! Session-scoped "current report" state for questionnaire pages.
//!
//! - [`CurrentReportSession`] tracks which report is active and caches its
//!   metadata, delegating every durable read and write to the store
//! - [`AnswerBinding`] is the load/save cycle each questionnaire page runs
//! - `routes` builds page paths for back/forward navigation
//!
//! The session is an explicit value passed to whoever needs it; there is no
//! ambient global state.

mod binding;
mod routes;
mod session;

pub use binding::AnswerBinding;
pub use routes::{questionnaire_path, report_path};
pub use session::CurrentReportSession;
