//! Page paths.

use esg_model::{QuestionnaireId, ReportId};

/// Path of a report's overview page.
pub fn report_path(report_id: &ReportId) -> String {
    format!("/reports/{report_id}")
}

/// Path of one questionnaire page within a report.
pub fn questionnaire_path(report_id: &ReportId, questionnaire_id: &QuestionnaireId) -> String {
    format!("/reports/{report_id}/{questionnaire_id}")
}
