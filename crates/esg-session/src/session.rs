//! Current-report session state.

use esg_model::{AnswerSet, QuestionnaireId, Report, ReportData, ReportId, ReportUpdate};
use esg_store::{ReportStore, Result, StorageMedium};
use tracing::debug;

/// Which report is active in this session, plus a cached copy of its
/// metadata.
///
/// Created at session start and dropped at session end. The cache is kept
/// coherent with every write made through this value; writes made directly
/// against the store are picked up on the next [`set_current_report`].
///
/// [`set_current_report`]: Self::set_current_report
#[derive(Debug)]
pub struct CurrentReportSession<'s, M> {
    store: &'s ReportStore<M>,
    active_report_id: Option<ReportId>,
    active_report: Option<Report>,
}

impl<'s, M: StorageMedium> CurrentReportSession<'s, M> {
    /// Start a session with no active report.
    pub fn new(store: &'s ReportStore<M>) -> Self {
        Self {
            store,
            active_report_id: None,
            active_report: None,
        }
    }

    pub fn store(&self) -> &'s ReportStore<M> {
        self.store
    }

    pub fn active_report_id(&self) -> Option<&ReportId> {
        self.active_report_id.as_ref()
    }

    /// Cached metadata of the active report.
    pub fn active_report(&self) -> Option<&Report> {
        self.active_report.as_ref()
    }

    fn is_active(&self, report_id: &ReportId) -> bool {
        self.active_report_id.as_ref() == Some(report_id)
    }

    fn refresh_active(&mut self) {
        if let Some(id) = &self.active_report_id {
            self.active_report = Some(self.store.get_report_data(id).report);
        }
    }

    /// Make `report_id` the active report and load its metadata.
    ///
    /// Replaces any previous state wholesale.
    pub fn set_current_report(&mut self, report_id: &ReportId) {
        debug!(report_id = %report_id, "activating report");
        self.active_report = Some(self.store.get_report_data(report_id).report);
        self.active_report_id = Some(report_id.clone());
    }

    /// Update report metadata; refreshes the cache if the report is active.
    pub fn update_report(&mut self, report_id: &ReportId, updates: &ReportUpdate) -> Result<()> {
        let result = self.store.update_report(report_id, updates);
        if self.is_active(report_id) {
            self.refresh_active();
        }
        result
    }

    /// Reset a report to its default; refreshes the cache if it is active.
    pub fn reset_report_data(&mut self, report_id: &ReportId) -> Result<()> {
        let result = self.store.reset_report_data(report_id);
        if self.is_active(report_id) {
            self.refresh_active();
        }
        result
    }

    pub fn save_questionnaire_answers(
        &self,
        report_id: &ReportId,
        questionnaire_id: &QuestionnaireId,
        answers: &AnswerSet,
    ) -> Result<()> {
        self.store
            .save_questionnaire_answers(report_id, questionnaire_id, answers)
    }

    pub fn get_questionnaire_answers(
        &self,
        report_id: &ReportId,
        questionnaire_id: &QuestionnaireId,
    ) -> AnswerSet {
        self.store
            .get_questionnaire_answers(report_id, questionnaire_id)
    }

    pub fn get_report_data(&self, report_id: &ReportId) -> ReportData {
        self.store.get_report_data(report_id)
    }

    pub fn get_all_reports(&self) -> Vec<Report> {
        self.store.get_all_reports()
    }
}
