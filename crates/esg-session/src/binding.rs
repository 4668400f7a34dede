//! Per-page answer binding.

use esg_model::{AnswerSet, QuestionnaireId, ReportId};
use esg_store::{Result, StorageMedium};
use tracing::debug;

use crate::routes;
use crate::session::CurrentReportSession;

/// Local, editable answers of one questionnaire page.
///
/// The binding owns its copy; nothing another page does can change it.
/// Every save is a full snapshot write of the page's answer set.
#[derive(Debug, Clone)]
pub struct AnswerBinding {
    questionnaire_id: QuestionnaireId,
    report_id: Option<ReportId>,
    answers: AnswerSet,
    dirty: bool,
}

impl AnswerBinding {
    /// Create a binding for the page showing `questionnaire_id`.
    pub fn new(questionnaire_id: impl Into<QuestionnaireId>) -> Self {
        Self {
            questionnaire_id: questionnaire_id.into(),
            report_id: None,
            answers: AnswerSet::new(),
            dirty: false,
        }
    }

    pub fn questionnaire_id(&self) -> &QuestionnaireId {
        &self.questionnaire_id
    }

    /// Report the binding is attached to, once activated.
    pub fn report_id(&self) -> Option<&ReportId> {
        self.report_id.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Edit the local answers. Marks the binding as having unsaved changes.
    pub fn answers_mut(&mut self) -> &mut AnswerSet {
        self.dirty = true;
        &mut self.answers
    }

    /// Check if there are unsaved local edits.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Attach to `report_id`: make it the session's current report and load
    /// this page's stored answers into local state.
    ///
    /// Unsaved local edits are discarded.
    pub fn activate<M: StorageMedium>(
        &mut self,
        session: &mut CurrentReportSession<'_, M>,
        report_id: &ReportId,
    ) {
        session.set_current_report(report_id);
        self.answers = session.get_questionnaire_answers(report_id, &self.questionnaire_id);
        self.report_id = Some(report_id.clone());
        self.dirty = false;
        debug!(
            report_id = %report_id,
            questionnaire_id = %self.questionnaire_id,
            fields = self.answers.len(),
            "loaded answers"
        );
    }

    /// Replace the local answers with `answers` and persist them.
    ///
    /// Does nothing before the binding has been activated. On failure the
    /// local copy keeps the new answers and stays dirty.
    pub fn save<M: StorageMedium>(
        &mut self,
        session: &CurrentReportSession<'_, M>,
        answers: AnswerSet,
    ) -> Result<()> {
        self.answers = answers;
        self.dirty = true;
        self.save_current(session)
    }

    /// Persist the current local answers.
    pub fn save_current<M: StorageMedium>(
        &mut self,
        session: &CurrentReportSession<'_, M>,
    ) -> Result<()> {
        let Some(report_id) = &self.report_id else {
            debug!(questionnaire_id = %self.questionnaire_id, "save before activation ignored");
            return Ok(());
        };
        session.save_questionnaire_answers(report_id, &self.questionnaire_id, &self.answers)?;
        self.dirty = false;
        Ok(())
    }

    /// Path of the page before this one in `order`, or the report overview
    /// when this is the first page.
    pub fn back_path(&self, order: &[QuestionnaireId]) -> Option<String> {
        let report_id = self.report_id.as_ref()?;
        let position = order.iter().position(|q| q == &self.questionnaire_id)?;
        Some(match position.checked_sub(1) {
            Some(previous) => routes::questionnaire_path(report_id, &order[previous]),
            None => routes::report_path(report_id),
        })
    }

    /// Path of the page after this one in `order`, or the report overview
    /// when this is the last page.
    pub fn next_path(&self, order: &[QuestionnaireId]) -> Option<String> {
        let report_id = self.report_id.as_ref()?;
        let position = order.iter().position(|q| q == &self.questionnaire_id)?;
        Some(match order.get(position + 1) {
            Some(next) => routes::questionnaire_path(report_id, next),
            None => routes::report_path(report_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_model::DefaultRegistry;
    use esg_store::{MemoryMedium, ReportStore};

    fn order() -> Vec<QuestionnaireId> {
        ["GRI2", "GRI3", "GRI305"]
            .into_iter()
            .map(QuestionnaireId::new)
            .collect()
    }

    #[test]
    fn test_navigation_paths() {
        let store = ReportStore::new(MemoryMedium::new(), DefaultRegistry::builtin());
        let mut session = CurrentReportSession::new(&store);
        let report = ReportId::new("rep-1");

        let mut first = AnswerBinding::new("GRI2");
        assert_eq!(first.back_path(&order()), None);
        first.activate(&mut session, &report);
        assert_eq!(first.back_path(&order()).as_deref(), Some("/reports/rep-1"));
        assert_eq!(
            first.next_path(&order()).as_deref(),
            Some("/reports/rep-1/GRI3")
        );

        let mut last = AnswerBinding::new("GRI305");
        last.activate(&mut session, &report);
        assert_eq!(
            last.back_path(&order()).as_deref(),
            Some("/reports/rep-1/GRI3")
        );
        assert_eq!(last.next_path(&order()).as_deref(), Some("/reports/rep-1"));

        let mut unlisted = AnswerBinding::new("GRI999");
        unlisted.activate(&mut session, &report);
        assert_eq!(unlisted.next_path(&order()), None);
    }

    #[test]
    fn test_save_before_activation_is_noop() {
        let store = ReportStore::new(MemoryMedium::new(), DefaultRegistry::builtin());
        let session = CurrentReportSession::new(&store);
        let mut binding = AnswerBinding::new("GRI2");

        let mut answers = AnswerSet::new();
        answers.insert("field", "value");
        binding.save(&session, answers).unwrap();

        assert!(binding.is_dirty());
        assert!(store.medium().is_empty());
    }
}
