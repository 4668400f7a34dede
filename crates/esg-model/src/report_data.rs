//! The persisted per-report aggregate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AnswerSet, QuestionnaireId, Report};

/// Answers of every questionnaire in one report.
pub type QuestionnaireAnswers = BTreeMap<QuestionnaireId, AnswerSet>;

/// Everything persisted for one report: metadata, answers and the time of
/// the last successful write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub report: Report,

    #[serde(default)]
    pub answers: QuestionnaireAnswers,

    pub last_modified: DateTime<Utc>,
}

impl ReportData {
    /// Create an aggregate with no answers, stamped with the current time.
    pub fn new(report: Report) -> Self {
        Self {
            report,
            answers: BTreeMap::new(),
            last_modified: Utc::now(),
        }
    }

    /// Update the last modified timestamp.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Answers of one questionnaire, if any were saved.
    pub fn questionnaire(&self, questionnaire_id: &QuestionnaireId) -> Option<&AnswerSet> {
        self.answers.get(questionnaire_id)
    }
}

/// Top-level partial update of a [`ReportData`].
///
/// Each present field fully replaces the corresponding field of the
/// current aggregate; nothing is merged below the top level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDataUpdate {
    pub report: Option<Report>,
    pub answers: Option<QuestionnaireAnswers>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl ReportDataUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn report(mut self, report: Report) -> Self {
        self.report = Some(report);
        self
    }

    #[must_use]
    pub fn answers(mut self, answers: QuestionnaireAnswers) -> Self {
        self.answers = Some(answers);
        self
    }

    #[must_use]
    pub fn last_modified(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_modified = Some(timestamp);
        self
    }

    /// Shallow-merge the present fields over `current`.
    pub fn merge_into(self, current: &mut ReportData) {
        if let Some(report) = self.report {
            current.report = report;
        }
        if let Some(answers) = self.answers {
            current.answers = answers;
        }
        if let Some(timestamp) = self.last_modified {
            current.last_modified = timestamp;
        }
    }
}

impl From<ReportData> for ReportDataUpdate {
    fn from(data: ReportData) -> Self {
        Self {
            report: Some(data.report),
            answers: Some(data.answers),
            last_modified: Some(data.last_modified),
        }
    }
}
