//! The report store.
//!
//! Sole owner of the durable per-report aggregates. Values are deep-cloned
//! on the way in and on the way out, so no caller ever aliases the store's
//! state or another caller's copy.

use esg_model::{
    AnswerSet, DeepClone, DefaultRegistry, QuestionnaireId, Report, ReportData,
    ReportDataUpdate, ReportId, ReportUpdate,
};
use tracing::{debug, error, warn};

use crate::codec::{decode_report_data, encode_report_data, encode_report_data_pretty};
use crate::error::{Result, StoreError};
use crate::medium::StorageMedium;

/// Prefix of every storage key written by a [`ReportStore`].
pub const DEFAULT_KEY_PREFIX: &str = "esg_report_";

/// Store of one [`ReportData`] aggregate per report id.
#[derive(Debug)]
pub struct ReportStore<M> {
    medium: M,
    registry: DefaultRegistry,
    key_prefix: String,
}

impl<M: StorageMedium> ReportStore<M> {
    /// Create a store over `medium` with the given default registry.
    pub fn new(medium: M, registry: DefaultRegistry) -> Self {
        Self {
            medium,
            registry,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Use a custom storage key prefix.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn registry(&self) -> &DefaultRegistry {
        &self.registry
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Storage key of `report_id`: the prefix followed by the id.
    pub fn storage_key(&self, report_id: &ReportId) -> String {
        format!("{}{}", self.key_prefix, report_id)
    }

    /// Load the persisted aggregate, if there is one.
    fn load_persisted(&self, report_id: &ReportId) -> Result<Option<ReportData>> {
        let key = self.storage_key(report_id);
        let stored = self
            .medium
            .get(&key)
            .map_err(|source| StoreError::Medium {
                operation: "read",
                key: key.clone(),
                source,
            })?;
        stored
            .map(|text| decode_report_data(&key, &text))
            .transpose()
    }

    /// Get the aggregate for `report_id`.
    ///
    /// Falls back to a fresh registry default when nothing is persisted or
    /// the persisted payload cannot be read. Never fails.
    pub fn get_report_data(&self, report_id: &ReportId) -> ReportData {
        match self.load_persisted(report_id) {
            Ok(Some(data)) => data.deep_clone(),
            Ok(None) => {
                debug!(report_id = %report_id, "no stored data, using defaults");
                self.default_report_data(report_id)
            }
            Err(e) => {
                warn!(report_id = %report_id, error = %e, "failed to load report data, using defaults");
                self.default_report_data(report_id)
            }
        }
    }

    fn default_report_data(&self, report_id: &ReportId) -> ReportData {
        self.registry.default_report_data(report_id).deep_clone()
    }

    /// Shallow-merge `update` over the current aggregate and persist it.
    ///
    /// `last_modified` is always set to the write time, whatever the update
    /// carried.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregate could not be encoded or written.
    /// Nothing is persisted in that case.
    pub fn save_report_data(&self, report_id: &ReportId, update: ReportDataUpdate) -> Result<()> {
        let mut data = self.get_report_data(report_id);
        update.merge_into(&mut data);
        data.touch();
        self.persist(report_id, &data)
    }

    fn persist(&self, report_id: &ReportId, data: &ReportData) -> Result<()> {
        let key = self.storage_key(report_id);
        let result = encode_report_data(data).and_then(|text| {
            self.medium
                .set(&key, &text)
                .map_err(|source| StoreError::Medium {
                    operation: "write",
                    key: key.clone(),
                    source,
                })
        });

        match &result {
            Ok(()) => debug!(report_id = %report_id, "saved report data"),
            Err(e) => error!(report_id = %report_id, error = %e, "failed to save report data"),
        }
        result
    }

    /// Merge `updates` over the report metadata.
    ///
    /// The stored `report.id` is re-asserted to `report_id` afterwards.
    pub fn update_report(&self, report_id: &ReportId, updates: &ReportUpdate) -> Result<()> {
        let mut report = self.get_report_data(report_id).report;
        updates.apply_to(&mut report);
        report.id = report_id.clone();
        self.save_report_data(report_id, ReportDataUpdate::new().report(report))
    }

    /// Replace the answers of one questionnaire with a copy of `answers`.
    pub fn save_questionnaire_answers(
        &self,
        report_id: &ReportId,
        questionnaire_id: &QuestionnaireId,
        answers: &AnswerSet,
    ) -> Result<()> {
        let mut all = self.get_report_data(report_id).answers.deep_clone();
        all.insert(questionnaire_id.clone(), answers.deep_clone());
        self.save_report_data(report_id, ReportDataUpdate::new().answers(all))
    }

    /// Answers of one questionnaire; empty if none were saved.
    pub fn get_questionnaire_answers(
        &self,
        report_id: &ReportId,
        questionnaire_id: &QuestionnaireId,
    ) -> AnswerSet {
        self.get_report_data(report_id)
            .questionnaire(questionnaire_id)
            .map(DeepClone::deep_clone)
            .unwrap_or_default()
    }

    /// Current metadata of every registered report, in registry order.
    ///
    /// Persisted aggregates of ids outside the registry are not listed.
    pub fn get_all_reports(&self) -> Vec<Report> {
        self.registry
            .ids()
            .map(|id| self.get_report_data(id).report.deep_clone())
            .collect()
    }

    /// Delete the durable entry of `report_id`. Later reads see the default.
    ///
    /// Resetting a report that was never written succeeds.
    pub fn reset_report_data(&self, report_id: &ReportId) -> Result<()> {
        let key = self.storage_key(report_id);
        match self.medium.remove(&key) {
            Ok(()) => {
                debug!(report_id = %report_id, "reset report data");
                Ok(())
            }
            Err(source) => {
                let e = StoreError::Medium {
                    operation: "delete",
                    key,
                    source,
                };
                error!(report_id = %report_id, error = %e, "failed to reset report data");
                Err(e)
            }
        }
    }

    /// Serialize the current aggregate as pretty-printed JSON.
    pub fn export_report_data(&self, report_id: &ReportId) -> Result<String> {
        encode_report_data_pretty(&self.get_report_data(report_id))
    }

    /// Import an aggregate previously produced by [`export_report_data`].
    ///
    /// Returns `Ok(false)` without persisting anything when `text` is not
    /// valid JSON, has no `report.id` equal to `report_id`, or is not a
    /// valid aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the validated aggregate could not be written.
    ///
    /// [`export_report_data`]: Self::export_report_data
    pub fn import_report_data(&self, report_id: &ReportId, text: &str) -> Result<bool> {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!(report_id = %report_id, error = %e, "rejected import: invalid JSON");
                return Ok(false);
            }
        };

        let found = value
            .get("report")
            .and_then(|report| report.get("id"))
            .and_then(serde_json::Value::as_str);
        if found != Some(report_id.as_str()) {
            warn!(
                report_id = %report_id,
                found = found.unwrap_or("<missing>"),
                "rejected import: report id mismatch"
            );
            return Ok(false);
        }

        let data: ReportData = match serde_json::from_value(value) {
            Ok(data) => data,
            Err(e) => {
                warn!(report_id = %report_id, error = %e, "rejected import: invalid report data");
                return Ok(false);
            }
        };

        self.save_report_data(report_id, ReportDataUpdate::from(data))?;
        Ok(true)
    }

    /// Ids that currently have a durable entry under this store's prefix.
    pub fn persisted_report_ids(&self) -> Result<Vec<ReportId>> {
        let keys = self.medium.keys().map_err(|source| StoreError::Medium {
            operation: "list",
            key: format!("{}*", self.key_prefix),
            source,
        })?;
        Ok(keys
            .iter()
            .filter_map(|key| key.strip_prefix(self.key_prefix.as_str()))
            .map(ReportId::from)
            .collect())
    }
}
