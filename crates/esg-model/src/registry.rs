//! Static registry of default reports.
//!
//! The registry is the authoritative list of which reports exist. It is a
//! configuration-time input; the store never adds to it.

use chrono::Utc;

use crate::{ModelError, Report, ReportData, ReportId, ReportStatus, Result};

/// Ordered, read-only table of default report metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRegistry {
    reports: Vec<Report>,
}

impl DefaultRegistry {
    /// Create a registry from report entries, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateReportId`] if two entries share an id.
    pub fn new(reports: Vec<Report>) -> Result<Self> {
        for (index, report) in reports.iter().enumerate() {
            if reports[..index].iter().any(|r| r.id == report.id) {
                return Err(ModelError::DuplicateReportId {
                    id: report.id.clone(),
                });
            }
        }
        Ok(Self { reports })
    }

    /// The registry shipped with the application.
    pub fn builtin() -> Self {
        Self {
            reports: vec![
                Report::new("rep-1", "Annual Sustainability Report 2024")
                    .with_date_created("2024-01-15")
                    .with_period("FY2024")
                    .with_status(ReportStatus::Draft),
                Report::new("rep-2", "Annual Sustainability Report 2023")
                    .with_date_created("2023-02-10")
                    .with_period("FY2023")
                    .with_status(ReportStatus::Completed),
                Report::new("rep-3", "Climate Disclosure Q2 2024")
                    .with_date_created("2024-04-02")
                    .with_period("Q2 2024")
                    .with_status(ReportStatus::InProgress),
            ],
        }
    }

    pub fn get(&self, id: &ReportId) -> Option<&Report> {
        self.reports.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &ReportId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ReportId> {
        self.reports.iter().map(|r| &r.id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Report> {
        self.reports.iter()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Default metadata for `id`.
    ///
    /// Ids missing from the registry get a placeholder: the id doubles as
    /// the name, status is `Draft` and the creation date is today.
    pub fn default_report(&self, id: &ReportId) -> Report {
        match self.get(id) {
            Some(report) => report.clone(),
            None => Report::new(id.clone(), id.as_str())
                .with_date_created(Utc::now().format("%Y-%m-%d").to_string()),
        }
    }

    /// A fresh default aggregate for `id`: default metadata, no answers,
    /// stamped with the current time.
    pub fn default_report_data(&self, id: &ReportId) -> ReportData {
        ReportData::new(self.default_report(id))
    }
}

impl Default for DefaultRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a DefaultRegistry {
    type Item = &'a Report;
    type IntoIter = std::slice::Iter<'a, Report>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.iter()
    }
}
