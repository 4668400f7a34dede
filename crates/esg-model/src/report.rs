//! Report metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ReportId};

/// Metadata of one report instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Report identifier. Never changed by partial updates.
    pub id: ReportId,

    /// Display name (e.g. "Annual Sustainability Report 2024").
    pub name: String,

    /// Creation date as shown in listings (e.g. "2024-01-15").
    pub date_created: String,

    /// Reporting period (e.g. "FY2024").
    pub period: String,

    /// Lifecycle status.
    pub status: ReportStatus,
}

impl Report {
    /// Create report metadata with the given id and name.
    pub fn new(id: impl Into<ReportId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date_created: String::new(),
            period: String::new(),
            status: ReportStatus::default(),
        }
    }

    /// Set the creation date.
    #[must_use]
    pub fn with_date_created(mut self, date: impl Into<String>) -> Self {
        self.date_created = date.into();
        self
    }

    /// Set the reporting period.
    #[must_use]
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    /// Set the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = status;
        self
    }
}

/// Lifecycle status of a report.
///
/// Serialized as its display label. Labels other than the three lifecycle
/// labels are kept verbatim in [`ReportStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
    Other(String),
}

impl ReportStatus {
    /// The known lifecycle statuses in order.
    pub const ALL: [ReportStatus; 3] = [Self::Draft, Self::InProgress, Self::Completed];

    /// Map a stored label to a status without loss.
    ///
    /// Only exact display labels map to the known variants; anything else
    /// becomes [`ReportStatus::Other`].
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        match label.as_str() {
            "Draft" => Self::Draft,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            _ => Self::Other(label),
        }
    }

    /// Get display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Other(label) => label,
        }
    }

    /// Check if this is one of the known lifecycle statuses.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ReportStatus {
    fn from(label: String) -> Self {
        Self::from_label(label)
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportStatus {
    type Err = ModelError;

    /// Parses user input into a known lifecycle status. Accepts the display
    /// label or a kebab/snake-case spelling (`"In Progress"`, `"in-progress"`,
    /// `"in_progress"`). Use [`ReportStatus::from_label`] to keep custom labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ModelError::UnknownStatus {
                label: s.to_string(),
            }),
        }
    }
}

/// Partial update of report metadata.
///
/// There is no `id` field: the identity of a report cannot be changed by
/// a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportUpdate {
    pub name: Option<String>,
    pub date_created: Option<String>,
    pub period: Option<String>,
    pub status: Option<ReportStatus>,
}

impl ReportUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn date_created(mut self, date: impl Into<String>) -> Self {
        self.date_created = Some(date.into());
        self
    }

    #[must_use]
    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check if the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_created.is_none()
            && self.period.is_none()
            && self.status.is_none()
    }

    /// Merge the present fields over `report`.
    pub fn apply_to(&self, report: &mut Report) {
        if let Some(name) = &self.name {
            report.name.clone_from(name);
        }
        if let Some(date) = &self.date_created {
            report.date_created.clone_from(date);
        }
        if let Some(period) = &self.period {
            report.period.clone_from(period);
        }
        if let Some(status) = &self.status {
            report.status.clone_from(status);
        }
    }
}
