//! Structural copies of value graphs.
//!
//! A deep clone shares no mutable substructure with its source: scalars are
//! copied (date/time values included), sequences and records are
//! reallocated with every element cloned recursively.
//! Every value the store hands out or takes in passes through here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{AnswerSet, QuestionnaireId, Report, ReportData, ReportId};

/// Produce a referentially independent copy of `self`.
pub trait DeepClone {
    fn deep_clone(&self) -> Self;
}

/// Deep-clone any supported value.
pub fn deep_clone<T: DeepClone>(value: &T) -> T {
    value.deep_clone()
}

impl DeepClone for Value {
    fn deep_clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(n.clone()),
            Value::String(s) => Value::String(s.clone()),
            Value::Array(items) => Value::Array(items.iter().map(DeepClone::deep_clone).collect()),
            Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.deep_clone()))
                    .collect(),
            ),
        }
    }
}

impl DeepClone for DateTime<Utc> {
    fn deep_clone(&self) -> Self {
        *self
    }
}

impl DeepClone for String {
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone(&self) -> Self {
        self.as_ref().map(DeepClone::deep_clone)
    }
}

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone(&self) -> Self {
        self.iter().map(DeepClone::deep_clone).collect()
    }
}

impl<K: Clone + Ord, V: DeepClone> DeepClone for BTreeMap<K, V> {
    fn deep_clone(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.deep_clone()))
            .collect()
    }
}

impl DeepClone for ReportId {
    fn deep_clone(&self) -> Self {
        ReportId::new(self.as_str())
    }
}

impl DeepClone for QuestionnaireId {
    fn deep_clone(&self) -> Self {
        QuestionnaireId::new(self.as_str())
    }
}

impl DeepClone for AnswerSet {
    fn deep_clone(&self) -> Self {
        self.iter()
            .map(|(field, value)| (field.clone(), value.deep_clone()))
            .collect()
    }
}

impl DeepClone for Report {
    fn deep_clone(&self) -> Self {
        Report {
            id: self.id.deep_clone(),
            name: self.name.clone(),
            date_created: self.date_created.clone(),
            period: self.period.clone(),
            status: self.status.clone(),
        }
    }
}

impl DeepClone for ReportData {
    fn deep_clone(&self) -> Self {
        ReportData {
            report: self.report.deep_clone(),
            answers: self.answers.deep_clone(),
            last_modified: self.last_modified.deep_clone(),
        }
    }
}
