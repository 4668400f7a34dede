//! JSON encoding of report aggregates.

use esg_model::ReportData;

use crate::error::{Result, StoreError};

/// Encode an aggregate compactly for the storage medium.
pub fn encode_report_data(data: &ReportData) -> Result<String> {
    serde_json::to_string(data).map_err(|source| StoreError::Serialization { source })
}

/// Encode an aggregate as pretty-printed JSON (the export format).
pub fn encode_report_data_pretty(data: &ReportData) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|source| StoreError::Serialization { source })
}

/// Decode a stored payload. `key` only labels the error.
pub fn decode_report_data(key: &str, text: &str) -> Result<ReportData> {
    serde_json::from_str(text).map_err(|source| StoreError::InvalidPayload {
        key: key.to_string(),
        source,
    })
}
