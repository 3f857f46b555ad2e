//! Request types for the pairing API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::RawTable;
use crate::normalize::{
    ColumnMapping, DateFormatHint, HeaderStrategy, NormalizerOptions, RowPolicy,
};

/// A roster or provider master row as uploaded: column name to cell value.
pub type JsonRecord = Map<String, Value>;

/// Request body for the `/pairings` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairingRequest {
    /// Roster rows.
    pub roster: Vec<JsonRecord>,
    /// Optional provider master rows (language and preferred tester).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_master: Option<Vec<JsonRecord>>,
    /// Explicit field to column mapping. Implies the explicit-mapping
    /// strategy and the drop-invalid row policy unless those are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<ColumnMapping>,
    /// Fill blank modality from the site name.
    #[serde(default = "default_infer_modality")]
    pub infer_modality: bool,
    /// Date interpretation.
    #[serde(default)]
    pub date_format: DateFormatHint,
    /// Header matching strategy override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_strategy: Option<HeaderStrategy>,
    /// Incomplete-row policy override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_policy: Option<RowPolicy>,
}

fn default_infer_modality() -> bool {
    true
}

impl PairingRequest {
    /// Builds the normalizer options this request asks for.
    pub fn options(&self) -> NormalizerOptions {
        let base = match &self.mapping {
            Some(mapping) => NormalizerOptions::with_mapping(mapping.clone()),
            None => NormalizerOptions::default(),
        };

        NormalizerOptions {
            strategy: self.header_strategy.unwrap_or(base.strategy),
            row_policy: self.row_policy.unwrap_or(base.row_policy),
            infer_modality: self.infer_modality,
            date_format: self.date_format,
            ..base
        }
    }

    /// Returns the roster as a raw table.
    pub fn roster_table(&self) -> RawTable {
        RawTable::from_json_records(&self.roster)
    }

    /// Returns the provider master as a raw table, if one was sent.
    pub fn master_table(&self) -> Option<RawTable> {
        self.provider_master
            .as_deref()
            .map(RawTable::from_json_records)
    }
}
