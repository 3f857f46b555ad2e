//! Header reconciliation into canonical shift records.
//!
//! One [`Normalizer`] covers the three upstream workflows:
//!
//! - [`HeaderStrategy::ExactHeadersOnly`]: headers already use the canonical names.
//! - [`HeaderStrategy::AliasFallback`]: try exact headers first and fall back to
//!   the alias table when any required cell is empty.
//! - [`HeaderStrategy::ExplicitMapping`]: the caller names the column for each field.
//!
//! Rows that remain incomplete are handled by the [`RowPolicy`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AliasTable;
use crate::error::{PairingError, PairingResult};
use crate::models::{CanonicalField, Language, RawRow, RawTable, ShiftRecord, normalize_header};

use super::date::{DateFormatHint, coerce_date};
use super::role::{infer_modality, normalize_role};

/// Number of headers quoted back in fail-fast error messages.
const HEADER_HINT_COUNT: usize = 5;

/// Caller-supplied field to column mapping.
pub type ColumnMapping = BTreeMap<CanonicalField, String>;

/// How input headers are matched to canonical fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStrategy {
    /// Read canonical header names only.
    ExactHeadersOnly,
    /// Exact headers, then the alias table when any required cell is empty.
    #[default]
    AliasFallback,
    /// Use [`NormalizerOptions::mapping`].
    ExplicitMapping,
}

/// What to do with rows that still miss a required field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Drop incomplete rows and continue.
    DropInvalid,
    /// Abort the run if any row is incomplete.
    #[default]
    FailFast,
}

/// Options for one normalization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerOptions {
    /// Header matching strategy.
    #[serde(default)]
    pub strategy: HeaderStrategy,
    /// Incomplete-row policy.
    #[serde(default)]
    pub row_policy: RowPolicy,
    /// Fill blank modality from the site name.
    #[serde(default = "default_infer_modality")]
    pub infer_modality: bool,
    /// Date interpretation.
    #[serde(default)]
    pub date_format: DateFormatHint,
    /// Column per field, used by [`HeaderStrategy::ExplicitMapping`].
    #[serde(default)]
    pub mapping: ColumnMapping,
}

fn default_infer_modality() -> bool {
    true
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            strategy: HeaderStrategy::default(),
            row_policy: RowPolicy::default(),
            infer_modality: default_infer_modality(),
            date_format: DateFormatHint::default(),
            mapping: ColumnMapping::new(),
        }
    }
}

impl NormalizerOptions {
    /// Options for the explicit-mapping workflow, which drops bad rows.
    pub fn with_mapping(mapping: ColumnMapping) -> Self {
        Self {
            strategy: HeaderStrategy::ExplicitMapping,
            row_policy: RowPolicy::DropInvalid,
            mapping,
            ..Self::default()
        }
    }
}

/// A row left out under [`RowPolicy::DropInvalid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRow {
    /// 1-based row number in the uploaded table.
    pub row: usize,
    /// Required fields that stayed empty.
    pub missing: Vec<CanonicalField>,
}

/// The normalizer's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRoster {
    /// Canonical records in input row order.
    pub records: Vec<ShiftRecord>,
    /// Rows dropped for missing fields.
    pub dropped: Vec<DroppedRow>,
    /// The header strategy that produced `records`.
    pub resolved_with: HeaderStrategy,
}

/// A row after header resolution, before validation.
#[derive(Debug, Clone, Default)]
struct DraftRow {
    site: String,
    date: String,
    modality: String,
    role: String,
    provider: String,
    language: String,
}

impl DraftRow {
    fn field(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::Site => &self.site,
            CanonicalField::Date => &self.date,
            CanonicalField::Modality => &self.modality,
            CanonicalField::Role => &self.role,
            CanonicalField::Provider => &self.provider,
            CanonicalField::Language => &self.language,
        }
    }

    fn missing(&self) -> Vec<CanonicalField> {
        CanonicalField::REQUIRED
            .into_iter()
            .filter(|f| self.field(*f).is_empty())
            .collect()
    }

    fn into_record(self) -> ShiftRecord {
        ShiftRecord {
            role: normalize_role(&self.role),
            language: Language::from_roster(&self.language),
            site: self.site,
            date: self.date,
            modality: self.modality,
            provider: self.provider,
        }
    }
}

/// Reconciles raw tables into canonical [`ShiftRecord`]s.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::config::AliasTable;
/// use stonebridge_pairing::models::{RawTable, Role};
/// use stonebridge_pairing::normalize::{HeaderStrategy, Normalizer, NormalizerOptions};
///
/// let table = RawTable::from_rows(
///     vec!["Location".into(), "Start Date".into(), "Area".into(), "Employee".into()],
///     vec![vec!["Austin Telehealth".into(), "3/4/24".into(), "LPA".into(), "Ann Smith".into()]],
/// );
///
/// let aliases = AliasTable::default();
/// let roster = Normalizer::new(&aliases, NormalizerOptions::default())
///     .normalize(&table)
///     .unwrap();
///
/// assert_eq!(roster.resolved_with, HeaderStrategy::AliasFallback);
/// let record = &roster.records[0];
/// assert_eq!(record.date, "2024-03-04");
/// assert_eq!(record.modality, "Telehealth");
/// assert_eq!(record.role, Role::Tester);
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    aliases: &'a AliasTable,
    options: NormalizerOptions,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer over an alias table.
    pub fn new(aliases: &'a AliasTable, options: NormalizerOptions) -> Self {
        Self { aliases, options }
    }

    /// Normalizes a table, applying the header strategy and row policy.
    ///
    /// # Errors
    ///
    /// - [`PairingError::MissingRequiredColumns`] when no row can populate a required
    ///   field, or a header-only table has no column for one
    /// - [`PairingError::EmptyResult`] when the table has no rows or every row is dropped
    /// - [`PairingError::UnresolvableRow`] / [`PairingError::UnresolvableRoster`] when
    ///   rows are incomplete under [`RowPolicy::FailFast`]
    pub fn normalize(&self, table: &RawTable) -> PairingResult<NormalizedRoster> {
        if table.is_empty() {
            let unmatched = self.unmatched_fields(table);
            if !unmatched.is_empty() {
                return Err(PairingError::MissingRequiredColumns { fields: unmatched });
            }
            return Err(PairingError::EmptyResult);
        }

        let (drafts, resolved_with) = match self.options.strategy {
            HeaderStrategy::ExactHeadersOnly => {
                (self.exact_pass(table), HeaderStrategy::ExactHeadersOnly)
            }
            HeaderStrategy::AliasFallback => {
                let exact = self.exact_pass(table);
                if exact.iter().all(|d| d.missing().is_empty()) {
                    debug!(rows = exact.len(), "Roster uses canonical headers");
                    (exact, HeaderStrategy::ExactHeadersOnly)
                } else {
                    warn!(
                        headers = ?table.headers(),
                        "Exact headers incomplete, falling back to alias mapping"
                    );
                    (self.alias_pass(table), HeaderStrategy::AliasFallback)
                }
            }
            HeaderStrategy::ExplicitMapping => {
                (self.mapping_pass(table), HeaderStrategy::ExplicitMapping)
            }
        };

        self.reconcile(table, drafts, resolved_with)
    }

    /// Required fields with no candidate column among the headers.
    fn unmatched_fields(&self, table: &RawTable) -> Vec<String> {
        let headers = table.headers();
        let has = |column: &str| headers.iter().any(|h| *h == normalize_header(column));
        let infers_modality = self.options.infer_modality
            && self.options.strategy != HeaderStrategy::ExactHeadersOnly;

        CanonicalField::REQUIRED
            .into_iter()
            .filter(|field| !(*field == CanonicalField::Modality && infers_modality))
            .filter(|field| match self.options.strategy {
                HeaderStrategy::ExactHeadersOnly => !has(field.as_str()),
                HeaderStrategy::AliasFallback => {
                    !has(field.as_str())
                        && !self.aliases.for_field(*field).iter().any(|a| has(a.as_str()))
                }
                HeaderStrategy::ExplicitMapping => !self
                    .options
                    .mapping
                    .get(field)
                    .is_some_and(|column| has(column.as_str())),
            })
            .map(|field| field.to_string())
            .collect()
    }

    fn exact_pass(&self, table: &RawTable) -> Vec<DraftRow> {
        table
            .rows()
            .iter()
            .map(|row| {
                self.draft(
                    |field| row.get(field.as_str()).to_string(),
                    false,
                )
            })
            .collect()
    }

    fn alias_pass(&self, table: &RawTable) -> Vec<DraftRow> {
        table
            .rows()
            .iter()
            .map(|row| {
                self.draft(
                    |field| pick(row, self.aliases.for_field(field)),
                    self.options.infer_modality,
                )
            })
            .collect()
    }

    fn mapping_pass(&self, table: &RawTable) -> Vec<DraftRow> {
        let mapping = &self.options.mapping;
        table
            .rows()
            .iter()
            .map(|row| {
                self.draft(
                    |field| {
                        mapping
                            .get(&field)
                            .map(|column| row.get(column).to_string())
                            .unwrap_or_default()
                    },
                    self.options.infer_modality,
                )
            })
            .collect()
    }

    /// Builds a draft from a per-field cell reader, coercing dates and
    /// optionally inferring modality.
    fn draft<F>(&self, cell: F, infer: bool) -> DraftRow
    where
        F: Fn(CanonicalField) -> String,
    {
        let site = cell(CanonicalField::Site);
        let mut modality = cell(CanonicalField::Modality);
        if modality.is_empty() && infer {
            modality = infer_modality(&site).to_string();
        }

        DraftRow {
            date: coerce_date(&cell(CanonicalField::Date), self.options.date_format),
            role: cell(CanonicalField::Role),
            provider: cell(CanonicalField::Provider),
            language: cell(CanonicalField::Language),
            modality,
            site,
        }
    }

    fn reconcile(
        &self,
        table: &RawTable,
        drafts: Vec<DraftRow>,
        resolved_with: HeaderStrategy,
    ) -> PairingResult<NormalizedRoster> {
        let unpopulated: Vec<String> = CanonicalField::REQUIRED
            .into_iter()
            .filter(|f| drafts.iter().all(|d| d.field(*f).is_empty()))
            .map(|f| f.to_string())
            .collect();
        if !unpopulated.is_empty() {
            return Err(PairingError::MissingRequiredColumns {
                fields: unpopulated,
            });
        }

        let mut records = Vec::with_capacity(drafts.len());
        let mut dropped = Vec::new();

        for (index, draft) in drafts.into_iter().enumerate() {
            let missing = draft.missing();
            if missing.is_empty() {
                records.push(draft.into_record());
            } else {
                dropped.push(DroppedRow {
                    row: index + 1,
                    missing,
                });
            }
        }

        if !dropped.is_empty() {
            match self.options.row_policy {
                RowPolicy::FailFast => return Err(unresolved_error(table, dropped)),
                RowPolicy::DropInvalid => {
                    for row in &dropped {
                        warn!(row = row.row, missing = ?row.missing, "Dropping incomplete roster row");
                    }
                }
            }
        }

        if records.is_empty() {
            return Err(PairingError::EmptyResult);
        }

        debug!(
            records = records.len(),
            dropped = dropped.len(),
            strategy = ?resolved_with,
            "Roster normalized"
        );

        Ok(NormalizedRoster {
            records,
            dropped,
            resolved_with,
        })
    }
}

/// Returns the first non-empty cell among `aliases`.
fn pick(row: &RawRow, aliases: &[String]) -> String {
    aliases
        .iter()
        .map(|alias| row.get(alias))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn unresolved_error(table: &RawTable, mut dropped: Vec<DroppedRow>) -> PairingError {
    if dropped.len() == 1 {
        let only = dropped.remove(0);
        return PairingError::UnresolvableRow {
            row: only.row,
            fields: only.missing.iter().map(|f| f.to_string()).collect(),
            headers: header_hint(table),
        };
    }

    PairingError::UnresolvableRoster {
        rows: dropped.iter().map(|d| d.row).collect(),
        headers: header_hint(table),
    }
}

fn header_hint(table: &RawTable) -> Vec<String> {
    table
        .headers()
        .iter()
        .take(HEADER_HINT_COUNT)
        .cloned()
        .collect()
}
