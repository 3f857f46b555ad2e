//! Roster normalization.
//!
//! This module maps arbitrary upstream column names onto the canonical
//! schema {site, date, modality, role, provider, language}, coerces dates,
//! reduces role descriptions and infers modality.

mod date;
mod normalizer;
mod role;

pub use date::{DateFormatHint, coerce_date};
pub use normalizer::{
    ColumnMapping, DroppedRow, HeaderStrategy, NormalizedRoster, Normalizer, NormalizerOptions,
    RowPolicy,
};
pub use role::{LIVE, SOLO_KEYWORDS, TELEHEALTH, TESTER_KEYWORDS, infer_modality, normalize_role};
