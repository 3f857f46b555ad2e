//! Shift count summaries.
//!
//! Counts are computed from canonical rows before pairing and have no
//! effect on the assignment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;

/// A name and the number of shifts it appears on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCount {
    /// Site or provider name.
    pub name: String,
    /// Number of shifts.
    pub count: usize,
}

/// Per-site and per-provider shift counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// Shifts per site, sorted by site name.
    pub shifts_per_site: Vec<ShiftCount>,
    /// Shifts per provider, busiest first, then by name.
    pub shifts_per_provider: Vec<ShiftCount>,
}

/// Counts shifts per site and per provider.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::models::{Language, Role, ShiftRecord};
/// use stonebridge_pairing::summary::summarize;
///
/// let shift = |site: &str, provider: &str| ShiftRecord {
///     site: site.to_string(),
///     date: "2024-01-05".to_string(),
///     modality: "Live".to_string(),
///     role: Role::Interviewer,
///     provider: provider.to_string(),
///     language: Language::English,
/// };
///
/// let summary = summarize(&[shift("B", "Ann"), shift("A", "Ann"), shift("B", "Bob")]);
/// assert_eq!(summary.shifts_per_site[0].name, "A");
/// assert_eq!(summary.shifts_per_provider[0].name, "Ann");
/// assert_eq!(summary.shifts_per_provider[0].count, 2);
/// ```
pub fn summarize(records: &[ShiftRecord]) -> ShiftSummary {
    let shifts_per_site = count_by(records, |r| &r.site);

    let mut shifts_per_provider = count_by(records, |r| &r.provider);
    shifts_per_provider.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    ShiftSummary {
        shifts_per_site,
        shifts_per_provider,
    }
}

fn count_by<F>(records: &[ShiftRecord], key: F) -> Vec<ShiftCount>
where
    F: Fn(&ShiftRecord) -> &String,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(key(record).as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(name, count)| ShiftCount {
            name: name.to_string(),
            count,
        })
        .collect()
}
