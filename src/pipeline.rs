//! End-to-end pairing run.
//!
//! Ties the stages together: normalize the roster, build preferences from
//! the optional provider master, count shifts, pair, and export.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::PairingResult;
use crate::export::{export_filename, to_calendar_csv};
use crate::models::{CalendarEvent, GapRecord, RawTable, ViolationRecord};
use crate::normalize::{DroppedRow, HeaderStrategy, Normalizer, NormalizerOptions};
use crate::pairing::PairingEngine;
use crate::preferences::PreferenceContext;
use crate::summary::{ShiftCount, summarize};

/// The result of one pairing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingReport {
    /// Identifier for this run.
    pub run_id: Uuid,
    /// Wall-clock time the report was generated.
    pub generated_at: NaiveDateTime,
    /// Header strategy that resolved the roster.
    pub resolved_with: HeaderStrategy,
    /// Calendar events in export order.
    pub events: Vec<CalendarEvent>,
    /// Preference violations.
    pub violations: Vec<ViolationRecord>,
    /// Unfilled role slots.
    pub gaps: Vec<GapRecord>,
    /// Rows dropped during normalization.
    pub dropped_rows: Vec<DroppedRow>,
    /// Shifts per site, sorted by name.
    pub shifts_per_site: Vec<ShiftCount>,
    /// Shifts per provider, busiest first.
    pub shifts_per_provider: Vec<ShiftCount>,
    /// Calendar import CSV.
    pub calendar_csv: String,
    /// Suggested file name for `calendar_csv`.
    pub filename: String,
}

/// Runs the full pipeline, stamping the report with the local time.
pub fn run_pairing(
    roster: &RawTable,
    master: Option<&RawTable>,
    options: &NormalizerOptions,
    config: &ConfigLoader,
) -> PairingResult<PairingReport> {
    run_pairing_at(roster, master, options, config, Local::now().naive_local())
}

/// Runs the full pipeline with a fixed generation time.
pub fn run_pairing_at(
    roster: &RawTable,
    master: Option<&RawTable>,
    options: &NormalizerOptions,
    config: &ConfigLoader,
    generated_at: NaiveDateTime,
) -> PairingResult<PairingReport> {
    let run_id = Uuid::new_v4();
    info!(
        run_id = %run_id,
        rows = roster.len(),
        has_master = master.is_some(),
        strategy = ?options.strategy,
        "Starting pairing run"
    );

    let normalizer = Normalizer::new(config.aliases(), options.clone());
    let normalized = normalizer.normalize(roster)?;

    let context = PreferenceContext::build(master, config.rules());
    let summary = summarize(&normalized.records);
    let outcome = PairingEngine::new(&context, config.rules()).pair_all(&normalized.records);
    let calendar_csv = to_calendar_csv(&outcome.events)?;

    info!(
        run_id = %run_id,
        shifts = normalized.records.len(),
        dropped = normalized.dropped.len(),
        events = outcome.events.len(),
        violations = outcome.violations.len(),
        gaps = outcome.gaps.len(),
        "Pairing run finished"
    );

    Ok(PairingReport {
        run_id,
        generated_at,
        resolved_with: normalized.resolved_with,
        events: outcome.events,
        violations: outcome.violations,
        gaps: outcome.gaps,
        dropped_rows: normalized.dropped,
        shifts_per_site: summary.shifts_per_site,
        shifts_per_provider: summary.shifts_per_provider,
        calendar_csv,
        filename: export_filename(generated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PairingError;
    use chrono::NaiveDate;

    fn roster(rows: &[[&str; 5]]) -> RawTable {
        RawTable::from_rows(
            ["site", "date", "modality", "role", "provider"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_report_carries_events_summary_and_filename() {
        let table = roster(&[
            ["San Antonio", "2024-01-05", "Live", "Interviewer", "Lakaii Jones"],
            ["San Antonio", "2024-01-05", "Live", "Tester", "Virginia Parker"],
        ]);

        let report = run_pairing_at(
            &table,
            None,
            &NormalizerOptions::default(),
            &ConfigLoader::default(),
            fixed_time(),
        )
        .unwrap();

        assert_eq!(report.events.len(), 1);
        assert_eq!(
            report.events[0].subject,
            "SA | Pairing: Lakaii Jones + Virginia Parker"
        );
        assert!(report.violations.is_empty());
        assert_eq!(report.shifts_per_site[0].count, 2);
        assert_eq!(report.filename, "Stonebridge_Pairings_2024-01-05_09-30-00.csv");
        assert!(report.calendar_csv.starts_with("Subject,Start Date"));
        assert_eq!(report.resolved_with, HeaderStrategy::ExactHeadersOnly);
    }

    #[test]
    fn test_normalization_errors_propagate() {
        let table = RawTable::from_rows(vec!["site".to_string(), "provider".to_string()], vec![]);
        let result = run_pairing(
            &table,
            None,
            &NormalizerOptions::default(),
            &ConfigLoader::default(),
        );
        match result {
            Err(PairingError::MissingRequiredColumns { fields }) => {
                assert_eq!(fields, vec!["date", "role"]);
            }
            other => panic!("Expected MissingRequiredColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_each_run_gets_a_fresh_id() {
        let table = roster(&[["Austin", "2024-01-05", "Live", "Solo", "Ann"]]);
        let options = NormalizerOptions::default();
        let config = ConfigLoader::default();

        let first = run_pairing(&table, None, &options, &config).unwrap();
        let second = run_pairing(&table, None, &options, &config).unwrap();
        assert_ne!(first.run_id, second.run_id);
        assert_eq!(first.events, second.events);
    }
}
