//! Integration tests for the Stonebridge pairing engine.
//!
//! This test suite covers the end-to-end pairing scenarios:
//! - Hardcoded affinity pairs
//! - Unpaired interviewers and testers
//! - Language matching via the fallback roster
//! - Date coercion and header aliasing
//! - Provider master preferred testers
//! - Error cases through the HTTP API

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use stonebridge_pairing::api::{AppState, create_router};
use stonebridge_pairing::config::{AffinityRule, AliasTable, ConfigLoader, RulesConfig};
use stonebridge_pairing::input::read_csv;
use stonebridge_pairing::models::{RawTable, ViolationType};
use stonebridge_pairing::normalize::{NormalizerOptions, RowPolicy};
use stonebridge_pairing::pipeline::{PairingReport, run_pairing, run_pairing_at};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/stonebridge").expect("Failed to load config")
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(load_config()))
}

fn csv_table(data: &str) -> RawTable {
    read_csv(data.as_bytes(), "test.csv").unwrap()
}

fn pair_csv(roster: &str, master: Option<&str>) -> PairingReport {
    let roster = csv_table(roster);
    let master = master.map(csv_table);
    run_pairing(
        &roster,
        master.as_ref(),
        &NormalizerOptions::default(),
        &load_config(),
    )
    .unwrap()
}

async fn post_pairings(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pairings")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn shift(site: &str, date: &str, modality: &str, role: &str, provider: &str) -> Value {
    json!({
        "site": site,
        "date": date,
        "modality": modality,
        "role": role,
        "provider": provider
    })
}

// =============================================================================
// Affinity pairs
// =============================================================================

#[test]
fn test_hardcoded_pair_satisfies_preference() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         San Antonio Behavioral,2024-01-05,Live,Interviewer,Lakaii Jones\n\
         San Antonio Behavioral,2024-01-05,Live,Tester,Virginia Parker\n",
        None,
    );

    assert_eq!(report.events.len(), 1);
    let event = &report.events[0];
    assert!(event.subject.starts_with("SA | Pairing:"));
    assert_eq!(event.subject, "SA | Pairing: Lakaii Jones + Virginia Parker");
    assert!(event.description.contains("Preference satisfied"));
    assert_eq!(event.location, "San Antonio Behavioral");
    assert_eq!(event.start_date, "2024-01-05");
    assert_eq!(event.end_date, "2024-01-05");
    assert!(report.violations.is_empty());
    assert!(report.gaps.is_empty());
}

#[test]
fn test_priority_interviewer_with_other_tester_is_flagged() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Interviewer,Lakaii Jones\n\
         Austin,2024-01-05,Live,Tester,Bob Lee\n",
        None,
    );

    assert_eq!(report.events.len(), 1);
    assert!(report.events[0].description.contains("Language-matched"));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(
        report.violations[0].violation_type,
        ViolationType::PreferenceNotMet
    );
    assert_eq!(report.violations[0].tester.as_deref(), Some("Bob Lee"));
}

// =============================================================================
// Gaps
// =============================================================================

#[test]
fn test_interviewer_without_tester_is_a_gap_and_violation() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Telehealth,Interviewer,Jane Doe\n",
        None,
    );

    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].subject, "Austin | GAP: Jane Doe (no tester)");
    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].interviewer.as_deref(), Some("Jane Doe"));
    assert!(report.gaps[0].tester.is_none());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(
        report.violations[0].violation_type,
        ViolationType::UnpairedInterviewer
    );
}

#[test]
fn test_leftover_tester_and_solo_events() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         SA,2024-01-05,Live,Tester,Ann Smith\n\
         SA,2024-01-05,Live,Solo,Cy Young\n",
        None,
    );

    let subjects: Vec<&str> = report.events.iter().map(|e| e.subject.as_str()).collect();
    assert_eq!(
        subjects,
        vec!["SA | GAP: Ann Smith (tester unassigned)", "SA | SOLO: Cy Young"]
    );
    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].tester.as_deref(), Some("Ann Smith"));
    assert!(report.violations.is_empty());
}

#[test]
fn test_groups_pair_independently() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Interviewer,Jane Doe\n\
         Austin,2024-01-06,Live,Tester,Ann Smith\n",
        None,
    );

    assert_eq!(report.gaps.len(), 2);
    assert_eq!(report.events.len(), 2);
}

// =============================================================================
// Language matching
// =============================================================================

#[test]
fn test_spanish_interviewer_gets_spanish_tester() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Interviewer,Cintia Martinez\n\
         Austin,2024-01-05,Live,Tester,Bob Lee\n\
         Austin,2024-01-05,Live,Tester,Noemi Martinez\n",
        None,
    );

    let pairing = &report.events[0];
    assert_eq!(pairing.subject, "Austin | Pairing: Cintia Martinez + Noemi Martinez");
    assert!(pairing.description.contains("Language-matched"));

    // score 2 is below the preference threshold for a Spanish speaker
    assert_eq!(report.violations.len(), 1);
    assert_eq!(
        report.violations[0].violation_type,
        ViolationType::PreferenceNotMet
    );

    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].tester.as_deref(), Some("Bob Lee"));
}

#[test]
fn test_master_language_overrides_fallback_roster() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Interviewer,Jane Doe\n\
         Austin,2024-01-05,Live,Tester,Bob Lee\n\
         Austin,2024-01-05,Live,Tester,Maria Lopez\n",
        Some("provider,language\nJane Doe,Spanish\nMaria Lopez,Spanish\n"),
    );

    assert_eq!(
        report.events[0].subject,
        "Austin | Pairing: Jane Doe + Maria Lopez"
    );
}

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn test_slashed_dates_become_iso() {
    let report = pair_csv(
        "Location,Start Date,Area,Employee\n\
         Austin Telehealth,3/4/24,Solo,Ann Smith\n",
        None,
    );

    let event = &report.events[0];
    assert_eq!(event.start_date, "2024-03-04");
    assert!(event.description.contains("Telehealth"));
}

#[test]
fn test_canonical_iso_date_passes_through() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-03-04,Live,Solo,Ann Smith\n",
        None,
    );

    assert_eq!(report.events[0].start_date, "2024-03-04");
}

#[test]
fn test_drop_invalid_keeps_complete_rows() {
    let roster = csv_table(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Solo,Ann Smith\n\
         Austin,,Live,Solo,Bob Lee\n",
    );
    let options = NormalizerOptions {
        row_policy: RowPolicy::DropInvalid,
        ..NormalizerOptions::default()
    };

    let report = run_pairing(&roster, None, &options, &load_config()).unwrap();
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.dropped_rows.len(), 1);
    assert_eq!(report.dropped_rows[0].row, 2);
}

// =============================================================================
// Preferred testers
// =============================================================================

#[test]
fn test_preferred_tester_wins_regardless_of_language() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Interviewer,Jane Doe\n\
         Austin,2024-01-05,Live,Tester,Bob Lee\n\
         Austin,2024-01-05,Live,Tester,Ann Smith\n",
        Some("provider,preferred_tester\nJane Doe,Ann\n"),
    );

    let pairing = &report.events[0];
    assert_eq!(pairing.subject, "Austin | Pairing: Jane Doe + Ann Smith");
    assert!(pairing.description.contains("Preference satisfied"));
    assert!(report.violations.is_empty());
}

#[test]
fn test_custom_rules_from_parts_drive_selection() {
    let mut rules = RulesConfig::empty();
    rules.affinity_pairs = vec![AffinityRule::new("jane doe", "bob lee", 5)];
    let config = ConfigLoader::from_parts(rules, AliasTable::default());

    let roster = csv_table(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Interviewer,Jane Doe\n\
         Austin,2024-01-05,Live,Tester,Ann Smith\n\
         Austin,2024-01-05,Live,Tester,Bob Lee\n",
    );
    let report = run_pairing(&roster, None, &NormalizerOptions::default(), &config).unwrap();

    let pairing = &report.events[0];
    assert_eq!(pairing.subject, "Austin | Pairing: Jane Doe + Bob Lee");
    assert!(pairing.description.contains("Preference satisfied"));
}

// =============================================================================
// Export and summary
// =============================================================================

#[test]
fn test_calendar_csv_and_filename() {
    let roster = csv_table(
        "site,date,modality,role,provider\n\
         SA,2024-01-05,Live,Solo,Ann Smith\n",
    );
    let at = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(8, 5, 3)
        .unwrap();

    let report = run_pairing_at(
        &roster,
        None,
        &NormalizerOptions::default(),
        &load_config(),
        at,
    )
    .unwrap();

    assert_eq!(report.filename, "Stonebridge_Pairings_2024-02-01_08-05-03.csv");
    let lines: Vec<&str> = report.calendar_csv.lines().collect();
    assert_eq!(
        lines[0],
        "Subject,Start Date,Start Time,End Date,End Time,All Day Event,Description,Location"
    );
    assert_eq!(
        lines[1],
        "SA | SOLO: Ann Smith,2024-01-05,,2024-01-05,,True,Solo provider working Live.,SA"
    );
}

#[test]
fn test_summary_counts() {
    let report = pair_csv(
        "site,date,modality,role,provider\n\
         Austin,2024-01-05,Live,Solo,Ann Smith\n\
         Austin,2024-01-06,Live,Solo,Ann Smith\n\
         Waco,2024-01-05,Live,Solo,Bob Lee\n",
        None,
    );

    assert_eq!(report.shifts_per_site[0].name, "Austin");
    assert_eq!(report.shifts_per_site[0].count, 2);
    assert_eq!(report.shifts_per_provider[0].name, "Ann Smith");
    assert_eq!(report.shifts_per_provider[0].count, 2);
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_pairs_roster_with_master() {
    let body = json!({
        "roster": [
            shift("Austin", "2024-01-05", "Live", "Interviewer", "Jane Doe"),
            shift("Austin", "2024-01-05", "Live", "Tester", "Bob Lee"),
            shift("Austin", "2024-01-05", "Live", "Tester", "Ann Smith")
        ],
        "provider_master": [
            {"provider": "Jane Doe", "preferred_tester": "Ann"}
        ]
    });

    let (status, json) = post_pairings(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["events"][0]["Subject"],
        "Austin | Pairing: Jane Doe + Ann Smith"
    );
    assert_eq!(json["gaps"][0]["tester"], "Bob Lee");
    assert!(json["calendar_csv"].as_str().unwrap().contains("Jane Doe + Ann Smith"));
}

#[tokio::test]
async fn test_api_explicit_mapping_drops_bad_rows() {
    let body = json!({
        "roster": [
            {"Clinic": "Austin", "Day": "1/5/2024", "Kind": "Solo", "Who": "Ann Smith"},
            {"Clinic": "Austin", "Day": "", "Kind": "Solo", "Who": "Bob Lee"}
        ],
        "mapping": {"site": "Clinic", "date": "Day", "role": "Kind", "provider": "Who"}
    });

    let (status, json) = post_pairings(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["events"].as_array().unwrap().len(), 1);
    assert_eq!(json["events"][0]["Start Date"], "2024-01-05");
    assert_eq!(json["dropped_rows"][0]["row"], 2);
}

#[tokio::test]
async fn test_api_missing_columns_returns_422() {
    let body = json!({
        "roster": [{"Name": "Ann Smith", "Notes": "none"}]
    });

    let (status, json) = post_pairings(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "MISSING_REQUIRED_COLUMNS");
}

#[tokio::test]
async fn test_api_incomplete_rows_fail_fast() {
    let body = json!({
        "roster": [
            shift("Austin", "2024-01-05", "Live", "Solo", "Ann Smith"),
            shift("Austin", "", "Live", "Solo", "Bob Lee")
        ]
    });

    let (status, json) = post_pairings(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "UNRESOLVABLE_ROW");
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Check headers like Location/Employee/Start Date"));
    assert!(message.contains("share the first 5 header names:"));
    assert!(message.contains("provider"));
}

#[tokio::test]
async fn test_api_wrong_roster_type_returns_400() {
    let body = json!({ "roster": "not a list" });

    let (status, json) = post_pairings(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}
