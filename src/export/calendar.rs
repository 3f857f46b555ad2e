//! All-day calendar import rendering.
//!
//! Events are written with a fixed column order:
//! `Subject, Start Date, Start Time, End Date, End Time, All Day Event, Description, Location`.

use chrono::NaiveDateTime;
use csv::{Terminator, WriterBuilder};

use crate::error::{PairingError, PairingResult};
use crate::models::{ALL_DAY_EVENT, CalendarEvent};

/// Calendar import column headers in output order.
pub const CALENDAR_COLUMNS: [&str; 8] = [
    "Subject",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "All Day Event",
    "Description",
    "Location",
];

/// Prefix of generated export filenames.
pub const EXPORT_FILE_PREFIX: &str = "Stonebridge_Pairings_";

/// Returns the short form of a site name used in subjects.
///
/// # Examples
///
/// ```
/// use stonebridge_pairing::export::site_abbreviation;
///
/// assert_eq!(site_abbreviation("San Antonio Behavioral"), "SA");
/// assert_eq!(site_abbreviation("sa"), "SA");
/// assert_eq!(site_abbreviation("Austin"), "Austin");
/// ```
pub fn site_abbreviation(site: &str) -> &str {
    let lower = site.to_lowercase();
    if lower.contains("san antonio") || lower == "sa" {
        "SA"
    } else {
        site
    }
}

/// Subject for a matched dyad.
pub fn pairing_subject(site: &str, interviewer: &str, tester: &str) -> String {
    format!(
        "{} | Pairing: {} + {}",
        site_abbreviation(site),
        interviewer,
        tester
    )
}

/// Subject for an interviewer left without a tester.
pub fn interviewer_gap_subject(site: &str, interviewer: &str) -> String {
    format!("{} | GAP: {} (no tester)", site_abbreviation(site), interviewer)
}

/// Subject for a tester never selected by an interviewer.
pub fn tester_gap_subject(site: &str, tester: &str) -> String {
    format!(
        "{} | GAP: {} (tester unassigned)",
        site_abbreviation(site),
        tester
    )
}

/// Subject for a solo provider.
pub fn solo_subject(site: &str, provider: &str) -> String {
    format!("{} | SOLO: {}", site_abbreviation(site), provider)
}

/// Renders events as calendar import CSV.
///
/// The header row is always written. Every row is forced into all-day
/// shape: blank start/end times, end date equal to start date, and the
/// literal "True" in the All Day Event column.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::export::to_calendar_csv;
/// use stonebridge_pairing::models::CalendarEvent;
///
/// let events = vec![CalendarEvent::all_day("SA | SOLO: Ann", "2024-01-05", "Solo.", "SA")];
/// let csv = to_calendar_csv(&events).unwrap();
/// assert_eq!(
///     csv,
///     "Subject,Start Date,Start Time,End Date,End Time,All Day Event,Description,Location\n\
///      SA | SOLO: Ann,2024-01-05,,2024-01-05,,True,Solo.,SA\n"
/// );
/// ```
pub fn to_calendar_csv(events: &[CalendarEvent]) -> PairingResult<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CALENDAR_COLUMNS).map_err(export_error)?;

    for event in events {
        writer
            .write_record([
                event.subject.as_str(),
                event.start_date.as_str(),
                "",
                event.start_date.as_str(),
                "",
                ALL_DAY_EVENT,
                event.description.as_str(),
                event.location.as_str(),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| PairingError::Export {
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| PairingError::Export {
        message: e.to_string(),
    })
}

/// Returns the conventional export filename for a run timestamp.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use stonebridge_pairing::export::export_filename;
///
/// let at = NaiveDateTime::parse_from_str("2024-01-05 14:03:09", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(export_filename(at), "Stonebridge_Pairings_2024-01-05_14-03-09.csv");
/// ```
pub fn export_filename(generated_at: NaiveDateTime) -> String {
    format!(
        "{}{}.csv",
        EXPORT_FILE_PREFIX,
        generated_at.format("%Y-%m-%d_%H-%M-%S")
    )
}

fn export_error(e: csv::Error) -> PairingError {
    PairingError::Export {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(subject: &str, description: &str) -> CalendarEvent {
        CalendarEvent::all_day(subject, "2024-01-05", description, "San Antonio Behavioral")
    }

    #[test]
    fn test_subjects_use_site_abbreviation() {
        assert_eq!(
            pairing_subject("San Antonio Behavioral", "Lakaii Jones", "Virginia Parker"),
            "SA | Pairing: Lakaii Jones + Virginia Parker"
        );
        assert_eq!(
            interviewer_gap_subject("Austin", "Ann"),
            "Austin | GAP: Ann (no tester)"
        );
        assert_eq!(
            tester_gap_subject("SAN ANTONIO north", "Bob"),
            "SA | GAP: Bob (tester unassigned)"
        );
        assert_eq!(solo_subject("SA", "Cy"), "SA | SOLO: Cy");
    }

    #[test]
    fn test_abbreviation_requires_exact_sa() {
        assert_eq!(site_abbreviation("Sacramento"), "Sacramento");
        assert_eq!(site_abbreviation(""), "");
    }

    #[test]
    fn test_empty_event_list_still_has_header() {
        let csv = to_calendar_csv(&[]).unwrap();
        assert_eq!(csv, format!("{}\n", CALENDAR_COLUMNS.join(",")));
    }

    #[test]
    fn test_export_forces_all_day_shape() {
        let mut e = event("SA | SOLO: Ann", "Solo provider working Live.");
        e.start_time = "09:00".to_string();
        e.end_date = "2024-01-06".to_string();
        e.all_day_event = "False".to_string();

        let csv = to_calendar_csv(&[e]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "SA | SOLO: Ann,2024-01-05,,2024-01-05,,True,Solo provider working Live.,San Antonio Behavioral"
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let csv = to_calendar_csv(&[event("SA | SOLO: Doe, Jane", "x")]).unwrap();
        assert!(csv.contains("\"SA | SOLO: Doe, Jane\""));
    }

    #[test]
    fn test_export_is_byte_identical_across_calls() {
        let events = vec![event("a", "b"), event("c", "d")];
        assert_eq!(
            to_calendar_csv(&events).unwrap(),
            to_calendar_csv(&events).unwrap()
        );
    }
}
