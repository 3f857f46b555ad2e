//! Pairing outcome models.
//!
//! This module contains the records a pairing run produces: calendar
//! events, policy violations and unfilled gaps.

use serde::{Deserialize, Serialize};

/// The literal written to the "All Day Event" column.
pub const ALL_DAY_EVENT: &str = "True";

/// One all-day calendar import row.
///
/// Serde names match the calendar import column headers, so the type can
/// be written to CSV or JSON without a translation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Site abbreviation, " | ", and a role-specific label.
    #[serde(rename = "Subject")]
    pub subject: String,
    /// ISO date of the shift.
    #[serde(rename = "Start Date")]
    pub start_date: String,
    /// Always empty for all-day events.
    #[serde(rename = "Start Time")]
    pub start_time: String,
    /// Same as the start date.
    #[serde(rename = "End Date")]
    pub end_date: String,
    /// Always empty for all-day events.
    #[serde(rename = "End Time")]
    pub end_time: String,
    /// Always the literal "True".
    #[serde(rename = "All Day Event")]
    pub all_day_event: String,
    /// Human-readable outcome description.
    #[serde(rename = "Description")]
    pub description: String,
    /// Full site name.
    #[serde(rename = "Location")]
    pub location: String,
}

impl CalendarEvent {
    /// Creates an all-day event on `date` at `site`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stonebridge_pairing::models::CalendarEvent;
    ///
    /// let event = CalendarEvent::all_day("SA | SOLO: Ann", "2024-01-05", "Solo.", "San Antonio");
    /// assert_eq!(event.end_date, "2024-01-05");
    /// assert_eq!(event.all_day_event, "True");
    /// assert!(event.start_time.is_empty());
    /// ```
    pub fn all_day(
        subject: impl Into<String>,
        date: &str,
        description: impl Into<String>,
        site: &str,
    ) -> Self {
        Self {
            subject: subject.into(),
            start_date: date.to_string(),
            start_time: String::new(),
            end_date: date.to_string(),
            end_time: String::new(),
            all_day_event: ALL_DAY_EVENT.to_string(),
            description: description.into(),
            location: site.to_string(),
        }
    }
}

/// The kind of policy violation recorded for an interviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A match was made, but below the preference the interviewer is owed.
    #[serde(rename = "Preference Not Met")]
    PreferenceNotMet,
    /// No tester was available.
    #[serde(rename = "Unpaired Interviewer")]
    UnpairedInterviewer,
}

impl std::fmt::Display for ViolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationType::PreferenceNotMet => write!(f, "Preference Not Met"),
            ViolationType::UnpairedInterviewer => write!(f, "Unpaired Interviewer"),
        }
    }
}

/// A pairing outcome that fails the preference policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Site of the shift group.
    pub site: String,
    /// Date of the shift group.
    pub date: String,
    /// Modality of the shift group.
    pub modality: String,
    /// What went wrong.
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    /// The affected interviewer.
    pub interviewer: String,
    /// The tester assigned, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tester: Option<String>,
}

/// A role slot left unmatched after assignment.
///
/// Exactly one of `interviewer` and `tester` is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRecord {
    /// Site of the shift group.
    pub site: String,
    /// Date of the shift group.
    pub date: String,
    /// Modality of the shift group.
    pub modality: String,
    /// The unmatched interviewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewer: Option<String>,
    /// The unmatched tester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tester: Option<String>,
}

/// Everything a pairing run emits, in deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingOutcome {
    /// Calendar events, grouped by shift group.
    pub events: Vec<CalendarEvent>,
    /// Policy violations.
    pub violations: Vec<ViolationRecord>,
    /// Unfilled role slots.
    pub gaps: Vec<GapRecord>,
}

impl PairingOutcome {
    /// Appends another outcome, preserving order.
    pub fn extend(&mut self, other: PairingOutcome) {
        self.events.extend(other.events);
        self.violations.extend(other.violations);
        self.gaps.extend(other.gaps);
    }
}
