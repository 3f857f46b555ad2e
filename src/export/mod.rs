//! Calendar export.
//!
//! Renders pairing events in the fixed all-day calendar import schema.

mod calendar;

pub use calendar::{
    CALENDAR_COLUMNS, EXPORT_FILE_PREFIX, export_filename, interviewer_gap_subject,
    pairing_subject, site_abbreviation, solo_subject, tester_gap_subject, to_calendar_csv,
};
