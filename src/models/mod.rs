//! Core data models for the pairing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod outcome;
mod roster;
mod shift;

pub use outcome::{
    ALL_DAY_EVENT, CalendarEvent, GapRecord, PairingOutcome, ViolationRecord, ViolationType,
};
pub use roster::{RawRow, RawTable, normalize_header};
pub use shift::{CanonicalField, Language, Role, ShiftRecord};
