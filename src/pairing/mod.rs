//! Pairing logic for the scheduling engine.
//!
//! This module groups canonical shifts by (site, date, modality), scores
//! interviewer/tester candidates, and greedily assigns dyads, recording
//! gaps and preference violations along the way.

mod engine;
mod grouping;
mod scoring;

pub use engine::{Dyad, GroupAssignment, PairingEngine};
pub use grouping::{ShiftGroup, group_shifts};
pub use scoring::{
    LANGUAGE_MATCH_SCORE, MatchBasis, MatchScore, PREFERENCE_SATISFIED_THRESHOLD,
    PREFERRED_TESTER_SCORE, preference_score,
};
