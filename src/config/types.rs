//! Configuration types for roster normalization and pairing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Both types implement
//! `Default` with the built-in clinic tables so a run works without any
//! configuration directory.

use serde::{Deserialize, Serialize};

use crate::models::CanonicalField;

/// A hardcoded interviewer/tester affinity.
///
/// Both names are matched by case-insensitive substring containment on the
/// full provider names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityRule {
    /// Fragment that must appear in the interviewer's name.
    pub interviewer: String,
    /// Fragment that must appear in the tester's name.
    pub tester: String,
    /// Score awarded when both fragments match.
    pub score: u8,
}

impl AffinityRule {
    /// Creates a rule, lower-casing both fragments.
    pub fn new(interviewer: &str, tester: &str, score: u8) -> Self {
        Self {
            interviewer: interviewer.to_lowercase(),
            tester: tester.to_lowercase(),
            score,
        }
    }

    /// Returns true when both lower-cased names contain their fragment.
    pub fn matches(&self, interviewer_lower: &str, tester_lower: &str) -> bool {
        interviewer_lower.contains(&self.interviewer.to_lowercase())
            && tester_lower.contains(&self.tester.to_lowercase())
    }
}

/// Clinic pairing rules passed into the pairing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Hardcoded interviewer/tester affinities.
    #[serde(default)]
    pub affinity_pairs: Vec<AffinityRule>,
    /// Name fragments of providers known to work in Spanish.
    #[serde(default)]
    pub spanish_speakers: Vec<String>,
    /// Interviewers whose sub-preference matches are always flagged.
    #[serde(default)]
    pub priority_interviewers: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            affinity_pairs: vec![
                AffinityRule::new("lakaii jones", "virginia parker", 5),
                AffinityRule::new("lyn mcdonald", "ed howarth", 5),
                AffinityRule::new("liliana pizana", "emma thomae", 4),
            ],
            spanish_speakers: [
                "cintia martinez",
                "liliana pizana",
                "emma thomae",
                "ben aguilar",
                "cesar villarreal",
                "teresa castano",
                "dr. alvarez-sanders",
                "alvarez-sanders",
                "belinda castillo",
                "noemi martinez",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            priority_interviewers: vec!["lakaii jones".to_string(), "lyn mcdonald".to_string()],
        }
    }
}

impl RulesConfig {
    /// Returns a rule set with no affinities, roster or priority names.
    pub fn empty() -> Self {
        Self {
            affinity_pairs: Vec::new(),
            spanish_speakers: Vec::new(),
            priority_interviewers: Vec::new(),
        }
    }

    /// Returns true when the lower-cased interviewer name contains a priority name.
    pub fn is_priority_interviewer(&self, interviewer_lower: &str) -> bool {
        self.priority_interviewers
            .iter()
            .any(|name| interviewer_lower.contains(&name.to_lowercase()))
    }
}

/// Ordered header aliases for each canonical field.
///
/// Earlier aliases win: the first alias whose cell is non-empty supplies
/// the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    /// Aliases for the site column.
    pub site: Vec<String>,
    /// Aliases for the date column.
    pub date: Vec<String>,
    /// Aliases for the modality column.
    pub modality: Vec<String>,
    /// Aliases for the role column.
    pub role: Vec<String>,
    /// Aliases for the provider column.
    pub provider: Vec<String>,
    /// Aliases for the language column.
    pub language: Vec<String>,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            site: aliases(&["site", "location", "work location", "venue", "clinic", "office"]),
            date: aliases(&[
                "date",
                "shift date",
                "start date",
                "start",
                "day",
                "timesheet date",
            ]),
            modality: aliases(&["modality", "type", "category", "mode"]),
            role: aliases(&["role", "area", "position", "duty", "job", "title"]),
            provider: aliases(&["provider", "employee", "employee name", "name", "staff"]),
            language: aliases(&["language", "lang"]),
        }
    }
}

impl AliasTable {
    /// Returns the aliases for a canonical field, in priority order.
    pub fn for_field(&self, field: CanonicalField) -> &[String] {
        match field {
            CanonicalField::Site => &self.site,
            CanonicalField::Date => &self.date,
            CanonicalField::Modality => &self.modality,
            CanonicalField::Role => &self.role,
            CanonicalField::Provider => &self.provider,
            CanonicalField::Language => &self.language,
        }
    }
}
