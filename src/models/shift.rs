//! Shift record model and related types.
//!
//! This module defines the canonical [`ShiftRecord`] produced by the
//! normalizer, together with the [`Role`], [`Language`] and
//! [`CanonicalField`] vocabularies shared across the engine.

use serde::{Deserialize, Serialize};

/// The role a provider fills on a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Runs the clinical interview; needs a tester to form a dyad.
    Interviewer,
    /// Administers testing; paired with an interviewer.
    Tester,
    /// Works independently; never paired.
    Solo,
}

impl Role {
    /// Returns the lower-case label used in rosters and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Interviewer => "interviewer",
            Role::Tester => "tester",
            Role::Solo => "solo",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The language a provider works in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// English (the default when nothing else is known).
    #[default]
    English,
    /// Spanish.
    Spanish,
}

impl Language {
    /// Parses a roster language cell. Anything other than "spanish" is English.
    ///
    /// # Examples
    ///
    /// ```
    /// use stonebridge_pairing::models::Language;
    ///
    /// assert_eq!(Language::from_roster(" Spanish "), Language::Spanish);
    /// assert_eq!(Language::from_roster(""), Language::English);
    /// ```
    pub fn from_roster(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("spanish") {
            Language::Spanish
        } else {
            Language::English
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Spanish => write!(f, "spanish"),
        }
    }
}

/// A field of the canonical roster schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// Clinic or location name.
    Site,
    /// Shift date.
    Date,
    /// Delivery mode, e.g. "Telehealth" or "Live".
    Modality,
    /// Interviewer, tester or solo.
    Role,
    /// Provider name.
    Provider,
    /// Optional working language.
    Language,
}

impl CanonicalField {
    /// The fields that must be non-empty for a record to be kept.
    pub const REQUIRED: [CanonicalField; 5] = [
        CanonicalField::Site,
        CanonicalField::Date,
        CanonicalField::Modality,
        CanonicalField::Role,
        CanonicalField::Provider,
    ];

    /// Returns the canonical header name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Site => "site",
            CanonicalField::Date => "date",
            CanonicalField::Modality => "modality",
            CanonicalField::Role => "role",
            CanonicalField::Provider => "provider",
            CanonicalField::Language => "language",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled shift in canonical form.
///
/// Every field except `language` is guaranteed non-empty once a record
/// leaves the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Clinic or location name.
    pub site: String,
    /// ISO 8601 date string (best effort, see the normalizer).
    pub date: String,
    /// Free-text delivery mode.
    pub modality: String,
    /// The provider's role on this shift.
    pub role: Role,
    /// Provider name as written in the roster.
    pub provider: String,
    /// Working language from the roster (English when absent).
    #[serde(default)]
    pub language: Language,
}

impl ShiftRecord {
    /// Returns the `(site, date, modality)` key this shift is paired under.
    pub fn group_key(&self) -> (&str, &str, &str) {
        (&self.site, &self.date, &self.modality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(role: Role) -> ShiftRecord {
        ShiftRecord {
            site: "San Antonio Behavioral".to_string(),
            date: "2024-01-05".to_string(),
            modality: "Live".to_string(),
            role,
            provider: "Lakaii Jones".to_string(),
            language: Language::English,
        }
    }

    #[test]
    fn test_group_key_is_site_date_modality() {
        let record = make_record(Role::Interviewer);
        assert_eq!(
            record.group_key(),
            ("San Antonio Behavioral", "2024-01-05", "Live")
        );
    }

    #[test]
    fn test_language_defaults_to_english() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::from_roster("French"), Language::English);
        assert_eq!(Language::from_roster("SPANISH"), Language::Spanish);
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::Tester).unwrap();
        assert_eq!(json, "\"tester\"");
    }

    #[test]
    fn test_record_deserialization_defaults_language() {
        let json = r#"{
            "site": "Austin",
            "date": "2024-02-01",
            "modality": "Telehealth",
            "role": "solo",
            "provider": "Noemi Martinez"
        }"#;

        let record: ShiftRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.role, Role::Solo);
        assert_eq!(record.language, Language::English);
    }

    #[test]
    fn test_required_fields_exclude_language() {
        assert!(!CanonicalField::REQUIRED.contains(&CanonicalField::Language));
    }
}
