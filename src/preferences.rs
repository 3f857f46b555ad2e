//! Provider language and preferred-tester lookups.
//!
//! A [`PreferenceContext`] is built once per run from the optional provider
//! master table plus the fallback Spanish roster in [`RulesConfig`]. It is
//! read-only for the rest of the run.

use std::collections::HashMap;

use tracing::debug;

use crate::config::RulesConfig;
use crate::models::{Language, RawTable};

/// Read-only preference lookups for one pairing run.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::config::RulesConfig;
/// use stonebridge_pairing::models::{Language, RawTable};
/// use stonebridge_pairing::preferences::PreferenceContext;
///
/// let master = RawTable::from_rows(
///     vec!["provider".into(), "preferred_tester".into()],
///     vec![vec!["Jane Doe".into(), "Ann".into()]],
/// );
/// let context = PreferenceContext::build(Some(&master), &RulesConfig::default());
///
/// assert!(context.prefers("Jane Doe", "Ann Smith"));
/// assert!(!context.prefers("Jane Doe", "Bob Lee"));
/// assert_eq!(context.language_of("Noemi Martinez"), Language::Spanish);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PreferenceContext {
    language_of: HashMap<String, Language>,
    preferred_tester_of: HashMap<String, String>,
    spanish_speakers: Vec<String>,
}

impl PreferenceContext {
    /// Builds the context from an optional provider master table.
    ///
    /// The master table may carry `provider`, `language`, `is_spanish` and
    /// `preferred_tester` columns; rows without a provider are skipped and
    /// later rows override earlier ones.
    pub fn build(master: Option<&RawTable>, rules: &RulesConfig) -> Self {
        let mut context = Self {
            language_of: HashMap::new(),
            preferred_tester_of: HashMap::new(),
            spanish_speakers: rules
                .spanish_speakers
                .iter()
                .map(|name| name.to_lowercase())
                .collect(),
        };

        let Some(master) = master else {
            return context;
        };

        for row in master.rows() {
            let provider = row.get("provider");
            if provider.is_empty() {
                continue;
            }
            let key = provider.to_lowercase();

            if let Some(language) = master_language(row.get("language"), row.get("is_spanish")) {
                context.language_of.insert(key.clone(), language);
            }

            let preferred = row.get("preferred_tester");
            if !preferred.is_empty() {
                context
                    .preferred_tester_of
                    .insert(key, preferred.to_lowercase());
            }
        }

        debug!(
            languages = context.language_of.len(),
            preferences = context.preferred_tester_of.len(),
            "Built preference context"
        );

        context
    }

    /// Sets a provider's language, overriding the master table.
    pub fn with_language(mut self, provider: &str, language: Language) -> Self {
        self.language_of.insert(provider.to_lowercase(), language);
        self
    }

    /// Sets an interviewer's preferred tester fragment.
    pub fn with_preferred_tester(mut self, interviewer: &str, tester: &str) -> Self {
        self.preferred_tester_of
            .insert(interviewer.to_lowercase(), tester.to_lowercase());
        self
    }

    /// Resolves a provider's working language.
    ///
    /// Exact master-table entries win; otherwise a name containing any
    /// fallback roster entry is Spanish. Empty names are English.
    pub fn language_of(&self, name: &str) -> Language {
        if name.is_empty() {
            return Language::English;
        }

        let lower = name.to_lowercase();
        if let Some(language) = self.language_of.get(&lower) {
            return *language;
        }

        if self
            .spanish_speakers
            .iter()
            .any(|token| lower.contains(token.as_str()))
        {
            Language::Spanish
        } else {
            Language::English
        }
    }

    /// Returns the interviewer's preferred tester fragment, if any.
    pub fn preferred_tester_of(&self, interviewer: &str) -> Option<&str> {
        self.preferred_tester_of
            .get(&interviewer.to_lowercase())
            .map(String::as_str)
    }

    /// Returns true when the tester's name contains the interviewer's preference.
    pub fn prefers(&self, interviewer: &str, tester: &str) -> bool {
        self.preferred_tester_of(interviewer)
            .is_some_and(|preferred| tester.to_lowercase().contains(preferred))
    }
}

/// `is_spanish == "true"` or `language == "spanish"` is Spanish, `language ==
/// "english"` is English, anything else is left to the fallback roster.
fn master_language(language: &str, is_spanish: &str) -> Option<Language> {
    let language = language.to_lowercase();
    if is_spanish.eq_ignore_ascii_case("true") || language == "spanish" {
        Some(Language::Spanish)
    } else if language == "english" {
        Some(Language::English)
    } else {
        None
    }
}
