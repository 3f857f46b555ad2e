//! Interviewer/tester preference scoring.
//!
//! Scores rank candidate testers for an interviewer. Rules are tried in
//! table order and the first one that matches sets the score:
//!
//! | Score | Basis |
//! |-------|-------|
//! | 5 (configurable) | hardcoded affinity pair |
//! | 4 | hardcoded affinity pair, or the provider master's preferred tester |
//! | 2 | both resolve to the same language |
//! | 0 | no rule applies |

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::preferences::PreferenceContext;

/// Score for the provider master's preferred tester.
pub const PREFERRED_TESTER_SCORE: u8 = 4;

/// Score for a same-language pair.
pub const LANGUAGE_MATCH_SCORE: u8 = 2;

/// Scores at or above this satisfy the interviewer's preference.
pub const PREFERENCE_SATISFIED_THRESHOLD: u8 = 4;

/// Which rule produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBasis {
    /// A hardcoded affinity pair from [`RulesConfig::affinity_pairs`].
    Affinity,
    /// The interviewer's preferred tester from the provider master.
    PreferredTester,
    /// Both providers resolve to the same language.
    Language,
    /// No rule applied.
    NoMatch,
}

/// A candidate tester's score for one interviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchScore {
    /// Numeric score; higher wins.
    pub score: u8,
    /// The rule that produced it.
    pub basis: MatchBasis,
}

impl MatchScore {
    /// The score when no rule applies.
    pub const NO_MATCH: MatchScore = MatchScore {
        score: 0,
        basis: MatchBasis::NoMatch,
    };

    /// Returns true when the match satisfies the interviewer's preference.
    pub fn is_preference_satisfied(&self) -> bool {
        self.score >= PREFERENCE_SATISFIED_THRESHOLD
    }

    /// Returns true for a pure language match.
    pub fn is_language_match(&self) -> bool {
        self.score == LANGUAGE_MATCH_SCORE
    }
}

/// Scores `tester` as a partner for `interviewer`.
///
/// The first matching rule applies: affinity pairs in configured order, then
/// the preferred tester, then a language match. All name tests are
/// case-insensitive substring checks on full provider names.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::config::RulesConfig;
/// use stonebridge_pairing::pairing::{MatchBasis, preference_score};
/// use stonebridge_pairing::preferences::PreferenceContext;
///
/// let rules = RulesConfig::default();
/// let context = PreferenceContext::build(None, &rules);
///
/// let score = preference_score("Lakaii Jones", "Virginia Parker", &context, &rules);
/// assert_eq!(score.score, 5);
/// assert_eq!(score.basis, MatchBasis::Affinity);
/// ```
pub fn preference_score(
    interviewer: &str,
    tester: &str,
    context: &PreferenceContext,
    rules: &RulesConfig,
) -> MatchScore {
    let interviewer_lower = interviewer.to_lowercase();
    let tester_lower = tester.to_lowercase();

    if let Some(rule) = rules
        .affinity_pairs
        .iter()
        .find(|rule| rule.matches(&interviewer_lower, &tester_lower))
    {
        return MatchScore {
            score: rule.score,
            basis: MatchBasis::Affinity,
        };
    }

    if context.prefers(interviewer, tester) {
        return MatchScore {
            score: PREFERRED_TESTER_SCORE,
            basis: MatchBasis::PreferredTester,
        };
    }

    if context.language_of(interviewer) == context.language_of(tester) {
        return MatchScore {
            score: LANGUAGE_MATCH_SCORE,
            basis: MatchBasis::Language,
        };
    }

    MatchScore::NO_MATCH
}
