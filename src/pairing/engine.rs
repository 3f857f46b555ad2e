//! Greedy dyad assignment.
//!
//! Interviewers are processed in input order. Each takes the highest
//! scoring tester still available, ties going to the tester that appears
//! first in the group. The assignment is local and greedy; it does not
//! search for a globally optimal matching.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::export::{interviewer_gap_subject, pairing_subject, solo_subject, tester_gap_subject};
use crate::models::{
    CalendarEvent, GapRecord, Language, PairingOutcome, ShiftRecord, ViolationRecord,
    ViolationType,
};
use crate::preferences::PreferenceContext;

use super::grouping::{ShiftGroup, group_shifts};
use super::scoring::{MatchScore, preference_score};

/// A matched interviewer and tester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dyad {
    /// The interviewer.
    pub interviewer: String,
    /// The tester selected for them.
    pub tester: String,
    /// Why the tester was selected.
    pub score: MatchScore,
}

/// The raw assignment for one shift group, before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    /// Matched dyads in interviewer order.
    pub dyads: Vec<Dyad>,
    /// Interviewers left without a tester.
    pub unpaired_interviewers: Vec<String>,
    /// Testers never selected, in input order.
    pub unpaired_testers: Vec<String>,
    /// Solo providers, in input order.
    pub solos: Vec<String>,
}

/// Pairs interviewers with testers under the clinic preference policy.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::config::RulesConfig;
/// use stonebridge_pairing::models::{Language, Role, ShiftRecord};
/// use stonebridge_pairing::pairing::PairingEngine;
/// use stonebridge_pairing::preferences::PreferenceContext;
///
/// let shift = |role: Role, provider: &str| ShiftRecord {
///     site: "San Antonio Behavioral".to_string(),
///     date: "2024-01-05".to_string(),
///     modality: "Live".to_string(),
///     role,
///     provider: provider.to_string(),
///     language: Language::English,
/// };
/// let records = vec![
///     shift(Role::Interviewer, "Lakaii Jones"),
///     shift(Role::Tester, "Virginia Parker"),
/// ];
///
/// let rules = RulesConfig::default();
/// let context = PreferenceContext::build(None, &rules);
/// let outcome = PairingEngine::new(&context, &rules).pair_all(&records);
///
/// assert_eq!(outcome.events.len(), 1);
/// assert!(outcome.events[0].subject.starts_with("SA | Pairing:"));
/// assert!(outcome.violations.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PairingEngine<'a> {
    context: &'a PreferenceContext,
    rules: &'a RulesConfig,
}

impl<'a> PairingEngine<'a> {
    /// Creates an engine over a preference context and rule set.
    pub fn new(context: &'a PreferenceContext, rules: &'a RulesConfig) -> Self {
        Self { context, rules }
    }

    /// Groups records and pairs every group, in group-key order.
    pub fn pair_all(&self, records: &[ShiftRecord]) -> PairingOutcome {
        let groups = group_shifts(records);
        let mut outcome = PairingOutcome::default();

        for group in &groups {
            outcome.extend(self.pair_group(group));
        }

        info!(
            groups = groups.len(),
            events = outcome.events.len(),
            violations = outcome.violations.len(),
            gaps = outcome.gaps.len(),
            "Pairing completed"
        );

        outcome
    }

    /// Assigns and renders one group.
    ///
    /// Events come out as: dyads, then interviewer gaps, then tester gaps,
    /// then solo providers.
    pub fn pair_group(&self, group: &ShiftGroup<'_>) -> PairingOutcome {
        let assignment = self.assign(group);
        let mut outcome = PairingOutcome::default();

        // Availability only shrinks, so unpaired interviewers always trail
        // the dyads in encounter order.
        for dyad in &assignment.dyads {
            self.render_dyad(group, dyad, &mut outcome);
        }
        for interviewer in &assignment.unpaired_interviewers {
            render_unpaired_interviewer(group, interviewer, &mut outcome);
        }

        for tester in &assignment.unpaired_testers {
            outcome.events.push(CalendarEvent::all_day(
                tester_gap_subject(group.site, tester),
                group.date,
                "Tester not assigned.",
                group.site,
            ));
            outcome.gaps.push(GapRecord {
                site: group.site.to_string(),
                date: group.date.to_string(),
                modality: group.modality.to_string(),
                interviewer: None,
                tester: Some(tester.clone()),
            });
        }

        for solo in &assignment.solos {
            outcome.events.push(CalendarEvent::all_day(
                solo_subject(group.site, solo),
                group.date,
                format!("Solo provider working {}.", group.modality),
                group.site,
            ));
        }

        outcome
    }

    /// Runs the greedy assignment for one group without rendering events.
    pub fn assign(&self, group: &ShiftGroup<'_>) -> GroupAssignment {
        let testers = group.testers();
        let mut available = vec![true; testers.len()];
        let mut assignment = GroupAssignment {
            solos: group.solos().into_iter().map(String::from).collect(),
            ..GroupAssignment::default()
        };

        for interviewer in group.interviewers() {
            match self.best_tester(interviewer, &testers, &available) {
                Some((index, score)) => {
                    available[index] = false;
                    debug!(
                        site = group.site,
                        date = group.date,
                        interviewer,
                        tester = testers[index],
                        score = score.score,
                        "Dyad assigned"
                    );
                    assignment.dyads.push(Dyad {
                        interviewer: interviewer.to_string(),
                        tester: testers[index].to_string(),
                        score,
                    });
                }
                None => {
                    debug!(site = group.site, date = group.date, interviewer, "No tester available");
                    assignment.unpaired_interviewers.push(interviewer.to_string());
                }
            }
        }

        assignment.unpaired_testers = testers
            .iter()
            .zip(&available)
            .filter(|(_, free)| **free)
            .map(|(tester, _)| tester.to_string())
            .collect();

        assignment
    }

    /// Highest-scoring available tester; the first one wins ties.
    fn best_tester(
        &self,
        interviewer: &str,
        testers: &[&str],
        available: &[bool],
    ) -> Option<(usize, MatchScore)> {
        let mut best: Option<(usize, MatchScore)> = None;

        for (index, tester) in testers.iter().enumerate() {
            if !available[index] {
                continue;
            }
            let score = preference_score(interviewer, tester, self.context, self.rules);
            if best.is_none_or(|(_, current)| score.score > current.score) {
                best = Some((index, score));
            }
        }

        best
    }

    /// Flags sub-preference matches for priority and Spanish-speaking interviewers.
    fn preference_not_met(&self, dyad: &Dyad) -> bool {
        !dyad.score.is_preference_satisfied()
            && (self
                .rules
                .is_priority_interviewer(&dyad.interviewer.to_lowercase())
                || self.context.language_of(&dyad.interviewer) == Language::Spanish)
    }

    fn render_dyad(&self, group: &ShiftGroup<'_>, dyad: &Dyad, outcome: &mut PairingOutcome) {
        let mut description = format!("Dyad pairing for {} {}.", group.date, group.modality);
        if dyad.score.is_preference_satisfied() {
            description.push_str(" Preference satisfied.");
        } else if dyad.score.is_language_match() {
            description.push_str(" Language-matched.");
        }

        outcome.events.push(CalendarEvent::all_day(
            pairing_subject(group.site, &dyad.interviewer, &dyad.tester),
            group.date,
            description,
            group.site,
        ));

        if self.preference_not_met(dyad) {
            outcome.violations.push(ViolationRecord {
                site: group.site.to_string(),
                date: group.date.to_string(),
                modality: group.modality.to_string(),
                violation_type: ViolationType::PreferenceNotMet,
                interviewer: dyad.interviewer.clone(),
                tester: Some(dyad.tester.clone()),
            });
        }
    }
}

fn render_unpaired_interviewer(
    group: &ShiftGroup<'_>,
    interviewer: &str,
    outcome: &mut PairingOutcome,
) {
    outcome.events.push(CalendarEvent::all_day(
        interviewer_gap_subject(group.site, interviewer),
        group.date,
        format!(
            "Unpaired interviewer. Needs tester for {}.",
            group.modality
        ),
        group.site,
    ));
    outcome.gaps.push(GapRecord {
        site: group.site.to_string(),
        date: group.date.to_string(),
        modality: group.modality.to_string(),
        interviewer: Some(interviewer.to_string()),
        tester: None,
    });
    outcome.violations.push(ViolationRecord {
        site: group.site.to_string(),
        date: group.date.to_string(),
        modality: group.modality.to_string(),
        violation_type: ViolationType::UnpairedInterviewer,
        interviewer: interviewer.to_string(),
        tester: None,
    });
}
