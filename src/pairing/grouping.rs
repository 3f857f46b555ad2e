//! Shift grouping by (site, date, modality).

use std::collections::BTreeMap;

use crate::models::{Role, ShiftRecord};

/// All shifts sharing one (site, date, modality), in input row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftGroup<'a> {
    /// Site shared by the group.
    pub site: &'a str,
    /// Date shared by the group.
    pub date: &'a str,
    /// Modality shared by the group.
    pub modality: &'a str,
    /// Member shifts in input order.
    pub shifts: Vec<&'a ShiftRecord>,
}

impl<'a> ShiftGroup<'a> {
    /// Provider names with the given role, in input order.
    pub fn providers(&self, role: Role) -> Vec<&'a str> {
        self.shifts
            .iter()
            .copied()
            .filter(|s| s.role == role)
            .map(|s| s.provider.as_str())
            .collect()
    }

    /// Interviewers in input order.
    pub fn interviewers(&self) -> Vec<&'a str> {
        self.providers(Role::Interviewer)
    }

    /// Testers in input order.
    pub fn testers(&self) -> Vec<&'a str> {
        self.providers(Role::Tester)
    }

    /// Solo providers in input order.
    pub fn solos(&self) -> Vec<&'a str> {
        self.providers(Role::Solo)
    }
}

/// Groups records by (site, date, modality).
///
/// Groups come back sorted by key; members keep their input order.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::models::{Language, Role, ShiftRecord};
/// use stonebridge_pairing::pairing::group_shifts;
///
/// let shift = |site: &str, provider: &str| ShiftRecord {
///     site: site.to_string(),
///     date: "2024-01-05".to_string(),
///     modality: "Live".to_string(),
///     role: Role::Tester,
///     provider: provider.to_string(),
///     language: Language::English,
/// };
/// let records = vec![shift("B", "Ann"), shift("A", "Bob"), shift("B", "Cy")];
///
/// let groups = group_shifts(&records);
/// assert_eq!(groups[0].site, "A");
/// assert_eq!(groups[1].testers(), vec!["Ann", "Cy"]);
/// ```
pub fn group_shifts(records: &[ShiftRecord]) -> Vec<ShiftGroup<'_>> {
    let mut grouped: BTreeMap<(&str, &str, &str), Vec<&ShiftRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.group_key()).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|((site, date, modality), shifts)| ShiftGroup {
            site,
            date,
            modality,
            shifts,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn record(site: &str, date: &str, modality: &str, role: Role, provider: &str) -> ShiftRecord {
        ShiftRecord {
            site: site.to_string(),
            date: date.to_string(),
            modality: modality.to_string(),
            role,
            provider: provider.to_string(),
            language: Language::English,
        }
    }

    #[test]
    fn test_groups_sorted_by_key() {
        let records = vec![
            record("Austin", "2024-01-06", "Live", Role::Tester, "a"),
            record("Austin", "2024-01-05", "Telehealth", Role::Tester, "b"),
            record("Austin", "2024-01-05", "Live", Role::Tester, "c"),
        ];

        let keys: Vec<(&str, &str)> = group_shifts(&records)
            .iter()
            .map(|g| (g.date, g.modality))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2024-01-05", "Live"),
                ("2024-01-05", "Telehealth"),
                ("2024-01-06", "Live"),
            ]
        );
    }

    #[test]
    fn test_roles_partitioned_in_input_order() {
        let records = vec![
            record("SA", "2024-01-05", "Live", Role::Tester, "T2"),
            record("SA", "2024-01-05", "Live", Role::Interviewer, "I1"),
            record("SA", "2024-01-05", "Live", Role::Solo, "S1"),
            record("SA", "2024-01-05", "Live", Role::Tester, "T1"),
            record("SA", "2024-01-05", "Live", Role::Interviewer, "I2"),
        ];

        let groups = group_shifts(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].interviewers(), vec!["I1", "I2"]);
        assert_eq!(groups[0].testers(), vec!["T2", "T1"]);
        assert_eq!(groups[0].solos(), vec!["S1"]);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_shifts(&[]).is_empty());
    }
}
