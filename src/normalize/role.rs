//! Role reduction and modality inference.

use crate::models::Role;

/// Keywords that mark a role description as a tester.
pub const TESTER_KEYWORDS: [&str; 3] = ["tester", "lpa", "psychometric"];

/// Keywords that mark a role description as solo.
pub const SOLO_KEYWORDS: [&str; 2] = ["solo", "independent"];

/// Modality assigned to telehealth sites when inference is enabled.
pub const TELEHEALTH: &str = "Telehealth";

/// Modality assigned to every other site when inference is enabled.
pub const LIVE: &str = "Live";

/// Reduces free-text role descriptions to a [`Role`].
///
/// Exact labels win, then tester keywords, then solo keywords; anything
/// else is an interviewer.
///
/// # Examples
///
/// ```
/// use stonebridge_pairing::models::Role;
/// use stonebridge_pairing::normalize::normalize_role;
///
/// assert_eq!(normalize_role("Psychometrist / LPA"), Role::Tester);
/// assert_eq!(normalize_role("Independent Clinician"), Role::Solo);
/// assert_eq!(normalize_role("Psychologist"), Role::Interviewer);
/// ```
pub fn normalize_role(raw: &str) -> Role {
    let role = raw.trim().to_lowercase();
    match role.as_str() {
        "interviewer" => Role::Interviewer,
        "tester" => Role::Tester,
        "solo" => Role::Solo,
        _ if TESTER_KEYWORDS.iter().any(|k| role.contains(k)) => Role::Tester,
        _ if SOLO_KEYWORDS.iter().any(|k| role.contains(k)) => Role::Solo,
        _ => Role::Interviewer,
    }
}

/// Infers a modality from the site name.
pub fn infer_modality(site: &str) -> &'static str {
    if site.to_lowercase().contains("tele") {
        TELEHEALTH
    } else {
        LIVE
    }
}
