//! Team resolution for winner entries.
//!
//! Membership data wins: an individual entry resolves through the
//! participant index whenever a record exists. The lexical decode chain over
//! the chest-number text is a last resort for identifiers that predate the
//! registry, and its precedence order lives in exactly one function
//! (`decode_chest_number`) shared by every caller.

use alloc::collections::BTreeMap;
use alloc::string::String;

use fest_core::{ChestNumber, Participant, Team, TeamCode, TeamDecodeRules, WinnerEntry};

/// Outcome of team resolution for one winner entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TeamResolution {
    Resolved(TeamCode),
    /// Excluded from team aggregation; still achievement-counted by raw
    /// identifier and reported in diagnostics.
    NotFound,
}

/// Resolve the owning team of a winner entry.
///
/// - Team entries are validated against the known team set.
/// - Individual entries use the participant index, then the decode chain.
pub fn resolve_team(
    winner: &WinnerEntry,
    teams: &BTreeMap<TeamCode, Team>,
    participants: &BTreeMap<ChestNumber, Participant>,
    rules: &TeamDecodeRules,
) -> TeamResolution {
    match winner {
        WinnerEntry::Team { team_code, .. } => {
            let code = team_code.canonicalized();
            if teams.contains_key(&code) {
                TeamResolution::Resolved(code)
            } else {
                TeamResolution::NotFound
            }
        }
        WinnerEntry::Individual { chest_number, .. } => {
            if let Some(p) = participants.get(chest_number) {
                return TeamResolution::Resolved(p.team_code.canonicalized());
            }
            match decode_chest_number(chest_number.as_str(), teams, rules) {
                Some(code) => TeamResolution::Resolved(code),
                None => TeamResolution::NotFound,
            }
        }
    }
}

/// Decode a team from the lexical form of a chest number. Precedence:
///
/// 1. leading 3-letter alphabetic prefix, case-insensitive, against known
///    team codes;
/// 2. leading 2-letter prefix through the configured remap table;
/// 3. first contiguous digit run through the configured numeric ranges;
/// 4. substring containment of any known team code (codes in ascending
///    order).
///
/// The first rule that produces a known team wins; `None` otherwise.
pub fn decode_chest_number(
    raw: &str,
    teams: &BTreeMap<TeamCode, Team>,
    rules: &TeamDecodeRules,
) -> Option<TeamCode> {
    let upper: String = raw.to_ascii_uppercase();

    // 1) Three-letter alphabetic prefix.
    if let Some(prefix) = alpha_prefix(&upper, 3) {
        if let Ok(code) = prefix.parse::<TeamCode>() {
            if teams.contains_key(&code) {
                return Some(code);
            }
        }
    }

    // 2) Two-letter prefix through the remap table.
    if let Some(prefix) = alpha_prefix(&upper, 2) {
        let remapped = rules.prefix_remap.iter().find_map(|(key, code)| {
            key.eq_ignore_ascii_case(prefix).then(|| code.canonicalized())
        });
        if let Some(code) = remapped {
            if teams.contains_key(&code) {
                return Some(code);
            }
        }
    }

    // 3) Numeric value through configured ranges.
    if let Some(n) = first_digit_run(&upper) {
        for range in &rules.numeric_ranges {
            if (range.lo..=range.hi).contains(&n) {
                let code = range.team_code.canonicalized();
                if teams.contains_key(&code) {
                    return Some(code);
                }
            }
        }
    }

    // 4) Substring containment, ascending code order for determinism.
    for code in teams.keys() {
        if upper.contains(code.as_str()) {
            return Some(code.clone());
        }
    }

    None
}

/// First `n` characters if they are all ASCII alphabetic.
fn alpha_prefix(s: &str, n: usize) -> Option<&str> {
    let prefix = s.get(..n)?;
    prefix
        .bytes()
        .all(|b| b.is_ascii_alphabetic())
        .then_some(prefix)
}

/// Parse the first contiguous run of ASCII digits; `None` when there is no
/// run or it overflows `u32`.
fn first_digit_run(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map(|off| start + off)
        .unwrap_or(bytes.len());
    s[start..end].parse().ok()
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use fest_core::{NumericRange, Section};

    fn team(code: &str) -> (TeamCode, Team) {
        let code: TeamCode = code.parse().unwrap();
        (
            code.clone(),
            Team { code: code.clone(), name: code_name(&code), color: String::new() },
        )
    }

    fn code_name(code: &TeamCode) -> String {
        code.as_str().into()
    }

    fn teams() -> BTreeMap<TeamCode, Team> {
        [team("SMD"), team("JNB"), team("QDS")].into_iter().collect()
    }

    fn rules() -> TeamDecodeRules {
        TeamDecodeRules {
            prefix_remap: [(String::from("JB"), "JNB".parse().unwrap())]
                .into_iter()
                .collect(),
            numeric_ranges: vec![
                NumericRange { lo: 100, hi: 199, team_code: "SMD".parse().unwrap() },
                NumericRange { lo: 200, hi: 299, team_code: "QDS".parse().unwrap() },
            ],
        }
    }

    fn participant(chest: &str, team: &str) -> (ChestNumber, Participant) {
        let chest_number: ChestNumber = chest.parse().unwrap();
        (
            chest_number.clone(),
            Participant {
                chest_number,
                name: String::from("P"),
                team_code: team.parse().unwrap(),
                section: Section::Senior,
            },
        )
    }

    #[test]
    fn membership_beats_every_decode_rule() {
        let teams = teams();
        // Chest number whose prefix says SMD, but the registry says QDS.
        let participants: BTreeMap<_, _> = [participant("SMD001", "QDS")].into_iter().collect();
        let winner = WinnerEntry::Individual { chest_number: "SMD001".parse().unwrap(), grade: None };
        assert_eq!(
            resolve_team(&winner, &teams, &participants, &rules()),
            TeamResolution::Resolved("QDS".parse().unwrap())
        );
    }

    #[test]
    fn decode_precedence_three_letter_prefix_first() {
        let teams = teams();
        // "SMD250" matches rule 1 (SMD) even though 250 falls in QDS's range.
        assert_eq!(
            decode_chest_number("smd250", &teams, &rules()),
            Some("SMD".parse().unwrap())
        );
    }

    #[test]
    fn decode_two_letter_remap() {
        let teams = teams();
        assert_eq!(
            decode_chest_number("JB104", &teams, &rules()),
            Some("JNB".parse().unwrap())
        );
    }

    #[test]
    fn decode_numeric_range() {
        let teams = teams();
        assert_eq!(
            decode_chest_number("204", &teams, &rules()),
            Some("QDS".parse().unwrap())
        );
        assert_eq!(
            decode_chest_number("X-150", &teams, &rules()),
            Some("SMD".parse().unwrap())
        );
    }

    #[test]
    fn decode_substring_last() {
        let teams = teams();
        assert_eq!(
            decode_chest_number("2025-qds-extra", &teams, &rules()),
            Some("QDS".parse().unwrap())
        );
    }

    #[test]
    fn decode_no_match_is_none() {
        let teams = teams();
        assert_eq!(decode_chest_number("ZZZ999", &teams, &rules()), None);
        let winner = WinnerEntry::Individual { chest_number: "ZZZ999".parse().unwrap(), grade: None };
        assert_eq!(
            resolve_team(&winner, &teams, &BTreeMap::new(), &rules()),
            TeamResolution::NotFound
        );
    }

    #[test]
    fn team_entry_validates_against_known_set() {
        let teams = teams();
        let ok = WinnerEntry::Team { team_code: "smd".parse().unwrap(), grade: None };
        assert_eq!(
            resolve_team(&ok, &teams, &BTreeMap::new(), &rules()),
            TeamResolution::Resolved("SMD".parse().unwrap())
        );
        let bad = WinnerEntry::Team { team_code: "XXX".parse().unwrap(), grade: None };
        assert_eq!(
            resolve_team(&bad, &teams, &BTreeMap::new(), &rules()),
            TeamResolution::NotFound
        );
    }
}
