//! Snapshot validation ahead of aggregation.
//!
//! Hard failures are input-contract violations the data-entry collaborator
//! must fix (a winner placed twice within one result). Dangling references
//! stay warnings: the engine is specified to skip and report those, so a
//! partial snapshot still aggregates.

use std::collections::BTreeSet;

use thiserror::Error;

use fest_core::{Position, ResultId, WinnerEntry};
use fest_io::loader::Snapshot;

/// Input-contract violations that abort the run before aggregation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The same identity appears in more than one position list of one
    /// result.
    #[error("duplicate placement in result {result_id}: {identifier}")]
    DuplicatePlacement { result_id: ResultId, identifier: String },
}

/// Non-fatal findings surfaced to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

/// Check the snapshot's input invariants.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::default();

    for result in &snapshot.results {
        let mut placed: BTreeSet<String> = BTreeSet::new();
        for position in Position::ALL {
            for winner in result.position_list(position) {
                if !placed.insert(placement_key(winner)) {
                    return Err(ValidationError::DuplicatePlacement {
                        result_id: result.id.clone(),
                        identifier: winner.identifier().to_string(),
                    });
                }
            }
        }

        if !snapshot.programmes.contains_key(&result.programme_id) {
            report.warnings.push(format!(
                "result {} references unknown programme {}",
                result.id, result.programme_id
            ));
        }
    }

    for participant in snapshot.participants.values() {
        if !snapshot.teams.contains_key(&participant.team_code) {
            report.warnings.push(format!(
                "participant {} references unknown team {}",
                participant.chest_number, participant.team_code
            ));
        }
    }

    Ok(report)
}

/// Identity key for the double-placement check. Team codes compare
/// case-insensitively, matching the resolver's canonicalization.
fn placement_key(winner: &WinnerEntry) -> String {
    match winner {
        WinnerEntry::Individual { chest_number, .. } => {
            format!("participant:{}", chest_number.as_str())
        }
        WinnerEntry::Team { team_code, .. } => {
            format!("team:{}", team_code.canonicalized())
        }
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use fest_core::{ResultDoc, ResultStatus, ScoringConfig};

    fn snapshot_with_results(results: Vec<ResultDoc>) -> Snapshot {
        Snapshot {
            teams: BTreeMap::new(),
            participants: BTreeMap::new(),
            programmes: BTreeMap::new(),
            results,
            config: ScoringConfig::default(),
        }
    }

    fn individual(chest: &str) -> WinnerEntry {
        WinnerEntry::Individual { chest_number: chest.parse().unwrap(), grade: None }
    }

    #[test]
    fn double_placement_is_a_hard_error() {
        let result = ResultDoc {
            id: "R1".parse().unwrap(),
            programme_id: "P1".parse().unwrap(),
            status: ResultStatus::Published,
            first_place: vec![individual("SMD001")],
            second_place: vec![individual("SMD001")],
            third_place: vec![],
        };
        let err = validate_snapshot(&snapshot_with_results(vec![result])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicatePlacement {
                result_id: "R1".parse().unwrap(),
                identifier: "SMD001".into(),
            }
        );
    }

    #[test]
    fn team_codes_collide_across_cases() {
        let result = ResultDoc {
            id: "R1".parse().unwrap(),
            programme_id: "P1".parse().unwrap(),
            status: ResultStatus::Published,
            first_place: vec![WinnerEntry::Team {
                team_code: "smd".parse().unwrap(),
                grade: None,
            }],
            second_place: vec![WinnerEntry::Team {
                team_code: "SMD".parse().unwrap(),
                grade: None,
            }],
            third_place: vec![],
        };
        assert!(validate_snapshot(&snapshot_with_results(vec![result])).is_err());
    }

    #[test]
    fn dangling_programme_is_only_a_warning() {
        let result = ResultDoc {
            id: "R1".parse().unwrap(),
            programme_id: "GONE".parse().unwrap(),
            status: ResultStatus::Published,
            first_place: vec![individual("SMD001")],
            second_place: vec![],
            third_place: vec![],
        };
        let report = validate_snapshot(&snapshot_with_results(vec![result])).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn same_identity_in_two_results_is_fine() {
        let mk = |id: &str| ResultDoc {
            id: id.parse().unwrap(),
            programme_id: "P1".parse().unwrap(),
            status: ResultStatus::Published,
            first_place: vec![individual("SMD001")],
            second_place: vec![],
            third_place: vec![],
        };
        let report =
            validate_snapshot(&snapshot_with_results(vec![mk("R1"), mk("R2")])).unwrap();
        assert_eq!(report.warnings.len(), 2); // unknown programme, twice
    }
}
