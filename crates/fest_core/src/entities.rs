//! Snapshot entities and domain enums.
//!
//! These mirror the wire shapes consumed from collaborators (camelCase JSON
//! field names) and are read-only inputs to the engine. Nothing here mutates;
//! ledgers derived from these types live in `fest_algo`.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ids::{ChestNumber, ProgrammeId, ResultId, TeamCode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ----------------------------- Domain enums -----------------------------

/// Top-level programme category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Arts,
    Sports,
}

/// Arts subcategory. Sports programmes and arts programmes without one are
/// bucketed under `NotApplicable` (wire value `none`, or simply absent).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Subcategory {
    #[cfg_attr(feature = "serde", serde(rename = "stage"))]
    Stage,
    #[cfg_attr(feature = "serde", serde(rename = "non-stage"))]
    NonStage,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    NotApplicable,
}

/// Age section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Section {
    #[cfg_attr(feature = "serde", serde(rename = "senior"))]
    Senior,
    #[cfg_attr(feature = "serde", serde(rename = "junior"))]
    Junior,
    #[cfg_attr(feature = "serde", serde(rename = "sub-junior"))]
    SubJunior,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "general"))]
    General,
}

/// Whether a programme's winners are individuals, whole teams, or
/// section-level team events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PositionType {
    Individual,
    Group,
    General,
}

/// Result lifecycle status. Transitions are enforced by the data-entry
/// collaborator; the engine only filters on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResultStatus {
    Draft,
    Checked,
    Published,
}

/// Which result statuses an aggregation run counts. Invalid filter values
/// are unrepresentable; callers pick one of the two supported scopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatusFilter {
    /// Externally visible scope: `published` only.
    #[cfg_attr(feature = "serde", serde(rename = "published"))]
    Published,
    /// Internal preview scope: `published` plus `checked`.
    #[cfg_attr(feature = "serde", serde(rename = "published+checked"))]
    PublishedAndChecked,
}

impl StatusFilter {
    #[inline]
    pub fn admits(&self, status: ResultStatus) -> bool {
        match self {
            StatusFilter::Published => status == ResultStatus::Published,
            StatusFilter::PublishedAndChecked => {
                matches!(status, ResultStatus::Published | ResultStatus::Checked)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Published => "published",
            StatusFilter::PublishedAndChecked => "published+checked",
        }
    }
}

/// Placement within a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    First,
    Second,
    Third,
}

impl Position {
    /// All positions in rank order.
    pub const ALL: [Position; 3] = [Position::First, Position::Second, Position::Third];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::First => "first",
            Position::Second => "second",
            Position::Third => "third",
        }
    }

    /// 1-based place number.
    #[inline]
    pub fn place(&self) -> u8 {
        match self {
            Position::First => 1,
            Position::Second => 2,
            Position::Third => 3,
        }
    }
}

// ----------------------------- Entities -----------------------------

/// Competing team (read-only registry entry).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Team {
    pub code: TeamCode,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: String,
}

/// Registered participant (read-only registry entry).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Participant {
    pub chest_number: ChestNumber,
    pub name: String,
    pub team_code: TeamCode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub section: Section,
}

/// Competition programme (event definition).
///
/// Missing point values score as zero; absent configuration must never abort
/// an aggregation run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Programme {
    pub id: ProgrammeId,
    pub name: String,
    pub category: Category,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subcategory: Subcategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub section: Section,
    pub position_type: PositionType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub first_points: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub second_points: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub third_points: Option<u32>,
}

impl Programme {
    /// Configured base points for a position; `None` when unconfigured.
    #[inline]
    pub fn points_for(&self, position: Position) -> Option<u32> {
        match position {
            Position::First => self.first_points,
            Position::Second => self.second_points,
            Position::Third => self.third_points,
        }
    }
}

/// One winner entry inside a position list. Individual or team, never both;
/// which one is legal follows from the programme's position type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum WinnerEntry {
    Individual {
        #[cfg_attr(feature = "serde", serde(rename = "chestNumber"))]
        chest_number: ChestNumber,
        #[cfg_attr(feature = "serde", serde(default))]
        grade: Option<String>,
    },
    Team {
        #[cfg_attr(feature = "serde", serde(rename = "teamCode"))]
        team_code: TeamCode,
        #[cfg_attr(feature = "serde", serde(default))]
        grade: Option<String>,
    },
}

impl WinnerEntry {
    /// Raw identifier text (chest number or team code) for diagnostics and
    /// achievement keys.
    pub fn identifier(&self) -> &str {
        match self {
            WinnerEntry::Individual { chest_number, .. } => chest_number.as_str(),
            WinnerEntry::Team { team_code, .. } => team_code.as_str(),
        }
    }

    pub fn grade(&self) -> Option<&str> {
        match self {
            WinnerEntry::Individual { grade, .. } | WinnerEntry::Team { grade, .. } => {
                grade.as_deref()
            }
        }
    }
}

/// Recorded result for one programme: up to three position lists of winner
/// entries plus a lifecycle status.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResultDoc {
    pub id: ResultId,
    pub programme_id: ProgrammeId,
    pub status: ResultStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub first_place: Vec<WinnerEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub second_place: Vec<WinnerEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub third_place: Vec<WinnerEntry>,
}

impl ResultDoc {
    /// Winner entries for one position list.
    #[inline]
    pub fn position_list(&self, position: Position) -> &[WinnerEntry] {
        match position {
            Position::First => &self.first_place,
            Position::Second => &self.second_place,
            Position::Third => &self.third_place,
        }
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_scopes() {
        let published = StatusFilter::Published;
        assert!(published.admits(ResultStatus::Published));
        assert!(!published.admits(ResultStatus::Checked));
        assert!(!published.admits(ResultStatus::Draft));

        let preview = StatusFilter::PublishedAndChecked;
        assert!(preview.admits(ResultStatus::Published));
        assert!(preview.admits(ResultStatus::Checked));
        assert!(!preview.admits(ResultStatus::Draft));
    }

    #[test]
    fn programme_points_default_to_none() {
        let p = Programme {
            id: "P1".parse().unwrap(),
            name: "Elocution".into(),
            category: Category::Arts,
            subcategory: Subcategory::Stage,
            section: Section::Senior,
            position_type: PositionType::Individual,
            first_points: Some(15),
            second_points: None,
            third_points: Some(5),
        };
        assert_eq!(p.points_for(Position::First), Some(15));
        assert_eq!(p.points_for(Position::Second), None);
        assert_eq!(p.points_for(Position::Third), Some(5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn winner_entry_wire_shapes() {
        let w: WinnerEntry =
            serde_json::from_str(r#"{"chestNumber":"SMD001","grade":"A"}"#).unwrap();
        assert_eq!(w.identifier(), "SMD001");
        assert_eq!(w.grade(), Some("A"));

        let w: WinnerEntry = serde_json::from_str(r#"{"teamCode":"JNB"}"#).unwrap();
        assert!(matches!(w, WinnerEntry::Team { .. }));
        assert_eq!(w.grade(), None);
    }
}
