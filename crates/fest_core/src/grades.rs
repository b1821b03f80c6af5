//! Grade scale: ordered letter-grade to bonus-point table.
//!
//! Exactly one scale is active per engine invocation (it rides inside
//! `ScoringConfig`), so every consumer sees the same bonus for the same
//! grade. Lookups are case-insensitive; unknown or empty grades score zero.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One step of the scale.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradeStep {
    pub grade: String,
    pub bonus: u32,
}

/// Fixed ordered grade table. First occurrence of a letter wins; later
/// duplicates are ignored at lookup time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GradeScale {
    steps: Vec<GradeStep>,
}

impl GradeScale {
    pub fn new(steps: Vec<GradeStep>) -> Self {
        GradeScale { steps }
    }

    pub fn steps(&self) -> &[GradeStep] {
        &self.steps
    }

    /// Bonus points for a grade letter. `None`, empty, or unknown grades
    /// yield 0 rather than an error; messy grade data must not abort a run.
    pub fn bonus_for(&self, grade: Option<&str>) -> u32 {
        let Some(g) = grade else { return 0 };
        let g = g.trim();
        if g.is_empty() {
            return 0;
        }
        self.steps
            .iter()
            .find(|step| step.grade.eq_ignore_ascii_case(g))
            .map(|step| step.bonus)
            .unwrap_or(0)
    }
}

impl Default for GradeScale {
    /// The conventional A/B/C scheme.
    fn default() -> Self {
        GradeScale {
            steps: alloc::vec![
                GradeStep { grade: String::from("A"), bonus: 5 },
                GradeStep { grade: String::from("B"), bonus: 3 },
                GradeStep { grade: String::from("C"), bonus: 1 },
            ],
        }
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_lookup() {
        let scale = GradeScale::default();
        assert_eq!(scale.bonus_for(Some("A")), 5);
        assert_eq!(scale.bonus_for(Some("b")), 3);
        assert_eq!(scale.bonus_for(Some(" C ")), 1);
    }

    #[test]
    fn unknown_or_empty_grade_is_zero() {
        let scale = GradeScale::default();
        assert_eq!(scale.bonus_for(None), 0);
        assert_eq!(scale.bonus_for(Some("")), 0);
        assert_eq!(scale.bonus_for(Some("Z")), 0);
    }

    #[test]
    fn first_duplicate_wins() {
        let scale = GradeScale::new(alloc::vec![
            GradeStep { grade: String::from("A"), bonus: 10 },
            GradeStep { grade: String::from("a"), bonus: 7 },
        ]);
        assert_eq!(scale.bonus_for(Some("A")), 10);
    }
}
