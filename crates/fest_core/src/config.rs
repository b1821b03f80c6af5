//! Scoring configuration: the grade scale plus the chest-number decode rules.
//!
//! Everything the engine treats as tunable lives here and is passed in at
//! call time. Aggregation code carries no inline point tables or team-code
//! ranges of its own.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::grades::GradeScale;
use crate::ids::TeamCode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive numeric chest-number range owned by one team.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NumericRange {
    pub lo: u32,
    pub hi: u32,
    pub team_code: TeamCode,
}

/// Last-resort rules for decoding a team from a chest number's lexical form.
/// Used only when no participant record exists for the identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TeamDecodeRules {
    /// 2-letter prefix to canonical team code (e.g. `SM` to `SMD`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefix_remap: BTreeMap<String, TeamCode>,
    /// Numeric chest-number ranges per team, non-overlapping.
    #[cfg_attr(feature = "serde", serde(default))]
    pub numeric_ranges: Vec<NumericRange>,
}

/// Full scoring configuration for one engine invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScoringConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub grade_scale: GradeScale,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decode: TeamDecodeRules,
}

/// Domain violations in a scoring configuration. These are configuration
/// bugs, not data errors, and fail fast before any aggregation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Remap keys must be exactly two ASCII letters.
    BadRemapKey(String),
    /// Range with `lo > hi`.
    InvertedRange { lo: u32, hi: u32 },
    /// Two ranges overlap; ownership of the shared numbers would be ambiguous.
    OverlappingRanges { first_lo: u32, first_hi: u32, second_lo: u32, second_hi: u32 },
    /// Duplicate grade letter with conflicting bonus values.
    ConflictingGrade(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BadRemapKey(k) => {
                write!(f, "prefix remap key must be two ASCII letters: {k:?}")
            }
            ConfigError::InvertedRange { lo, hi } => {
                write!(f, "numeric range has lo > hi: {lo}..={hi}")
            }
            ConfigError::OverlappingRanges { first_lo, first_hi, second_lo, second_hi } => {
                write!(
                    f,
                    "numeric ranges overlap: {first_lo}..={first_hi} and {second_lo}..={second_hi}"
                )
            }
            ConfigError::ConflictingGrade(g) => {
                write!(f, "grade {g:?} appears twice with different bonus values")
            }
        }
    }
}

/// Validate a configuration's domains. Overlapping numeric ranges are the
/// historical failure mode for chest-number decoding and are rejected here
/// rather than resolved by precedence.
pub fn validate_domains(cfg: &ScoringConfig) -> Result<(), ConfigError> {
    for key in cfg.decode.prefix_remap.keys() {
        if key.len() != 2 || !key.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::BadRemapKey(key.clone()));
        }
    }

    for r in &cfg.decode.numeric_ranges {
        if r.lo > r.hi {
            return Err(ConfigError::InvertedRange { lo: r.lo, hi: r.hi });
        }
    }
    // Pairwise overlap check on a sorted copy; adjacent comparison suffices.
    let mut sorted: Vec<&NumericRange> = cfg.decode.numeric_ranges.iter().collect();
    sorted.sort_by_key(|r| (r.lo, r.hi));
    for pair in sorted.windows(2) {
        if pair[1].lo <= pair[0].hi {
            return Err(ConfigError::OverlappingRanges {
                first_lo: pair[0].lo,
                first_hi: pair[0].hi,
                second_lo: pair[1].lo,
                second_hi: pair[1].hi,
            });
        }
    }

    let mut seen: BTreeMap<String, u32> = BTreeMap::new();
    for step in cfg.grade_scale.steps() {
        let key = step.grade.to_ascii_uppercase();
        if let Some(&bonus) = seen.get(&key) {
            if bonus != step.bonus {
                return Err(ConfigError::ConflictingGrade(step.grade.clone()));
            }
        } else {
            seen.insert(key, step.bonus);
        }
    }

    Ok(())
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lo: u32, hi: u32) -> NumericRange {
        NumericRange { lo, hi, team_code: "SMD".parse().unwrap() }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_domains(&ScoringConfig::default()), Ok(()));
    }

    #[test]
    fn rejects_bad_remap_key() {
        let mut cfg = ScoringConfig::default();
        cfg.decode
            .prefix_remap
            .insert("S1".into(), "SMD".parse().unwrap());
        assert!(matches!(
            validate_domains(&cfg),
            Err(ConfigError::BadRemapKey(_))
        ));
    }

    #[test]
    fn rejects_inverted_and_overlapping_ranges() {
        let mut cfg = ScoringConfig::default();
        cfg.decode.numeric_ranges = alloc::vec![range(200, 100)];
        assert!(matches!(
            validate_domains(&cfg),
            Err(ConfigError::InvertedRange { .. })
        ));

        cfg.decode.numeric_ranges = alloc::vec![range(100, 199), range(150, 250)];
        assert!(matches!(
            validate_domains(&cfg),
            Err(ConfigError::OverlappingRanges { .. })
        ));

        cfg.decode.numeric_ranges = alloc::vec![range(100, 199), range(200, 299)];
        assert_eq!(validate_domains(&cfg), Ok(()));
    }

    #[test]
    fn rejects_conflicting_grades() {
        use crate::grades::{GradeScale, GradeStep};
        let mut cfg = ScoringConfig::default();
        cfg.grade_scale = GradeScale::new(alloc::vec![
            GradeStep { grade: "A".into(), bonus: 5 },
            GradeStep { grade: "a".into(), bonus: 4 },
        ]);
        assert!(matches!(
            validate_domains(&cfg),
            Err(ConfigError::ConflictingGrade(_))
        ));
    }
}
